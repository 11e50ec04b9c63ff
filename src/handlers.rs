use crate::chime;
use crate::errors::AppError;
use crate::models::{Habit, NewHabit, PermissionRequest, PermissionResponse, TestNotificationResponse};
use crate::notify::{ActiveNotification, Notification};
use crate::quotes::{self, Quote};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use uuid::Uuid;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let habits = state.store.list().await;
    Html(render_index(&habits))
}

pub async fn list_habits(State(state): State<AppState>) -> Json<Vec<Habit>> {
    Json(state.store.list().await)
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(payload): Json<NewHabit>,
) -> Result<(StatusCode, Json<Habit>), AppError> {
    let habit = payload.into_habit().map_err(AppError::bad_request)?;
    let habit = state.store.add(habit).await?;
    Ok((StatusCode::CREATED, Json(habit)))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.store.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_habit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Habit>, AppError> {
    match state.store.toggle(id).await? {
        Some(habit) => Ok(Json(habit)),
        None => Err(AppError::not_found("no habit with that id")),
    }
}

pub async fn get_quote(State(state): State<AppState>) -> Json<Quote> {
    Json(quotes::quote_of_the_day(&state).await)
}

pub async fn get_permission(State(state): State<AppState>) -> Json<PermissionResponse> {
    Json(PermissionResponse {
        permission: state.notifier.permission().await,
    })
}

pub async fn set_permission(
    State(state): State<AppState>,
    Json(payload): Json<PermissionRequest>,
) -> Result<Json<PermissionResponse>, AppError> {
    state.notifier.set_permission(payload.permission).await;
    state.store.set_permission(payload.permission).await?;
    Ok(Json(PermissionResponse {
        permission: state.notifier.permission().await,
    }))
}

pub async fn list_notifications(State(state): State<AppState>) -> Json<Vec<ActiveNotification>> {
    let entries = match state.notifier.outbox() {
        Some(outbox) => outbox.active().await,
        None => Vec::new(),
    };
    Json(entries)
}

pub async fn dismiss_notification(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> StatusCode {
    if let Some(outbox) = state.notifier.outbox() {
        outbox.dismiss(id).await;
    }
    StatusCode::NO_CONTENT
}

pub async fn test_notification(State(state): State<AppState>) -> Json<TestNotificationResponse> {
    let outcome = state.notifier.show(Notification::test()).await;
    Json(TestNotificationResponse {
        outcome,
        permission: state.notifier.permission().await,
    })
}

pub async fn chime_asset() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "audio/wav")], chime::chime_wav())
}
