use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/habits", get(handlers::list_habits).post(handlers::create_habit))
        .route("/api/habits/:id", delete(handlers::delete_habit))
        .route("/api/habits/:id/toggle", post(handlers::toggle_habit))
        .route("/api/quote", get(handlers::get_quote))
        .route(
            "/api/permission",
            get(handlers::get_permission).post(handlers::set_permission),
        )
        .route("/api/notifications", get(handlers::list_notifications))
        .route("/api/notifications/test", post(handlers::test_notification))
        .route("/api/notifications/:id", delete(handlers::dismiss_notification))
        .route("/assets/chime.wav", get(handlers::chime_asset))
        .with_state(state)
}
