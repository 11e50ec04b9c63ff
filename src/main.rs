use std::{env, net::SocketAddr, sync::Arc};

use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use habit_app::notify::{Notifier, Platform};
use habit_app::quotes::{self, QuoteProvider};
use habit_app::scheduler::{self, SystemClock};
use habit_app::state::AppState;
use habit_app::storage::{load_data, resolve_data_path};
use habit_app::store::HabitStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_path = resolve_data_path().await?;
    let data = load_data(&data_path).await;
    let permission = data.permission;
    let store = HabitStore::new(data_path, data);
    let notifier = Notifier::new(Platform::full(), permission);
    let state = AppState::new(
        store,
        notifier,
        QuoteProvider::from_env()?,
        Arc::new(SystemClock),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(scheduler::run(state.clone()));
    tokio::spawn(quotes::run_refresh(state.clone(), shutdown_rx));

    let app = habit_app::router(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_tx))
        .await?;

    Ok(())
}

async fn shutdown_signal(shutdown_tx: watch::Sender<bool>) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        return;
    }
    info!("shutdown signal received");
    let _ = shutdown_tx.send(true);
}
