pub mod app;
pub mod chime;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod notify;
pub mod quotes;
pub mod scheduler;
pub mod storage;
pub mod store;
pub mod ui;
pub mod state;

pub use app::router;
pub use state::AppState;
pub use storage::{load_data, resolve_data_path};
