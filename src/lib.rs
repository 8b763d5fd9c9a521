pub mod app;
pub mod dashboard;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod selector;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use selector::{select, Selection};
pub use state::AppState;
pub use storage::{load_data, resolve_data_path};
