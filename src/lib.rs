pub mod app;
pub mod badge;
pub mod cache;
pub mod errors;
pub mod github;
pub mod handlers;
pub mod models;
pub mod period;
pub mod state;

pub use app::router;
pub use state::AppState;
