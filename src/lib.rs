pub mod app;
pub mod backend;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod mood;
pub mod session;
pub mod state;
pub mod ui;
pub mod wellness;

pub use app::router;
pub use backend::{CompanionBackend, HttpBackend};
pub use config::Config;
pub use errors::{BackendError, SendRejected};
pub use mood::{mood_label, MoodLevel};
pub use session::{ChatSession, PendingExchange, SessionOptions, SessionState, FALLBACK_REPLY};
pub use state::AppState;
