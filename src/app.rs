use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/session", get(handlers::get_session))
        .route("/api/chat", post(handlers::send_message))
        .route("/api/mood", get(handlers::mood_history).post(handlers::save_mood))
        .route("/api/mood-tips/:level", get(handlers::mood_tips))
        .route("/api/journal", get(handlers::journal_entries).post(handlers::append_journal))
        .route("/api/screening", post(handlers::submit_screening))
        .route("/api/habits", get(handlers::habits).post(handlers::add_habit))
        .route("/api/habits/complete", post(handlers::complete_habit))
        .route("/api/health", get(handlers::health))
        .with_state(state)
}
