use crate::errors::AppError;
use crate::models::{
    HabitRecord, HabitRequest, HealthResponse, JournalRecord, JournalRequest, MoodRecord, MoodTips,
    Saved, SaveMoodRequest, ScreeningRequest, ScreeningResult, SendMessageRequest, StatusMessage,
};
use crate::mood::MoodLevel;
use crate::session::SessionState;
use crate::state::AppState;
use crate::ui::render_index;
use crate::wellness::validate_screening;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use tracing::warn;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.session.snapshot();
    Html(render_index(&snapshot))
}

pub async fn get_session(State(state): State<AppState>) -> Json<SessionState> {
    Json(state.session.snapshot())
}

/// Accepts a chat message and answers before the backend does; the reply
/// shows up in later `GET /api/session` snapshots.
pub async fn send_message(
    State(state): State<AppState>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<SessionState>), AppError> {
    let current = state.session.snapshot();
    let mood_level = match payload.mood_level {
        Some(level) => parse_mood(level)?.get(),
        None => current.mood_level,
    };
    let user_name = payload.user_name.as_deref().unwrap_or_default();

    let exchange = state
        .session
        .send_message(&payload.message, mood_level, user_name)?;
    tokio::spawn(exchange.resolve());

    Ok((StatusCode::ACCEPTED, Json(state.session.snapshot())))
}

pub async fn save_mood(
    State(state): State<AppState>,
    Json(payload): Json<SaveMoodRequest>,
) -> Result<Json<Saved<MoodRecord>>, AppError> {
    let level = parse_mood(payload.mood_level)?;
    state.session.set_mood_level(level.get());
    let saved = state.backend.save_mood(level, payload.note.trim()).await?;
    Ok(Json(saved))
}

pub async fn mood_history(State(state): State<AppState>) -> Result<Json<Vec<MoodRecord>>, AppError> {
    Ok(Json(state.backend.mood_history().await?))
}

pub async fn append_journal(
    State(state): State<AppState>,
    Json(payload): Json<JournalRequest>,
) -> Result<Json<Saved<JournalRecord>>, AppError> {
    let text = non_blank(&payload.text, "journal entry")?;
    Ok(Json(state.backend.append_journal(text).await?))
}

pub async fn journal_entries(
    State(state): State<AppState>,
) -> Result<Json<Vec<JournalRecord>>, AppError> {
    Ok(Json(state.backend.journal_entries().await?))
}

pub async fn submit_screening(
    State(state): State<AppState>,
    Json(payload): Json<ScreeningRequest>,
) -> Result<Json<ScreeningResult>, AppError> {
    let answers = validate_screening(&payload.answers).map_err(AppError::bad_request)?;
    Ok(Json(state.backend.submit_screening(answers).await?))
}

pub async fn add_habit(
    State(state): State<AppState>,
    Json(payload): Json<HabitRequest>,
) -> Result<Json<Saved<HabitRecord>>, AppError> {
    let habit = non_blank(&payload.habit, "habit")?;
    Ok(Json(state.backend.add_habit(habit).await?))
}

pub async fn complete_habit(
    State(state): State<AppState>,
    Json(payload): Json<HabitRequest>,
) -> Result<Json<StatusMessage>, AppError> {
    let habit = non_blank(&payload.habit, "habit")?;
    Ok(Json(state.backend.complete_habit(habit).await?))
}

pub async fn habits(State(state): State<AppState>) -> Result<Json<Vec<HabitRecord>>, AppError> {
    Ok(Json(state.backend.habits().await?))
}

pub async fn mood_tips(
    State(state): State<AppState>,
    Path(level): Path<u8>,
) -> Result<Json<MoodTips>, AppError> {
    let level = parse_mood(level)?;
    Ok(Json(state.backend.mood_tips(level).await?))
}

/// Always 200 while this process is up; backend trouble is reported in the body.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let response = match state.backend.health().await {
        Ok(detail) => HealthResponse {
            status: "ok".to_string(),
            backend: detail.status.clone(),
            backend_detail: Some(detail),
        },
        Err(err) => {
            warn!("backend health check failed: {err}");
            HealthResponse {
                status: "ok".to_string(),
                backend: "unreachable".to_string(),
                backend_detail: None,
            }
        }
    };
    Json(response)
}

fn parse_mood(level: u8) -> Result<MoodLevel, AppError> {
    MoodLevel::try_from(level).map_err(AppError::bad_request)
}

fn non_blank<'a>(value: &'a str, what: &str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::bad_request(format!("{what} must not be empty")));
    }
    Ok(trimmed)
}
