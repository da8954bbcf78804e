use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SCREENING_QUESTIONS: usize = 7;
pub const MAX_SCREENING_ANSWER: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in the chat transcript. Fields are read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    content: String,
    created_at: DateTime<Utc>,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Moves the timestamp forward to `floor` if it is earlier.
    pub(crate) fn not_before(&mut self, floor: DateTime<Utc>) {
        self.created_at = self.created_at.max(floor);
    }
}

/// Body of `POST /api/chat` on the companion backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub mood: String,
    pub user_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub mood_analysis: Option<String>,
}

// Requests accepted by this client's own JSON API.

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
    #[serde(default)]
    pub mood_level: Option<u8>,
    #[serde(default)]
    pub user_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveMoodRequest {
    pub mood_level: u8,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Deserialize)]
pub struct JournalRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ScreeningRequest {
    pub answers: Vec<u8>,
}

#[derive(Debug, Deserialize)]
pub struct HabitRequest {
    pub habit: String,
}

// Backend payloads for the wellness endpoints.

#[derive(Debug, Serialize)]
pub struct MoodEntry {
    pub user_id: i64,
    pub mood: String,
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodRecord {
    pub user_id: i64,
    pub mood: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
pub struct JournalEntry {
    pub user_id: i64,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalRecord {
    pub user_id: i64,
    pub text: String,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
pub struct ScreeningSubmission {
    pub user_id: i64,
    pub answers: [u8; SCREENING_QUESTIONS],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub score: u32,
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitRecord {
    pub user_id: i64,
    pub habit: String,
    #[serde(default)]
    pub completed: bool,
}

/// `{msg, data}` envelope the backend wraps created records in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Saved<T> {
    pub msg: String,
    pub data: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMessage {
    pub msg: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodTips {
    pub mood_level: u8,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendHealth {
    pub status: String,
    #[serde(default)]
    pub groq_api: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub backend: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_detail: Option<BackendHealth>,
}
