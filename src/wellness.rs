//! Passthrough calls for the mood, journal, screening and habit views.
//! None of these hold local state; the backend owns storage and scoring.

use crate::backend::{read_json, HttpBackend};
use crate::errors::BackendError;
use crate::models::{
    BackendHealth, HabitRecord, JournalEntry, JournalRecord, MoodEntry, MoodRecord, MoodTips,
    Saved, ScreeningResult, ScreeningSubmission, StatusMessage, MAX_SCREENING_ANSWER,
    SCREENING_QUESTIONS,
};
use crate::mood::MoodLevel;

/// Checks a questionnaire answer sheet: seven answers, each 0-3.
pub fn validate_screening(answers: &[u8]) -> Result<[u8; SCREENING_QUESTIONS], String> {
    let sheet: [u8; SCREENING_QUESTIONS] = answers.try_into().map_err(|_| {
        format!(
            "expected {SCREENING_QUESTIONS} answers, got {}",
            answers.len()
        )
    })?;

    if let Some((index, value)) = sheet
        .iter()
        .enumerate()
        .find(|(_, value)| **value > MAX_SCREENING_ANSWER)
    {
        return Err(format!(
            "answer {} must be 0-{MAX_SCREENING_ANSWER}, got {value}",
            index + 1
        ));
    }

    Ok(sheet)
}

impl HttpBackend {
    pub async fn save_mood(&self, level: MoodLevel, note: &str) -> Result<Saved<MoodRecord>, BackendError> {
        let entry = MoodEntry {
            user_id: self.user_id(),
            mood: level.label().to_string(),
            note: note.to_string(),
        };
        let response = self.http.post(self.url("/mood/add")).json(&entry).send().await?;
        read_json(response).await
    }

    pub async fn mood_history(&self) -> Result<Vec<MoodRecord>, BackendError> {
        let path = format!("/mood/history/{}", self.user_id());
        let response = self.http.get(self.url(&path)).send().await?;
        read_json(response).await
    }

    pub async fn append_journal(&self, text: &str) -> Result<Saved<JournalRecord>, BackendError> {
        let entry = JournalEntry {
            user_id: self.user_id(),
            text: text.to_string(),
        };
        let response = self.http.post(self.url("/journal/add")).json(&entry).send().await?;
        read_json(response).await
    }

    pub async fn journal_entries(&self) -> Result<Vec<JournalRecord>, BackendError> {
        let path = format!("/journal/{}", self.user_id());
        let response = self.http.get(self.url(&path)).send().await?;
        read_json(response).await
    }

    pub async fn submit_screening(
        &self,
        answers: [u8; SCREENING_QUESTIONS],
    ) -> Result<ScreeningResult, BackendError> {
        let submission = ScreeningSubmission {
            user_id: self.user_id(),
            answers,
        };
        let response = self
            .http
            .post(self.url("/anxiety_test"))
            .json(&submission)
            .send()
            .await?;
        read_json(response).await
    }

    pub async fn add_habit(&self, habit: &str) -> Result<Saved<HabitRecord>, BackendError> {
        let record = HabitRecord {
            user_id: self.user_id(),
            habit: habit.to_string(),
            completed: false,
        };
        let response = self.http.post(self.url("/habit/add")).json(&record).send().await?;
        read_json(response).await
    }

    pub async fn complete_habit(&self, habit: &str) -> Result<StatusMessage, BackendError> {
        let user_id = self.user_id().to_string();
        let response = self
            .http
            .post(self.url("/habit/complete"))
            .query(&[("user_id", user_id.as_str()), ("habit", habit)])
            .send()
            .await?;
        read_json(response).await
    }

    pub async fn habits(&self) -> Result<Vec<HabitRecord>, BackendError> {
        let path = format!("/habit/{}", self.user_id());
        let response = self.http.get(self.url(&path)).send().await?;
        read_json(response).await
    }

    pub async fn mood_tips(&self, level: MoodLevel) -> Result<MoodTips, BackendError> {
        let path = format!("/api/mood-tips/{}", level.get());
        let response = self.http.get(self.url(&path)).send().await?;
        read_json(response).await
    }

    pub async fn health(&self) -> Result<BackendHealth, BackendError> {
        let response = self.http.get(self.url("/health")).send().await?;
        read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::tests::spawn_stub;
    use axum::{
        extract::{Path, Query},
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;

    #[test]
    fn screening_requires_seven_answers() {
        assert!(validate_screening(&[0; 6]).is_err());
        assert!(validate_screening(&[0; 8]).is_err());
        assert_eq!(validate_screening(&[1, 2, 3, 0, 1, 2, 3]).unwrap(), [1, 2, 3, 0, 1, 2, 3]);
    }

    #[test]
    fn screening_rejects_answers_above_three() {
        let err = validate_screening(&[0, 0, 4, 0, 0, 0, 0]).unwrap_err();
        assert!(err.contains("answer 3"));
    }

    #[tokio::test]
    async fn save_mood_sends_label_and_user_id() {
        let router = Router::new().route(
            "/mood/add",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "msg": "Mood saved!",
                    "data": {
                        "user_id": body["user_id"],
                        "mood": body["mood"],
                        "note": body["note"],
                        "timestamp": "2026-10-16T09:30:00.123456"
                    }
                }))
            }),
        );
        let backend = HttpBackend::new(spawn_stub(router).await, 3);

        let saved = backend
            .save_mood(MoodLevel::new(2).unwrap(), "rough morning")
            .await
            .unwrap();
        assert_eq!(saved.msg, "Mood saved!");
        assert_eq!(saved.data.user_id, 3);
        assert_eq!(saved.data.mood, "Down");
        assert_eq!(saved.data.note, "rough morning");
        assert!(saved.data.timestamp.is_some());
    }

    #[tokio::test]
    async fn screening_result_is_passed_through() {
        let router = Router::new().route(
            "/anxiety_test",
            post(|Json(body): Json<Value>| async move {
                let score: u64 = body["answers"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|v| v.as_u64().unwrap())
                    .sum();
                Json(json!({ "score": score, "level": "Mild anxiety" }))
            }),
        );
        let backend = HttpBackend::new(spawn_stub(router).await, 1);

        let result = backend.submit_screening([1, 1, 1, 1, 1, 0, 0]).await.unwrap();
        assert_eq!(result.score, 5);
        assert_eq!(result.level, "Mild anxiety");
    }

    #[tokio::test]
    async fn complete_habit_uses_query_parameters() {
        let router = Router::new().route(
            "/habit/complete",
            post(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params.get("user_id").map(String::as_str), Some("1"));
                Json(json!({ "msg": format!("{} updated", params["habit"]) }))
            }),
        );
        let backend = HttpBackend::new(spawn_stub(router).await, 1);

        let status = backend.complete_habit("drink water").await.unwrap();
        assert_eq!(status.msg, "drink water updated");
    }

    #[tokio::test]
    async fn habits_are_listed_for_configured_user() {
        let router = Router::new().route(
            "/habit/:user_id",
            get(|Path(user_id): Path<i64>| async move {
                Json(json!([{ "user_id": user_id, "habit": "walk", "completed": true }]))
            }),
        );
        let backend = HttpBackend::new(spawn_stub(router).await, 9);

        let habits = backend.habits().await.unwrap();
        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].user_id, 9);
        assert!(habits[0].completed);
    }

    #[tokio::test]
    async fn add_habit_starts_incomplete() {
        let router = Router::new().route(
            "/habit/add",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["completed"], false);
                Json(json!({ "msg": "Habit added", "data": body }))
            }),
        );
        let backend = HttpBackend::new(spawn_stub(router).await, 4);

        let saved = backend.add_habit("stretch").await.unwrap();
        assert_eq!(saved.msg, "Habit added");
        assert_eq!(saved.data.user_id, 4);
        assert_eq!(saved.data.habit, "stretch");
        assert!(!saved.data.completed);
    }

    #[tokio::test]
    async fn mood_history_is_fetched_by_user_id() {
        let router = Router::new().route(
            "/mood/history/:user_id",
            get(|Path(user_id): Path<i64>| async move {
                Json(json!([
                    { "user_id": user_id, "mood": "Okay", "note": "", "timestamp": "2026-10-15T20:00:00" },
                    { "user_id": user_id, "mood": "Great", "note": "gym" }
                ]))
            }),
        );
        let backend = HttpBackend::new(spawn_stub(router).await, 6);

        let history = backend.mood_history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|record| record.user_id == 6));
        assert_eq!(history[0].mood, "Okay");
        assert!(history[0].timestamp.is_some());
        assert_eq!(history[1].note, "gym");
        assert!(history[1].timestamp.is_none());
    }

    #[tokio::test]
    async fn journal_entries_are_fetched_by_user_id() {
        let router = Router::new().route(
            "/journal/:user_id",
            get(|Path(user_id): Path<i64>| async move {
                Json(json!([{ "user_id": user_id, "text": "slept well", "timestamp": "2026-10-16T07:45:10.5" }]))
            }),
        );
        let backend = HttpBackend::new(spawn_stub(router).await, 2);

        let entries = backend.journal_entries().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user_id, 2);
        assert_eq!(entries[0].text, "slept well");
        assert!(entries[0].timestamp.is_some());
    }

    #[tokio::test]
    async fn mood_tips_are_fetched_by_level() {
        let router = Router::new().route(
            "/api/mood-tips/:level",
            get(|Path(level): Path<u8>| async move {
                Json(json!({ "mood_level": level, "tips": ["Practice deep breathing", "Reach out to a trusted friend"] }))
            }),
        );
        let backend = HttpBackend::new(spawn_stub(router).await, 1);

        let tips = backend.mood_tips(MoodLevel::new(1).unwrap()).await.unwrap();
        assert_eq!(tips.mood_level, 1);
        assert_eq!(tips.tips.len(), 2);
        assert_eq!(tips.tips[0], "Practice deep breathing");
    }
}
