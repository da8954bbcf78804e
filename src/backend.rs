//! Client side of the companion backend.
//!
//! [`CompanionBackend`] is the seam the chat session talks through;
//! [`HttpBackend`] is the reqwest implementation used by the binary. The
//! wellness passthroughs live in `wellness.rs` as more methods on the same
//! client.

use crate::errors::BackendError;
use crate::models::{ChatReply, ChatRequest};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

#[async_trait]
pub trait CompanionBackend: Send + Sync {
    /// Sends one chat message and returns the reply text. Single attempt.
    async fn chat(&self, request: &ChatRequest) -> Result<String, BackendError>;
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    user_id: i64,
    pub(crate) http: Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, user_id: i64) -> Self {
        Self::with_client(Client::new(), base_url, user_id)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>, user_id: i64) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            user_id,
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Classifies a backend response: non-2xx is a protocol error, a body that
/// does not decode into `T` is a format error.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let status = response.status();
    if !status.is_success() {
        return Err(BackendError::Protocol {
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl CompanionBackend for HttpBackend {
    async fn chat(&self, request: &ChatRequest) -> Result<String, BackendError> {
        let response = self
            .http
            .post(self.url("/api/chat"))
            .json(request)
            .send()
            .await?;
        let reply: ChatReply = read_json(response).await?;

        if let Some(tone) = reply.mood_analysis.as_deref() {
            debug!("companion reply tone: {tone}");
        }

        Ok(reply.response)
    }
}
