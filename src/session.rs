//! The chat session: an append-only transcript plus the single in-flight
//! request to the companion backend.
//!
//! ```text
//! IDLE --send(valid)--> PENDING --reply--> IDLE (+assistant turn)
//! IDLE --send(valid)--> PENDING --error--> IDLE (+fallback turn)
//! PENDING --send(non-blank)--> PENDING (Busy)
//! IDLE --send(blank)--> IDLE (EmptyMessage)
//! ```
//!
//! All state sits behind one `watch::Sender`. Only the session and the
//! [`PendingExchange`] it hands out write to it; everyone else reads
//! snapshots or subscribes.

use crate::backend::CompanionBackend;
use crate::errors::{BackendError, SendRejected};
use crate::models::{ChatRequest, Role, Turn};
use crate::mood::{mood_label, DEFAULT_MOOD_LEVEL, MAX_MOOD_LEVEL};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Shown in place of a reply whenever the backend call fails.
pub const FALLBACK_REPLY: &str = "I'm having trouble connecting to my AI brain right now. \
Please check if the backend server is running and try again. \
If you're in crisis, please reach out to a mental health professional immediately.";

pub const DEFAULT_USER_NAME: &str = "Alex";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub transcript: Vec<Turn>,
    pub pending: bool,
    pub mood_level: u8,
    pub user_name: String,
}

impl SessionState {
    fn append(&mut self, turn: &mut Turn) {
        if let Some(last) = self.transcript.last() {
            turn.not_before(last.created_at());
        }
        self.transcript.push(turn.clone());
    }
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub user_name: String,
    pub mood_level: u8,
    /// `None` waits for the backend indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            user_name: DEFAULT_USER_NAME.to_string(),
            mood_level: DEFAULT_MOOD_LEVEL,
            timeout: None,
        }
    }
}

#[derive(Clone)]
pub struct ChatSession {
    inner: Arc<Inner>,
}

struct Inner {
    backend: Arc<dyn CompanionBackend>,
    state: watch::Sender<SessionState>,
    timeout: Option<Duration>,
}

impl ChatSession {
    pub fn new(backend: Arc<dyn CompanionBackend>, options: SessionOptions) -> Self {
        let (state, _) = watch::channel(SessionState {
            transcript: Vec::new(),
            pending: false,
            mood_level: options.mood_level.min(MAX_MOOD_LEVEL),
            user_name: options.user_name,
        });

        Self {
            inner: Arc::new(Inner {
                backend,
                state,
                timeout: options.timeout,
            }),
        }
    }

    /// Appends the user turn and marks the session pending.
    ///
    /// The backend is not called until the returned exchange is resolved.
    /// Blank text and sends made while a reply is pending are rejected and
    /// leave the state untouched. A blank `user_name` keeps the current name.
    pub fn send_message(
        &self,
        text: &str,
        mood_level: u8,
        user_name: &str,
    ) -> Result<PendingExchange, SendRejected> {
        let message = text.trim();
        if message.is_empty() {
            debug!("rejected blank chat message");
            return Err(SendRejected::EmptyMessage);
        }

        let mood_level = mood_level.min(MAX_MOOD_LEVEL);
        let name_override = clean_name(user_name);
        let mut sender_name = String::new();
        let mut turn = Turn::new(Role::User, message, Utc::now());
        let accepted = self.inner.state.send_if_modified(|state| {
            if state.pending {
                return false;
            }
            state.append(&mut turn);
            state.pending = true;
            state.mood_level = mood_level;
            if let Some(name) = name_override {
                state.user_name = name.to_string();
            }
            sender_name = state.user_name.clone();
            true
        });

        if !accepted {
            debug!("rejected chat message: reply still pending");
            return Err(SendRejected::Busy);
        }

        let mood = mood_label(mood_level);
        info!("chat message accepted ({} chars, mood {mood})", message.chars().count());

        Ok(PendingExchange {
            session: self.clone(),
            request: ChatRequest {
                message: message.to_string(),
                mood: mood.to_string(),
                user_name: sender_name,
            },
            settled: false,
        })
    }

    /// Sends and waits for the reply (or fallback) turn.
    pub async fn send_and_wait(
        &self,
        text: &str,
        mood_level: u8,
        user_name: &str,
    ) -> Result<Turn, SendRejected> {
        let exchange = self.send_message(text, mood_level, user_name)?;
        Ok(exchange.resolve().await)
    }

    pub fn snapshot(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    pub fn is_pending(&self) -> bool {
        self.inner.state.borrow().pending
    }

    pub fn set_mood_level(&self, level: u8) {
        let level = level.min(MAX_MOOD_LEVEL);
        self.inner.state.send_if_modified(|state| {
            let changed = state.mood_level != level;
            state.mood_level = level;
            changed
        });
    }

    /// Ignores blank names.
    pub fn set_user_name(&self, name: &str) {
        let Some(name) = clean_name(name) else {
            return;
        };
        self.inner.state.send_if_modified(|state| {
            let changed = state.user_name != name;
            if changed {
                state.user_name = name.to_string();
            }
            changed
        });
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.inner.timeout
    }

    async fn call_backend(&self, request: &ChatRequest) -> Result<String, BackendError> {
        let call = self.inner.backend.chat(request);
        match self.inner.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| BackendError::Transport(format!("no reply within {limit:?}")))?,
            None => call.await,
        }
    }
}

fn clean_name(raw: &str) -> Option<&str> {
    Some(raw.trim()).filter(|name| !name.is_empty())
}

/// One accepted message waiting on the backend.
///
/// Resolving it appends exactly one assistant turn. Dropping it unresolved
/// appends the fallback turn instead, so the session never stays pending
/// behind a cancelled task.
pub struct PendingExchange {
    session: ChatSession,
    request: ChatRequest,
    settled: bool,
}

impl PendingExchange {
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }

    pub async fn resolve(mut self) -> Turn {
        let outcome = self.session.call_backend(&self.request).await;
        self.settle(outcome)
    }

    fn settle(&mut self, outcome: Result<String, BackendError>) -> Turn {
        self.settled = true;
        let content = match outcome {
            Ok(reply) => reply,
            Err(err) => {
                warn!("companion backend call failed ({}): {err}", err.kind());
                FALLBACK_REPLY.to_string()
            }
        };

        let mut turn = Turn::new(Role::Assistant, content, Utc::now());
        self.session.inner.state.send_modify(|state| {
            state.append(&mut turn);
            state.pending = false;
        });
        turn
    }
}

impl Drop for PendingExchange {
    fn drop(&mut self) {
        if !self.settled {
            warn!("chat exchange dropped before the backend replied");
            self.settle(Err(BackendError::Transport("exchange cancelled".into())));
        }
    }
}
