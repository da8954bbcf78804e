use crate::backend::HttpBackend;
use crate::config::Config;
use crate::session::ChatSession;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub session: ChatSession,
    pub backend: Arc<HttpBackend>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let backend = Arc::new(HttpBackend::new(config.backend_url.clone(), config.user_id));
        let session = ChatSession::new(backend.clone(), config.session_options());
        Self { session, backend }
    }
}
