use std::sync::Arc;

use uuid::Uuid;

use crate::common::Session;
use crate::error::{ApiError, RegistrationError};
use crate::network::ChatApi;

/// Generates a fresh, random session identifier on the client.
pub fn generate_session_id() -> String {
    Uuid::new_v4().to_string()
}

/// Establishes the anonymous session and keeps it marked online.
#[derive(Clone)]
pub struct SessionManager {
    api: Arc<dyn ChatApi>,
    id_source: fn() -> String,
}

impl SessionManager {
    pub fn new(api: Arc<dyn ChatApi>) -> Self {
        Self {
            api,
            id_source: generate_session_id,
        }
    }

    /// Replaces the session id generator.
    pub fn with_id_source(mut self, id_source: fn() -> String) -> Self {
        self.id_source = id_source;
        self
    }

    /// Generates a session id and exchanges it for a display name. No retry.
    pub async fn create_session(&self) -> Result<Session, RegistrationError> {
        let session_id = (self.id_source)();
        log::info!("Registering session {session_id}");

        let response = self.api.register(&session_id).await?;
        let username = response.username.trim();
        if username.is_empty() {
            return Err(RegistrationError::MissingUsername);
        }

        Ok(Session {
            session_id,
            username: username.to_string(),
        })
    }

    pub async fn heartbeat(&self, session: &Session) -> Result<(), ApiError> {
        self.api
            .heartbeat(&session.session_id, &session.username)
            .await
    }

    /// One heartbeat tick. Failures are logged and otherwise ignored.
    pub async fn heartbeat_tick(&self, session: &Session) {
        match self.heartbeat(session).await {
            Ok(()) => log::trace!("Heartbeat sent for {}", session.username),
            Err(err) => log::warn!("Error sending heartbeat: {err}"),
        }
    }
}
