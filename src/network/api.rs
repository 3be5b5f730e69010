use async_trait::async_trait;

use crate::common::Message;
use crate::common::types::{OnlineCountResponse, RegisterResponse};
use crate::error::ApiError;

/// The five calls the chat server exposes.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// `POST /api/users/register/`
    async fn register(&self, session_id: &str) -> Result<RegisterResponse, ApiError>;

    /// `POST /api/users/heartbeat/`; the response body is ignored.
    async fn heartbeat(&self, session_id: &str, username: &str) -> Result<(), ApiError>;

    /// `GET /api/users/online/`
    async fn online_count(&self) -> Result<OnlineCountResponse, ApiError>;

    /// `GET /api/messages/`, in server order.
    async fn list_messages(&self) -> Result<Vec<Message>, ApiError>;

    /// `POST /api/messages/`
    async fn send_message(&self, username: &str, message_text: &str)
    -> Result<Message, ApiError>;
}
