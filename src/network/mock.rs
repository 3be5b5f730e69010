//! Scripted in-memory `ChatApi` for engine tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::common::Message;
use crate::common::types::{OnlineCountResponse, RegisterResponse};
use crate::error::ApiError;

use super::api::ChatApi;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Register(String),
    Heartbeat { session_id: String, username: String },
    OnlineCount,
    ListMessages,
    SendMessage { username: String, message_text: String },
}

/// Each endpoint pops its next queued result. When a queue runs dry the
/// endpoint answers with its fallback (empty feed, count 0, ...).
#[derive(Default)]
pub struct MockChatApi {
    calls: Mutex<Vec<Call>>,
    register: Mutex<VecDeque<Result<RegisterResponse, ApiError>>>,
    heartbeat: Mutex<VecDeque<Result<(), ApiError>>>,
    online: Mutex<VecDeque<Result<u32, ApiError>>>,
    messages: Mutex<VecDeque<Result<Vec<Message>, ApiError>>>,
    send: Mutex<VecDeque<Result<Message, ApiError>>>,
}

impl MockChatApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_register(&self, result: Result<&str, ApiError>) -> &Self {
        let result = result.map(|username| RegisterResponse {
            username: username.to_string(),
        });
        self.register.lock().unwrap().push_back(result);
        self
    }

    pub fn push_heartbeat(&self, result: Result<(), ApiError>) -> &Self {
        self.heartbeat.lock().unwrap().push_back(result);
        self
    }

    pub fn push_online(&self, result: Result<u32, ApiError>) -> &Self {
        self.online.lock().unwrap().push_back(result);
        self
    }

    pub fn push_messages(&self, result: Result<Vec<Message>, ApiError>) -> &Self {
        self.messages.lock().unwrap().push_back(result);
        self
    }

    pub fn push_send(&self, result: Result<Message, ApiError>) -> &Self {
        self.send.lock().unwrap().push_back(result);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|call| predicate(call)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ChatApi for MockChatApi {
    async fn register(&self, session_id: &str) -> Result<RegisterResponse, ApiError> {
        self.record(Call::Register(session_id.to_string()));
        self.register.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(RegisterResponse {
                username: "Гость-0000".to_string(),
            })
        })
    }

    async fn heartbeat(&self, session_id: &str, username: &str) -> Result<(), ApiError> {
        self.record(Call::Heartbeat {
            session_id: session_id.to_string(),
            username: username.to_string(),
        });
        self.heartbeat.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    async fn online_count(&self) -> Result<OnlineCountResponse, ApiError> {
        self.record(Call::OnlineCount);
        self.online
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(0))
            .map(|count| OnlineCountResponse { count })
    }

    async fn list_messages(&self) -> Result<Vec<Message>, ApiError> {
        self.record(Call::ListMessages);
        self.messages.lock().unwrap().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn send_message(&self, username: &str, message_text: &str) -> Result<Message, ApiError> {
        self.record(Call::SendMessage {
            username: username.to_string(),
            message_text: message_text.to_string(),
        });
        self.send.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(message(None, username, message_text))
        })
    }
}

pub fn message(id: Option<i64>, username: &str, text: &str) -> Message {
    Message {
        id,
        username: username.to_string(),
        message_text: text.to_string(),
        timestamp: Utc.with_ymd_and_hms(2024, 3, 5, 9, 7, 0).unwrap(),
    }
}

pub fn network_error() -> ApiError {
    ApiError::Network("connection refused".to_string())
}
