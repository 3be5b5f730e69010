use async_trait::async_trait;
use reqwest::{Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::common::Message;
use crate::common::types::{
    HeartbeatRequest, OnlineCountResponse, RegisterRequest, RegisterResponse, SendMessageRequest,
};
use crate::error::ApiError;

use super::api::ChatApi;
use super::transport::{build_http_client, endpoint, parse_base_url};

const REGISTER_PATH: &str = "api/users/register/";
const HEARTBEAT_PATH: &str = "api/users/heartbeat/";
const ONLINE_PATH: &str = "api/users/online/";
const MESSAGES_PATH: &str = "api/messages/";

/// `ChatApi` over JSON/HTTP.
pub struct HttpChatApi {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpChatApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base_url = parse_base_url(base_url)?;
        log::info!("Chat API base url: {base_url}");
        Ok(Self {
            http: build_http_client()?,
            base_url,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = endpoint(&self.base_url, path)?;
        let response = self.http.get(url).send().await?;
        decode_json(response).await
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response, ApiError> {
        let url = endpoint(&self.base_url, path)?;
        Ok(self.http.post(url).json(body).send().await?)
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn register(&self, session_id: &str) -> Result<RegisterResponse, ApiError> {
        let response = self.post(REGISTER_PATH, &RegisterRequest { session_id }).await?;
        decode_json(response).await
    }

    async fn heartbeat(&self, session_id: &str, username: &str) -> Result<(), ApiError> {
        let response = self
            .post(
                HEARTBEAT_PATH,
                &HeartbeatRequest {
                    session_id,
                    username,
                },
            )
            .await?;
        read_success_body(response).await.map(|_| ())
    }

    async fn online_count(&self) -> Result<OnlineCountResponse, ApiError> {
        self.get_json(ONLINE_PATH).await
    }

    async fn list_messages(&self) -> Result<Vec<Message>, ApiError> {
        self.get_json(MESSAGES_PATH).await
    }

    async fn send_message(
        &self,
        username: &str,
        message_text: &str,
    ) -> Result<Message, ApiError> {
        let response = self
            .post(
                MESSAGES_PATH,
                &SendMessageRequest {
                    username,
                    message_text,
                },
            )
            .await?;
        decode_json(response).await
    }
}

async fn read_success_body(response: Response) -> Result<Vec<u8>, ApiError> {
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: extract_server_message(&body),
        });
    }
    Ok(body.to_vec())
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = read_success_body(response).await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Pulls a human-readable message out of an error body.
///
/// Looks at `message`, then `detail`, then the first string inside a field
/// error list such as `{"message_text": ["Message text cannot be empty."]}`.
pub fn extract_server_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let object = value.as_object()?;

    for key in ["message", "detail"] {
        if let Some(text) = object.get(key).and_then(Value::as_str) {
            if !text.trim().is_empty() {
                return Some(text.to_string());
            }
        }
    }

    object.values().find_map(|field| match field {
        Value::Array(items) => items.iter().find_map(Value::as_str).map(str::to_string),
        _ => None,
    })
}
