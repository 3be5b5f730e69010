use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain model đại diện một tin nhắn chat.
///
/// `id` is assigned by the server; copies that never came from the server may
/// lack it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub username: String,
    pub message_text: String,
    pub timestamp: DateTime<Utc>,
}

/// Phiên ẩn danh của client: session id do client sinh ra và tên hiển thị do
/// server cấp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub session_id: String,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub session_id: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub username: String,
}

/// The server also expects the display name so it can recreate a presence
/// record that expired.
#[derive(Debug, Serialize)]
pub struct HeartbeatRequest<'a> {
    pub session_id: &'a str,
    pub username: &'a str,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OnlineCountResponse {
    #[serde(alias = "online_count")]
    pub count: u32,
}

#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub username: &'a str,
    pub message_text: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_decodes_server_payload() {
        let json = r#"{
            "id": 7,
            "username": "Гость-1234",
            "message_text": "привет",
            "timestamp": "2024-03-05T09:07:00.123456+03:00"
        }"#;

        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.id, Some(7));
        assert_eq!(message.username, "Гость-1234");
        assert_eq!(message.timestamp.to_rfc3339(), "2024-03-05T06:07:00.123456+00:00");
    }

    #[test]
    fn online_count_accepts_both_field_names() {
        let short: OnlineCountResponse = serde_json::from_str(r#"{"count": 3}"#).unwrap();
        let long: OnlineCountResponse = serde_json::from_str(r#"{"online_count": 5}"#).unwrap();
        assert_eq!(short.count, 3);
        assert_eq!(long.count, 5);
    }

    #[test]
    fn send_request_uses_wire_field_names() {
        let body = serde_json::to_value(SendMessageRequest {
            username: "Guest42",
            message_text: "hello",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"username": "Guest42", "message_text": "hello"}));
    }
}
