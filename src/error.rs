use thiserror::Error;

/// Errors surfaced by the chat HTTP API.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, reset, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("server responded with status {status}{}", message_suffix(.message))]
    Status { status: u16, message: Option<String> },

    /// The response body could not be decoded into the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|message| format!(": {message}"))
        .unwrap_or_default()
}

impl ApiError {
    /// Text shown to the user: the server-supplied message when there is one,
    /// a generic description otherwise.
    pub fn user_detail(&self) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Status {
                status,
                message: None,
            } => format!("сервер ответил кодом {status}"),
            ApiError::Network(_) => "не удалось связаться с сервером".to_string(),
            ApiError::Decode(_) => "некорректный ответ сервера".to_string(),
            ApiError::InvalidUrl(_) => "некорректный адрес сервера".to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum RegistrationError {
    #[error("registration request failed: {0}")]
    Transport(#[from] ApiError),

    #[error("registration response carried no username")]
    MissingUsername,
}

impl RegistrationError {
    pub fn user_detail(&self) -> String {
        match self {
            RegistrationError::Transport(err) => err.user_detail(),
            RegistrationError::MissingUsername => "сервер не выдал имя пользователя".to_string(),
        }
    }
}

/// Any failure that keeps the client from reaching `Ready`.
#[derive(Debug, Clone, Error)]
pub enum StartupError {
    #[error("chat client was already started")]
    AlreadyStarted,

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error("initial message fetch failed: {0}")]
    InitialMessages(#[source] ApiError),

    #[error("initial online count fetch failed: {0}")]
    InitialOnlineCount(#[source] ApiError),

    #[error("chat client was disposed during startup")]
    Disposed,
}

impl StartupError {
    pub fn user_message(&self) -> String {
        let detail = match self {
            StartupError::Registration(err) => err.user_detail(),
            StartupError::InitialMessages(err) | StartupError::InitialOnlineCount(err) => {
                err.user_detail()
            }
            StartupError::AlreadyStarted | StartupError::Disposed => self.to_string(),
        };
        format!("Ошибка при инициализации чата: {detail}")
    }
}

/// User-facing text for a failed submission.
pub fn send_error_message(err: &ApiError) -> String {
    format!("Ошибка при отправке сообщения: {}", err.user_detail())
}
