use reqwest::Url;

use crate::error::ApiError;

/// Builds the shared HTTP client. No per-request timeout is set: a hung call
/// only stalls the loop that issued it.
pub fn build_http_client() -> Result<reqwest::Client, ApiError> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("rust_web_chat/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Parses the configured base URL, making sure endpoint paths are appended to
/// it rather than replacing its last segment.
pub fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&with_slash)
        .map_err(|err| ApiError::InvalidUrl(format!("base url `{raw}`: {err}")))
}

/// Joins an endpoint path such as `api/messages/` onto the base URL.
pub fn endpoint(base: &Url, path: &str) -> Result<Url, ApiError> {
    base.join(path.trim_start_matches('/'))
        .map_err(|err| ApiError::InvalidUrl(format!("endpoint `{path}`: {err}")))
}
