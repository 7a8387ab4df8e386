//! Backend HTTP client
//!
//! ## Session handling
//! The backend keys everything off a session cookie set during the browser
//! login flow. A native client has no cookie jar shared with the browser, so
//! the cookie value is copied into the config file and sent verbatim as a
//! `Cookie` header on every request.
//!
//! ## Response Compression
//! reqwest handles gzip transparently when the `gzip` feature is enabled.

use reqwest::header::{COOKIE, HeaderValue};
use serde_json::Value;

use super::{ApiError, PollOutcome, classify};
use crate::actions::{ConfirmRequest, ReportRequest};
use crate::config::ServerConfig;

/// Longest error body kept in [`ApiError::Status`].
const ERROR_BODY_CHARS: usize = 200;

/// Backend API client
#[derive(Debug, Clone)]
pub struct BackendClient {
    http_client: reqwest::Client,
    base_url: String,
    session_cookie: Option<String>,
}

impl BackendClient {
    /// Create a client for the given server.
    ///
    /// The client is configured to:
    /// - Accept gzip-compressed responses
    /// - Send a User-Agent header identifying the application
    pub fn new(
        base_url: impl Into<String>,
        session_cookie: Option<String>,
    ) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base_url.into())?;

        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url,
            session_cookie: session_cookie.filter(|c| !c.trim().is_empty()),
        })
    }

    /// Create a client from the `[server]` config section.
    pub fn from_config(server: &ServerConfig) -> Result<Self, ApiError> {
        Self::new(server.base_url.clone(), server.session_cookie.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL of the update endpoint, forced or routine.
    pub fn update_url(&self, refresh: bool) -> String {
        if refresh {
            self.endpoint("/api/update?refresh=true")
        } else {
            self.endpoint("/api/update")
        }
    }

    /// Where the browser goes to log in.
    pub fn login_url(&self) -> String {
        self.endpoint("/api/login")
    }

    fn with_session(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self
            .session_cookie
            .as_deref()
            .and_then(|c| HeaderValue::from_str(c).ok())
        {
            Some(cookie) => builder.header(COOKIE, cookie),
            None => builder,
        }
    }

    /// Fetch the update endpoint and return the decoded JSON untouched.
    pub async fn fetch_update_raw(&self, refresh: bool) -> Result<Value, ApiError> {
        let url = self.update_url(refresh);
        tracing::debug!(target: "api::client", "GET {}", url);

        let response = self
            .with_session(self.http_client.get(&url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = check_status(response).await?;

        response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Fetch and classify the current playback update.
    pub async fn fetch_update(&self, refresh: bool) -> Result<PollOutcome, ApiError> {
        let body = self.fetch_update_raw(refresh).await?;
        Ok(classify(&body))
    }

    /// Bind the playing track to an anime. Returns the backend's text reply.
    pub async fn confirm_anime(&self, request: &ConfirmRequest) -> Result<String, ApiError> {
        self.post_json("/api/confirm_anime", request).await
    }

    /// File a report about a wrong match. Returns the backend's text reply.
    pub async fn report(&self, request: &ReportRequest) -> Result<String, ApiError> {
        self.post_json("/api/report", request).await
    }

    async fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<String, ApiError> {
        let url = self.endpoint(path);
        tracing::debug!(target: "api::client", "POST {}", url);

        let response = self
            .with_session(self.http_client.post(&url))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = check_status(response).await?;

        response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body: format!(
            "{} - {}",
            status.canonical_reason().unwrap_or("Unknown"),
            body.chars().take(ERROR_BODY_CHARS).collect::<String>()
        ),
    })
}

/// Validate the base URL and strip any trailing slash.
fn normalize_base_url(raw: String) -> Result<String, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed =
        reqwest::Url::parse(trimmed).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::InvalidUrl(format!(
            "{raw}: unsupported scheme {}",
            parsed.scheme()
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = BackendClient::new("http://localhost:8080", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert!(client.session_cookie.is_none());
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let client = BackendClient::new("https://anisong.example.com/", None).unwrap();
        assert_eq!(client.login_url(), "https://anisong.example.com/api/login");
    }

    #[test]
    fn test_update_url_refresh_flag() {
        let client = BackendClient::new("http://localhost:8080", None).unwrap();
        assert_eq!(
            client.update_url(true),
            "http://localhost:8080/api/update?refresh=true"
        );
        assert_eq!(client.update_url(false), "http://localhost:8080/api/update");
    }

    #[test]
    fn test_invalid_urls_rejected() {
        assert!(matches!(
            BackendClient::new("not a url", None),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            BackendClient::new("ftp://example.com", None),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_blank_cookie_ignored() {
        let client = BackendClient::new("http://localhost:8080", Some("  ".into())).unwrap();
        assert!(client.session_cookie.is_none());

        let client =
            BackendClient::new("http://localhost:8080", Some("id=abc".into())).unwrap();
        assert_eq!(client.session_cookie.as_deref(), Some("id=abc"));
    }

    #[test]
    fn test_from_config() {
        let server = ServerConfig {
            base_url: "http://radar.local:9000/".to_string(),
            session_cookie: None,
        };
        let client = BackendClient::from_config(&server).unwrap();
        assert_eq!(client.base_url(), "http://radar.local:9000");
    }
}
