//! HTTP clients for the quiz API with consistent timeouts and error
//! handling. Every outbound request passes through the auth interceptor,
//! so callers never attach credentials by hand. Error bodies are trimmed
//! before they reach the user.

pub mod auth;
pub mod error;
pub mod quizzes;
pub mod students;
pub mod token;

pub use error::ClientError;

use crate::auth::interceptor::authorize;
use crate::auth::store::CredentialStore;
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::{sync::Arc, time::Duration};
use url::Url;

/// Request timeout applied to all outbound calls.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Maximum number of error body characters surfaced to the caller.
const MAX_ERROR_CHARS: usize = 200;

pub(crate) fn http_client() -> Result<Client, ClientError> {
    Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .map_err(ClientError::Transport)
}

pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, ClientError> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(ClientError::Config("API base URL is not configured".to_string()));
    }

    Url::parse(trimmed).map_err(|err| ClientError::Config(format!("invalid API base URL: {err}")))
}

/// Client for the quiz API proper (login, quizzes, students).
pub struct ApiClient {
    base_url: Url,
    http: Client,
    store: Arc<dyn CredentialStore>,
}

impl ApiClient {
    /// # Errors
    /// Returns an error when `base_url` is empty or unparsable, or the
    /// HTTP client cannot be constructed.
    pub fn new(base_url: &str, store: Arc<dyn CredentialStore>) -> Result<Self, ClientError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            http: http_client()?,
            store,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        build_url(self.base_url.as_str(), path)
    }

    fn outgoing(&self, builder: RequestBuilder) -> RequestBuilder {
        authorize(builder, self.store.as_ref())
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.outgoing(self.http.get(self.endpoint(path))).send().await?;
        handle_json_response(response).await
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self
            .outgoing(self.http.post(self.endpoint(path)))
            .json(body)
            .send()
            .await?;
        handle_json_response(response).await
    }

    /// POST whose success payload is plain text rather than JSON.
    pub(crate) async fn post_json_for_text<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String, ClientError> {
        let response = self
            .outgoing(self.http.post(self.endpoint(path)))
            .json(body)
            .send()
            .await?;
        let response = error_for_status(response).await?;
        response.text().await.map_err(|err| ClientError::Decode(err.to_string()))
    }

    /// POST where only the status matters; the body is discarded.
    pub(crate) async fn post_json_for_status<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ClientError> {
        let response = self
            .outgoing(self.http.post(self.endpoint(path)))
            .json(body)
            .send()
            .await?;
        error_for_status(response).await.map(|_| ())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let response = self.outgoing(self.http.delete(self.endpoint(path))).send().await?;
        error_for_status(response).await.map(|_| ())
    }
}

/// Joins a base URL and a path without doubling or dropping slashes.
pub(crate) fn build_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

pub(crate) async fn handle_json_response<T: DeserializeOwned>(
    response: Response,
) -> Result<T, ClientError> {
    let response = error_for_status(response).await?;
    response
        .json::<T>()
        .await
        .map_err(|err| ClientError::Decode(err.to_string()))
}

async fn error_for_status(response: Response) -> Result<Response, ClientError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status,
        message: sanitize_body(body),
    })
}

/// Trims and truncates HTTP error bodies before they reach the user.
fn sanitize_body(body: String) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "request failed".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::store::MemoryStore;

    #[test]
    fn build_url_normalizes_slashes() {
        assert_eq!(
            build_url("http://localhost:5000/", "/api/quizzes/"),
            "http://localhost:5000/api/quizzes/"
        );
        assert_eq!(
            build_url("http://localhost:5000", "login"),
            "http://localhost:5000/login"
        );
        assert_eq!(build_url("", "/login"), "/login");
    }

    #[test]
    fn parse_base_url_rejects_empty_and_garbage() {
        assert!(matches!(parse_base_url(""), Err(ClientError::Config(_))));
        assert!(matches!(parse_base_url("   "), Err(ClientError::Config(_))));
        assert!(matches!(parse_base_url("not a url"), Err(ClientError::Config(_))));
        assert!(parse_base_url(" http://localhost:5000 ").is_ok());
    }

    #[test]
    fn sanitize_body_trims_and_truncates() {
        assert_eq!(sanitize_body(String::new()), "request failed");
        assert_eq!(sanitize_body("  oops  ".to_string()), "oops");

        let long = "x".repeat(500);
        assert_eq!(sanitize_body(long).len(), MAX_ERROR_CHARS);
    }

    #[test]
    fn api_client_rejects_missing_base_url() {
        let store = Arc::new(MemoryStore::new());
        assert!(matches!(ApiClient::new("", store), Err(ClientError::Config(_))));
    }
}
