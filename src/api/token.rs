//! Remote authority client for teacher and URL tokens. Tokens are opaque
//! strings: the client never decodes them, and validation answers come
//! back as an echo of the submitted token. The authority answers
//! validation requests with HTTP 200 in both directions (a valid token is
//! echoed back, an invalid one yields an `error` payload with no echo), so
//! callers must run the echo comparison rather than trust the status.

use crate::api::{build_url, handle_json_response, http_client, parse_base_url, ClientError};
use crate::auth::guards::TOKEN_PARAM;
use crate::auth::interceptor::authorize;
use crate::auth::store::CredentialStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{future::Future, pin::Pin, sync::Arc};
use tracing::{info_span, Instrument};
use url::Url;

/// Default expiry hint, in seconds, passed along with generation requests.
/// Expiry is enforced by the authority, never locally.
pub const DEFAULT_TOKEN_EXPIRY_SECS: u64 = 3600;

/// Echo payload of the validation endpoints. `token` is absent when the
/// authority rejected the submitted value.
#[derive(Debug, Deserialize)]
pub struct TokenEcho {
    #[serde(default)]
    pub token: Option<String>,
}

/// Payload of a successful generation request.
#[derive(Debug, Deserialize)]
pub struct IssuedToken {
    pub token: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    params: GenerateParams<'a>,
}

#[derive(Serialize)]
struct GenerateParams<'a> {
    params: &'a Value,
    exp_time: u64,
}

pub type ValidationFuture<'a> =
    Pin<Box<dyn Future<Output = Result<TokenEcho, ClientError>> + Send + 'a>>;

/// Validation surface of the remote authority, injectable so guard logic
/// can be evaluated against a fake.
pub trait TokenAuthority: Send + Sync {
    fn validate_teacher_token<'a>(&'a self, token: &'a str) -> ValidationFuture<'a>;
    fn validate_url_token<'a>(&'a self, token: &'a str) -> ValidationFuture<'a>;
}

/// `reqwest`-backed client for the authority's token endpoints.
pub struct TokenClient {
    base_url: Url,
    http: reqwest::Client,
    store: Arc<dyn CredentialStore>,
}

impl TokenClient {
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

    /// Asks the authority whether a teacher token is currently valid.
    ///
    /// # Errors
    /// Rejects on transport failure or any non-success status. A 200
    /// answer still needs the echo comparison before it counts.
    pub async fn validate_teacher_token(&self, token: &str) -> Result<TokenEcho, ClientError> {
        self.validate(format!("/api/token/validate/{token}")).await
    }

    /// Same contract as [`Self::validate_teacher_token`], scoped to
    /// single-use URL tokens. One-time invalidation is the authority's
    /// responsibility.
    ///
    /// # Errors
    /// Rejects on transport failure or any non-success status.
    pub async fn validate_url_token(&self, token: &str) -> Result<TokenEcho, ClientError> {
        self.validate(format!("/api/token/validate_url/{token}")).await
    }

    async fn validate(&self, path: String) -> Result<TokenEcho, ClientError> {
        let url = build_url(self.base_url.as_str(), &path);
        let span = info_span!("token.validate", http.method = "GET", url = %url);
        let response = authorize(self.http.get(&url), self.store.as_ref())
            .send()
            .instrument(span)
            .await?;
        handle_json_response(response).await
    }

    /// Requests issuance of a token bound to `params`. `expiry_secs` is a
    /// hint to the authority.
    ///
    /// # Errors
    /// Rejects on transport failure, non-success status, or a payload
    /// without a token. Unlike validation failures, callers surface this
    /// to the user instead of redirecting.
    pub async fn generate_token(
        &self,
        params: &Value,
        expiry_secs: u64,
    ) -> Result<IssuedToken, ClientError> {
        let url = build_url(self.base_url.as_str(), "/api/token/generate");
        let body = GenerateRequest {
            params: GenerateParams {
                params,
                exp_time: expiry_secs,
            },
        };

        let span = info_span!("token.generate", http.method = "POST", url = %url);
        let response = authorize(self.http.post(&url), self.store.as_ref())
            .json(&body)
            .send()
            .instrument(span)
            .await?;
        handle_json_response(response).await
    }
}

impl TokenAuthority for TokenClient {
    fn validate_teacher_token<'a>(&'a self, token: &'a str) -> ValidationFuture<'a> {
        Box::pin(self.validate_teacher_token(token))
    }

    fn validate_url_token<'a>(&'a self, token: &'a str) -> ValidationFuture<'a> {
        Box::pin(self.validate_url_token(token))
    }
}

/// Builds the student-facing entry link carrying a single-use token as its
/// `token` query parameter.
#[must_use]
pub fn student_link(web_base: &Url, token: &str) -> Url {
    let mut link = web_base.clone();
    link.set_path("student-form");
    link.query_pairs_mut().clear().append_pair(TOKEN_PARAM, token);
    link
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_request_nests_params_and_expiry() {
        let params = serde_json::json!({ "id": "t1" });
        let body = GenerateRequest {
            params: GenerateParams {
                params: &params,
                exp_time: DEFAULT_TOKEN_EXPIRY_SECS,
            },
        };

        let value = serde_json::to_value(&body).expect("Failed to serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "params": { "params": { "id": "t1" }, "exp_time": 3600 }
            })
        );
    }

    #[test]
    fn echo_parses_both_authority_answers() {
        let valid: TokenEcho = serde_json::from_str(r#"{"token":"abc","message":"Token is valid."}"#)
            .expect("Failed to deserialize");
        assert_eq!(valid.token.as_deref(), Some("abc"));

        let rejected: TokenEcho = serde_json::from_str(r#"{"error":"Invalid token."}"#)
            .expect("Failed to deserialize");
        assert_eq!(rejected.token, None);
    }

    #[test]
    fn student_link_carries_the_token_parameter() {
        let base = Url::parse("http://localhost:4200").expect("Failed to parse fixture URL");
        let link = student_link(&base, "abc 123");

        assert_eq!(link.path(), "/student-form");
        assert_eq!(
            link.query_pairs().find(|(name, _)| name == TOKEN_PARAM).map(|(_, value)| value.into_owned()),
            Some("abc 123".to_string())
        );
    }
}
