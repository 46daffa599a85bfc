//! Navigation guards. Each guard is a pure decision function over its
//! inputs (credential store, remote authority, navigation URL) resolving
//! to exactly one [`Decision`]; asynchronous guards await their
//! verification call before answering. Every failure path (absent storage,
//! missing session, empty token, authority rejection, transport failure)
//! collapses into a redirect to the login route.

use crate::api::token::{TokenAuthority, TokenEcho};
use crate::auth::store::CredentialStore;
use tracing::debug;
use url::Url;

/// Route every rejected navigation lands on.
pub const LOGIN_PATH: &str = "/login";

/// Query parameter carrying the single-use token on generated links.
pub const TOKEN_PARAM: &str = "token";

/// Outcome of a guard evaluation, applied by the surrounding router.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(String),
}

impl Decision {
    #[must_use]
    pub fn to_login() -> Self {
        Self::Redirect(LOGIN_PATH.to_string())
    }

    #[must_use]
    pub fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Result of comparing a submitted token against the authority's echo.
///
/// A success payload alone does not prove the submitted token is the one
/// the authority validated; only an exact echo does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedToken {
    pub token: String,
    pub matches: bool,
}

impl VerifiedToken {
    #[must_use]
    pub fn new(sent: &str, echo: &TokenEcho) -> Self {
        Self {
            token: sent.to_string(),
            matches: echo.token.as_deref() == Some(sent),
        }
    }
}

/// Session guard: allows navigation iff the store holds a parsed session
/// envelope. Unavailable or corrupt storage reads as signed-out.
#[must_use]
pub fn can_activate(store: &dyn CredentialStore) -> Decision {
    match store.get() {
        Some(_) => Decision::Allow,
        None => Decision::to_login(),
    }
}

/// Teacher-token guard: validates the stored teacher token against the
/// remote authority. An absent or empty token redirects without a network
/// round trip; otherwise the authority must echo the exact token back.
///
/// On protected teacher routes this guard composes with [`can_activate`];
/// both must allow.
pub async fn can_activate_token<A>(store: &dyn CredentialStore, authority: &A) -> Decision
where
    A: TokenAuthority + ?Sized,
{
    let token = store.token();
    if token.is_empty() {
        return Decision::to_login();
    }

    match authority.validate_teacher_token(&token).await {
        Ok(echo) if VerifiedToken::new(&token, &echo).matches => Decision::Allow,
        Ok(_) => {
            debug!("Teacher token echo mismatch");
            Decision::to_login()
        }
        Err(err) => {
            debug!("Failed to validate teacher token: {}", err);
            Decision::to_login()
        }
    }
}

/// URL-token guard: validates the single-use token carried in the
/// navigation URL's `token` query parameter. This is the only guard whose
/// decision is independent of any stored session; it authorizes anonymous
/// link-holders. The token is re-read from the URL on every attempt; the
/// client keeps no copy, and one-time invalidation is the authority's job.
pub async fn can_activate_url_token<A>(url: &Url, authority: &A) -> Decision
where
    A: TokenAuthority + ?Sized,
{
    let token = url
        .query_pairs()
        .find(|(name, _)| name == TOKEN_PARAM)
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default();

    if token.is_empty() {
        return Decision::to_login();
    }

    match authority.validate_url_token(&token).await {
        Ok(echo) if VerifiedToken::new(&token, &echo).matches => Decision::Allow,
        Ok(_) => {
            debug!("URL token echo mismatch");
            Decision::to_login()
        }
        Err(err) => {
            debug!("Failed to validate URL token: {}", err);
            Decision::to_login()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ClientError;
    use crate::api::token::ValidationFuture;
    use crate::auth::identity::{Identity, SessionEnvelope};
    use crate::auth::store::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted authority: echoes a fixed value, or rejects outright, and
    /// counts how often it was consulted.
    struct ScriptedAuthority {
        echo: Option<String>,
        reject: bool,
        calls: AtomicUsize,
    }

    impl ScriptedAuthority {
        fn echoing(token: &str) -> Self {
            Self {
                echo: Some(token.to_string()),
                reject: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn answering(echo: Option<&str>) -> Self {
            Self {
                echo: echo.map(str::to_string),
                reject: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn rejecting() -> Self {
            Self {
                echo: None,
                reject: true,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn answer(&self) -> Result<TokenEcho, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.reject {
                Err(ClientError::Status {
                    status: 500,
                    message: "authority unavailable".to_string(),
                })
            } else {
                Ok(TokenEcho {
                    token: self.echo.clone(),
                })
            }
        }
    }

    impl TokenAuthority for ScriptedAuthority {
        fn validate_teacher_token<'a>(&'a self, _token: &'a str) -> ValidationFuture<'a> {
            Box::pin(async move { self.answer() })
        }

        fn validate_url_token<'a>(&'a self, _token: &'a str) -> ValidationFuture<'a> {
            Box::pin(async move { self.answer() })
        }
    }

    fn store_with_token(token: &str) -> MemoryStore {
        let store = MemoryStore::new();
        store
            .set(&SessionEnvelope::new(
                Identity::new("t1", "Ada", "ada@school.test"),
                token.to_string(),
            ))
            .expect("Failed to seed store");
        store
    }

    #[test]
    fn session_guard_allows_with_envelope_and_redirects_without() {
        let store = store_with_token("t");
        assert_eq!(can_activate(&store), Decision::Allow);

        let empty = MemoryStore::new();
        assert_eq!(can_activate(&empty), Decision::to_login());
    }

    #[tokio::test]
    async fn empty_token_redirects_without_consulting_the_authority() {
        let store = store_with_token("");
        let authority = ScriptedAuthority::echoing("abc");

        assert_eq!(can_activate_token(&store, &authority).await, Decision::to_login());
        assert_eq!(authority.calls(), 0);
    }

    #[tokio::test]
    async fn signed_out_store_redirects_without_consulting_the_authority() {
        let store = MemoryStore::new();
        let authority = ScriptedAuthority::echoing("abc");

        assert_eq!(can_activate_token(&store, &authority).await, Decision::to_login());
        assert_eq!(authority.calls(), 0);
    }

    #[tokio::test]
    async fn matching_echo_allows() {
        let store = store_with_token("abc");
        let authority = ScriptedAuthority::echoing("abc");

        assert_eq!(can_activate_token(&store, &authority).await, Decision::Allow);
        assert_eq!(authority.calls(), 1);
    }

    #[tokio::test]
    async fn mismatched_or_missing_echo_redirects() {
        let store = store_with_token("abc");

        let mismatch = ScriptedAuthority::answering(Some("xyz"));
        assert_eq!(can_activate_token(&store, &mismatch).await, Decision::to_login());

        let missing = ScriptedAuthority::answering(None);
        assert_eq!(can_activate_token(&store, &missing).await, Decision::to_login());
    }

    #[tokio::test]
    async fn rejected_validation_redirects() {
        let store = store_with_token("abc");
        let authority = ScriptedAuthority::rejecting();

        assert_eq!(can_activate_token(&store, &authority).await, Decision::to_login());
        assert_eq!(authority.calls(), 1);
    }

    #[tokio::test]
    async fn url_guard_reads_the_query_parameter() {
        let authority = ScriptedAuthority::echoing("xyz");
        let url = Url::parse("http://localhost:4200/student-form?token=xyz")
            .expect("Failed to parse fixture URL");

        assert_eq!(can_activate_url_token(&url, &authority).await, Decision::Allow);
        assert_eq!(authority.calls(), 1);
    }

    #[tokio::test]
    async fn url_guard_without_token_redirects_with_zero_calls() {
        let authority = ScriptedAuthority::echoing("xyz");

        let missing = Url::parse("http://localhost:4200/student-form")
            .expect("Failed to parse fixture URL");
        assert_eq!(can_activate_url_token(&missing, &authority).await, Decision::to_login());

        let empty = Url::parse("http://localhost:4200/student-form?token=")
            .expect("Failed to parse fixture URL");
        assert_eq!(can_activate_url_token(&empty, &authority).await, Decision::to_login());

        assert_eq!(authority.calls(), 0);
    }

    #[tokio::test]
    async fn url_guard_ignores_the_stored_session() {
        // Anonymous link-holders are authorized by the URL token alone.
        let authority = ScriptedAuthority::answering(Some("other"));
        let url = Url::parse("http://localhost:4200/student-form?token=xyz")
            .expect("Failed to parse fixture URL");

        assert_eq!(can_activate_url_token(&url, &authority).await, Decision::to_login());
    }

    #[test]
    fn verified_token_requires_an_exact_echo() {
        let exact = VerifiedToken::new("abc", &TokenEcho { token: Some("abc".to_string()) });
        assert!(exact.matches);

        let different = VerifiedToken::new("abc", &TokenEcho { token: Some("xyz".to_string()) });
        assert!(!different.matches);

        let absent = VerifiedToken::new("abc", &TokenEcho { token: None });
        assert!(!absent.matches);
    }
}
