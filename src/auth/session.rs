//! Session establishment and teardown: the only code paths that write or
//! clear the credential store. Guards and the interceptor read it; login,
//! registration, the OAuth callback, and logout mutate it.

use crate::auth::identity::{Identity, SessionEnvelope};
use crate::auth::store::{CredentialStore, StoreError};
use std::collections::HashMap;
use tracing::debug;
use url::Url;

/// Persists a fresh session for `identity`. Password logins start with an
/// empty token; teacher-token routes stay gated until one is attached.
///
/// # Errors
/// Returns an error when the envelope cannot be persisted.
pub fn establish(
    store: &dyn CredentialStore,
    identity: Identity,
    token: String,
) -> Result<SessionEnvelope, StoreError> {
    let envelope = SessionEnvelope::new(identity, token);
    store.set(&envelope)?;
    Ok(envelope)
}

/// Installs a freshly issued teacher token into the current session.
/// Returns `None` when no session exists to attach it to.
///
/// # Errors
/// Returns an error when the updated envelope cannot be persisted.
pub fn attach_token(
    store: &dyn CredentialStore,
    token: &str,
) -> Result<Option<SessionEnvelope>, StoreError> {
    let Some(mut envelope) = store.get() else {
        return Ok(None);
    };

    envelope.token = token.to_string();
    store.set(&envelope)?;
    Ok(Some(envelope))
}

/// Signs out: clears all persisted session state. Idempotent.
pub fn terminate(store: &dyn CredentialStore) {
    store.clear();
}

/// Builds a session envelope from an OAuth callback URL.
///
/// The provider redirects back with `access_token`, `user_data`, and
/// `token` query parameters; all three must be present and non-empty for
/// the callback to count. The access token itself is never persisted.
/// Returns `None` on any missing or unparsable parameter, which callers
/// treat as a failed login.
#[must_use]
pub fn envelope_from_callback(url: &Url) -> Option<SessionEnvelope> {
    let params: HashMap<String, String> = url.query_pairs().into_owned().collect();

    let _access_token = non_empty(&params, "access_token")?;
    let user_data = non_empty(&params, "user_data")?;
    let token = non_empty(&params, "token")?;

    // The provider serializes the identity with single quotes.
    let sanitized = user_data.replace('\'', "\"");
    let identity: Identity = match serde_json::from_str(&sanitized) {
        Ok(identity) => identity,
        Err(err) => {
            debug!("Failed to parse callback identity: {}", err);
            return None;
        }
    };

    Some(SessionEnvelope::new(identity, token.to_string()))
}

fn non_empty<'a>(params: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    params.get(name).map(String::as_str).filter(|value| !value.is_empty())
}
