//! Outbound request interceptor: stamps the stored token onto every call
//! leaving the client as a bearer credential. Absence of a token is not an
//! error (the request simply leaves unmodified), and an unavailable store
//! never blocks the request pipeline.

use crate::auth::store::CredentialStore;
use reqwest::RequestBuilder;

/// Attaches `Authorization: Bearer <token>` when the store holds a
/// non-empty token; otherwise returns the builder untouched.
#[must_use]
pub fn authorize(builder: RequestBuilder, store: &dyn CredentialStore) -> RequestBuilder {
    let token = store.token();
    if token.is_empty() {
        builder
    } else {
        builder.bearer_auth(token)
    }
}
