//! Login and registration calls. Passwords are only exposed at the
//! serialization boundary and never logged; the resulting identity is
//! handed to [`crate::auth::session`] to open the session.

use crate::api::{ApiClient, ClientError};
use crate::auth::identity::Identity;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// Exchanges credentials for the signed-in identity.
    ///
    /// # Errors
    /// Rejects on transport failure, a non-success status, or a payload
    /// that is not an identity.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<Identity, ClientError> {
        let body = LoginRequest {
            email,
            password: password.expose_secret(),
        };
        self.post_json("/login", &body).await
    }

    /// Registers a new teacher account and returns its identity.
    ///
    /// # Errors
    /// Rejects on transport failure, a non-success status, or a payload
    /// that is not an identity.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<Identity, ClientError> {
        let body = RegisterRequest {
            name,
            email,
            password: password.expose_secret(),
        };
        self.post_json("/register", &body).await
    }
}
