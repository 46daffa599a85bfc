//! The authenticated principal and the persisted session envelope. The
//! envelope is the unit the credential store reads and writes; its wire
//! shape (`user_data` + `token`) is shared with the browser client and
//! must not drift.

use serde::{Deserialize, Serialize};

/// The authenticated principal.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl Identity {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Persisted bundle of identity plus token: "is logged in".
///
/// A well-formed envelope always carries a `token` field; an empty string
/// means no token has been attached yet. An envelope without an identity
/// does not parse, which the store reports as signed-out.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionEnvelope {
    #[serde(rename = "user_data")]
    pub identity: Identity,
    #[serde(default)]
    pub token: String,
}

impl SessionEnvelope {
    #[must_use]
    pub fn new(identity: Identity, token: String) -> Self {
        Self { identity, token }
    }
}
