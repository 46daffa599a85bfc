use thiserror::Error;

/// Failures surfaced by the quiz API and token authority clients. Guard
/// callers collapse every variant into a login redirect; only the CLI (and
/// link-generation, which happens mid-session) shows them to the user.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("unable to reach the server: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("request failed ({status}): {message}")]
    Status { status: u16, message: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
}
