//! Quiz authoring and grading client.
//!
//! The crate is split along the same lines as the app it backs:
//!
//! - [`auth`]: the authentication core. The persisted session envelope,
//!   the credential store, the navigation guards, and the request
//!   interceptor that stamps bearer credentials onto outbound calls.
//! - [`api`]: `reqwest` clients for the quiz API and the remote token
//!   authority.
//! - [`cli`]: the `quizdesk` command-line shell driving the same flows
//!   the browser client drives.
//!
//! Navigation itself (routing, views) is an external collaborator: guards
//! return [`auth::guards::Decision`] values and the surrounding router
//! applies them.

pub mod api;
pub mod auth;
pub mod cli;
