//! Credential store: session-scoped persistence of the signed-in identity
//! and its token. The store is injectable so guards and clients can be
//! exercised against a fake; only the flows in [`crate::auth::session`]
//! write or clear it.
//!
//! The read path never fails: missing, unreadable, or corrupt state all
//! read as "signed out" so guard evaluation degrades to a redirect instead
//! of an error.

use crate::auth::identity::SessionEnvelope;
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session storage unavailable: {0}")]
    Unavailable(#[source] io::Error),
    #[error("failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

pub trait CredentialStore: Send + Sync {
    /// Reads the persisted envelope, or `None` when signed out. Corrupt or
    /// unavailable storage also reads as `None`, never as an error.
    fn get(&self) -> Option<SessionEnvelope>;

    /// Persists the envelope, overwriting any prior value.
    ///
    /// # Errors
    /// Returns an error when the underlying storage cannot be written.
    fn set(&self, envelope: &SessionEnvelope) -> Result<(), StoreError>;

    /// Erases all persisted session state. Idempotent.
    fn clear(&self);

    /// The stored token, or an empty string when signed out or tokenless.
    fn token(&self) -> String {
        self.get().map(|envelope| envelope.token).unwrap_or_default()
    }
}

/// File-backed store: one JSON document holding the session envelope, the
/// native counterpart of the browser client's session storage key.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileStore {
    fn get(&self) -> Option<SessionEnvelope> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                debug!("Failed to read session state: {}", err);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(envelope) => Some(envelope),
            Err(err) => {
                debug!("Discarding unparsable session state: {}", err);
                None
            }
        }
    }

    fn set(&self, envelope: &SessionEnvelope) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(StoreError::Unavailable)?;
        }

        let raw = serde_json::to_string(envelope)?;
        fs::write(&self.path, raw).map_err(StoreError::Unavailable)
    }

    fn clear(&self) {
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != io::ErrorKind::NotFound {
                debug!("Failed to clear session state: {}", err);
            }
        }
    }
}

/// In-process store for embedding and tests.
#[derive(Default)]
pub struct MemoryStore {
    envelope: Mutex<Option<SessionEnvelope>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self) -> Option<SessionEnvelope> {
        // A poisoned lock reads as unavailable storage.
        self.envelope.lock().map(|guard| guard.clone()).unwrap_or(None)
    }

    fn set(&self, envelope: &SessionEnvelope) -> Result<(), StoreError> {
        if let Ok(mut guard) = self.envelope.lock() {
            *guard = Some(envelope.clone());
        }
        Ok(())
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.envelope.lock() {
            *guard = None;
        }
    }
}
