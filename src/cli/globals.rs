use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub web_url: String,
    pub session_file: PathBuf,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String, web_url: String, session_file: PathBuf) -> Self {
        Self {
            api_url,
            web_url,
            session_file,
        }
    }

    /// Default session state location: the runtime directory when the
    /// environment provides one, the system temp directory otherwise.
    /// Either way the state lives with the login session, not the account.
    #[must_use]
    pub fn default_session_file() -> PathBuf {
        std::env::var_os("XDG_RUNTIME_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir)
            .join("quizdesk")
            .join("session.json")
    }
}
