use thiserror::Error;

/// Errors surfaced by the library seams (store, generator, repo files).
///
/// The console never lets these escape: each one is turned into a log entry
/// or an inline alert at the call site.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The connection descriptor is missing fields or is unusable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The store rejected a write or could not be reached.
    #[error("{0}")]
    Write(String),

    /// A subscription stream failed; reported, never fatal.
    #[error("read error: {0}")]
    Read(String),

    #[error("{0}")]
    Generation(String),

    /// Local JSON parse of user input or an imported config.
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    RepoFile(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl BridgeError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

pub type BridgeResult<T> = std::result::Result<T, BridgeError>;
