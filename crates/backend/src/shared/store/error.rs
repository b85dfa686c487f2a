use thiserror::Error;

/// Failure taxonomy for remote store calls. Handlers convert every variant
/// into a user-visible response; nothing here is allowed to panic through
/// to the browser.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store authentication failed")]
    Unauthorized,

    #[error("record not found")]
    NotFound,

    /// The store refused the write: validation failure, unique index
    /// violation, and the like. `message` comes from the store's JSON error
    /// body when present.
    #[error("store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode store response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }

    /// HTTP status surfaced to the caller for this failure.
    pub fn status(&self) -> u16 {
        match self {
            StoreError::Unauthorized => 401,
            StoreError::NotFound => 404,
            StoreError::Rejected { status, .. } => *status,
            StoreError::Transport(_) | StoreError::Decode(_) => 502,
        }
    }
}
