// Error types for lpl.
// Covers the comments endpoint, the local cache, and configuration problems.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LplError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with HTTP {status}")]
    Server { status: StatusCode },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("no cache directory available; pass --cache-dir")]
    NoCacheDir,

    #[error("{0}")]
    Other(String),
}

impl LplError {
    /// Message shown in place of the comment list when a fetch fails.
    pub fn user_message(&self) -> String {
        match self {
            LplError::Transport(_) => "Network error, please check your connection.".to_string(),
            LplError::Server { status } => format!("Server error: {}", status.as_u16()),
            other => format!("Failed to fetch comments: {}", other),
        }
    }
}

pub type Result<T> = std::result::Result<T, LplError>;
