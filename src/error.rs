//! Error types for the two fallible browser interactions plus configuration.
//!
//! ERROR HANDLING
//! ==============
//! Both runtime failures are caught where the asynchronous call is awaited and
//! turned into user-visible feedback (error fragment, toast). Nothing here is
//! propagated to the event loop as an unhandled rejection.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failure while loading a page fragment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The request completed with a non-2xx status code.
    #[error("fragment request failed with status {0}")]
    Status(u16),
    /// The request never produced a response (network failure, CORS, ...).
    #[error("fragment request failed: {0}")]
    Transport(String),
    /// The response arrived but its body could not be read as text.
    #[error("fragment body could not be read: {0}")]
    Body(String),
}

impl LoadError {
    /// HTTP status carried by the failure, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            Self::Transport(_) | Self::Body(_) => None,
        }
    }
}

/// Failure while writing text to the system clipboard.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    /// The browser exposes no clipboard (insecure context, old engine).
    #[error("clipboard is not available")]
    Unavailable,
    /// The write promise rejected.
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
}

/// Failure while reading the inline site configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid site configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
