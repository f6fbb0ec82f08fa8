//! Error types for the verification runner

use thiserror::Error;

/// Result type alias for runner operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during a verification run
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to launch the browser engine
    #[error("Browser launch failed: {0}")]
    Launch(String),

    /// Failed to navigate to a URL (covers missing input files, which the
    /// browser reports as a navigation error on file:// URLs)
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// The selector never became present and visible within the timeout
    #[error("Element {selector:?} did not become visible within {timeout_ms}ms")]
    VisibilityTimeout { selector: String, timeout_ms: u64 },

    /// Element lookup or screenshot capture failed
    #[error("Screenshot capture failed: {0}")]
    Capture(String),

    /// Writing the output image failed
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_names_selector_and_deadline() {
        let err = Error::VisibilityTimeout {
            selector: "#main-menu".to_string(),
            timeout_ms: 30000,
        };
        let msg = err.to_string();
        assert!(msg.contains("#main-menu"));
        assert!(msg.contains("30000ms"));
    }

    #[test]
    fn write_message_names_path() {
        let err = Error::Write {
            path: "reset-button.png".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("reset-button.png"));
    }
}
