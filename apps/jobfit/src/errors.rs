use std::path::PathBuf;

use thiserror::Error;

/// Shown when a failed analysis carries no message of its own.
pub const GENERIC_FAILURE: &str = "Failed to analyze";

/// Failure of a submitted analysis request.
///
/// Every variant ends the `Submitting` phase the same way; they differ only in
/// the message surfaced to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Any non-2xx status. The response body is not inspected.
    #[error("Server error")]
    Status(u16),

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Decode(String),
}

impl AnalysisError {
    /// The text for the error region: the failure's own message when it has one.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            message
        }
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        AnalysisError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::Decode(err.to_string())
    }
}

/// Rejection from the file picker. The submission state is never touched by one.
#[derive(Debug, Error)]
pub enum PickError {
    #[error("Cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} is not a file")]
    NotAFile(PathBuf),

    #[error("{0} is not a PDF (only .pdf files can be uploaded)")]
    NotPdf(PathBuf),
}
