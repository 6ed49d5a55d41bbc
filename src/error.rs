use std::process::ExitStatus;
use thiserror::Error;

/// Process-level error type for the converter server
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Transcoder errors
#[derive(Error, Debug)]
pub enum TranscodeError {
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Transcoder exited with {status}")]
    Failed { status: ExitStatus, stderr: String },

    #[error("Transcoder timed out after {0} seconds")]
    Timeout(u64),

    #[error("IO error while transcoding: {0}")]
    Io(#[from] std::io::Error),
}

impl TranscodeError {
    /// Diagnostic text to hand back to the client.
    ///
    /// For a non-zero exit this is the transcoder's stderr verbatim; for the
    /// other variants (where there is no stderr) it is the error message.
    pub fn diagnostics(&self) -> String {
        match self {
            TranscodeError::Failed { status, stderr } => {
                if stderr.trim().is_empty() {
                    format!("transcoder exited with {} and no output", status)
                } else {
                    stderr.clone()
                }
            }
            other => other.to_string(),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ServerError>;
