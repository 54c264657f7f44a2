use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TubeGrabError {
    #[error("Failed to launch {program}: {source}")]
    LaunchFailed {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not resolve {url}: {reason}")]
    ResolveFailed { url: String, reason: String },

    #[error("{title} has no video URL")]
    Unavailable { title: String },

    #[error("No progressive stream available for {title}")]
    NoStream { title: String },

    #[error("Download failed for {url}: {reason}")]
    DownloadFailed { url: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Raised by the input gate when the user types an exit word or closes stdin.
    #[error("exit requested")]
    ExitRequested,
}

pub type Result<T> = std::result::Result<T, TubeGrabError>;
