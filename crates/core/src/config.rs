use std::path::PathBuf;

pub const DEFAULT_YTDLP: &str = "yt-dlp";
pub const DEFAULT_EXTRACTOR_ARGS: &str = "youtube:player_client=android,web";

/// Settings for the yt-dlp adapter.
#[derive(Debug, Clone)]
pub struct Config {
    pub ytdlp_path: PathBuf,
    /// Forwarded as `--extractor-args` when set.
    pub extractor_args: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ytdlp_path: PathBuf::from(DEFAULT_YTDLP),
            extractor_args: Some(DEFAULT_EXTRACTOR_ARGS.to_string()),
        }
    }
}

impl Config {
    pub fn new(ytdlp_path: impl Into<PathBuf>, extractor_args: Option<String>) -> Self {
        Self {
            ytdlp_path: ytdlp_path.into(),
            extractor_args: extractor_args.filter(|a| !a.trim().is_empty()),
        }
    }
}
