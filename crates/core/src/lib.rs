//! tubegrab Core Library
//!
//! Interactive downloading of YouTube videos, playlists and channels on top
//! of yt-dlp.

pub mod config;
pub mod downloader;
pub mod error;
pub mod events;
pub mod input;
pub mod menu;
pub mod platform;
pub mod types;
pub mod ytdlp;

// Re-export commonly used items at crate root
pub use config::Config;
pub use downloader::{BatchReport, Downloader, ItemOutcome};
pub use error::{Result, TubeGrabError};
pub use events::{Event, Reporter};
pub use input::{LineSource, StdinSource, ask, gate, is_exit_word};
pub use menu::{Menu, MenuChoice};
pub use platform::VideoPlatform;
pub use types::{
    CollectionEntry, CollectionKind, CollectionRef, Destination, SaveOptions, Stream, VideoRef,
};
pub use ytdlp::YtDlp;
