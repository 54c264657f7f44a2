//! Everything the menu and the downloaders tell the user.
//!
//! Flows never print directly. They emit [`Event`]s to a [`Reporter`]; the
//! `Display` impl is the plain-text rendering, which front ends are free to
//! style.

use std::{fmt, path::Path};

use crate::{error::TubeGrabError, types::CollectionKind};

pub const MENU: &str = "====================
  Youtube Downloader Options
====================
1. Download Video
2. Download Playlist
3. Download all videos from a channel";

#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    Menu,
    InvalidChoice,
    UnexpectedError(&'a TubeGrabError),
    Farewell,
    Interrupted,

    VideoStarted {
        title: &'a str,
        author: &'a str,
    },
    Progress {
        percent: f64,
    },
    VideoSaved {
        title: &'a str,
        path: &'a Path,
    },
    VideoFailed(&'a TubeGrabError),

    CollectionStarted {
        kind: CollectionKind,
        title: &'a str,
    },
    ItemStarted {
        index: usize,
        title: &'a str,
    },
    ItemSaved {
        index: usize,
        path: &'a Path,
    },
    ItemFailed {
        index: usize,
        title: &'a str,
        error: &'a TubeGrabError,
    },
    CollectionFinished {
        kind: CollectionKind,
        title: &'a str,
        failed: usize,
        total: usize,
    },
    CollectionFailed {
        kind: CollectionKind,
        error: &'a TubeGrabError,
    },
}

impl Event<'_> {
    /// Whether the event reports something going wrong.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::UnexpectedError(_)
                | Event::VideoFailed(_)
                | Event::ItemFailed { .. }
                | Event::CollectionFailed { .. }
        )
    }
}

impl fmt::Display for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Menu => f.write_str(MENU),
            Event::InvalidChoice => f.write_str("Invalid choice. Please try again."),
            Event::UnexpectedError(e) => {
                write!(f, "An error occurred: {}\nPress Enter to continue...", e)
            }
            Event::Farewell => f.write_str("Have a great day!"),
            Event::Interrupted => f.write_str("Exiting..."),
            Event::VideoStarted { title, author } => {
                write!(f, "Downloading video: {} by {}", title, author)
            }
            Event::Progress { percent } => write!(f, "{:.1}%", percent),
            Event::VideoSaved { title, .. } => {
                write!(f, "Video downloaded successfully: {}", title)
            }
            Event::VideoFailed(e) => write!(f, "Error fetching video: {}", e),
            Event::CollectionStarted { kind, title } => {
                write!(f, "Downloading videos from {} {}.", kind, title)
            }
            Event::ItemStarted { index, title } => {
                write!(f, "Downloading video: {}_{}.", index, title)
            }
            Event::ItemSaved { index, path } => write!(f, "Saved #{}: {}", index, path.display()),
            Event::ItemFailed { title, .. } => write!(f, "Failed to download {}.", title),
            Event::CollectionFinished { kind, title, .. } => {
                write!(f, "Finished downloading from {}: {}.", kind, title)
            }
            Event::CollectionFailed { kind, .. } => {
                write!(f, "Failed to download the complete {}.", kind)
            }
        }
    }
}

pub trait Reporter {
    fn report(&self, event: &Event<'_>);
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn report(&self, event: &Event<'_>) {
        (**self).report(event)
    }
}
