use std::{
    cmp::Ordering,
    fmt,
    path::{Path, PathBuf},
};

use serde::Deserialize;

/// One selectable encoding of a video.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Stream {
    pub format_id: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub vcodec: Option<String>,
    #[serde(default)]
    pub acodec: Option<String>,
    /// Total bitrate in KBit/s.
    #[serde(default)]
    pub tbr: Option<f64>,
}

impl Stream {
    /// Video and audio muxed in the same file.
    pub fn is_progressive(&self) -> bool {
        has_codec(&self.vcodec) && has_codec(&self.acodec)
    }
}

fn has_codec(codec: &Option<String>) -> bool {
    matches!(codec.as_deref(), Some(c) if c != "none")
}

/// A single remote video and the streams it can be saved as.
#[derive(Debug, Clone)]
pub struct VideoRef {
    pub url: String,
    pub title: String,
    pub author: String,
    pub streams: Vec<Stream>,
}

impl VideoRef {
    /// Highest resolution progressive stream, ties broken by bitrate.
    pub fn highest_resolution(&self) -> Option<&Stream> {
        self.streams
            .iter()
            .filter(|s| s.is_progressive())
            .max_by(|a, b| {
                a.height.cmp(&b.height).then_with(|| {
                    a.tbr
                        .unwrap_or(0.0)
                        .partial_cmp(&b.tbr.unwrap_or(0.0))
                        .unwrap_or(Ordering::Equal)
                })
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Playlist,
    Channel,
}

impl CollectionKind {
    pub fn name(&self) -> &'static str {
        match self {
            CollectionKind::Playlist => "playlist",
            CollectionKind::Channel => "channel",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unresolved member of a playlist or channel.
///
/// `url` is `None` for members the platform lists without a reachable video
/// (deleted or private uploads). They keep their place in the collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionEntry {
    pub url: Option<String>,
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct CollectionRef {
    pub kind: CollectionKind,
    pub title: String,
    pub entries: Vec<CollectionEntry>,
}

/// Where saved files go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Destination {
    /// Let the save primitive use the process working directory.
    #[default]
    WorkingDir,
    Dir(PathBuf),
}

impl Destination {
    /// Empty input selects the working directory, anything else is taken verbatim.
    pub fn from_input(input: &str) -> Self {
        if input.is_empty() {
            Destination::WorkingDir
        } else {
            Destination::Dir(PathBuf::from(input))
        }
    }

    pub fn output_path(&self) -> Option<&Path> {
        match self {
            Destination::WorkingDir => None,
            Destination::Dir(path) => Some(path),
        }
    }
}

/// Arguments of a single save call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveOptions {
    pub output_path: Option<PathBuf>,
    pub filename_prefix: Option<String>,
}

impl SaveOptions {
    pub fn new(destination: &Destination) -> Self {
        Self {
            output_path: destination.output_path().map(Path::to_path_buf),
            filename_prefix: None,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.filename_prefix = Some(prefix.into());
        self
    }
}
