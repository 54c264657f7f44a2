#![allow(dead_code)]

use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, HashSet, VecDeque},
    path::{Path, PathBuf},
};

use tubegrab_core::{
    CollectionEntry, CollectionKind, CollectionRef, Event, LineSource, Reporter, Result,
    SaveOptions, Stream, TubeGrabError, VideoPlatform, VideoRef,
};

pub fn progressive(format_id: &str, height: u32) -> Stream {
    Stream {
        format_id: format_id.to_string(),
        height: Some(height),
        vcodec: Some("avc1".to_string()),
        acodec: Some("mp4a".to_string()),
        tbr: None,
    }
}

pub fn video(url: &str, title: &str) -> VideoRef {
    VideoRef {
        url: url.to_string(),
        title: title.to_string(),
        author: "Some Author".to_string(),
        streams: vec![progressive("18", 360), progressive("22", 720)],
    }
}

#[derive(Debug, Clone)]
pub struct SaveCall {
    pub url: String,
    pub format_id: String,
    pub options: SaveOptions,
}

/// In-memory platform: known URLs resolve, everything else fails.
#[derive(Default)]
pub struct FakePlatform {
    videos: HashMap<String, VideoRef>,
    collections: HashMap<String, CollectionRef>,
    failing_saves: HashSet<String>,
    pub saves: RefCell<Vec<SaveCall>>,
    pub resolved: RefCell<Vec<String>>,
}

impl FakePlatform {
    pub fn with_video(mut self, video: VideoRef) -> Self {
        self.videos.insert(video.url.clone(), video);
        self
    }

    /// Register a collection whose entries all resolve.
    pub fn with_collection(
        self,
        url: &str,
        kind: CollectionKind,
        title: &str,
        titles: &[&str],
    ) -> Self {
        let entries = titles
            .iter()
            .enumerate()
            .map(|(i, t)| (Some(format!("{}#{}", url, i)), *t))
            .collect::<Vec<_>>();
        self.with_entries(url, kind, title, &entries)
    }

    /// Register a collection as listed; entries with a URL resolve, `None` ones have no video.
    pub fn with_entries(
        mut self,
        url: &str,
        kind: CollectionKind,
        title: &str,
        listed: &[(Option<String>, &str)],
    ) -> Self {
        let mut entries = Vec::new();
        for (entry_url, t) in listed {
            if let Some(entry_url) = entry_url {
                self.videos.insert(entry_url.clone(), video(entry_url, t));
            }
            entries.push(CollectionEntry {
                url: entry_url.clone(),
                title: t.to_string(),
            });
        }
        self.collections.insert(
            url.to_string(),
            CollectionRef {
                kind,
                title: title.to_string(),
                entries,
            },
        );
        self
    }

    pub fn failing_save(mut self, url: &str) -> Self {
        self.failing_saves.insert(url.to_string());
        self
    }

    pub fn entry_url(&self, collection_url: &str, index: usize) -> String {
        let entry = &self.collections[collection_url].entries[index];
        entry.url.clone().expect("entry has a url")
    }

    pub fn forget_video(&mut self, url: &str) {
        self.videos.remove(url);
    }
}

impl VideoPlatform for FakePlatform {
    async fn resolve_video(&self, url: &str) -> Result<VideoRef> {
        self.resolved.borrow_mut().push(url.to_string());
        self.videos
            .get(url)
            .cloned()
            .ok_or_else(|| TubeGrabError::ResolveFailed {
                url: url.to_string(),
                reason: "Video unavailable".to_string(),
            })
    }

    async fn resolve_collection(&self, _kind: CollectionKind, url: &str) -> Result<CollectionRef> {
        self.collections
            .get(url)
            .cloned()
            .ok_or_else(|| TubeGrabError::ResolveFailed {
                url: url.to_string(),
                reason: "This playlist does not exist".to_string(),
            })
    }

    async fn save(
        &self,
        video: &VideoRef,
        stream: &Stream,
        options: &SaveOptions,
        on_progress: &dyn Fn(f64),
    ) -> Result<PathBuf> {
        self.saves.borrow_mut().push(SaveCall {
            url: video.url.clone(),
            format_id: stream.format_id.clone(),
            options: options.clone(),
        });

        on_progress(50.0);
        if self.failing_saves.contains(&video.url) {
            return Err(TubeGrabError::DownloadFailed {
                url: video.url.clone(),
                reason: "HTTP Error 403: Forbidden".to_string(),
            });
        }
        on_progress(100.0);

        let dir = options.output_path.as_deref().unwrap_or(Path::new("."));
        let prefix = options.filename_prefix.as_deref().unwrap_or("");
        Ok(dir.join(format!("{}{}.mp4", prefix, video.title)))
    }
}

/// Keeps every rendered line except progress ticks, which are only counted.
#[derive(Default)]
pub struct RecordingReporter {
    lines: RefCell<Vec<String>>,
    progress: Cell<usize>,
}

impl RecordingReporter {
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn progress_ticks(&self) -> usize {
        self.progress.get()
    }

    pub fn position(&self, line: &str) -> Option<usize> {
        self.lines.borrow().iter().position(|l| l == line)
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: &Event<'_>) {
        match event {
            Event::Progress { .. } => self.progress.set(self.progress.get() + 1),
            other => self.lines.borrow_mut().push(other.to_string()),
        }
    }
}

/// Feeds prepared lines and remembers which prompts were shown.
#[derive(Default)]
pub struct ScriptedInput {
    lines: VecDeque<std::io::Result<String>>,
    pub prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| Ok(l.to_string())).collect(),
            prompts: Vec::new(),
        }
    }

    pub fn then_error(mut self, kind: std::io::ErrorKind) -> Self {
        self.lines.push_back(Err(kind.into()));
        self
    }

    pub fn then(mut self, line: &str) -> Self {
        self.lines.push_back(Ok(line.to_string()));
        self
    }
}

impl LineSource for ScriptedInput {
    async fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        self.lines.pop_front().transpose()
    }
}
