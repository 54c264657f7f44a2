//! [`VideoPlatform`] backed by the `yt-dlp` executable.

use std::{
    ffi::OsString,
    path::PathBuf,
    process::{ExitStatus, Stdio},
};

use serde::Deserialize;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    process::Command,
};
use tracing::{debug, info};

use crate::{
    config::Config,
    error::{Result, TubeGrabError},
    platform::VideoPlatform,
    types::{CollectionEntry, CollectionKind, CollectionRef, SaveOptions, Stream, VideoRef},
};

const PROGRESS_PREFIX: &str = "download:";
const PROGRESS_TEMPLATE: &str = "download:%(progress._percent_str)s";
const UNAVAILABLE_TITLE: &str = "unavailable video";
const CHANNEL_TABS: [&str; 8] = [
    "videos",
    "featured",
    "shorts",
    "streams",
    "playlists",
    "community",
    "about",
    "releases",
];

pub struct YtDlp {
    config: Config,
}

impl YtDlp {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.config.ytdlp_path);
        if let Some(extractor_args) = &self.config.extractor_args {
            cmd.arg("--extractor-args").arg(extractor_args);
        }
        cmd.kill_on_drop(true);
        cmd
    }

    fn launch_failed(&self, source: std::io::Error) -> TubeGrabError {
        TubeGrabError::LaunchFailed {
            program: self.config.ytdlp_path.clone(),
            source,
        }
    }

    async fn dump_json(&self, url: &str, args: &[&str]) -> Result<Vec<u8>> {
        let mut cmd = self.command();
        cmd.args(args).arg(url);
        debug!(?cmd, "resolving");

        let output = cmd.output().await.map_err(|e| self.launch_failed(e))?;

        if !output.status.success() {
            return Err(TubeGrabError::ResolveFailed {
                url: url.to_string(),
                reason: failure_reason(&String::from_utf8_lossy(&output.stderr), output.status),
            });
        }

        Ok(output.stdout)
    }
}

impl VideoPlatform for YtDlp {
    async fn resolve_video(&self, url: &str) -> Result<VideoRef> {
        let json = self
            .dump_json(url, &["--dump-single-json", "--no-playlist", "--no-warnings"])
            .await?;
        parse_video(url, &json)
    }

    async fn resolve_collection(&self, kind: CollectionKind, url: &str) -> Result<CollectionRef> {
        let url = match kind {
            CollectionKind::Playlist => url.to_string(),
            CollectionKind::Channel => channel_videos_url(url),
        };
        let json = self
            .dump_json(&url, &["--flat-playlist", "--dump-single-json", "--no-warnings"])
            .await?;
        parse_collection(kind, &url, &json)
    }

    async fn save(
        &self,
        video: &VideoRef,
        stream: &Stream,
        options: &SaveOptions,
        on_progress: &dyn Fn(f64),
    ) -> Result<PathBuf> {
        let mut cmd = self.command();
        cmd.args(save_args(stream, options))
            .arg(&video.url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        debug!(?cmd, "saving");

        let mut child = cmd.spawn().map_err(|e| self.launch_failed(e))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| std::io::Error::other("yt-dlp stdout not captured"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| std::io::Error::other("yt-dlp stderr not captured"))?;

        // --print makes yt-dlp quiet, so progress may land on either stream.
        let read_stdout = async {
            let mut saved = None;
            let mut lines = BufReader::new(stdout).lines();
            while let Some(line) = lines.next_line().await? {
                match progress_line(&line) {
                    Some(Some(percent)) => on_progress(percent),
                    Some(None) => {}
                    None if !line.trim().is_empty() => saved = Some(line.trim().to_string()),
                    None => {}
                }
            }
            Ok::<_, std::io::Error>(saved)
        };
        let read_stderr = async {
            let mut text = String::new();
            let mut lines = BufReader::new(stderr).lines();
            while let Some(line) = lines.next_line().await? {
                match progress_line(&line) {
                    Some(Some(percent)) => on_progress(percent),
                    Some(None) => {}
                    None => {
                        text.push_str(&line);
                        text.push('\n');
                    }
                }
            }
            Ok::<_, std::io::Error>(text)
        };

        let (saved, stderr_text) = tokio::try_join!(read_stdout, read_stderr)?;
        let status = child.wait().await?;

        if !status.success() {
            return Err(TubeGrabError::DownloadFailed {
                url: video.url.clone(),
                reason: failure_reason(&stderr_text, status),
            });
        }

        let path = saved.map(PathBuf::from).ok_or_else(|| TubeGrabError::DownloadFailed {
            url: video.url.clone(),
            reason: "yt-dlp did not report a saved file".to_string(),
        })?;
        info!(path = %path.display(), "saved");
        Ok(path)
    }
}

fn save_args(stream: &Stream, options: &SaveOptions) -> Vec<OsString> {
    let prefix = options.filename_prefix.as_deref().unwrap_or("");
    let mut args: Vec<OsString> = vec![
        "-f".into(),
        stream.format_id.clone().into(),
        "--no-playlist".into(),
        "-o".into(),
        format!("{}%(title)s.%(ext)s", prefix).into(),
    ];
    if let Some(dir) = &options.output_path {
        args.push("-P".into());
        args.push(dir.clone().into_os_string());
    }
    args.extend(
        [
            "--print",
            "after_move:filepath",
            "--progress",
            "--newline",
            "--progress-template",
            PROGRESS_TEMPLATE,
            "--no-colors",
        ]
        .map(OsString::from),
    );
    args
}

/// `Some` for lines produced by the progress template, holding the percentage when known.
fn progress_line(line: &str) -> Option<Option<f64>> {
    let rest = line.trim().strip_prefix(PROGRESS_PREFIX)?;
    Some(rest.trim().trim_end_matches('%').trim().parse::<f64>().ok())
}

fn failure_reason(stderr: &str, status: ExitStatus) -> String {
    let error_line = stderr
        .lines()
        .rev()
        .find_map(|l| l.trim().strip_prefix("ERROR:"))
        .map(str::trim);

    match error_line {
        Some(line) => line.to_string(),
        None if !stderr.trim().is_empty() => stderr.trim().to_string(),
        None => format!("yt-dlp exited with {}", status),
    }
}

/// Point a YouTube channel URL at its uploads tab.
pub fn channel_videos_url(url: &str) -> String {
    if !url.contains("youtube.com/") {
        return url.to_string();
    }

    let base = url.split(['?', '#']).next().unwrap_or(url);
    let base = base.trim_end_matches('/');
    let base = match base.rsplit_once('/') {
        Some((parent, tab)) if CHANNEL_TABS.contains(&tab) => parent,
        _ => base,
    };
    format!("{}/videos", base)
}

#[derive(Deserialize)]
struct VideoInfo {
    id: String,
    title: Option<String>,
    uploader: Option<String>,
    channel: Option<String>,
    webpage_url: Option<String>,
    #[serde(default)]
    formats: Vec<Stream>,
}

fn parse_video(url: &str, json: &[u8]) -> Result<VideoRef> {
    let info: VideoInfo = serde_json::from_slice(json)?;
    Ok(VideoRef {
        title: info.title.unwrap_or(info.id),
        author: info
            .uploader
            .or(info.channel)
            .unwrap_or_else(|| "unknown".to_string()),
        url: info.webpage_url.unwrap_or_else(|| url.to_string()),
        streams: info.formats,
    })
}

#[derive(Deserialize)]
struct CollectionInfo {
    title: Option<String>,
    channel: Option<String>,
    uploader: Option<String>,
    #[serde(default)]
    entries: Vec<Option<EntryInfo>>,
}

#[derive(Deserialize)]
struct EntryInfo {
    id: Option<String>,
    title: Option<String>,
    url: Option<String>,
}

fn parse_collection(kind: CollectionKind, url: &str, json: &[u8]) -> Result<CollectionRef> {
    let info: CollectionInfo = serde_json::from_slice(json)?;

    let title = match kind {
        CollectionKind::Playlist => info.title,
        CollectionKind::Channel => info.channel.or(info.uploader).or(info.title),
    }
    .unwrap_or_else(|| url.to_string());

    let entries = info.entries.into_iter().map(collection_entry).collect();

    Ok(CollectionRef {
        kind,
        title,
        entries,
    })
}

/// Listed members without a reachable video keep their slot with no URL.
fn collection_entry(entry: Option<EntryInfo>) -> CollectionEntry {
    let Some(entry) = entry else {
        return CollectionEntry {
            url: None,
            title: UNAVAILABLE_TITLE.to_string(),
        };
    };

    let url = entry.url.or_else(|| {
        entry
            .id
            .as_ref()
            .map(|id| format!("https://www.youtube.com/watch?v={}", id))
    });
    let title = entry
        .title
        .or(entry.id)
        .unwrap_or_else(|| UNAVAILABLE_TITLE.to_string());
    CollectionEntry { url, title }
}
