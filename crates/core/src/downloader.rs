use std::path::PathBuf;

use tracing::warn;

use crate::{
    error::{Result, TubeGrabError},
    events::{Event, Reporter},
    platform::VideoPlatform,
    types::{CollectionEntry, CollectionKind, Destination, SaveOptions, Stream, VideoRef},
};

/// What happened to one member of a playlist or channel.
#[derive(Debug)]
pub struct ItemOutcome {
    pub index: usize,
    pub title: String,
    pub result: Result<PathBuf>,
}

#[derive(Debug)]
pub struct BatchReport {
    pub kind: CollectionKind,
    pub title: String,
    pub items: Vec<ItemOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.items.len() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.items.iter().filter(|i| i.result.is_err())
    }
}

pub struct Downloader<P, R> {
    platform: P,
    reporter: R,
}

impl<P: VideoPlatform, R: Reporter> Downloader<P, R> {
    pub fn new(platform: P, reporter: R) -> Self {
        Self { platform, reporter }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Download one video in its best quality. Failures are reported, never returned.
    pub async fn download_video(&self, url: &str, destination: &Destination) -> Option<PathBuf> {
        match self.try_download_video(url, destination).await {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(url, error = %e, "video download failed");
                self.reporter.report(&Event::VideoFailed(&e));
                None
            }
        }
    }

    pub async fn try_download_video(
        &self,
        url: &str,
        destination: &Destination,
    ) -> Result<PathBuf> {
        let video = self.platform.resolve_video(url).await?;
        let stream = best_stream(&video)?;

        self.reporter.report(&Event::VideoStarted {
            title: &video.title,
            author: &video.author,
        });

        let path = self
            .save(&video, stream, &SaveOptions::new(destination))
            .await?;

        self.reporter.report(&Event::VideoSaved {
            title: &video.title,
            path: &path,
        });
        Ok(path)
    }

    /// Download every video of a playlist or channel, one at a time.
    ///
    /// Returns `None` only when the collection itself could not be resolved;
    /// individual failures are recorded in the [`BatchReport`].
    pub async fn download_collection(
        &self,
        kind: CollectionKind,
        url: &str,
        destination: &Destination,
    ) -> Option<BatchReport> {
        match self.try_download_collection(kind, url, destination).await {
            Ok(report) => Some(report),
            Err(e) => {
                warn!(url, %kind, error = %e, "collection could not be resolved");
                self.reporter.report(&Event::CollectionFailed { kind, error: &e });
                None
            }
        }
    }

    pub async fn try_download_collection(
        &self,
        kind: CollectionKind,
        url: &str,
        destination: &Destination,
    ) -> Result<BatchReport> {
        let collection = self.platform.resolve_collection(kind, url).await?;

        self.reporter.report(&Event::CollectionStarted {
            kind,
            title: &collection.title,
        });

        let mut items = Vec::with_capacity(collection.entries.len());
        for (index, entry) in collection.entries.iter().enumerate() {
            self.reporter.report(&Event::ItemStarted {
                index,
                title: &entry.title,
            });

            let result = self.download_item(index, entry, destination).await;
            match &result {
                Ok(path) => self.reporter.report(&Event::ItemSaved { index, path }),
                Err(e) => {
                    warn!(index, title = %entry.title, error = %e, "item download failed");
                    self.reporter.report(&Event::ItemFailed {
                        index,
                        title: &entry.title,
                        error: e,
                    });
                }
            }

            items.push(ItemOutcome {
                index,
                title: entry.title.clone(),
                result,
            });
        }

        let report = BatchReport {
            kind,
            title: collection.title,
            items,
        };
        self.reporter.report(&Event::CollectionFinished {
            kind,
            title: &report.title,
            failed: report.failed(),
            total: report.items.len(),
        });
        Ok(report)
    }

    async fn download_item(
        &self,
        index: usize,
        entry: &CollectionEntry,
        destination: &Destination,
    ) -> Result<PathBuf> {
        let url = entry.url.as_deref().ok_or_else(|| TubeGrabError::Unavailable {
            title: entry.title.clone(),
        })?;
        let video = self.platform.resolve_video(url).await?;
        let stream = best_stream(&video)?;
        let options = SaveOptions::new(destination).with_prefix(format!("{}_", index));
        self.save(&video, stream, &options).await
    }

    async fn save(
        &self,
        video: &VideoRef,
        stream: &Stream,
        options: &SaveOptions,
    ) -> Result<PathBuf> {
        let on_progress = |percent: f64| self.reporter.report(&Event::Progress { percent });
        self.platform.save(video, stream, options, &on_progress).await
    }
}

fn best_stream(video: &VideoRef) -> Result<&Stream> {
    video
        .highest_resolution()
        .ok_or_else(|| TubeGrabError::NoStream {
            title: video.title.clone(),
        })
}
