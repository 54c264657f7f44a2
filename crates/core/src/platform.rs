use std::path::PathBuf;

use crate::{
    error::Result,
    types::{CollectionKind, CollectionRef, SaveOptions, Stream, VideoRef},
};

/// Narrow view of a video platform: resolve references and save streams.
pub trait VideoPlatform {
    async fn resolve_video(&self, url: &str) -> Result<VideoRef>;

    async fn resolve_collection(&self, kind: CollectionKind, url: &str) -> Result<CollectionRef>;

    /// Save `stream` of `video`, calling `on_progress` with a percentage as it goes.
    /// Returns the path of the saved file.
    async fn save(
        &self,
        video: &VideoRef,
        stream: &Stream,
        options: &SaveOptions,
        on_progress: &dyn Fn(f64),
    ) -> Result<PathBuf>;
}
