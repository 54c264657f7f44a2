use tracing::{debug, warn};

use crate::{
    downloader::Downloader,
    error::{Result, TubeGrabError},
    events::{Event, Reporter},
    input::{LineSource, ask},
    platform::VideoPlatform,
    types::{CollectionKind, Destination},
};

pub const CHOICE_PROMPT: &str = "\nChoose an option: ";
pub const VIDEO_URL_PROMPT: &str = "Enter the Youtube video URL: ";
pub const PLAYLIST_URL_PROMPT: &str = "Enter the playlist URL: ";
pub const CHANNEL_URL_PROMPT: &str = "Enter the channel URL: ";
pub const VIDEO_DIR_PROMPT: &str =
    "Enter the directory to save the video (or press Enter to use current directory): ";
pub const VIDEOS_DIR_PROMPT: &str =
    "Enter the directory to save the videos (or press Enter to use current directory): ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Video,
    Playlist,
    Channel,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "1" => Some(MenuChoice::Video),
            "2" => Some(MenuChoice::Playlist),
            "3" => Some(MenuChoice::Channel),
            _ => None,
        }
    }
}

/// The interactive session: show the menu, run the chosen action, repeat.
pub struct Menu<S, P, R> {
    input: S,
    downloader: Downloader<P, R>,
}

impl<S, P, R> Menu<S, P, R>
where
    S: LineSource,
    P: VideoPlatform,
    R: Reporter,
{
    pub fn new(input: S, downloader: Downloader<P, R>) -> Self {
        Self { input, downloader }
    }

    /// Loop until the user types an exit word or input runs out.
    pub async fn run(&mut self) {
        loop {
            self.reporter().report(&Event::Menu);
            match self.step().await {
                Ok(()) => {}
                Err(TubeGrabError::ExitRequested) => {
                    debug!("exit requested");
                    self.reporter().report(&Event::Farewell);
                    return;
                }
                Err(e) => {
                    warn!(error = %e, "menu action failed");
                    self.reporter().report(&Event::UnexpectedError(&e));
                }
            }
        }
    }

    fn reporter(&self) -> &R {
        self.downloader.reporter()
    }

    async fn step(&mut self) -> Result<()> {
        let choice = ask(&mut self.input, CHOICE_PROMPT).await?;
        match MenuChoice::parse(&choice) {
            Some(MenuChoice::Video) => self.video().await,
            Some(MenuChoice::Playlist) => self.collection(CollectionKind::Playlist).await,
            Some(MenuChoice::Channel) => self.collection(CollectionKind::Channel).await,
            None => {
                self.reporter().report(&Event::InvalidChoice);
                Ok(())
            }
        }
    }

    async fn video(&mut self) -> Result<()> {
        let url = ask(&mut self.input, VIDEO_URL_PROMPT).await?;
        let dir = ask(&mut self.input, VIDEO_DIR_PROMPT).await?;
        self.downloader
            .download_video(&url, &Destination::from_input(&dir))
            .await;
        Ok(())
    }

    async fn collection(&mut self, kind: CollectionKind) -> Result<()> {
        let (url_prompt, dir_prompt) = match kind {
            CollectionKind::Playlist => (PLAYLIST_URL_PROMPT, VIDEO_DIR_PROMPT),
            CollectionKind::Channel => (CHANNEL_URL_PROMPT, VIDEOS_DIR_PROMPT),
        };
        let url = ask(&mut self.input, url_prompt).await?;
        let dir = ask(&mut self.input, dir_prompt).await?;
        self.downloader
            .download_collection(kind, &url, &Destination::from_input(&dir))
            .await;
        Ok(())
    }
}
