use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::Term;

use tubegrab_core::{
    Config, Downloader, Event, Menu, Reporter, StdinSource, YtDlp,
    config::{DEFAULT_EXTRACTOR_ARGS, DEFAULT_YTDLP},
};

use crate::reporter::ConsoleReporter;

mod logging;
mod reporter;

#[derive(Parser)]
#[command(name = "tubegrab")]
#[command(about = "Interactively download YouTube videos, playlists and whole channels")]
struct Cli {
    /// yt-dlp executable to run
    #[arg(long = "yt-dlp", env = "TUBEGRAB_YTDLP", default_value = DEFAULT_YTDLP)]
    ytdlp: PathBuf,

    /// Extractor arguments forwarded to yt-dlp. Pass an empty string to send none.
    #[arg(long, env = "TUBEGRAB_EXTRACTOR_ARGS", default_value = DEFAULT_EXTRACTOR_ARGS)]
    extractor_args: String,

    /// Keep the terminal contents instead of clearing the screen on start
    #[arg(long)]
    no_clear: bool,

    /// Log more to stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = Config::new(cli.ytdlp, Some(cli.extractor_args));
    tracing::debug!(?config, "starting");

    if !cli.no_clear {
        Term::stdout().clear_screen()?;
    }

    let reporter = ConsoleReporter::new();
    let mut menu = Menu::new(
        StdinSource::new(),
        Downloader::new(YtDlp::new(config), &reporter),
    );

    tokio::select! {
        _ = menu.run() => {}
        _ = tokio::signal::ctrl_c() => {
            reporter.report(&Event::Interrupted);
        }
    }

    // The blocking stdin reader would otherwise hold the runtime open.
    std::process::exit(0);
}
