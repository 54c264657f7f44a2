mod support;

use std::io::ErrorKind;

use support::{FakePlatform, RecordingReporter, ScriptedInput, video};
use tubegrab_core::{
    CollectionKind, Downloader, Menu,
    events::MENU,
    menu::{
        CHANNEL_URL_PROMPT, CHOICE_PROMPT, VIDEO_DIR_PROMPT, VIDEO_URL_PROMPT, VIDEOS_DIR_PROMPT,
    },
};

#[tokio::test]
async fn failed_download_and_bad_choice_keep_the_loop_alive() {
    let reporter = RecordingReporter::default();
    let mut input = ScriptedInput::new(&["1", "https://youtu.be/broken", "", "9", "q"]);

    Menu::new(&mut input, Downloader::new(FakePlatform::default(), &reporter))
        .run()
        .await;

    assert_eq!(
        reporter.lines(),
        vec![
            MENU,
            "Error fetching video: Could not resolve https://youtu.be/broken: Video unavailable",
            MENU,
            "Invalid choice. Please try again.",
            MENU,
            "Have a great day!",
        ]
    );
    assert_eq!(
        input.prompts,
        vec![
            CHOICE_PROMPT,
            VIDEO_URL_PROMPT,
            VIDEO_DIR_PROMPT,
            CHOICE_PROMPT,
            CHOICE_PROMPT,
        ]
    );
}

#[tokio::test]
async fn exit_word_at_a_nested_prompt_ends_the_session() {
    let reporter = RecordingReporter::default();
    let platform = FakePlatform::default().with_video(video("https://youtu.be/ok", "Ok"));
    let mut input = ScriptedInput::new(&["1", "https://youtu.be/ok", "  QUIT "]);

    let mut menu = Menu::new(&mut input, Downloader::new(platform, &reporter));
    menu.run().await;

    assert_eq!(reporter.lines(), vec![MENU, "Have a great day!"]);
    assert_eq!(input.prompts.len(), 3);
}

#[tokio::test]
async fn end_of_input_ends_the_session() {
    let reporter = RecordingReporter::default();
    let mut input = ScriptedInput::default();

    Menu::new(&mut input, Downloader::new(FakePlatform::default(), &reporter))
        .run()
        .await;

    assert_eq!(reporter.lines(), vec![MENU, "Have a great day!"]);
}

#[tokio::test]
async fn channel_choice_asks_for_url_then_directory() {
    let reporter = RecordingReporter::default();
    let platform = FakePlatform::default().with_collection(
        "https://www.youtube.com/@someone",
        CollectionKind::Channel,
        "Someone",
        &["First", "Second"],
    );
    let mut input = ScriptedInput::new(&["3", "https://www.youtube.com/@someone", "", ":exit"]);

    Menu::new(&mut input, Downloader::new(platform, &reporter))
        .run()
        .await;

    assert_eq!(
        input.prompts,
        vec![CHOICE_PROMPT, CHANNEL_URL_PROMPT, VIDEOS_DIR_PROMPT, CHOICE_PROMPT]
    );
    let lines = reporter.lines();
    assert!(lines.contains(&"Downloading video: 1_Second.".to_string()));
    assert!(lines.contains(&"Finished downloading from channel: Someone.".to_string()));
}

#[tokio::test]
async fn unexpected_errors_are_reported_and_looped_past() {
    let reporter = RecordingReporter::default();
    let mut input = ScriptedInput::default()
        .then_error(ErrorKind::InvalidData)
        .then("exit");

    Menu::new(&mut input, Downloader::new(FakePlatform::default(), &reporter))
        .run()
        .await;

    let lines = reporter.lines();
    assert_eq!(lines.len(), 4, "{lines:?}");
    assert!(lines[1].starts_with("An error occurred: IO error"));
    assert!(lines[1].ends_with("Press Enter to continue..."));
    assert_eq!(lines[3], "Have a great day!");
}
