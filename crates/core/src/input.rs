use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

use crate::error::{Result, TubeGrabError};

/// Words that end the session from any prompt, compared case-insensitively.
pub const EXIT_WORDS: [&str; 6] = ["exit", "quit", "q", ":q", "q!", ":exit"];

pub fn is_exit_word(input: &str) -> bool {
    let lowered = input.to_lowercase();
    EXIT_WORDS.contains(&lowered.as_str())
}

/// Trim a raw line, turning exit words into [`TubeGrabError::ExitRequested`].
pub fn gate(line: &str) -> Result<String> {
    let trimmed = line.trim();
    if is_exit_word(trimmed) {
        return Err(TubeGrabError::ExitRequested);
    }
    Ok(trimmed.to_string())
}

pub trait LineSource {
    /// Show `prompt` and read one line, `None` at end of input.
    async fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>>;
}

impl<S: LineSource> LineSource for &mut S {
    async fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        (**self).read_line(prompt).await
    }
}

/// Prompt for a line and pass it through the exit gate.
pub async fn ask<S: LineSource>(source: &mut S, prompt: &str) -> Result<String> {
    match source.read_line(prompt).await? {
        Some(line) => gate(&line),
        None => Err(TubeGrabError::ExitRequested),
    }
}

pub struct StdinSource {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinSource {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for StdinSource {
    async fn read_line(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(prompt.as_bytes()).await?;
        stdout.flush().await?;
        self.lines.next_line().await
    }
}
