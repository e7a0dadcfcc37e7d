use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Line-oriented terminal input. `next_line` is cancel-safe, so the quiz
/// screen can race it against the countdown in a `select!`.
pub(crate) struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    pub(crate) fn new() -> Self {
        Self { lines: BufReader::new(tokio::io::stdin()).lines() }
    }

    /// None means stdin closed; the shell treats that as quitting.
    pub(crate) async fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.next_line().await?)
    }

    pub(crate) async fn line(&mut self, label: &str) -> Result<Option<String>> {
        println!("{label}");
        match self.next_line().await? {
            Some(line) => Ok(Some(line.trim().to_string())),
            None => Ok(None),
        }
    }

    pub(crate) async fn confirm(&mut self, question: &str) -> Result<bool> {
        match self.line(&format!("{question} (y/n)")).await? {
            Some(answer) => Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes")),
            None => Ok(false),
        }
    }
}
