//! Recognized-utterance input.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::io::{self, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::warn;

/// Produces one recognized utterance per capture, or `None` when input is
/// exhausted.
///
/// Implementations must be cancel-safe: the session loop drops a pending
/// capture whenever a scheduler tick wins the race.
#[async_trait]
pub trait UtteranceSource: Send {
    async fn next_utterance(&mut self) -> Option<String>;
}

/// Reads one utterance per line of standard input.
pub struct StdinSource {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinSource {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(io::stdin()).lines(),
        }
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UtteranceSource for StdinSource {
    async fn next_utterance(&mut self) -> Option<String> {
        match self.lines.next_line().await {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to read utterance: {}", e);
                None
            }
        }
    }
}

/// Replays a fixed list of utterances.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    utterances: VecDeque<String>,
}

impl ScriptedSource {
    pub fn new<I, S>(utterances: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            utterances: utterances.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of utterances not yet replayed.
    pub fn remaining(&self) -> usize {
        self.utterances.len()
    }
}

#[async_trait]
impl UtteranceSource for ScriptedSource {
    async fn next_utterance(&mut self) -> Option<String> {
        self.utterances.pop_front()
    }
}
