//! Text-to-speech output.

use std::process::Stdio;

use aide_core::{AssistantError, Result};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

const SERVICE: &str = "speech synthesis";

/// Best-effort speech output. Callers treat every error as "text only".
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn speak(&self, text: &str) -> Result<()>;
}

/// Speaker that only writes the utterance to the log.
#[derive(Debug, Clone, Default)]
pub struct LogSpeaker;

#[async_trait]
impl SpeechSynthesizer for LogSpeaker {
    async fn speak(&self, text: &str) -> Result<()> {
        info!("🔊 {}", text);
        Ok(())
    }
}

/// Speaker that runs an external TTS program (e.g. `espeak -v en`) with the
/// text appended as the last argument.
#[derive(Debug, Clone)]
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
}

impl CommandSpeaker {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Split a whitespace-separated command line into program and arguments.
    pub fn from_command_line(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or_else(|| {
            AssistantError::InvalidConfig("speech command cannot be empty".to_string())
        })?;

        Ok(Self::new(program, parts.collect()))
    }
}

#[async_trait]
impl SpeechSynthesizer for CommandSpeaker {
    async fn speak(&self, text: &str) -> Result<()> {
        debug!("Running {} for {} bytes of speech", self.program, text.len());

        // Dropping the future (e.g. on timeout) kills the child.
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| AssistantError::unavailable(SERVICE, format!("{}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AssistantError::unavailable(
                SERVICE,
                format!("{} exited with {}: {}", self.program, output.status, stderr.trim()),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_command_line() {
        let speaker = CommandSpeaker::from_command_line("espeak -v en").unwrap();
        assert_eq!(speaker.program, "espeak");
        assert_eq!(speaker.args, vec!["-v", "en"]);
    }

    #[test]
    fn test_from_empty_command_line() {
        assert!(CommandSpeaker::from_command_line("   ").is_err());
    }

    #[tokio::test]
    async fn test_log_speaker() {
        assert!(LogSpeaker.speak("hello").await.is_ok());
    }

    #[tokio::test]
    async fn test_command_speaker_success() {
        let speaker = CommandSpeaker::new("true", vec![]);
        assert!(speaker.speak("hello").await.is_ok());
    }

    #[tokio::test]
    async fn test_command_speaker_failure() {
        let speaker = CommandSpeaker::new("false", vec![]);
        let result = speaker.speak("hello").await;
        assert!(matches!(result, Err(AssistantError::ServiceUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_command_speaker_missing_program() {
        let speaker = CommandSpeaker::new("aide-no-such-tts-program", vec![]);
        assert!(speaker.speak("hello").await.is_err());
    }
}
