//! # Aide
//!
//! Voice assistant session: reads one recognized utterance per line of
//! standard input, answers weather, news and reminder requests, and fires
//! reminders while waiting for input.

use std::path::PathBuf;

use aide_assistant::{ConsoleSink, ResponseCoordinator, Session};
use aide_core::SessionConfig;
use aide_services::StdinSource;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Command-line flags. Each one overrides the value from `--config`.
#[derive(Debug, Parser)]
#[command(name = "aide", version, about = "Voice assistant for weather, news and reminders")]
struct Args {
    /// JSON session configuration file.
    #[arg(long, env = "AIDE_CONFIG")]
    config: Option<PathBuf>,

    /// RSS or Atom feed used for news briefings.
    #[arg(long, env = "AIDE_FEED_URL")]
    feed_url: Option<String>,

    /// Seconds between reminder checks.
    #[arg(long, env = "AIDE_TICK_INTERVAL_SECS")]
    tick_interval_secs: Option<u64>,

    /// City used when a weather query names none.
    #[arg(long, env = "AIDE_DEFAULT_CITY")]
    default_city: Option<String>,

    /// Number of headlines per briefing.
    #[arg(long, env = "AIDE_BRIEFING_LIMIT")]
    briefing_limit: Option<usize>,

    /// Timeout for each external call, in milliseconds.
    #[arg(long, env = "AIDE_REQUEST_TIMEOUT_MS")]
    request_timeout_ms: Option<u64>,

    /// Text-to-speech command, e.g. "espeak -v en".
    #[arg(long, env = "AIDE_SPEECH_COMMAND")]
    speech_command: Option<String>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::from_json_file(path)?,
            None => SessionConfig::default(),
        };

        if let Some(url) = self.feed_url {
            config = config.with_feed_url(url);
        }
        if let Some(secs) = self.tick_interval_secs {
            config = config.with_tick_interval_secs(secs);
        }
        if let Some(city) = self.default_city {
            config = config.with_default_city(city);
        }
        if let Some(limit) = self.briefing_limit {
            config = config.with_briefing_limit(limit);
        }
        if let Some(timeout_ms) = self.request_timeout_ms {
            config = config.with_request_timeout_ms(timeout_ms);
        }
        if let Some(command) = self.speech_command {
            config = config.with_speech_command(command);
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the conversation.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Args::parse().into_config()?;

    info!("🤖 Aide starting...");

    let coordinator = ResponseCoordinator::from_config(&config)?;
    let session = Session::new(config, coordinator);

    println!("Try: 'Weather in Kannur', 'Latest News', or 'Remind me in 1 minute to check email'");

    let mut source = StdinSource::new();
    let mut sink = ConsoleSink::stdout();
    let summary = session.run(&mut source, &mut sink).await;

    info!(
        "Delivered {} of {} reminders",
        summary.reminders_delivered, summary.reminders_created
    );

    Ok(())
}
