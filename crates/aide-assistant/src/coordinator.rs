//! Response coordination.
//!
//! Executes commands against the external collaborators and renders the
//! result as text plus best-effort speech. Collaborator failures never
//! escape: each one is logged and rendered as a user-facing message.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use aide_core::{AssistantError, Command, NewsItem, Notification, Result, SessionConfig};
use aide_reminders::ReminderStore;
use aide_services::http::client_for;
use aide_services::{
    CommandSpeaker, FeedSource, Geocoder, LogSpeaker, NominatimGeocoder, OpenMeteoClient,
    RssFeed, SpeechSynthesizer, WeatherService,
};
use tracing::{debug, info, warn};

const WEATHER_UNAVAILABLE: &str = "Weather service is currently unavailable.";
const NEWS_UNAVAILABLE: &str = "News service is currently unavailable.";
const BRIEFING_PREAMBLE: &str = "Here are the top headlines. ";
const REMINDER_PROMPT: &str =
    "I couldn't catch the time. Please say something like 'remind me in 2 minutes to take tea'.";
const USAGE_HINT: &str =
    "Try: 'Weather in Kannur', 'Latest News', or 'Remind me in 1 minute to check email'.";

/// Something the coordinator can respond to.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Command(Command),
    Notification(Notification),
}

impl From<Command> for Input {
    fn from(command: Command) -> Self {
        Input::Command(command)
    }
}

impl From<Notification> for Input {
    fn from(notification: Notification) -> Self {
        Input::Notification(notification)
    }
}

/// What kind of response was rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Weather,
    News,
    ReminderSet,
    ReminderPrompt,
    /// A fired reminder.
    Toast,
    /// Nothing actionable was recognized.
    Ignored,
}

/// Human-readable result of handling one input.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedResponse {
    pub kind: ResponseKind,

    /// Displayed text. For speakable kinds this is also what was spoken.
    pub text: String,

    /// Headlines, for news briefings.
    pub items: Vec<NewsItem>,

    /// True when the speech collaborator accepted the text.
    pub spoken: bool,
}

impl RenderedResponse {
    fn text(kind: ResponseKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            items: Vec::new(),
            spoken: false,
        }
    }

    fn with_items(mut self, items: Vec<NewsItem>) -> Self {
        self.items = items;
        self
    }
}

/// The external collaborators a coordinator talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub geocoder: Arc<dyn Geocoder>,
    pub weather: Arc<dyn WeatherService>,
    pub feed: Arc<dyn FeedSource>,
    pub speaker: Arc<dyn SpeechSynthesizer>,
}

impl Collaborators {
    /// Production collaborators described by `config`.
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        let http_client = client_for(config)?;

        let speaker: Arc<dyn SpeechSynthesizer> = match &config.speech_command {
            Some(command) => Arc::new(CommandSpeaker::from_command_line(command)?),
            None => Arc::new(LogSpeaker),
        };

        Ok(Self {
            geocoder: Arc::new(NominatimGeocoder::new(&config.geocoder_url, http_client.clone())),
            weather: Arc::new(OpenMeteoClient::new(&config.weather_url, http_client.clone())),
            feed: Arc::new(RssFeed::new(http_client)),
            speaker,
        })
    }
}

/// Turns commands and notifications into rendered responses.
pub struct ResponseCoordinator {
    collaborators: Collaborators,
    feed_url: String,
    timeout: Duration,
}

impl ResponseCoordinator {
    /// Create a coordinator over the given collaborators.
    pub fn new(collaborators: Collaborators, config: &SessionConfig) -> Self {
        Self {
            collaborators,
            feed_url: config.feed_url.clone(),
            timeout: config.request_timeout(),
        }
    }

    /// Create a coordinator with the production collaborators.
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        Ok(Self::new(Collaborators::from_config(config)?, config))
    }

    /// Handle one command or notification.
    ///
    /// The store is only touched synchronously, before any await, so a
    /// reminder is fully added or not at all.
    pub async fn respond(&self, input: impl Into<Input>, store: &mut ReminderStore) -> RenderedResponse {
        match input.into() {
            Input::Command(command) => {
                debug!("Handling {} intent", command.intent());
                match command {
                    Command::WeatherQuery { city } => self.weather_report(&city).await,
                    Command::NewsBriefing { limit } => self.news_briefing(limit).await,
                    Command::ReminderRequest { minutes, task } => {
                        let response = set_reminder(store, minutes, &task);
                        self.spoken(response).await
                    }
                    Command::ReminderParseFailed { raw, reason } => {
                        info!("Could not parse reminder '{}': {}", raw, reason);
                        let prompt = RenderedResponse::text(ResponseKind::ReminderPrompt, REMINDER_PROMPT);
                        self.spoken(prompt).await
                    }
                    Command::Unrecognized { raw } => {
                        debug!("Ignoring unrecognized utterance '{}'", raw);
                        RenderedResponse::text(ResponseKind::Ignored, USAGE_HINT)
                    }
                }
            }
            Input::Notification(notification) => {
                self.spoken(RenderedResponse::text(ResponseKind::Toast, notification.text))
                    .await
            }
        }
    }

    async fn weather_report(&self, city: &str) -> RenderedResponse {
        let text = match self.lookup_temperature(city).await {
            Ok(temperature) => format!(
                "The current temperature in {} is {}°C.",
                city,
                format_temperature(temperature)
            ),
            Err(AssistantError::LookupNotFound { .. }) => {
                format!("I couldn't find a location named {}.", city)
            }
            Err(e) => {
                warn!("Weather lookup for '{}' failed: {}", city, e);
                WEATHER_UNAVAILABLE.to_string()
            }
        };

        self.spoken(RenderedResponse::text(ResponseKind::Weather, text)).await
    }

    async fn lookup_temperature(&self, city: &str) -> Result<f64> {
        let coords = self
            .bounded("geocoder", self.collaborators.geocoder.resolve(city))
            .await?
            .ok_or_else(|| AssistantError::LookupNotFound {
                query: city.to_string(),
            })?;

        let forecast = self
            .bounded("weather service", self.collaborators.weather.forecast(coords))
            .await?;

        Ok(forecast.temperature)
    }

    async fn news_briefing(&self, limit: usize) -> RenderedResponse {
        let fetched = self
            .bounded("news feed", self.collaborators.feed.fetch(&self.feed_url))
            .await;

        match fetched {
            Ok(mut items) => {
                items.truncate(limit);
                let briefing = briefing(&items);
                self.spoken(RenderedResponse::text(ResponseKind::News, briefing).with_items(items))
                    .await
            }
            Err(e) => {
                warn!("News fetch from {} failed: {}", self.feed_url, e);
                self.spoken(RenderedResponse::text(ResponseKind::News, NEWS_UNAVAILABLE))
                    .await
            }
        }
    }

    /// Speak the response text, degrading to text-only on any failure.
    async fn spoken(&self, mut response: RenderedResponse) -> RenderedResponse {
        response.spoken = match self
            .bounded("speech synthesis", self.collaborators.speaker.speak(&response.text))
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!("Speech failed, falling back to text only: {}", e);
                false
            }
        };
        response
    }

    /// Run an external call under the session's request timeout.
    async fn bounded<T>(&self, service: &str, call: impl Future<Output = Result<T>>) -> Result<T> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| AssistantError::Timeout {
                duration_ms: self.timeout.as_millis() as u64,
                message: format!("{} did not respond", service),
            })?
    }
}

fn set_reminder(store: &mut ReminderStore, minutes: u32, task: &str) -> RenderedResponse {
    let id = store.add(task, minutes);
    info!("⏰ Reminder {} set for '{}' in {} minutes", id, task, minutes);

    RenderedResponse::text(
        ResponseKind::ReminderSet,
        format!("Set a reminder for {} in {} minutes.", task, minutes),
    )
}

/// Spoken summary enumerating each headline with a 1-based ordinal.
fn briefing(items: &[NewsItem]) -> String {
    items
        .iter()
        .enumerate()
        .fold(BRIEFING_PREAMBLE.to_string(), |mut text, (i, item)| {
            text.push_str(&format!("Headline {}: {}. ", i + 1, item.title));
            text
        })
}

/// Whole temperatures keep one decimal place ("12.0"), others print as-is.
fn format_temperature(temperature: f64) -> String {
    if temperature.is_finite() && temperature.fract() == 0.0 {
        format!("{:.1}", temperature)
    } else {
        temperature.to_string()
    }
}
