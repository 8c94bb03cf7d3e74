//! Session context and the cooperative session loop.

use aide_core::{CommandParser, SessionConfig};
use aide_reminders::{Reminder, ReminderStore, Scheduler};
use aide_services::UtteranceSource;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::coordinator::{RenderedResponse, ResponseCoordinator};
use crate::output::ResponseSink;

/// Counters reported when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub utterances: usize,
    pub reminders_created: usize,
    pub reminders_delivered: usize,
}

/// Everything that lives for one assistant session.
///
/// The reminder store starts empty and is discarded with the session.
pub struct Session {
    config: SessionConfig,
    parser: CommandParser,
    store: ReminderStore,
    scheduler: Scheduler,
    coordinator: ResponseCoordinator,
    utterances: usize,
}

impl Session {
    /// Create a session with an empty reminder store.
    pub fn new(config: SessionConfig, coordinator: ResponseCoordinator) -> Self {
        Self {
            parser: CommandParser::new(config.default_city.clone(), config.briefing_limit),
            scheduler: Scheduler::new(config.tick_interval()),
            store: ReminderStore::new(),
            coordinator,
            config,
            utterances: 0,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Snapshot of the session's reminders.
    pub fn reminders(&self) -> Vec<Reminder> {
        self.store.list()
    }

    /// Handle one recognized utterance. Blank input is ignored.
    pub async fn handle_utterance(&mut self, utterance: &str) -> Option<RenderedResponse> {
        let query = utterance.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }

        self.utterances += 1;
        info!("🎙️ Recognized: {}", query);

        let command = self.parser.parse(&query);
        Some(self.coordinator.respond(command, &mut self.store).await)
    }

    /// Run one scheduler tick at the current time.
    pub async fn tick(&mut self) -> Vec<RenderedResponse> {
        self.tick_at(Utc::now()).await
    }

    /// Run one scheduler tick at `now` and render each fired reminder.
    ///
    /// Reminders are marked delivered before rendering starts, so a failed
    /// or slow render never causes a second delivery.
    pub async fn tick_at(&mut self, now: DateTime<Utc>) -> Vec<RenderedResponse> {
        let notifications = self.scheduler.tick(&mut self.store, now);

        let mut responses = Vec::with_capacity(notifications.len());
        for notification in notifications {
            responses.push(self.coordinator.respond(notification, &mut self.store).await);
        }
        responses
    }

    /// Interleave scheduler ticks and user input until input is exhausted
    /// or the process is interrupted, then tear the session down.
    pub async fn run<S, O>(mut self, source: &mut S, sink: &mut O) -> SessionSummary
    where
        S: UtteranceSource + ?Sized,
        O: ResponseSink + ?Sized,
    {
        info!(
            "🚀 Session started (tick every {}s, feed {})",
            self.config.tick_interval_secs, self.config.feed_url
        );

        let mut ticker = self.scheduler.ticker();
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        sink.status(&self.store.list());

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let responses = self.tick().await;
                    if !responses.is_empty() {
                        for response in &responses {
                            sink.emit(response);
                        }
                        sink.status(&self.store.list());
                    }
                }
                utterance = source.next_utterance() => {
                    let Some(utterance) = utterance else {
                        debug!("Utterance source exhausted");
                        break;
                    };
                    if let Some(response) = self.handle_utterance(&utterance).await {
                        sink.emit(&response);
                        sink.status(&self.store.list());
                    }
                }
                _ = &mut shutdown => {
                    info!("Interrupted");
                    break;
                }
            }
        }

        self.teardown()
    }

    fn teardown(self) -> SessionSummary {
        let summary = SessionSummary {
            utterances: self.utterances,
            reminders_created: self.store.len(),
            reminders_delivered: self.store.len() - self.store.pending_count(),
        };

        info!(
            "👋 Session ended: {} utterances, discarding {} reminders ({} pending)",
            summary.utterances,
            summary.reminders_created,
            self.store.pending_count()
        );

        summary
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use aide_core::{AssistantError, Coordinates, Forecast, NewsItem, Result};
    use aide_services::{
        FeedSource, Geocoder, ScriptedSource, SpeechSynthesizer, UtteranceSource, WeatherService,
    };
    use async_trait::async_trait;
    use tokio::time::{sleep_until, Instant};

    use super::*;
    use crate::coordinator::{Collaborators, ResponseKind};

    struct Stub;

    #[async_trait]
    impl Geocoder for Stub {
        async fn resolve(&self, city: &str) -> Result<Option<Coordinates>> {
            if city == "atlantis" {
                return Ok(None);
            }
            Ok(Some(Coordinates { lat: 51.5, lon: -0.12 }))
        }
    }

    #[async_trait]
    impl WeatherService for Stub {
        async fn forecast(&self, _coords: Coordinates) -> Result<Forecast> {
            Ok(Forecast { temperature: 12.0 })
        }
    }

    #[async_trait]
    impl FeedSource for Stub {
        async fn fetch(&self, _url: &str) -> Result<Vec<NewsItem>> {
            Ok(vec![NewsItem::new("Only story", "https://news.example.com/1")])
        }
    }

    /// Fails every utterance, like an unplugged speaker.
    struct Mute;

    #[async_trait]
    impl SpeechSynthesizer for Mute {
        async fn speak(&self, _text: &str) -> Result<()> {
            Err(AssistantError::unavailable("speech synthesis", "muted"))
        }
    }

    #[derive(Default)]
    struct Recorder {
        responses: Vec<RenderedResponse>,
        statuses: Vec<usize>,
    }

    impl ResponseSink for Recorder {
        fn emit(&mut self, response: &RenderedResponse) {
            self.responses.push(response.clone());
        }

        fn status(&mut self, reminders: &[Reminder]) {
            self.statuses.push(reminders.len());
        }
    }

    fn session(speaker: Arc<dyn SpeechSynthesizer>) -> Session {
        let config = SessionConfig::default().with_tick_interval_secs(1);
        let collaborators = Collaborators {
            geocoder: Arc::new(Stub),
            weather: Arc::new(Stub),
            feed: Arc::new(Stub),
            speaker,
        };
        let coordinator = ResponseCoordinator::new(collaborators, &config);
        Session::new(config, coordinator)
    }

    #[derive(Default)]
    struct Spoken(Mutex<Vec<String>>);

    #[async_trait]
    impl SpeechSynthesizer for Spoken {
        async fn speak(&self, text: &str) -> Result<()> {
            self.0.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_handle_utterance_lowercases() {
        let mut session = session(Arc::new(Spoken::default()));

        let response = session.handle_utterance("Weather in KANNUR").await.unwrap();
        assert_eq!(response.text, "The current temperature in kannur is 12.0°C.");

        let missing = session.handle_utterance("Weather in Atlantis").await.unwrap();
        assert_eq!(missing.text, "I couldn't find a location named atlantis.");
    }

    #[tokio::test]
    async fn test_blank_utterance_is_ignored() {
        let mut session = session(Arc::new(Spoken::default()));
        assert!(session.handle_utterance("   ").await.is_none());
    }

    #[tokio::test]
    async fn test_reminder_fires_exactly_once() {
        let speaker = Arc::new(Spoken::default());
        let mut session = session(speaker.clone());

        session
            .handle_utterance("Remind me in 1 minute to stretch")
            .await
            .unwrap();
        let due_at = session.reminders()[0].due_at;

        assert!(session.tick_at(due_at - chrono::Duration::seconds(1)).await.is_empty());

        let fired = session.tick_at(due_at).await;
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].kind, ResponseKind::Toast);
        assert_eq!(fired[0].text, "Reminder: It's time to stretch!");

        assert!(session.tick_at(due_at).await.is_empty());
        assert!(session.tick_at(due_at + chrono::Duration::hours(1)).await.is_empty());

        let spoken = speaker.0.lock().unwrap();
        assert_eq!(
            spoken.iter().filter(|t| t.starts_with("Reminder:")).count(),
            1
        );
    }

    #[tokio::test]
    async fn test_speech_failure_still_marks_delivered() {
        let mut session = session(Arc::new(Mute));

        session
            .handle_utterance("remind me in 2 minutes to take tea")
            .await
            .unwrap();
        let due_at = session.reminders()[0].due_at;

        let fired = session.tick_at(due_at).await;
        assert_eq!(fired.len(), 1);
        assert!(!fired[0].spoken);
        assert!(session.reminders()[0].delivered);
        assert!(session.tick_at(due_at).await.is_empty());
    }

    #[tokio::test]
    async fn test_parse_failure_does_not_add_reminder() {
        let mut session = session(Arc::new(Spoken::default()));

        let response = session.handle_utterance("remind me to call mom").await.unwrap();
        assert_eq!(response.kind, ResponseKind::ReminderPrompt);
        assert!(session.reminders().is_empty());
    }

    #[tokio::test]
    async fn test_run_until_input_is_exhausted() {
        let session = session(Arc::new(Spoken::default()));
        let mut source = ScriptedSource::new([
            "Remind me in 5 minutes to check email",
            "",
            "Latest news",
            "sing me a song",
        ]);
        let mut sink = Recorder::default();

        let summary = session.run(&mut source, &mut sink).await;

        assert_eq!(
            summary,
            SessionSummary {
                utterances: 3,
                reminders_created: 1,
                reminders_delivered: 0,
            }
        );
        let kinds: Vec<ResponseKind> = sink.responses.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![ResponseKind::ReminderSet, ResponseKind::News, ResponseKind::Ignored]
        );
        assert_eq!(sink.responses[1].items.len(), 1);
        assert_eq!(sink.statuses.first(), Some(&0));
        assert_eq!(sink.statuses.last(), Some(&1));
    }

    /// Plays its utterances, then holds the input open until `linger` has
    /// passed before reporting exhaustion.
    struct LingeringSource {
        utterances: VecDeque<String>,
        linger: Duration,
        deadline: Option<Instant>,
    }

    #[async_trait]
    impl UtteranceSource for LingeringSource {
        async fn next_utterance(&mut self) -> Option<String> {
            if let Some(utterance) = self.utterances.pop_front() {
                return Some(utterance);
            }
            let deadline = *self.deadline.get_or_insert_with(|| Instant::now() + self.linger);
            sleep_until(deadline).await;
            None
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_delivers_due_reminder_on_tick() {
        let mut session = session(Arc::new(Spoken::default()));
        session
            .store
            .add_at("stretch", 1, Utc::now() - chrono::Duration::minutes(2));

        let mut source = LingeringSource {
            utterances: VecDeque::from(["remind me in 30 minutes to call mom".to_string()]),
            linger: Duration::from_secs(3),
            deadline: None,
        };
        let mut sink = Recorder::default();

        let summary = session.run(&mut source, &mut sink).await;

        assert_eq!(
            summary,
            SessionSummary {
                utterances: 1,
                reminders_created: 2,
                reminders_delivered: 1,
            }
        );

        let toasts: Vec<&RenderedResponse> = sink
            .responses
            .iter()
            .filter(|r| r.kind == ResponseKind::Toast)
            .collect();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].text, "Reminder: It's time to stretch!");
        assert!(toasts[0].spoken);
        assert_eq!(
            sink.responses
                .iter()
                .filter(|r| r.kind == ResponseKind::ReminderSet)
                .count(),
            1
        );
        assert_eq!(sink.statuses.last(), Some(&2));
    }
}
