//! Session-level configuration, fixed at session start.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AssistantError, Result};

/// Feed used for news briefings when none is configured.
pub const DEFAULT_FEED_URL: &str = "https://rss.nytimes.com/services/xml/rss/nyt/HomePage.xml";

/// City used for weather queries that do not name one.
pub const DEFAULT_CITY: &str = "London";

/// Number of headlines in a briefing.
pub const DEFAULT_BRIEFING_LIMIT: usize = 5;

/// Scheduler cadence in seconds.
pub const DEFAULT_TICK_INTERVAL_SECS: u64 = 5;

/// Configuration for an assistant session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// RSS or Atom feed for news briefings.
    pub feed_url: String,

    /// Seconds between scheduler ticks.
    pub tick_interval_secs: u64,

    /// City used when a weather query names none.
    pub default_city: String,

    /// Maximum number of headlines per briefing.
    pub briefing_limit: usize,

    /// Upper bound for any single external call, in milliseconds.
    pub request_timeout_ms: u64,

    /// Base URL of the Nominatim geocoding service.
    pub geocoder_url: String,

    /// Base URL of the Open-Meteo forecast service.
    pub weather_url: String,

    /// User-Agent sent with outgoing HTTP requests.
    pub user_agent: String,

    /// External text-to-speech program; the text is passed as its last argument.
    pub speech_command: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            tick_interval_secs: DEFAULT_TICK_INTERVAL_SECS,
            default_city: DEFAULT_CITY.to_string(),
            briefing_limit: DEFAULT_BRIEFING_LIMIT,
            request_timeout_ms: 10_000,
            geocoder_url: "https://nominatim.openstreetmap.org".to_string(),
            weather_url: "https://api.open-meteo.com".to_string(),
            user_agent: "AssistantApp".to_string(),
            speech_command: None,
        }
    }
}

impl SessionConfig {
    /// Load a configuration from a JSON file; missing fields take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AssistantError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: SessionConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the news feed URL.
    pub fn with_feed_url(mut self, url: impl Into<String>) -> Self {
        self.feed_url = url.into();
        self
    }

    /// Set the scheduler cadence.
    pub fn with_tick_interval_secs(mut self, secs: u64) -> Self {
        self.tick_interval_secs = secs;
        self
    }

    /// Set the fallback city.
    pub fn with_default_city(mut self, city: impl Into<String>) -> Self {
        self.default_city = city.into();
        self
    }

    /// Set the number of headlines per briefing.
    pub fn with_briefing_limit(mut self, limit: usize) -> Self {
        self.briefing_limit = limit;
        self
    }

    /// Set the external call timeout.
    pub fn with_request_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.request_timeout_ms = timeout_ms;
        self
    }

    /// Set the text-to-speech program.
    pub fn with_speech_command(mut self, command: impl Into<String>) -> Self {
        self.speech_command = Some(command.into());
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_secs == 0 {
            return Err(AssistantError::InvalidConfig(
                "tick interval must be at least one second".to_string(),
            ));
        }

        if self.briefing_limit == 0 {
            return Err(AssistantError::InvalidConfig(
                "briefing limit must be positive".to_string(),
            ));
        }

        if self.request_timeout_ms == 0 {
            return Err(AssistantError::InvalidConfig(
                "request timeout must be positive".to_string(),
            ));
        }

        if self.default_city.trim().is_empty() {
            return Err(AssistantError::InvalidConfig(
                "default city cannot be empty".to_string(),
            ));
        }

        for (name, url) in [
            ("feed_url", &self.feed_url),
            ("geocoder_url", &self.geocoder_url),
            ("weather_url", &self.weather_url),
        ] {
            if url.trim().is_empty() {
                return Err(AssistantError::InvalidConfig(format!("{} cannot be empty", name)));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.default_city, "London");
        assert_eq!(config.briefing_limit, 5);
        assert_eq!(config.tick_interval(), Duration::from_secs(5));
        assert!(config.speech_command.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SessionConfig::default()
            .with_default_city("Kannur")
            .with_briefing_limit(3)
            .with_tick_interval_secs(1)
            .with_speech_command("espeak");
        assert_eq!(config.default_city, "Kannur");
        assert_eq!(config.briefing_limit, 3);
        assert_eq!(config.speech_command.as_deref(), Some("espeak"));
    }

    #[test]
    fn test_validation_rejects_zero_interval() {
        let config = SessionConfig::default().with_tick_interval_secs(0);
        assert!(matches!(config.validate(), Err(AssistantError::InvalidConfig(_))));
    }

    #[test]
    fn test_validation_rejects_empty_feed() {
        let config = SessionConfig::default().with_feed_url("  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"default_city": "Paris", "briefing_limit": 2}"#).unwrap();
        assert_eq!(config.default_city, "Paris");
        assert_eq!(config.briefing_limit, 2);
        assert_eq!(config.feed_url, DEFAULT_FEED_URL);
    }

    #[test]
    fn test_missing_file_is_invalid_config() {
        let result = SessionConfig::from_json_file("/nonexistent/aide.json");
        assert!(matches!(result, Err(AssistantError::InvalidConfig(_))));
    }
}
