//! # Aide Services
//!
//! Request/response contracts for the assistant's external collaborators,
//! with their production implementations.

pub mod capture;
pub mod feed;
pub mod geocode;
pub mod http;
pub mod speech;
pub mod weather;

#[cfg(test)]
mod testing;

pub use capture::{ScriptedSource, StdinSource, UtteranceSource};
pub use feed::{parse_feed, FeedSource, RssFeed};
pub use geocode::{Geocoder, NominatimGeocoder};
pub use speech::{CommandSpeaker, LogSpeaker, SpeechSynthesizer};
pub use weather::{OpenMeteoClient, WeatherService};

/// Prelude module for common imports.
pub mod prelude {
    pub use crate::capture::UtteranceSource;
    pub use crate::feed::FeedSource;
    pub use crate::geocode::Geocoder;
    pub use crate::speech::SpeechSynthesizer;
    pub use crate::weather::WeatherService;
    pub use aide_core::prelude::*;
}
