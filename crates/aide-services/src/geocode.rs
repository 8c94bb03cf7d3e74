//! City name to coordinates lookup.

use aide_core::{AssistantError, Coordinates, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::http::service_error;

const SERVICE: &str = "geocoder";

/// Resolves free-text place names.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// First match for `city`, or `None` when nothing matches.
    async fn resolve(&self, city: &str) -> Result<Option<Coordinates>>;
}

/// Geocoder backed by the Nominatim search API.
#[derive(Clone)]
pub struct NominatimGeocoder {
    base_url: String,
    http_client: reqwest::Client,
}

/// Nominatim returns coordinates as decimal strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    pub fn new(base_url: &str, http_client: reqwest::Client) -> Self {
        Self {
            base_url: crate::http::base_url(base_url),
            http_client,
        }
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn resolve(&self, city: &str) -> Result<Option<Coordinates>> {
        let url = format!("{}/search", self.base_url);

        let places: Vec<Place> = self
            .http_client
            .get(&url)
            .query(&[("q", city), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| service_error(SERVICE, e))?
            .error_for_status()
            .map_err(|e| service_error(SERVICE, e))?
            .json()
            .await
            .map_err(|e| service_error(SERVICE, e))?;

        let Some(place) = places.into_iter().next() else {
            debug!("No geocoding match for '{}'", city);
            return Ok(None);
        };

        let parse = |value: &str| {
            value.trim().parse::<f64>().map_err(|_| {
                AssistantError::unavailable(SERVICE, format!("bad coordinate '{}'", value))
            })
        };

        Ok(Some(Coordinates {
            lat: parse(&place.lat)?,
            lon: parse(&place.lon)?,
        }))
    }
}
