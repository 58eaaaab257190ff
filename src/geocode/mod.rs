//! Geocoding adapter for the external provider.
//!
//! Turns a free-text address into a formatted address plus a WGS84
//! coordinate, using the Google Maps Geocoding API wire shape.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ResolveError;
use crate::models::{Coordinate, GeocodeResult};

const GEOCODE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Gateway to an external geocoding provider.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Geocode a free-text address. Callers validate that the address is
    /// non-empty before invoking this.
    async fn geocode(&self, address: &str) -> Result<GeocodeResult, ResolveError>;
}

/// Google Maps Geocoding API client.
pub struct GoogleGeocoder {
    client: Client,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeocodeCandidate {
    formatted_address: String,
    geometry: CandidateGeometry,
}

#[derive(Debug, Deserialize)]
struct CandidateGeometry {
    location: CandidateLocation,
}

#[derive(Debug, Deserialize)]
struct CandidateLocation {
    lat: f64,
    lng: f64,
}

impl GoogleGeocoder {
    /// Create a geocoder. The credential is checked at call time, so the
    /// coordinate path keeps working without one.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("ipe/0.1 (zoning lookup)")
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    /// Issue one request to the provider and take the FIRST candidate.
    ///
    /// Ambiguous addresses are not disambiguated; the provider's own ranking
    /// decides which candidate wins.
    async fn geocode(&self, address: &str) -> Result<GeocodeResult, ResolveError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(ResolveError::Configuration("GEOCODING_API_KEY is not set"))?;

        let response = self
            .client
            .get(GEOCODE_ENDPOINT)
            .query(&[("address", address), ("key", key)])
            .send()
            .await?;

        let mut body: GeocodeResponse = response.json().await?;

        if body.status != "OK" || body.results.is_empty() {
            warn!(
                "Geocoding failed for {:?}: provider status {}",
                address, body.status
            );
            return Err(ResolveError::Geocoding {
                status: body.status,
            });
        }

        // Checked non-empty above
        let first = body.results.remove(0);
        let coordinate = Coordinate::new(first.geometry.location.lat, first.geometry.location.lng)?;

        debug!(
            "Geocoded {:?} -> {:?} at ({}, {})",
            address, first.formatted_address, coordinate.lat, coordinate.lng
        );

        Ok(GeocodeResult {
            formatted_address: first.formatted_address,
            coordinate,
        })
    }
}
