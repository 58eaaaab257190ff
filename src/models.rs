//! Core data types for zoning resolution.

use serde::{Deserialize, Serialize};

use crate::error::ResolveError;

/// Notice returned in place of a zone when no polygon contains the point.
pub const FALLBACK_MESSAGE: &str =
    "Não foi possível identificar o zoneamento para esta localização.";

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting out-of-range latitude or longitude.
    pub fn new(lat: f64, lng: f64) -> Result<Self, ResolveError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ResolveError::InvalidInput(format!(
                "latitude {} out of range [-90, 90]",
                lat
            )));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(ResolveError::InvalidInput(format!(
                "longitude {} out of range [-180, 180]",
                lng
            )));
        }
        Ok(Self { lat, lng })
    }
}

/// One geocoded address: the provider's formatted form plus its location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub coordinate: Coordinate,
}

/// A zoning designation from the spatial store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRecord {
    /// Short zoning identifier, e.g. "ZEU"
    pub code: String,
    /// Human-readable zoning name
    pub description: String,
}

/// Outcome of a zone lookup. "No zone found" is a valid result, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneQueryResult {
    pub found: bool,
    pub zone: Option<ZoneRecord>,
    pub fallback_message: String,
}

impl ZoneQueryResult {
    pub fn found(zone: ZoneRecord) -> Self {
        Self {
            found: true,
            zone: Some(zone),
            fallback_message: String::new(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            found: false,
            zone: None,
            fallback_message: FALLBACK_MESSAGE.to_string(),
        }
    }
}
