//! Request handlers and error translation for the HTTP boundary.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use ipe::{ResolveError, ZoneQueryResult};

use crate::AppState;

/// Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let healthy = state.store.ping().await.is_ok();

    Json(HealthResponse {
        status: if healthy { "ok" } else { "degraded" },
        store: healthy,
    })
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    store: bool,
}

#[derive(Deserialize)]
pub struct CoordinateParams {
    lat: f64,
    lng: f64,
}

#[derive(Serialize)]
pub struct ZoneResponse {
    found: bool,
    zone_code: Option<String>,
    zone_description: String,
}

impl ZoneResponse {
    /// Field mapping is a presentation concern of this boundary; other
    /// adapters over the same pipeline may choose their own names.
    fn from_result(result: ZoneQueryResult) -> Self {
        match result.zone {
            Some(zone) => Self {
                found: true,
                zone_code: Some(zone.code),
                zone_description: zone.description,
            },
            None => Self {
                found: false,
                zone_code: None,
                zone_description: result.fallback_message,
            },
        }
    }
}

/// Zone lookup by raw WGS84 coordinate
pub async fn by_coordinate_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CoordinateParams>,
) -> Result<Json<ZoneResponse>, (StatusCode, String)> {
    let result = state
        .pipeline
        .resolve_by_coordinate(params.lat, params.lng)
        .await
        .map_err(into_response_error)?;

    Ok(Json(ZoneResponse::from_result(result)))
}

#[derive(Deserialize)]
pub struct AddressParams {
    address: String,
}

#[derive(Serialize)]
pub struct AddressZoneResponse {
    formatted_address: String,
    latitude: f64,
    longitude: f64,
    found: bool,
    zone_code: Option<String>,
    zone_description: String,
}

/// Zone lookup by free-text address
pub async fn by_address_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AddressParams>,
) -> Result<Json<AddressZoneResponse>, (StatusCode, String)> {
    let resolution = state
        .pipeline
        .resolve_by_address(&params.address)
        .await
        .map_err(into_response_error)?;

    let zone = ZoneResponse::from_result(resolution.zone);

    Ok(Json(AddressZoneResponse {
        formatted_address: resolution.formatted_address,
        latitude: resolution.coordinate.lat,
        longitude: resolution.coordinate.lng,
        found: zone.found,
        zone_code: zone.zone_code,
        zone_description: zone.zone_description,
    }))
}

/// Map pipeline errors onto HTTP statuses.
///
/// Transport details stay in the logs; API consumers only see that an
/// upstream was unavailable.
fn into_response_error(err: ResolveError) -> (StatusCode, String) {
    tracing::error!("Resolution failed: {}", err);

    let status = match &err {
        ResolveError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        ResolveError::Geocoding { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ResolveError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        ResolveError::Transport(_) => StatusCode::BAD_GATEWAY,
    };

    let message = match err {
        ResolveError::Transport(_) => "upstream service unavailable".to_string(),
        other => other.to_string(),
    };

    (status, message)
}
