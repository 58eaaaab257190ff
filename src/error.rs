//! Error taxonomy for the resolution pipeline.

use thiserror::Error;

/// Failures surfaced by the geocoder adapter, the zone resolver, or input
/// validation.
///
/// "No zone found" is deliberately absent: it is a normal
/// [`crate::models::ZoneQueryResult`] with `found == false`.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A required credential or connection string is missing.
    #[error("missing configuration: {0}")]
    Configuration(&'static str),

    /// The provider was reachable but returned no usable result. Carries the
    /// provider's status string for diagnostics.
    #[error("address could not be geocoded (provider status: {status})")]
    Geocoding { status: String },

    /// Network or infrastructure failure reaching an external collaborator.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Caller-supplied input failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<reqwest::Error> for ResolveError {
    fn from(err: reqwest::Error) -> Self {
        ResolveError::Transport(err.to_string())
    }
}

impl From<sqlx::Error> for ResolveError {
    fn from(err: sqlx::Error) -> Self {
        ResolveError::Transport(err.to_string())
    }
}
