//! Zone lookup for a WGS84 coordinate.

use tracing::debug;

use super::projection::ZoneProjection;
use super::store::ZoneStore;
use crate::error::ResolveError;
use crate::models::{Coordinate, ZoneQueryResult};

/// Resolves which zoning polygon contains a coordinate.
pub struct ZoneResolver<S: ZoneStore> {
    projection: ZoneProjection,
    store: S,
}

impl<S: ZoneStore> ZoneResolver<S> {
    pub fn new(store: S) -> Self {
        Self {
            projection: ZoneProjection::new(),
            store,
        }
    }

    /// Find the zone containing `coordinate`.
    ///
    /// Latitude/longitude ranges are validated by the caller; this only
    /// reprojects and queries. "No zone" is a normal result, not an error.
    pub async fn resolve(&self, coordinate: Coordinate) -> Result<ZoneQueryResult, ResolveError> {
        let point = self.projection.to_store(coordinate)?;

        debug!(
            "Zone lookup at ({}, {}) -> projected ({:.1}, {:.1})",
            coordinate.lat, coordinate.lng, point.x, point.y
        );

        match self.store.query_containing(point).await? {
            Some(zone) => Ok(ZoneQueryResult::found(zone)),
            None => Ok(ZoneQueryResult::not_found()),
        }
    }
}
