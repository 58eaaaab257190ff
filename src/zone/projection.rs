//! Reprojection between WGS84 and the store's native reference system.
//!
//! Zoning polygons are stored in SIRGAS 2000 / UTM zone 23S (EPSG:31983).
//! [`STORE_SRID`] and [`STORE_DEF`] must describe the same system as the
//! stored geometries: a mismatch does not fail, it silently produces wrong
//! or empty containment results.

use proj4rs::proj::Proj;
use proj4rs::transform::transform;

use crate::error::ResolveError;
use crate::models::Coordinate;

/// SRID the zoning polygons are stored in (SIRGAS 2000 / UTM zone 23S).
pub const STORE_SRID: i32 = 31983;

/// Proj definition for EPSG:4326 (WGS84 geographic).
const WGS84_DEF: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// Proj definition for EPSG:31983.
const STORE_DEF: &str =
    "+proj=utm +zone=23 +south +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs";

/// A point in the store's projected reference system, in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
}

/// Transform between WGS84 coordinates and the store's projected system.
pub struct ZoneProjection {
    wgs84: Proj,
    store: Proj,
}

impl ZoneProjection {
    pub fn new() -> Self {
        // Both definitions are compile-time constants
        Self {
            wgs84: Proj::from_proj_string(WGS84_DEF).expect("Invalid WGS84 proj definition"),
            store: Proj::from_proj_string(STORE_DEF).expect("Invalid store proj definition"),
        }
    }

    /// Project a WGS84 coordinate into the store's reference system.
    pub fn to_store(&self, coordinate: Coordinate) -> Result<ProjectedPoint, ResolveError> {
        // proj4rs takes geographic coordinates in radians
        let mut point = (
            coordinate.lng.to_radians(),
            coordinate.lat.to_radians(),
            0.0,
        );
        transform(&self.wgs84, &self.store, &mut point).map_err(|e| {
            ResolveError::InvalidInput(format!(
                "cannot project ({}, {}): {}",
                coordinate.lat, coordinate.lng, e
            ))
        })?;

        Ok(ProjectedPoint {
            x: point.0,
            y: point.1,
        })
    }

    /// Inverse transform, from the store's system back to WGS84.
    pub fn to_wgs84(&self, point: ProjectedPoint) -> Result<Coordinate, ResolveError> {
        let mut p = (point.x, point.y, 0.0);
        transform(&self.store, &self.wgs84, &mut p).map_err(|e| {
            ResolveError::InvalidInput(format!(
                "cannot unproject ({}, {}): {}",
                point.x, point.y, e
            ))
        })?;

        Coordinate::new(p.1.to_degrees(), p.0.to_degrees())
    }
}

impl Default for ZoneProjection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paulista_projects_into_the_utm_23s_window() {
        let projection = ZoneProjection::new();
        let coord = Coordinate::new(-23.5614, -46.6559).unwrap();
        let point = projection.to_store(coord).unwrap();

        // Known EPSG:31983 location of Av. Paulista, generous margin
        assert!(
            point.x > 329_000.0 && point.x < 333_000.0,
            "easting {}",
            point.x
        );
        assert!(
            point.y > 7_391_500.0 && point.y < 7_395_500.0,
            "northing {}",
            point.y
        );
    }

    #[test]
    fn wgs84_round_trip_is_stable() {
        let projection = ZoneProjection::new();
        let coord = Coordinate::new(-23.5614, -46.6559).unwrap();

        let back = projection
            .to_wgs84(projection.to_store(coord).unwrap())
            .unwrap();

        assert!((back.lat - coord.lat).abs() < 1e-6);
        assert!((back.lng - coord.lng).abs() < 1e-6);
    }

    #[test]
    fn projected_round_trip_is_stable() {
        let projection = ZoneProjection::new();
        let original = ProjectedPoint {
            x: 332_000.0,
            y: 7_393_500.0,
        };

        let wgs84 = projection.to_wgs84(original).unwrap();
        let back = projection.to_store(wgs84).unwrap();

        assert!((back.x - original.x).abs() < 0.5, "easting {}", back.x);
        assert!((back.y - original.y).abs() < 0.5, "northing {}", back.y);
    }
}
