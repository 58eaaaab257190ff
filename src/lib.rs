//! Ipe - urban zoning resolution service
//!
//! Answers "what urban zoning applies here?" for a WGS84 coordinate or a
//! free-text address. Address queries are geocoded through an external
//! provider, then resolved against a PostGIS store of zoning polygons.

pub mod error;
pub mod geocode;
pub mod models;
pub mod pipeline;
pub mod zone;

pub use error::ResolveError;
pub use models::{Coordinate, GeocodeResult, ZoneQueryResult, ZoneRecord};
