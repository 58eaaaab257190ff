//! Zone resolution against the spatial store.

pub mod projection;
pub mod resolver;
pub mod store;

pub use projection::{ProjectedPoint, ZoneProjection, STORE_SRID};
pub use resolver::ZoneResolver;
pub use store::{PostgisZoneStore, ZoneStore};
