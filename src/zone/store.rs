//! Spatial store access for zoning polygons.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;
use tracing::info;

use super::projection::{ProjectedPoint, STORE_SRID};
use crate::error::ResolveError;
use crate::models::ZoneRecord;

/// Containment lookup against stored zoning polygons.
///
/// Implementations receive points already expressed in the store's native
/// reference system.
#[async_trait]
pub trait ZoneStore: Send + Sync {
    /// Return the zoning record whose polygon contains `point`, if any.
    /// Zero rows is a normal outcome, not an error.
    async fn query_containing(
        &self,
        point: ProjectedPoint,
    ) -> Result<Option<ZoneRecord>, ResolveError>;
}

/// PostGIS-backed zone store.
///
/// Expects `zoning_polygons(code, description, geom)` with `geom` stored in
/// SRID [`STORE_SRID`]. Zones should not overlap; if they do, row order
/// decides which one is returned (known limitation of the dataset, not
/// resolved here).
#[derive(Clone)]
pub struct PostgisZoneStore {
    pool: PgPool,
}

impl PostgisZoneStore {
    /// Connect a pooled store. The pool lives for the process lifetime and
    /// hands one connection per query, released on every exit path.
    pub async fn connect(database_url: &str) -> Result<Self, ResolveError> {
        info!("Connecting to spatial store...");

        let pool = PgPoolOptions::new()
            .max_connections(8)
            .acquire_timeout(std::time::Duration::from_secs(5))
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Check that the store answers queries.
    pub async fn ping(&self) -> Result<(), ResolveError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl ZoneStore for PostgisZoneStore {
    async fn query_containing(
        &self,
        point: ProjectedPoint,
    ) -> Result<Option<ZoneRecord>, ResolveError> {
        // The SRID on the constructed point must match the SRID the
        // polygons were stored in; a mismatch yields empty results rather
        // than an error.
        let query = format!(
            "SELECT code, description FROM zoning_polygons \
             WHERE ST_Contains(geom, ST_SetSRID(ST_MakePoint($1, $2), {})) \
             LIMIT 1",
            STORE_SRID
        );

        let row = sqlx::query(&query)
            .bind(point.x)
            .bind(point.y)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(ZoneRecord {
                code: row.try_get("code")?,
                description: row.try_get("description")?,
            })),
            None => Ok(None),
        }
    }
}
