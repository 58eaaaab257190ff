//! Resolution pipeline composing the geocoder and the zone resolver.

use tracing::debug;

use crate::error::ResolveError;
use crate::geocode::Geocoder;
use crate::models::{Coordinate, ZoneQueryResult};
use crate::zone::{ZoneResolver, ZoneStore};

/// Outcome of an address-driven resolution.
#[derive(Debug, Clone)]
pub struct AddressResolution {
    pub formatted_address: String,
    pub coordinate: Coordinate,
    pub zone: ZoneQueryResult,
}

/// Stateless two-stage pipeline: address -> coordinate -> zone.
///
/// Each call is independent; no state is retained between invocations.
pub struct ResolutionPipeline<G: Geocoder, S: ZoneStore> {
    geocoder: G,
    resolver: ZoneResolver<S>,
}

impl<G: Geocoder, S: ZoneStore> ResolutionPipeline<G, S> {
    pub fn new(geocoder: G, resolver: ZoneResolver<S>) -> Self {
        Self { geocoder, resolver }
    }

    /// Resolve the zoning for a free-text address.
    ///
    /// Geocoding must succeed before the spatial store is touched; a
    /// geocoding failure is surfaced verbatim and the store is never
    /// queried.
    pub async fn resolve_by_address(
        &self,
        address: &str,
    ) -> Result<AddressResolution, ResolveError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(ResolveError::InvalidInput(
                "address must not be empty".to_string(),
            ));
        }

        let geocoded = self.geocoder.geocode(address).await?;
        debug!(
            "Resolving zone for {:?} ({}, {})",
            geocoded.formatted_address, geocoded.coordinate.lat, geocoded.coordinate.lng
        );

        let zone = self.resolver.resolve(geocoded.coordinate).await?;

        Ok(AddressResolution {
            formatted_address: geocoded.formatted_address,
            coordinate: geocoded.coordinate,
            zone,
        })
    }

    /// Resolve the zoning for a raw WGS84 coordinate.
    pub async fn resolve_by_coordinate(
        &self,
        lat: f64,
        lng: f64,
    ) -> Result<ZoneQueryResult, ResolveError> {
        let coordinate = Coordinate::new(lat, lng)?;
        self.resolver.resolve(coordinate).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeocodeResult, ZoneRecord};
    use crate::zone::ProjectedPoint;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Counts queries and answers with a fixed record.
    struct CountingStore {
        calls: Arc<AtomicUsize>,
        zone: Option<ZoneRecord>,
    }

    #[async_trait]
    impl ZoneStore for CountingStore {
        async fn query_containing(
            &self,
            _point: ProjectedPoint,
        ) -> Result<Option<ZoneRecord>, ResolveError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.zone.clone())
        }
    }

    struct FixedGeocoder {
        formatted_address: &'static str,
        lat: f64,
        lng: f64,
    }

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn geocode(&self, _address: &str) -> Result<GeocodeResult, ResolveError> {
            Ok(GeocodeResult {
                formatted_address: self.formatted_address.to_string(),
                coordinate: Coordinate::new(self.lat, self.lng)?,
            })
        }
    }

    struct NoResultGeocoder;

    #[async_trait]
    impl Geocoder for NoResultGeocoder {
        async fn geocode(&self, _address: &str) -> Result<GeocodeResult, ResolveError> {
            Err(ResolveError::Geocoding {
                status: "ZERO_RESULTS".to_string(),
            })
        }
    }

    struct UnreachableGeocoder;

    #[async_trait]
    impl Geocoder for UnreachableGeocoder {
        async fn geocode(&self, _address: &str) -> Result<GeocodeResult, ResolveError> {
            unreachable!("geocoder must not be invoked")
        }
    }

    fn zeu_record() -> ZoneRecord {
        ZoneRecord {
            code: "ZEU".to_string(),
            description: "Zona Eixo de Estruturação da Transformação Urbana".to_string(),
        }
    }

    fn pipeline<G: Geocoder>(
        geocoder: G,
        zone: Option<ZoneRecord>,
    ) -> (ResolutionPipeline<G, CountingStore>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let store = CountingStore {
            calls: Arc::clone(&calls),
            zone,
        };
        (
            ResolutionPipeline::new(geocoder, ZoneResolver::new(store)),
            calls,
        )
    }

    #[tokio::test]
    async fn address_path_geocodes_then_resolves() {
        let geocoder = FixedGeocoder {
            formatted_address: "Av. Paulista, 1578 - Bela Vista, São Paulo - SP, Brazil",
            lat: -23.5614,
            lng: -46.6559,
        };
        let (pipeline, calls) = pipeline(geocoder, Some(zeu_record()));

        let resolution = pipeline
            .resolve_by_address("Av. Paulista, 1578, São Paulo")
            .await
            .unwrap();

        assert_eq!(
            resolution.formatted_address,
            "Av. Paulista, 1578 - Bela Vista, São Paulo - SP, Brazil"
        );
        assert!((resolution.coordinate.lat - -23.5614).abs() < 1e-9);
        assert!((resolution.coordinate.lng - -46.6559).abs() < 1e-9);
        assert_eq!(resolution.zone.zone.unwrap().code, "ZEU");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn geocoding_failure_never_touches_the_store() {
        let (pipeline, calls) = pipeline(NoResultGeocoder, Some(zeu_record()));

        let err = pipeline
            .resolve_by_address("Rua Inexistente, 0")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ResolveError::Geocoding { ref status } if status == "ZERO_RESULTS"
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn blank_address_is_rejected_before_geocoding() {
        let (pipeline, calls) = pipeline(UnreachableGeocoder, None);

        let err = pipeline.resolve_by_address("   ").await.unwrap_err();

        assert!(matches!(err, ResolveError::InvalidInput(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn out_of_range_latitude_is_rejected_before_the_resolver() {
        let (pipeline, calls) = pipeline(UnreachableGeocoder, None);

        let err = pipeline.resolve_by_coordinate(95.0, 10.0).await.unwrap_err();

        assert!(matches!(err, ResolveError::InvalidInput(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn coordinate_path_skips_the_geocoder() {
        let (pipeline, calls) = pipeline(UnreachableGeocoder, Some(zeu_record()));

        let result = pipeline
            .resolve_by_coordinate(-23.5614, -46.6559)
            .await
            .unwrap();

        assert!(result.found);
        assert_eq!(result.zone.unwrap().code, "ZEU");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
