use crate::domain::error::RoamError;
use crate::domain::geo::{BoundingBox, LatLng};
use crate::domain::model::{Poi, Route, TransportMode};
use async_trait::async_trait;

/// Trait for POI data providers
///
/// Implementations can be swapped without changing the orchestrator, which
/// also keeps the fetch policy testable against a scripted provider.
#[async_trait]
pub trait PoiProvider: Send + Sync {
    /// Fetch POIs inside a bounding box.
    ///
    /// An empty list may mean "genuinely no POIs" or a provider-side soft
    /// failure (timeout); callers decide how much to trust it.
    async fn fetch_pois(&self, bounds: BoundingBox) -> Result<Vec<Poi>, RoamError>;
}

/// Trait for directions providers
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    /// Compute a route through `waypoints` (at least two) for `mode`.
    async fn route(&self, waypoints: &[LatLng], mode: TransportMode) -> Result<Route, RoamError>;
}
