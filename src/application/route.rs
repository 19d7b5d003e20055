use crate::domain::error::RoamError;
use crate::domain::model::{Route, RoutePlan};
use crate::domain::traits::DirectionsProvider;
use std::sync::Arc;

/// Computes routes for a plan via the configured directions provider.
pub struct RoutePlanner {
    provider: Arc<dyn DirectionsProvider>,
}

impl RoutePlanner {
    pub fn new(provider: Arc<dyn DirectionsProvider>) -> Self {
        Self { provider }
    }

    /// Route through the plan's origin, stops, and destination. The
    /// provider output arrives with its duration already reconciled.
    pub async fn route_for_plan(&self, plan: &RoutePlan) -> Result<Route, RoamError> {
        let waypoints = plan.waypoint_positions().ok_or_else(|| {
            RoamError::Routing("origin and destination are required".to_string())
        })?;
        self.provider.route(&waypoints, plan.mode()).await
    }
}
