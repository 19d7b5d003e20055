//! Route plan slots and route planner tests

use async_trait::async_trait;
use roam::{
    DirectionsProvider, LatLng, RoamError, Route, RoutePlan, RoutePlanner, TransportMode,
    Waypoint, MAX_STOPS,
};
use std::sync::Arc;

/// Echoes the waypoints back as geometry, 1 km per leg.
struct FixedRoute;

#[async_trait]
impl DirectionsProvider for FixedRoute {
    async fn route(&self, waypoints: &[LatLng], mode: TransportMode) -> Result<Route, RoamError> {
        Ok(Route {
            distance_meters: 1000.0 * (waypoints.len() - 1) as f64,
            duration_seconds: 600.0,
            mode,
            geometry: waypoints.to_vec(),
            instructions: Vec::new(),
        })
    }
}

fn sample_route(mode: TransportMode) -> Route {
    Route {
        distance_meters: 1.0,
        duration_seconds: 1.0,
        mode,
        geometry: Vec::new(),
        instructions: Vec::new(),
    }
}

#[test]
fn stops_are_capped_at_five() {
    let mut plan = RoutePlan::new();
    for i in 0..MAX_STOPS {
        plan.add_stop(Waypoint::at(LatLng::new(i as f64, 0.0))).unwrap();
    }
    assert!(plan.add_stop(Waypoint::at(LatLng::new(9.0, 9.0))).is_err());
    assert_eq!(plan.stops().len(), MAX_STOPS);
}

#[test]
fn removing_a_stop_returns_it() {
    let mut plan = RoutePlan::new();
    plan.add_stop(Waypoint::at(LatLng::new(1.0, 1.0))).unwrap();
    plan.add_stop(Waypoint::at(LatLng::new(2.0, 2.0))).unwrap();

    let removed = plan.remove_stop(0).unwrap();
    assert_eq!(removed.position, LatLng::new(1.0, 1.0));
    assert_eq!(plan.stops().len(), 1);
    assert!(plan.remove_stop(5).is_none());
}

#[test]
fn mutating_the_plan_drops_the_computed_route() {
    let mut plan = RoutePlan::new();
    plan.set_origin(Some(Waypoint::at(LatLng::new(0.0, 0.0))));
    plan.set_destination(Some(Waypoint::at(LatLng::new(1.0, 1.0))));

    plan.set_route(sample_route(TransportMode::Driving));
    assert!(plan.route().is_some());
    plan.set_mode(TransportMode::Walking);
    assert!(plan.route().is_none());

    plan.set_route(sample_route(TransportMode::Walking));
    plan.set_destination(Some(Waypoint::at(LatLng::new(2.0, 2.0))));
    assert!(plan.route().is_none());

    // re-setting the same mode is not a change
    plan.set_route(sample_route(TransportMode::Walking));
    plan.set_mode(TransportMode::Walking);
    assert!(plan.route().is_some());
}

#[test]
fn equatorial_endpoints_are_real_points() {
    // (0,0) is a coordinate, not an empty slot
    let mut plan = RoutePlan::new();
    plan.set_origin(Some(Waypoint::at(LatLng::new(0.0, 0.0))));
    plan.set_destination(Some(Waypoint::at(LatLng::new(1.0, 1.0))));

    let positions = plan.waypoint_positions().unwrap();
    assert_eq!(positions.len(), 2);
    assert_eq!(positions[0], LatLng::new(0.0, 0.0));
}

#[test]
fn reset_empties_every_slot() {
    let mut plan = RoutePlan::new();
    plan.set_origin(Some(Waypoint::at(LatLng::new(0.0, 0.0))));
    plan.set_destination(Some(Waypoint::at(LatLng::new(1.0, 1.0))));
    plan.add_stop(Waypoint::at(LatLng::new(0.5, 0.5))).unwrap();
    plan.set_route(sample_route(TransportMode::Driving));

    plan.reset();

    assert!(plan.origin().is_none());
    assert!(plan.destination().is_none());
    assert!(plan.stops().is_empty());
    assert!(plan.route().is_none());
    assert!(plan.waypoint_positions().is_none());
}

#[tokio::test]
async fn planner_requires_both_endpoints() {
    let planner = RoutePlanner::new(Arc::new(FixedRoute));
    let mut plan = RoutePlan::new();
    plan.set_origin(Some(Waypoint::at(LatLng::new(0.0, 0.0))));

    assert!(planner.route_for_plan(&plan).await.is_err());
}

#[tokio::test]
async fn planner_threads_stops_between_endpoints() {
    let planner = RoutePlanner::new(Arc::new(FixedRoute));
    let mut plan = RoutePlan::new();
    plan.set_origin(Some(Waypoint::at(LatLng::new(0.0, 0.0))));
    plan.set_destination(Some(Waypoint::at(LatLng::new(3.0, 3.0))));
    plan.add_stop(Waypoint::at(LatLng::new(1.0, 1.0))).unwrap();
    plan.add_stop(Waypoint::at(LatLng::new(2.0, 2.0))).unwrap();

    let route = planner.route_for_plan(&plan).await.unwrap();

    assert_eq!(route.geometry.len(), 4);
    assert_eq!(route.geometry[1], LatLng::new(1.0, 1.0));
    assert_eq!(route.geometry[3], LatLng::new(3.0, 3.0));
    assert_eq!(route.distance_meters, 3000.0);
}
