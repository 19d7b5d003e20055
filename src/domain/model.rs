use crate::domain::error::RoamError;
use crate::domain::geo::LatLng;
use serde::{Deserialize, Serialize};

// A point of interest fetched from the POI provider.
//
// Identity is the provider-assigned id; two POIs carrying the same id are
// the same place even when they arrive via different viewport fetches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poi {
    pub id: String,
    pub name: String,
    /// Free-form tag such as "restaurant", "fuel", "other".
    pub category: String,
    pub position: LatLng,
}

/// Transport modes supported by the route planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Driving,
    Cycling,
    Walking,
    Transit,
}

impl Default for TransportMode {
    fn default() -> Self {
        TransportMode::Driving
    }
}

impl TransportMode {
    /// Average speed in meters per second, used for duration estimates:
    /// walking ~5 km/h, cycling ~15 km/h, driving ~50 km/h urban average.
    /// Transit has no meaningful single speed.
    pub fn average_speed(self) -> Option<f64> {
        match self {
            TransportMode::Walking => Some(1.4),
            TransportMode::Cycling => Some(4.2),
            TransportMode::Driving => Some(13.9),
            TransportMode::Transit => None,
        }
    }
}

/// A computed route. The duration has already been reconciled against the
/// local estimate by the directions provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    pub mode: TransportMode,
    /// Polyline as returned by the provider, passed through untouched.
    pub geometry: Vec<LatLng>,
    pub instructions: Vec<String>,
}

/// A point placed by the user, with whatever naming the search layer had.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Waypoint {
    pub position: LatLng,
    pub name: Option<String>,
    pub address: Option<String>,
}

impl Waypoint {
    pub fn at(position: LatLng) -> Self {
        Self {
            position,
            name: None,
            address: None,
        }
    }
}

/// Maximum number of intermediate stops between origin and destination.
pub const MAX_STOPS: usize = 5;

/// The user's current route request.
///
/// Unset endpoints are explicit empty slots, so genuine equatorial or
/// prime-meridian points stay representable. Any mutation that changes the
/// requested route drops the previously computed one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutePlan {
    origin: Option<Waypoint>,
    destination: Option<Waypoint>,
    stops: Vec<Waypoint>,
    mode: TransportMode,
    route: Option<Route>,
}

impl RoutePlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(&self) -> Option<&Waypoint> {
        self.origin.as_ref()
    }

    pub fn destination(&self) -> Option<&Waypoint> {
        self.destination.as_ref()
    }

    pub fn stops(&self) -> &[Waypoint] {
        &self.stops
    }

    pub fn mode(&self) -> TransportMode {
        self.mode
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn set_origin(&mut self, origin: Option<Waypoint>) {
        self.origin = origin;
        self.route = None;
    }

    pub fn set_destination(&mut self, destination: Option<Waypoint>) {
        self.destination = destination;
        self.route = None;
    }

    pub fn add_stop(&mut self, stop: Waypoint) -> Result<(), RoamError> {
        if self.stops.len() >= MAX_STOPS {
            return Err(RoamError::Routing(format!(
                "at most {} intermediate stops are supported",
                MAX_STOPS
            )));
        }
        self.stops.push(stop);
        self.route = None;
        Ok(())
    }

    pub fn remove_stop(&mut self, index: usize) -> Option<Waypoint> {
        if index >= self.stops.len() {
            return None;
        }
        self.route = None;
        Some(self.stops.remove(index))
    }

    pub fn set_mode(&mut self, mode: TransportMode) {
        if self.mode != mode {
            self.mode = mode;
            self.route = None;
        }
    }

    pub fn set_route(&mut self, route: Route) {
        self.route = Some(route);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Positions to route through, origin first and destination last.
    /// `None` until both endpoints are set.
    pub fn waypoint_positions(&self) -> Option<Vec<LatLng>> {
        let origin = self.origin.as_ref()?;
        let destination = self.destination.as_ref()?;
        let mut positions = Vec::with_capacity(self.stops.len() + 2);
        positions.push(origin.position);
        positions.extend(self.stops.iter().map(|s| s.position));
        positions.push(destination.position);
        Some(positions)
    }
}
