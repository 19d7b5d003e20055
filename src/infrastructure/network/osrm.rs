use crate::domain::duration::adjust_duration;
use crate::domain::error::RoamError;
use crate::domain::geo::LatLng;
use crate::domain::model::{Route, TransportMode};
use crate::domain::traits::DirectionsProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

// OSRM API response structures
#[derive(Deserialize, Debug)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Deserialize, Debug)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: OsrmGeometry,
    #[serde(default)]
    legs: Vec<OsrmLeg>,
}

#[derive(Deserialize, Debug)]
struct OsrmGeometry {
    // GeoJSON order: [lng, lat]
    coordinates: Vec<[f64; 2]>,
}

#[derive(Deserialize, Debug)]
struct OsrmLeg {
    #[serde(default)]
    steps: Vec<OsrmStep>,
}

#[derive(Deserialize, Debug)]
struct OsrmStep {
    maneuver: Option<OsrmManeuver>,
}

#[derive(Deserialize, Debug)]
struct OsrmManeuver {
    instruction: Option<String>,
}

/// OSRM-backed directions provider
pub struct OsrmClient {
    client: Client,
    base_url: String,
}

impl OsrmClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// OSRM has no transit profile; fall back to driving rather than fail.
    fn profile(mode: TransportMode) -> &'static str {
        match mode {
            TransportMode::Driving | TransportMode::Transit => "driving",
            TransportMode::Cycling => "cycling",
            TransportMode::Walking => "walking",
        }
    }
}

#[async_trait]
impl DirectionsProvider for OsrmClient {
    async fn route(&self, waypoints: &[LatLng], mode: TransportMode) -> Result<Route, RoamError> {
        if waypoints.len() < 2 {
            return Err(RoamError::Routing(
                "at least two waypoints are required".to_string(),
            ));
        }

        let coordinates = waypoints
            .iter()
            .map(|p| format!("{},{}", p.lng, p.lat))
            .collect::<Vec<_>>()
            .join(";");
        let url = format!("{}/{}/{}", self.base_url, Self::profile(mode), coordinates);
        debug!(%url, "requesting OSRM route");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("overview", "full"),
                ("geometries", "geojson"),
                ("steps", "true"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<OsrmResponse>()
            .await?;

        if response.code != "Ok" {
            return Err(RoamError::Routing(format!(
                "OSRM returned code {}",
                response.code
            )));
        }
        let Some(route) = response.routes.into_iter().next() else {
            return Err(RoamError::Routing("no route found".to_string()));
        };

        let instructions = route
            .legs
            .iter()
            .flat_map(|leg| &leg.steps)
            .filter_map(|step| {
                step.maneuver
                    .as_ref()
                    .and_then(|m| m.instruction.clone())
            })
            .collect();

        let geometry = route
            .geometry
            .coordinates
            .iter()
            .map(|&[lng, lat]| LatLng::new(lat, lng))
            .collect();

        // Public OSRM instances sometimes report one duration for every
        // profile; reconcile it against the local estimate before use.
        let duration_seconds = adjust_duration(route.duration, route.distance, mode);

        Ok(Route {
            distance_meters: route.distance,
            duration_seconds,
            mode,
            geometry,
            instructions,
        })
    }
}
