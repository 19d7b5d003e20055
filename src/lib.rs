//! Core of an interactive map route planner: the viewport POI caching
//! layer, the POI fetch orchestration policy, and route-duration
//! reconciliation.
//!
//! The map UI is an external collaborator: it reports pan/zoom events and
//! renders whatever POI lists and routes come back. Everything here is
//! in-memory and scoped to a single session; fetch failures degrade to
//! cached data instead of surfacing.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod state;

// Re-export for convenience
pub use application::pois::{PoiFetcher, MAX_RESULTS, MIN_BOUNDS_CHANGE, MIN_REQUEST_INTERVAL};
pub use application::route::RoutePlanner;
pub use application::viewport::{debounce, Viewport, ViewportWatcher, DEBOUNCE_DELAY};
pub use domain::duration::{adjust_duration, calculate_duration};
pub use domain::error::RoamError;
pub use domain::geo::{viewport_bounds, BoundingBox, LatLng, DEFAULT_VIEWPORT_PX};
pub use domain::model::{Poi, Route, RoutePlan, TransportMode, Waypoint, MAX_STOPS};
pub use domain::traits::{DirectionsProvider, PoiProvider};
pub use infrastructure::config::{load_config, Config};
pub use infrastructure::log::init_logging;
pub use infrastructure::network::{OsrmClient, OverpassClient};
pub use infrastructure::storage::{LoadedArea, PoiCache};
pub use presentation::format::{format_distance, format_duration};
pub use state::AppState;
