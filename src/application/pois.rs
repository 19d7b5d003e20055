use crate::domain::geo::{viewport_bounds, BoundingBox, LatLng};
use crate::domain::model::Poi;
use crate::domain::traits::PoiProvider;
use crate::infrastructure::storage::poi_cache::PoiCache;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};

/// Minimum enforced gap between provider requests.
pub const MIN_REQUEST_INTERVAL: Duration = Duration::from_secs(5);

/// Results are capped to the closest this many POIs.
pub const MAX_RESULTS: usize = 30;

/// Summed min/max drift per axis below which a viewport move is treated as
/// "not changed enough" to justify a refetch.
pub const MIN_BOUNDS_CHANGE: f64 = 0.01;

/// Decides, per viewport, the cheapest correct way to produce a POI list:
/// cache hit, suppressed request, or a fresh provider fetch merged into the
/// cache. Provider failures never surface to the caller.
pub struct PoiFetcher {
    cache: Arc<PoiCache>,
    provider: Arc<dyn PoiProvider>,
    viewport_px: Option<(u32, u32)>,
    /// Bounds of the last request actually issued, not just last loaded.
    last_requested: Mutex<Option<BoundingBox>>,
}

impl PoiFetcher {
    pub fn new(cache: Arc<PoiCache>, provider: Arc<dyn PoiProvider>) -> Self {
        Self {
            cache,
            provider,
            viewport_px: None,
            last_requested: Mutex::new(None),
        }
    }

    /// Use the embedding UI's viewport size instead of the 800x600 fallback.
    pub fn with_viewport(mut self, width_px: u32, height_px: u32) -> Self {
        self.viewport_px = Some((width_px, height_px));
        self
    }

    pub fn cache(&self) -> &PoiCache {
        &self.cache
    }

    /// POIs for the viewport at `center`/`zoom`, ranked by planar distance
    /// to the center and capped at [`MAX_RESULTS`]. Always returns a list;
    /// the worst case is an empty one.
    pub async fn pois_for_viewport(&self, center: LatLng, zoom: u8) -> Vec<Poi> {
        if !self.cache.is_enabled() {
            return Vec::new();
        }

        let bounds = viewport_bounds(center, zoom, self.viewport_px);
        if bounds.is_empty() {
            return Vec::new();
        }

        if self.cache.is_area_loaded(&bounds) {
            debug!(lat = center.lat, lng = center.lng, zoom, "area loaded, serving cache");
            return rank(self.cache.pois_in_bounds(&bounds), center);
        }

        if let Some(elapsed) = self.cache.time_since_last_fetch() {
            if elapsed < MIN_REQUEST_INTERVAL {
                debug!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    "rate limited, serving cache"
                );
                return rank(self.cache.pois_in_bounds(&bounds), center);
            }
        }

        if !self.moved_enough(&bounds) {
            debug!("viewport barely moved, serving cache");
            return rank(self.cache.pois_in_bounds(&bounds), center);
        }

        match self.provider.fetch_pois(bounds).await {
            Ok(pois) if !pois.is_empty() => {
                self.cache.add_pois(pois.clone(), bounds);
                *self.last_requested.lock().unwrap() = Some(bounds);
                rank(pois, center)
            }
            Ok(_) => {
                // An empty response is indistinguishable from a provider-side
                // timeout; never cache it as "no POIs here".
                debug!("provider returned no POIs, falling back to cache");
                rank(self.cache.pois_in_bounds(&bounds), center)
            }
            Err(err) => {
                warn!(%err, "POI fetch failed, falling back to cache");
                rank(self.cache.pois_in_bounds(&bounds), center)
            }
        }
    }

    fn moved_enough(&self, bounds: &BoundingBox) -> bool {
        let last_requested = self.last_requested.lock().unwrap();
        let Some(prev) = *last_requested else {
            return true;
        };
        let lat_change =
            (prev.min_lat - bounds.min_lat).abs() + (prev.max_lat - bounds.max_lat).abs();
        let lng_change =
            (prev.min_lng - bounds.min_lng).abs() + (prev.max_lng - bounds.max_lng).abs();
        lat_change > MIN_BOUNDS_CHANGE || lng_change > MIN_BOUNDS_CHANGE
    }
}

/// Shared ranking step: ascending planar distance to the viewport center,
/// truncated to [`MAX_RESULTS`].
fn rank(pois: Vec<Poi>, center: LatLng) -> Vec<Poi> {
    let mut ranked: Vec<(f64, Poi)> = pois
        .into_iter()
        .map(|poi| (poi.position.planar_distance(center), poi))
        .collect();
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked
        .into_iter()
        .take(MAX_RESULTS)
        .map(|(_, poi)| poi)
        .collect()
}
