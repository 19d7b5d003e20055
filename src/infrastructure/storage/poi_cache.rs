use crate::domain::geo::BoundingBox;
use crate::domain::model::Poi;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// One cached fetch result: the bounds that produced it, the POIs it
/// yielded, and when it was loaded. Append-only; overlapping areas are
/// expected and deduplicated at read time, not write time.
#[derive(Debug, Clone)]
pub struct LoadedArea {
    pub bounds: BoundingBox,
    pub pois: Vec<Poi>,
    pub loaded_at: DateTime<Utc>,
}

/// Session-scoped in-memory POI cache.
///
/// Area queries go through the loaded-area list in insertion order. The
/// id index is a secondary view kept for point lookups; it is not the
/// source of truth for membership.
pub struct PoiCache {
    areas: Mutex<Vec<LoadedArea>>,
    by_id: DashMap<String, Poi>,
    last_fetch: Mutex<Option<Instant>>,
    enabled: AtomicBool,
}

impl PoiCache {
    pub fn new() -> Self {
        Self {
            areas: Mutex::new(Vec::new()),
            by_id: DashMap::new(),
            last_fetch: Mutex::new(None),
            enabled: AtomicBool::new(false),
        }
    }

    /// Record a fetch result. Never rejects input: an empty list is a
    /// valid "this area has no POIs" observation. Colliding ids overwrite
    /// the index entry (last write wins); the area record keeps its own
    /// copy either way.
    pub fn add_pois(&self, pois: Vec<Poi>, bounds: BoundingBox) {
        for poi in &pois {
            self.by_id.insert(poi.id.clone(), poi.clone());
        }
        self.areas.lock().unwrap().push(LoadedArea {
            bounds,
            pois,
            loaded_at: Utc::now(),
        });
        *self.last_fetch.lock().unwrap() = Some(Instant::now());
    }

    /// True iff a single loaded area fully contains `bounds`. Coverage by
    /// the union of several areas does not count; panning across a region
    /// loaded piecemeal will refetch.
    pub fn is_area_loaded(&self, bounds: &BoundingBox) -> bool {
        self.areas
            .lock()
            .unwrap()
            .iter()
            .any(|area| area.bounds.contains(bounds))
    }

    /// POIs strictly inside `bounds`, collected from every intersecting
    /// loaded area, deduplicated by id. First occurrence wins, in area
    /// insertion order. Unordered beyond that.
    pub fn pois_in_bounds(&self, bounds: &BoundingBox) -> Vec<Poi> {
        let areas = self.areas.lock().unwrap();
        let mut seen: HashSet<String> = HashSet::new();
        let mut result = Vec::new();
        for area in areas.iter().filter(|a| a.bounds.intersects(bounds)) {
            for poi in &area.pois {
                if !bounds.contains_point(poi.position) {
                    continue;
                }
                if seen.insert(poi.id.clone()) {
                    result.push(poi.clone());
                }
            }
        }
        result
    }

    /// Point lookup through the secondary index.
    pub fn get(&self, id: &str) -> Option<Poi> {
        self.by_id.get(id).map(|entry| entry.value().clone())
    }

    pub fn clear(&self) {
        self.areas.lock().unwrap().clear();
        self.by_id.clear();
        *self.last_fetch.lock().unwrap() = None;
    }

    /// Elapsed time since the last successful fetch, `None` if no fetch
    /// has completed this session.
    pub fn time_since_last_fetch(&self) -> Option<Duration> {
        self.last_fetch
            .lock()
            .unwrap()
            .map(|instant| instant.elapsed())
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Gates the whole subsystem; does not clear cached data.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Flip the enabled flag, returning the new state.
    pub fn toggle(&self) -> bool {
        !self.enabled.fetch_xor(true, Ordering::Relaxed)
    }

    pub fn poi_count(&self) -> usize {
        self.by_id.len()
    }

    pub fn area_count(&self) -> usize {
        self.areas.lock().unwrap().len()
    }
}

impl Default for PoiCache {
    fn default() -> Self {
        Self::new()
    }
}
