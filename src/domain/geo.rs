use serde::{Deserialize, Serialize};

/// Plain latitude/longitude degrees, non-wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Planar Euclidean distance in degree-space. Not geodesic; used only
    /// for ranking POIs at city scale.
    pub fn planar_distance(self, other: LatLng) -> f64 {
        let dlat = self.lat - other.lat;
        let dlng = self.lng - other.lng;
        (dlat * dlat + dlng * dlng).sqrt()
    }
}

/// Axis-aligned rectangle in latitude/longitude degrees.
///
/// A box with min > max on either axis is degenerate: it contains nothing,
/// intersects nothing, and is contained by nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    pub fn is_empty(&self) -> bool {
        self.min_lat > self.max_lat || self.min_lng > self.max_lng
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// True when `other` lies fully inside this box on both axes.
    pub fn contains(&self, other: &BoundingBox) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.min_lat <= other.min_lat
            && self.max_lat >= other.max_lat
            && self.min_lng <= other.min_lng
            && self.max_lng >= other.max_lng
    }

    /// Standard rectangle-overlap test: not fully to one side on either axis.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        !(self.max_lat < other.min_lat
            || self.min_lat > other.max_lat
            || self.max_lng < other.min_lng
            || self.min_lng > other.max_lng)
    }

    /// Strictly-inside test used by cache reads.
    pub fn contains_point(&self, p: LatLng) -> bool {
        p.lat > self.min_lat && p.lat < self.max_lat && p.lng > self.min_lng && p.lng < self.max_lng
    }

    /// Shrink around the center when either side exceeds `max_side` degrees.
    /// Boxes already within the limit come back unchanged.
    pub fn shrink_to(&self, max_side: f64) -> BoundingBox {
        let lat_side = self.max_lat - self.min_lat;
        let lng_side = self.max_lng - self.min_lng;
        if lat_side <= max_side && lng_side <= max_side {
            return *self;
        }
        let center = self.center();
        let half_lat = (lat_side / 2.0).min(max_side / 2.0);
        let half_lng = (lng_side / 2.0).min(max_side / 2.0);
        BoundingBox {
            min_lat: center.lat - half_lat,
            max_lat: center.lat + half_lat,
            min_lng: center.lng - half_lng,
            max_lng: center.lng + half_lng,
        }
    }
}

/// Fallback viewport size when the embedding UI cannot report one.
pub const DEFAULT_VIEWPORT_PX: (u32, u32) = (800, 600);

/// Geographic bounds visible for a map `center` at `zoom`.
///
/// Standard slippy-map scale: a 256 px tile spans the 360-degree world at
/// zoom 0 and doubles per level. No clamping to the +-85/+-180 map limits;
/// callers clamp before use if they need to.
pub fn viewport_bounds(center: LatLng, zoom: u8, viewport_px: Option<(u32, u32)>) -> BoundingBox {
    let (width_px, height_px) = viewport_px.unwrap_or(DEFAULT_VIEWPORT_PX);
    let pixels_per_degree = 256.0 * f64::powi(2.0, zoom as i32) / 360.0;
    let lat_delta = height_px as f64 / pixels_per_degree / 2.0;
    let lng_delta = width_px as f64 / pixels_per_degree / 2.0;
    BoundingBox {
        min_lat: center.lat - lat_delta,
        max_lat: center.lat + lat_delta,
        min_lng: center.lng - lng_delta,
        max_lng: center.lng + lng_delta,
    }
}
