use crate::domain::error::RoamError;
use crate::domain::geo::{BoundingBox, LatLng};
use crate::domain::model::Poi;
use crate::domain::traits::PoiProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Largest box side the provider tolerates without timing out (~11 km).
/// Oversized boxes are shrunk around their center before querying.
pub const MAX_BBOX_SIZE: f64 = 0.1;

/// Raw results are capped here; the orchestrator applies its own tighter
/// ranking cap afterwards.
const MAX_RAW_RESULTS: usize = 100;

/// Server-side query budget. Kept above the HTTP timeout so the HTTP layer
/// times out first.
const QUERY_TIMEOUT_SECS: u32 = 25;

// Overpass API response structures
#[derive(Deserialize, Debug)]
struct OverpassResponse {
    elements: Vec<OverpassElement>,
}

#[derive(Deserialize, Debug)]
struct OverpassElement {
    r#type: String,
    id: i64,
    lat: Option<f64>, // nodes only
    lon: Option<f64>,
    center: Option<Center>, // ways, via `out center`
    #[serde(default)]
    tags: Tags,
}

#[derive(Deserialize, Debug)]
struct Center {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize, Debug, Default)]
struct Tags {
    name: Option<String>,
    amenity: Option<String>,
    shop: Option<String>,
    tourism: Option<String>,
}

/// Overpass-backed POI provider
pub struct OverpassClient {
    client: Client,
    base_url: String,
    http_timeout: Duration,
}

impl OverpassClient {
    pub fn new(client: Client, base_url: impl Into<String>, http_timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            http_timeout,
        }
    }

    fn build_query(bounds: &BoundingBox) -> String {
        // Overpass bbox order is (south,west,north,east)
        let bbox = format!(
            "{},{},{},{}",
            bounds.min_lat, bounds.min_lng, bounds.max_lat, bounds.max_lng
        );
        format!(
            r#"[out:json][timeout:{timeout}];
(
  node["amenity"~"^(restaurant|cafe|fuel|parking|fast_food)$"]({bbox});
  node["shop"~"^(supermarket|convenience|bakery)$"]({bbox});
  node["tourism"~"^(attraction|museum|hotel)$"]({bbox});
  way["amenity"~"^(restaurant|cafe|fuel|parking|fast_food)$"]({bbox});
  way["shop"~"^(supermarket|convenience|bakery)$"]({bbox});
  way["tourism"~"^(attraction|museum|hotel)$"]({bbox});
);
out center;"#,
            timeout = QUERY_TIMEOUT_SECS,
            bbox = bbox,
        )
    }

    fn parse(response: OverpassResponse) -> Vec<Poi> {
        let mut pois = Vec::new();
        for element in response.elements {
            let OverpassElement {
                r#type: kind,
                id,
                lat,
                lon,
                center,
                tags,
            } = element;

            // Unnamed elements are not worth a marker
            let Some(name) = tags.name else {
                continue;
            };

            let position = match kind.as_str() {
                "node" => match (lat, lon) {
                    (Some(lat), Some(lon)) => LatLng::new(lat, lon),
                    _ => continue,
                },
                _ => match center {
                    Some(center) => LatLng::new(center.lat, center.lon),
                    None => continue,
                },
            };

            let category = tags
                .amenity
                .or(tags.shop)
                .or(tags.tourism)
                .unwrap_or_else(|| "other".to_string());

            pois.push(Poi {
                id: format!("{}:{}", kind, id),
                name,
                category,
                position,
            });

            if pois.len() == MAX_RAW_RESULTS {
                break;
            }
        }
        pois
    }
}

#[async_trait]
impl PoiProvider for OverpassClient {
    async fn fetch_pois(&self, bounds: BoundingBox) -> Result<Vec<Poi>, RoamError> {
        let bounds = bounds.shrink_to(MAX_BBOX_SIZE);
        debug!(?bounds, "querying Overpass");

        let response = self
            .client
            .post(&self.base_url)
            .header("Content-Type", "text/plain")
            .timeout(self.http_timeout)
            .body(Self::build_query(&bounds))
            .send()
            .await?
            .error_for_status()?
            .json::<OverpassResponse>()
            .await?;

        let pois = Self::parse(response);
        debug!(count = pois.len(), "parsed Overpass elements");
        Ok(pois)
    }
}
