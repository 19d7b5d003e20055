use crate::application::pois::PoiFetcher;
use crate::application::route::RoutePlanner;
use crate::domain::error::RoamError;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::http::create_client;
use crate::infrastructure::network::osrm::OsrmClient;
use crate::infrastructure::network::overpass::OverpassClient;
use crate::infrastructure::storage::poi_cache::PoiCache;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Shared application state: one cache handle, one config, one HTTP client.
///
/// The cache is an explicit handle threaded through constructors; nothing
/// in the crate reaches for a process-global.
#[derive(Clone)]
pub struct AppState {
    pub poi_cache: Arc<PoiCache>,
    pub config: Arc<RwLock<Config>>,
    pub http_client: Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, RoamError> {
        let http_client = create_client(Duration::from_secs(config.osrm.http_timeout_secs))?;

        Ok(Self {
            poi_cache: Arc::new(PoiCache::new()),
            config: Arc::new(RwLock::new(config)),
            http_client,
        })
    }

    /// POI fetch orchestrator wired to the Overpass provider and this
    /// state's cache and viewport configuration.
    pub async fn poi_fetcher(&self) -> PoiFetcher {
        let config = self.config.read().await;
        let provider = OverpassClient::new(
            self.http_client.clone(),
            config.overpass.base_url.clone(),
            Duration::from_secs(config.overpass.http_timeout_secs),
        );
        PoiFetcher::new(self.poi_cache.clone(), Arc::new(provider))
            .with_viewport(config.map.viewport_width, config.map.viewport_height)
    }

    /// Route planner wired to the OSRM provider.
    pub async fn route_planner(&self) -> RoutePlanner {
        let config = self.config.read().await;
        let provider = OsrmClient::new(self.http_client.clone(), config.osrm.base_url.clone());
        RoutePlanner::new(Arc::new(provider))
    }
}
