// HTTP client utilities
use crate::domain::error::RoamError;
use reqwest::Client;
use std::time::Duration;

/// Create the shared HTTP client with appropriate settings. Per-provider
/// request timeouts are layered on top of the pool-wide one.
pub fn create_client(timeout: Duration) -> Result<Client, RoamError> {
    Ok(Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(30))
        .timeout(timeout)
        .user_agent(concat!("roam/", env!("CARGO_PKG_VERSION")))
        .build()?)
}
