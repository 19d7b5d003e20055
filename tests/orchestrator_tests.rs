//! POI fetch orchestrator tests: cache hits, rate limiting, movement
//! thresholds, and failure fallbacks. The clock is paused throughout.

mod common;

use common::{poi, Script, ScriptedProvider};
use roam::{viewport_bounds, LatLng, Poi, PoiCache, PoiFetcher};
use std::sync::Arc;
use std::time::Duration;

const CENTER: LatLng = LatLng {
    lat: 38.7223,
    lng: -9.1393,
};
const ZOOM: u8 = 13;

fn enabled_cache() -> Arc<PoiCache> {
    let cache = Arc::new(PoiCache::new());
    cache.set_enabled(true);
    cache
}

#[tokio::test]
async fn disabled_subsystem_returns_empty_without_fetching() {
    let provider = ScriptedProvider::new(vec![Script::Pois(vec![poi(
        "1", CENTER.lat, CENTER.lng,
    )])]);
    let fetcher = PoiFetcher::new(Arc::new(PoiCache::new()), provider.clone());

    let pois = fetcher.pois_for_viewport(CENTER, ZOOM).await;

    assert!(pois.is_empty());
    assert_eq!(provider.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn fetch_merges_into_cache_and_ranks_by_distance() {
    // 40 POIs marching north from the center, delivered in reverse order
    let pois: Vec<Poi> = (0..40)
        .map(|i| poi(&format!("p{}", i), CENTER.lat + 0.0001 * i as f64, CENTER.lng))
        .collect();
    let provider =
        ScriptedProvider::new(vec![Script::Pois(pois.into_iter().rev().collect())]);
    let cache = enabled_cache();
    let fetcher = PoiFetcher::new(cache.clone(), provider.clone());

    let result = fetcher.pois_for_viewport(CENTER, ZOOM).await;

    assert_eq!(result.len(), 30);
    assert_eq!(result[0].id, "p0");
    assert_eq!(result[29].id, "p29");
    assert_eq!(provider.calls(), 1);
    assert_eq!(cache.area_count(), 1);

    // the same viewport is now a loaded area: no second fetch
    let again = fetcher.pois_for_viewport(CENTER, ZOOM).await;
    assert_eq!(again.len(), 30);
    assert_eq!(again[0].id, "p0");
    assert_eq!(provider.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn rapid_refetches_are_rate_limited() {
    let provider = ScriptedProvider::new(vec![
        Script::Pois(vec![poi("1", CENTER.lat, CENTER.lng)]),
        Script::Pois(vec![poi("2", 40.0, -8.0)]),
    ]);
    let fetcher = PoiFetcher::new(enabled_cache(), provider.clone());

    let first = fetcher.pois_for_viewport(CENTER, ZOOM).await;
    assert_eq!(first.len(), 1);
    assert_eq!(provider.calls(), 1);

    // far away but only 2s later: suppressed by the 5s minimum interval,
    // and nothing cached there means an empty list
    tokio::time::advance(Duration::from_secs(2)).await;
    let second = fetcher
        .pois_for_viewport(LatLng::new(40.0, -8.0), ZOOM)
        .await;
    assert!(second.is_empty());
    assert_eq!(provider.calls(), 1);

    // once the interval has passed the fetch goes out
    tokio::time::advance(Duration::from_secs(4)).await;
    let third = fetcher
        .pois_for_viewport(LatLng::new(40.0, -8.0), ZOOM)
        .await;
    assert_eq!(third.len(), 1);
    assert_eq!(third[0].id, "2");
    assert_eq!(provider.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn tiny_viewport_moves_serve_cache_instead_of_refetching() {
    let provider = ScriptedProvider::new(vec![
        Script::Pois(vec![poi("1", CENTER.lat + 0.001, CENTER.lng)]),
        Script::Pois(vec![poi("2", CENTER.lat, CENTER.lng)]),
    ]);
    let fetcher = PoiFetcher::new(enabled_cache(), provider.clone());

    fetcher.pois_for_viewport(CENTER, ZOOM).await;
    assert_eq!(provider.calls(), 1);

    // wait out the rate limiter, then nudge the center by a hair
    tokio::time::advance(Duration::from_secs(6)).await;
    let nudged = LatLng::new(CENTER.lat + 0.001, CENTER.lng);
    let result = fetcher.pois_for_viewport(nudged, ZOOM).await;

    assert_eq!(provider.calls(), 1);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, "1");
}

#[tokio::test(start_paused = true)]
async fn empty_responses_are_not_cached() {
    let provider = ScriptedProvider::new(vec![
        Script::Empty,
        Script::Pois(vec![poi("1", CENTER.lat, CENTER.lng)]),
    ]);
    let cache = enabled_cache();
    let fetcher = PoiFetcher::new(cache.clone(), provider.clone());

    let first = fetcher.pois_for_viewport(CENTER, ZOOM).await;
    assert!(first.is_empty());
    assert_eq!(provider.calls(), 1);

    // the empty result was not recorded as a loaded area
    let bounds = viewport_bounds(CENTER, ZOOM, None);
    assert!(!cache.is_area_loaded(&bounds));
    assert_eq!(cache.area_count(), 0);

    // it did not arm the rate limiter either: an immediate retry over the
    // same viewport fetches again and succeeds
    let second = fetcher.pois_for_viewport(CENTER, ZOOM).await;
    assert_eq!(second.len(), 1);
    assert_eq!(provider.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn provider_failures_fall_back_to_cached_pois() {
    let provider = ScriptedProvider::new(vec![
        Script::Pois(vec![poi("1", CENTER.lat, CENTER.lng)]),
        Script::Fail,
    ]);
    let fetcher = PoiFetcher::new(enabled_cache(), provider.clone());

    fetcher.pois_for_viewport(CENTER, ZOOM).await;

    // zoom out: a wider box the loaded area does not contain
    tokio::time::advance(Duration::from_secs(6)).await;
    let result = fetcher.pois_for_viewport(CENTER, ZOOM - 1).await;

    assert_eq!(provider.calls(), 2);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, "1");
}
