pub mod poi_cache;

// Re-export for convenience
pub use poi_cache::{LoadedArea, PoiCache};
