pub mod http;
pub mod osrm;
pub mod overpass;

// Re-export for convenience
pub use osrm::OsrmClient;
pub use overpass::OverpassClient;
