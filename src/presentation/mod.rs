pub mod format;

// Re-export for convenience
pub use format::{format_distance, format_duration};
