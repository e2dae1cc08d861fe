//! `TripForge` - AI-assisted travel itinerary planning
//!
//! This library provides the core functionality for building itinerary
//! prompts, post-processing generated plans into map-linked markdown,
//! and exporting plans as downloadable text files.

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod gemini;
pub mod linkify;
pub mod models;
pub mod planner;
pub mod prompt;
pub mod web;

// Re-export core types for public API
pub use config::TripForgeConfig;
pub use error::TripForgeError;
pub use gemini::{GeminiClient, PlanGenerator};
pub use models::{TravelPlan, TripRequest};
pub use planner::PlannerService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripForgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
