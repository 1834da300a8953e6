//! Amora Suggest - candidate suggestion and ranking service for the Amora dating app
//!
//! This library provides the ranking engine behind the suggestion queries:
//! location-filtered nearby lookups, shared-interest ranking, and multi-factor
//! smart suggestions, all over candidates excluded by the requester's swipe
//! history.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    distance::{haversine_distance, round_km, validate_coordinates},
    scoring::{match_percentage, match_rate},
    RankingEngine,
};
pub use crate::models::{ScoreBreakdown, SuggestedProfile, SwipeDecision, UserProfile};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let distance = haversine_distance(40.7128, -74.0060, 40.7128, -74.0060);
        assert_eq!(round_km(distance), 0.0);
    }
}
