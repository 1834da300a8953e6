// Core algorithm exports
pub mod distance;
pub mod ranking;
pub mod scoring;

pub use distance::{
    calculate_bounding_box, haversine_distance, round_km, validate_coordinates, CoordinateError,
};
pub use ranking::RankingEngine;
pub use scoring::{
    activity_score, common_interest_count, interest_score, match_percentage, match_rate,
    profile_completeness_score, proximity_bonus,
};
