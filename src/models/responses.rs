use crate::models::domain::{ProfileView, SuggestedProfile};
use serde::{Deserialize, Serialize};

/// Response for the scored suggestion endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<SuggestedProfile>,
    pub total_candidates: usize,
}

/// Response for the unscored nearby endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilesResponse {
    pub profiles: Vec<ProfileView>,
    pub total_candidates: usize,
}

/// Response for the pairwise match rate endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRateResponse {
    #[serde(rename = "matchRate")]
    pub match_rate: u32,
}

/// Response after recording a swipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeResponse {
    #[serde(rename = "isMatch")]
    pub is_match: bool,
    #[serde(rename = "matchId", skip_serializing_if = "Option::is_none")]
    pub match_id: Option<String>,
}

/// Response for presence status lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub online: bool,
    #[serde(rename = "lastSeen", skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<chrono::DateTime<chrono::Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
