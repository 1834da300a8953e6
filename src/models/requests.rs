use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query for nearby profiles (Policy A)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NearbyQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    /// Comma-separated interest tags to filter on
    #[serde(default)]
    pub interests: Option<String>,
    #[serde(default = "default_nearby_limit")]
    pub limit: u16,
    #[serde(alias = "max_distance_km", rename = "maxDistanceKm")]
    pub max_distance_km: Option<f64>,
}

impl NearbyQuery {
    /// Parsed interest filter list; empty/blank input means no filter
    pub fn interest_filters(&self) -> Option<Vec<String>> {
        let raw = self.interests.as_deref()?;
        let tags: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();
        if tags.is_empty() {
            None
        } else {
            Some(tags)
        }
    }
}

fn default_nearby_limit() -> u16 {
    20
}

/// Query for interest-ranked suggestions (Policy B)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SuggestedQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(default = "default_suggestion_limit")]
    pub limit: u16,
}

/// Query for multi-factor smart suggestions (Policy C)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SmartQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(default = "default_suggestion_limit")]
    pub limit: u16,
}

fn default_suggestion_limit() -> u16 {
    10
}

/// Request for profiles within a radius of an arbitrary center point
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WithinRadiusRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    /// [longitude, latitude]; validated before any query is issued
    pub center: Vec<f64>,
    #[serde(alias = "radius_km", rename = "radiusKm")]
    pub radius_km: Option<f64>,
    #[serde(default = "default_radius_limit")]
    pub limit: u16,
}

fn default_radius_limit() -> u16 {
    50
}

/// Query for nearby profiles annotated with interest-match info
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchInfoQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(default = "default_nearby_limit")]
    pub limit: u16,
}

/// Query for the pairwise interest match rate
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRateQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "target_user_id", rename = "targetUserId")]
    pub target_user_id: String,
}

/// Request to record a swipe decision
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SwipeRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "target_user_id", rename = "targetUserId")]
    pub target_user_id: String,
    /// "LIKE" or "PASS"
    pub decision: String,
}

/// Request to mark a user online or offline
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PresenceRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
}
