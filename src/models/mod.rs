// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BoundingBox, Decision, GeoFilter, MatchRecord, ProfileLocation, ProfileView, ScoreBreakdown,
    SuggestedProfile, SwipeDecision, UserProfile,
};
pub use requests::{
    MatchInfoQuery, MatchRateQuery, NearbyQuery, PresenceRequest, SmartQuery, SuggestedQuery,
    SwipeRequest, WithinRadiusRequest,
};
pub use responses::{
    ErrorResponse, HealthResponse, MatchRateResponse, PresenceResponse, ProfilesResponse,
    SuggestionsResponse, SwipeResponse,
};
