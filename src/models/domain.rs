use serde::{Deserialize, Serialize};

/// User profile as stored in the directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    /// Ordered photo URLs, first is the primary photo (max 10)
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub birthday: Option<chrono::NaiveDate>,
    /// Interest tags, trimmed and deduplicated on write (max 10)
    #[serde(default)]
    pub interests: Vec<String>,
    /// [longitude, latitude] as the directory stores geo points
    #[serde(default)]
    pub coordinates: Option<[f64; 2]>,
    #[serde(rename = "shareLocation", default)]
    pub share_location: bool,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl UserProfile {
    /// (latitude, longitude) pair, regardless of the sharing flag
    pub fn point(&self) -> Option<(f64, f64)> {
        self.coordinates.map(|[lon, lat]| (lat, lon))
    }

    /// Point usable for proximity filtering: present AND shared
    pub fn shared_point(&self) -> Option<(f64, f64)> {
        if self.share_location {
            self.point()
        } else {
            None
        }
    }

    pub fn has_shareable_location(&self) -> bool {
        self.share_location && self.coordinates.is_some()
    }

    pub fn has_photos(&self) -> bool {
        !self.photos.is_empty()
    }

    /// Age in full years, if a birthday is set
    pub fn age(&self) -> Option<u8> {
        let birthday = self.birthday?;
        let days = (chrono::Utc::now().date_naive() - birthday).num_days();
        if days < 0 {
            return None;
        }
        Some((days as f64 / 365.25) as u8)
    }
}

/// Like/pass decision on a swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    Like,
    Pass,
}

/// One append-only swipe record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeDecision {
    #[serde(rename = "fromUserId")]
    pub from_user_id: String,
    #[serde(rename = "toUserId")]
    pub to_user_id: String,
    pub decision: Decision,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Immutable record of a mutual like
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: String,
    #[serde(rename = "userA")]
    pub user_a: String,
    #[serde(rename = "userB")]
    pub user_b: String,
    #[serde(rename = "matchedAt")]
    pub matched_at: chrono::DateTime<chrono::Utc>,
}

/// Location block surfaced to callers only when the owner shares it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileLocation {
    /// [longitude, latitude]
    pub coordinates: [f64; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "shareLocation")]
    pub share_location: bool,
}

/// Profile fields exposed through the suggestion API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileView {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub photos: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<chrono::NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    pub interests: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<ProfileLocation>,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<&UserProfile> for ProfileView {
    fn from(profile: &UserProfile) -> Self {
        let location = match (profile.share_location, profile.coordinates) {
            (true, Some(coordinates)) => Some(ProfileLocation {
                coordinates,
                address: profile.address.clone(),
                city: profile.city.clone(),
                country: profile.country.clone(),
                share_location: true,
            }),
            _ => None,
        };

        Self {
            id: profile.id.clone(),
            name: profile.name.clone(),
            gender: profile.gender.clone(),
            bio: profile.bio.clone(),
            photos: profile.photos.clone(),
            birthday: profile.birthday,
            age: profile.age(),
            interests: profile.interests.clone(),
            location,
            created_at: profile.created_at,
        }
    }
}

/// Sub-scores reported by the smart suggestion policy
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub interest: f64,
    pub profile: f64,
    pub activity: f64,
    pub total: f64,
}

/// Scored candidate, computed per request and never persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestedProfile {
    #[serde(flatten)]
    pub profile: ProfileView,
    #[serde(rename = "commonInterestsCount")]
    pub common_interests_count: usize,
    #[serde(rename = "matchPercentage")]
    pub match_percentage: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(rename = "distanceUnit")]
    pub distance_unit: String,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<ScoreBreakdown>,
    #[serde(rename = "isNearby", skip_serializing_if = "Option::is_none")]
    pub is_nearby: Option<bool>,
    #[serde(rename = "isActive", skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl SuggestedProfile {
    /// Candidate surfaced without any scoring applied (nearby/radius policies)
    pub fn unscored(profile: &UserProfile) -> Self {
        Self {
            profile: ProfileView::from(profile),
            common_interests_count: 0,
            match_percentage: 0,
            distance: None,
            distance_unit: "km".to_string(),
            score: 0.0,
            scores: None,
            is_nearby: None,
            is_active: None,
        }
    }
}

/// Geospatial bounding box used to express radius queries to the directory
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Radius constraint passed to the directory candidate query
#[derive(Debug, Clone, Copy)]
pub struct GeoFilter {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
}
