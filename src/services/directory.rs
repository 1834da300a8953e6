use crate::core::distance::calculate_bounding_box;
use crate::models::{GeoFilter, UserProfile};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the user directory
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("directory returned error: {0}")]
    ApiError(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

impl DirectoryError {
    /// True when the directory itself could not be reached (connect/timeout)
    pub fn is_unavailable(&self) -> bool {
        match self {
            DirectoryError::RequestError(e) => e.is_connect() || e.is_timeout(),
            DirectoryError::ApiError(_) => true,
            _ => false,
        }
    }
}

/// User directory client
///
/// The directory is an external document store reached over HTTP. This
/// client covers the two queries the ranking engine needs: profile lookup
/// by id, and a filtered candidate listing. Radius constraints are expressed
/// as bounding-box range filters on the coordinate fields; the exact
/// great-circle cutoff is enforced in the ranking engine.
pub struct DirectoryClient {
    base_url: String,
    api_key: String,
    database_id: String,
    profiles_collection: String,
    client: Client,
}

impl DirectoryClient {
    pub fn new(
        base_url: String,
        api_key: String,
        database_id: String,
        profiles_collection: String,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            database_id,
            profiles_collection,
            client,
        }
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.profiles_collection
        )
    }

    /// Fetch a single profile by user id
    pub async fn get_profile(&self, user_id: &str) -> Result<UserProfile, DirectoryError> {
        let query_json = format!(r#"["equal(\"id\", \"{}\")"]"#, user_id);
        let encoded_query = urlencoding::encode(&query_json);
        let url = format!("{}?query={}", self.documents_url(), encoded_query);

        tracing::debug!("Fetching profile for user: {}", user_id);

        let response = self
            .client
            .get(&url)
            .header("X-Directory-Key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DirectoryError::ApiError(format!(
                "Failed to fetch profile: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| DirectoryError::InvalidResponse("Missing documents array".into()))?;

        let doc = documents.first().ok_or_else(|| {
            DirectoryError::NotFound(format!("Profile not found for user {}", user_id))
        })?;

        let data = doc.get("data").unwrap_or(doc);

        serde_json::from_value(data.clone())
            .map_err(|e| DirectoryError::InvalidResponse(format!("Failed to parse profile: {}", e)))
    }

    /// Query candidate profiles with exclusion, geo, and interest filters
    ///
    /// Returns documents in the directory's natural order. Exclusion is
    /// re-applied client-side as a final guard against stale query results.
    pub async fn list_candidates(
        &self,
        requester_id: &str,
        exclude_ids: &[String],
        geo: Option<GeoFilter>,
        interest_filters: Option<&[String]>,
        limit: usize,
    ) -> Result<Vec<UserProfile>, DirectoryError> {
        let mut queries = vec![format!("notEqual(\"id\", \"{}\")", requester_id)];

        for id in exclude_ids {
            queries.push(format!("notEqual(\"id\", \"{}\")", id));
        }

        if let Some(geo) = geo {
            let bbox = calculate_bounding_box(geo.latitude, geo.longitude, geo.radius_km);
            queries.push("equal(\"shareLocation\", true)".to_string());
            queries.push(format!("greaterThan(\"coordinates.1\", {})", bbox.min_lat));
            queries.push(format!("lessThan(\"coordinates.1\", {})", bbox.max_lat));
            queries.push(format!("greaterThan(\"coordinates.0\", {})", bbox.min_lon));
            queries.push(format!("lessThan(\"coordinates.0\", {})", bbox.max_lon));
        }

        if let Some(tags) = interest_filters {
            if !tags.is_empty() {
                let tag_list = tags
                    .iter()
                    .map(|t| format!("\"{}\"", t))
                    .collect::<Vec<_>>()
                    .join(",");
                queries.push(format!("in(\"interests\", [{}])", tag_list));
            }
        }

        queries.push(format!("limit({})", limit));

        let queries_json = serde_json::to_string(&queries)
            .map_err(|e| DirectoryError::InvalidResponse(e.to_string()))?;
        let encoded_queries = urlencoding::encode(&queries_json);
        let url = format!("{}?query={}", self.documents_url(), encoded_queries);

        let response = self
            .client
            .get(&url)
            .header("X-Directory-Key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DirectoryError::ApiError(format!(
                "Failed to query candidates: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let total = json.get("total").and_then(|t| t.as_u64()).unwrap_or(0);

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| DirectoryError::InvalidResponse("Missing documents array".into()))?;

        let profiles: Vec<UserProfile> = documents
            .iter()
            .filter_map(|doc| {
                let data = doc.get("data").unwrap_or(doc);
                serde_json::from_value(data.clone()).ok()
            })
            .filter(|p: &UserProfile| p.id != requester_id && !exclude_ids.contains(&p.id))
            .collect();

        tracing::debug!("Queried {} candidates (total: {})", profiles.len(), total);

        Ok(profiles)
    }
}
