use crate::core::{match_rate, validate_coordinates};
use crate::models::{
    GeoFilter, HealthResponse, MatchInfoQuery, MatchRateQuery, MatchRateResponse, NearbyQuery,
    ProfileView, ProfilesResponse, SmartQuery, SuggestedQuery, SuggestionsResponse, UserProfile,
    WithinRadiusRequest,
};
use crate::routes::{checked_limit, directory_error, invalid_argument, swipe_log_error, AppState};
use actix_web::{web, HttpResponse, Responder};
use std::collections::HashSet;
use validator::Validate;

/// Over-fetch factor so in-process filtering still fills the limit
const POOL_FACTOR: usize = 5;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/profiles/nearby", web::get().to(nearby_profiles))
        .route("/suggestions", web::get().to(suggested_profiles))
        .route("/suggestions/smart", web::get().to(smart_suggestions))
        .route("/suggestions/within-radius", web::post().to(find_within_radius))
        .route("/suggestions/with-match-info", web::get().to(profiles_with_match_info))
        .route("/match-rate", web::get().to(pairwise_match_rate));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let log_healthy = state.swipe_log.health_check().await.unwrap_or(false);

    let status = if log_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Requester profile plus their prior-swipe exclusion set
///
/// Both lookups happen before any scoring work; a missing requester or an
/// unreachable store short-circuits into the matching error response.
async fn load_requester_context(
    state: &AppState,
    user_id: &str,
) -> Result<(UserProfile, Vec<String>, HashSet<String>), HttpResponse> {
    let requester = state
        .directory
        .get_profile(user_id)
        .await
        .map_err(directory_error)?;

    let swiped_ids = state
        .swipe_log
        .swiped_user_ids(user_id)
        .await
        .map_err(swipe_log_error)?;

    let swiped_set: HashSet<String> = swiped_ids.iter().cloned().collect();

    Ok((requester, swiped_ids, swiped_set))
}

/// Nearby profiles endpoint (Policy A)
///
/// GET /api/v1/profiles/nearby?userId=...&interests=a,b&limit=20&maxDistanceKm=10
async fn nearby_profiles(
    state: web::Data<AppState>,
    query: web::Query<NearbyQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return invalid_argument(errors.to_string());
    }

    let limit = match checked_limit(query.limit, state.max_limit) {
        Ok(limit) => limit,
        Err(response) => return response,
    };

    let (requester, swiped_ids, swiped_set) =
        match load_requester_context(&state, &query.user_id).await {
            Ok(context) => context,
            Err(response) => return response,
        };

    let filters = query.interest_filters();
    let max_km = query.max_distance_km;

    let geo = requester.shared_point().map(|(latitude, longitude)| GeoFilter {
        latitude,
        longitude,
        radius_km: max_km.unwrap_or_else(|| state.engine.nearby_radius_km()),
    });

    let candidates = match state
        .directory
        .list_candidates(
            &query.user_id,
            &swiped_ids,
            geo,
            filters.as_deref(),
            limit * POOL_FACTOR,
        )
        .await
    {
        Ok(candidates) => candidates,
        Err(e) => return directory_error(e),
    };

    let total_candidates = candidates.len();

    let profiles: Vec<ProfileView> = state
        .engine
        .nearby(&requester, candidates, &swiped_set, filters.as_deref(), max_km, limit)
        .iter()
        .map(ProfileView::from)
        .collect();

    tracing::info!(
        "Returning {} nearby profiles for user {} (from {} candidates)",
        profiles.len(),
        query.user_id,
        total_candidates
    );

    HttpResponse::Ok().json(ProfilesResponse {
        profiles,
        total_candidates,
    })
}

/// Interest-ranked suggestions endpoint (Policy B)
///
/// GET /api/v1/suggestions?userId=...&limit=10
async fn suggested_profiles(
    state: web::Data<AppState>,
    query: web::Query<SuggestedQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return invalid_argument(errors.to_string());
    }

    let limit = match checked_limit(query.limit, state.max_limit) {
        Ok(limit) => limit,
        Err(response) => return response,
    };

    let (requester, swiped_ids, swiped_set) =
        match load_requester_context(&state, &query.user_id).await {
            Ok(context) => context,
            Err(response) => return response,
        };

    // Requesters without interests degrade to the nearby pool, which uses
    // the tighter default radius
    let pool_radius = if requester.interests.is_empty() {
        state.engine.nearby_radius_km()
    } else {
        state.engine.proximity_radius_km()
    };

    let geo = requester.shared_point().map(|(latitude, longitude)| GeoFilter {
        latitude,
        longitude,
        radius_km: pool_radius,
    });

    let candidates = match state
        .directory
        .list_candidates(&query.user_id, &swiped_ids, geo, None, limit * POOL_FACTOR)
        .await
    {
        Ok(candidates) => candidates,
        Err(e) => return directory_error(e),
    };

    let total_candidates = candidates.len();
    let suggestions = state
        .engine
        .suggested(&requester, candidates, &swiped_set, limit);

    tracing::info!(
        "Returning {} suggestions for user {} (from {} candidates)",
        suggestions.len(),
        query.user_id,
        total_candidates
    );

    HttpResponse::Ok().json(SuggestionsResponse {
        suggestions,
        total_candidates,
    })
}

/// Multi-factor smart suggestions endpoint (Policy C)
///
/// GET /api/v1/suggestions/smart?userId=...&limit=10
async fn smart_suggestions(
    state: web::Data<AppState>,
    query: web::Query<SmartQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return invalid_argument(errors.to_string());
    }

    let limit = match checked_limit(query.limit, state.max_limit) {
        Ok(limit) => limit,
        Err(response) => return response,
    };

    let (requester, swiped_ids, swiped_set) =
        match load_requester_context(&state, &query.user_id).await {
            Ok(context) => context,
            Err(response) => return response,
        };

    let geo = requester.shared_point().map(|(latitude, longitude)| GeoFilter {
        latitude,
        longitude,
        radius_km: state.engine.proximity_radius_km(),
    });

    let candidates = match state
        .directory
        .list_candidates(&query.user_id, &swiped_ids, geo, None, limit * POOL_FACTOR)
        .await
    {
        Ok(candidates) => candidates,
        Err(e) => return directory_error(e),
    };

    let total_candidates = candidates.len();
    let suggestions = state
        .engine
        .smart(&requester, candidates, &swiped_set, chrono::Utc::now(), limit);

    tracing::info!(
        "Returning {} smart suggestions for user {} (from {} candidates)",
        suggestions.len(),
        query.user_id,
        total_candidates
    );

    HttpResponse::Ok().json(SuggestionsResponse {
        suggestions,
        total_candidates,
    })
}

/// Profiles within a radius of an arbitrary center point
///
/// POST /api/v1/suggestions/within-radius
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "center": [longitude, latitude],
///   "radiusKm": 5,
///   "limit": 50
/// }
/// ```
async fn find_within_radius(
    state: web::Data<AppState>,
    req: web::Json<WithinRadiusRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return invalid_argument(errors.to_string());
    }

    // Reject malformed coordinates before any query is issued
    let (latitude, longitude) = match validate_coordinates(&req.center) {
        Ok(point) => point,
        Err(e) => return invalid_argument(e.to_string()),
    };

    let limit = match checked_limit(req.limit, state.max_limit) {
        Ok(limit) => limit,
        Err(response) => return response,
    };

    let radius_km = req.radius_km.unwrap_or(state.within_radius_km);

    let (requester, swiped_ids, swiped_set) =
        match load_requester_context(&state, &req.user_id).await {
            Ok(context) => context,
            Err(response) => return response,
        };

    let geo = Some(GeoFilter {
        latitude,
        longitude,
        radius_km,
    });

    let candidates = match state
        .directory
        .list_candidates(&req.user_id, &swiped_ids, geo, None, limit * POOL_FACTOR)
        .await
    {
        Ok(candidates) => candidates,
        Err(e) => return directory_error(e),
    };

    let total_candidates = candidates.len();
    let suggestions = state.engine.within_radius(
        &requester,
        (latitude, longitude),
        candidates,
        &swiped_set,
        radius_km,
        limit,
    );

    HttpResponse::Ok().json(SuggestionsResponse {
        suggestions,
        total_candidates,
    })
}

/// Nearby profiles annotated with interest-match info
///
/// GET /api/v1/suggestions/with-match-info?userId=...&limit=20
async fn profiles_with_match_info(
    state: web::Data<AppState>,
    query: web::Query<MatchInfoQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return invalid_argument(errors.to_string());
    }

    let limit = match checked_limit(query.limit, state.max_limit) {
        Ok(limit) => limit,
        Err(response) => return response,
    };

    let (requester, swiped_ids, swiped_set) =
        match load_requester_context(&state, &query.user_id).await {
            Ok(context) => context,
            Err(response) => return response,
        };

    let geo = requester.shared_point().map(|(latitude, longitude)| GeoFilter {
        latitude,
        longitude,
        radius_km: state.engine.nearby_radius_km(),
    });

    let candidates = match state
        .directory
        .list_candidates(&query.user_id, &swiped_ids, geo, None, limit * POOL_FACTOR)
        .await
    {
        Ok(candidates) => candidates,
        Err(e) => return directory_error(e),
    };

    let total_candidates = candidates.len();
    let suggestions = state
        .engine
        .with_match_info(&requester, candidates, &swiped_set, limit);

    HttpResponse::Ok().json(SuggestionsResponse {
        suggestions,
        total_candidates,
    })
}

/// Pairwise interest match rate between two users
///
/// GET /api/v1/match-rate?userId=...&targetUserId=...
async fn pairwise_match_rate(
    state: web::Data<AppState>,
    query: web::Query<MatchRateQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return invalid_argument(errors.to_string());
    }

    let requester = match state.directory.get_profile(&query.user_id).await {
        Ok(profile) => profile,
        Err(e) => return directory_error(e),
    };

    let target = match state.directory.get_profile(&query.target_user_id).await {
        Ok(profile) => profile,
        Err(e) => return directory_error(e),
    };

    let rate = match_rate(&requester.interests, &target.interests);

    HttpResponse::Ok().json(MatchRateResponse { match_rate: rate })
}
