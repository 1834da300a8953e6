// Route exports
pub mod presence;
pub mod suggestions;
pub mod swipes;

use crate::core::RankingEngine;
use crate::models::ErrorResponse;
use crate::services::{DirectoryClient, DirectoryError, PresenceStore, SwipeLogClient, SwipeLogError};
use actix_web::{web, HttpResponse};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<DirectoryClient>,
    pub swipe_log: Arc<SwipeLogClient>,
    pub presence: Arc<PresenceStore>,
    pub engine: RankingEngine,
    /// Hard cap applied to caller-supplied limits
    pub max_limit: u16,
    /// Default radius for within-radius lookups (km)
    pub within_radius_km: f64,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(suggestions::configure)
            .configure(swipes::configure)
            .configure(presence::configure),
    );
}

/// 400 response for inputs rejected before any query is issued
pub(crate) fn invalid_argument(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "invalid_argument".to_string(),
        message,
        status_code: 400,
    })
}

/// 503 response for an unreachable collaborator; not retried here
pub(crate) fn unavailable(message: String) -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(ErrorResponse {
        error: "unavailable".to_string(),
        message,
        status_code: 503,
    })
}

pub(crate) fn directory_error(err: DirectoryError) -> HttpResponse {
    match err {
        DirectoryError::NotFound(message) => HttpResponse::NotFound().json(ErrorResponse {
            error: "not_found".to_string(),
            message,
            status_code: 404,
        }),
        err if err.is_unavailable() => unavailable(err.to_string()),
        err => HttpResponse::InternalServerError().json(ErrorResponse {
            error: "directory_error".to_string(),
            message: err.to_string(),
            status_code: 500,
        }),
    }
}

pub(crate) fn swipe_log_error(err: SwipeLogError) -> HttpResponse {
    if err.is_unavailable() {
        unavailable(err.to_string())
    } else {
        HttpResponse::InternalServerError().json(ErrorResponse {
            error: "swipe_log_error".to_string(),
            message: err.to_string(),
            status_code: 500,
        })
    }
}

/// Cap and validate a caller-supplied limit; zero is rejected
pub(crate) fn checked_limit(limit: u16, max_limit: u16) -> Result<usize, HttpResponse> {
    if limit == 0 {
        return Err(invalid_argument("limit must be positive".to_string()));
    }
    Ok(limit.min(max_limit) as usize)
}
