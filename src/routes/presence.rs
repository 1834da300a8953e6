use crate::models::{ErrorResponse, PresenceRequest, PresenceResponse};
use crate::routes::{invalid_argument, unavailable, AppState};
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/presence/heartbeat", web::post().to(heartbeat))
        .route("/presence/offline", web::post().to(set_offline))
        .route("/presence/status", web::get().to(status));
}

/// Record a liveness heartbeat
///
/// POST /api/v1/presence/heartbeat
async fn heartbeat(state: web::Data<AppState>, req: web::Json<PresenceRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return invalid_argument(errors.to_string());
    }

    match state.presence.heartbeat(&req.user_id).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(e) => unavailable(e.to_string()),
    }
}

/// Mark a user offline immediately
///
/// POST /api/v1/presence/offline
async fn set_offline(
    state: web::Data<AppState>,
    req: web::Json<PresenceRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return invalid_argument(errors.to_string());
    }

    match state.presence.set_offline(&req.user_id).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(e) => unavailable(e.to_string()),
    }
}

/// Presence status for a user
///
/// GET /api/v1/presence/status?userId=...
async fn status(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let user_id = match query.get("userId") {
        Some(id) if !id.is_empty() => id,
        _ => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "invalid_argument".to_string(),
                message: "userId query parameter is required".to_string(),
                status_code: 400,
            });
        }
    };

    let online = match state.presence.is_online(user_id).await {
        Ok(online) => online,
        Err(e) => return unavailable(e.to_string()),
    };

    let last_seen = match state.presence.last_seen(user_id).await {
        Ok(last_seen) => last_seen,
        Err(e) => return unavailable(e.to_string()),
    };

    HttpResponse::Ok().json(PresenceResponse {
        user_id: user_id.clone(),
        online,
        last_seen,
    })
}
