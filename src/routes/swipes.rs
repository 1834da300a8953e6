use crate::models::{Decision, ErrorResponse, SwipeRequest, SwipeResponse};
use crate::routes::{directory_error, invalid_argument, swipe_log_error, AppState};
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/swipes", web::post().to(record_swipe));
}

/// Record a swipe decision
///
/// POST /api/v1/swipes
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "targetUserId": "string",
///   "decision": "LIKE|PASS"
/// }
/// ```
///
/// A LIKE that meets an existing reverse LIKE mints a match record and
/// reports it in the response; a PASS never matches.
async fn record_swipe(
    state: web::Data<AppState>,
    req: web::Json<SwipeRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return invalid_argument(errors.to_string());
    }

    if req.user_id == req.target_user_id {
        return invalid_argument("cannot swipe on yourself".to_string());
    }

    let decision = match req.decision.to_uppercase().as_str() {
        "LIKE" => Decision::Like,
        "PASS" => Decision::Pass,
        _ => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "invalid_argument".to_string(),
                message: "Decision must be one of: LIKE, PASS".to_string(),
                status_code: 400,
            });
        }
    };

    // The target must exist before anything is appended to the log
    if let Err(e) = state.directory.get_profile(&req.target_user_id).await {
        return directory_error(e);
    }

    if let Err(e) = state
        .swipe_log
        .record_swipe(&req.user_id, &req.target_user_id, decision)
        .await
    {
        return swipe_log_error(e);
    }

    if decision == Decision::Pass {
        return HttpResponse::Ok().json(SwipeResponse {
            is_match: false,
            match_id: None,
        });
    }

    let mutual = match state
        .swipe_log
        .has_reverse_like(&req.user_id, &req.target_user_id)
        .await
    {
        Ok(mutual) => mutual,
        Err(e) => return swipe_log_error(e),
    };

    if !mutual {
        return HttpResponse::Ok().json(SwipeResponse {
            is_match: false,
            match_id: None,
        });
    }

    match state
        .swipe_log
        .create_match(&req.user_id, &req.target_user_id)
        .await
    {
        Ok(record) => {
            tracing::info!(
                "Mutual like: {} and {} matched ({})",
                req.user_id,
                req.target_user_id,
                record.id
            );
            HttpResponse::Ok().json(SwipeResponse {
                is_match: true,
                match_id: Some(record.id),
            })
        }
        Err(e) => swipe_log_error(e),
    }
}
