use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use amora_suggest::config::Settings;
use amora_suggest::core::RankingEngine;
use amora_suggest::routes::{self, AppState};
use amora_suggest::services::{DirectoryClient, PresenceStore, SwipeLogClient};
use std::sync::Arc;
use tracing::{error, info};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Configuration comes first, logging is configured from it
    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    // Initialize logging; RUST_LOG overrides the configured level
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Amora suggestion service...");
    info!("Configuration loaded successfully");

    // Initialize directory client
    let directory = Arc::new(DirectoryClient::new(
        settings.directory.endpoint,
        settings.directory.api_key,
        settings.directory.database_id,
        settings.directory.profiles_collection,
    ));

    info!("Directory client initialized");

    // Initialize swipe log client
    let swipe_log = Arc::new(
        SwipeLogClient::from_settings(
            &settings.database.url,
            settings.database.max_connections,
            settings.database.min_connections,
        )
        .await
        .unwrap_or_else(|e| {
            error!("Failed to connect to swipe log: {}", e);
            panic!("Swipe log connection error: {}", e);
        }),
    );

    info!(
        "Swipe log client initialized (max: {} connections)",
        settings.database.max_connections.unwrap_or(10)
    );

    // Initialize presence store
    let presence = match PresenceStore::new(
        &settings.presence.redis_url,
        settings.presence.local_cache_size,
        settings.presence.window_secs,
    )
    .await
    {
        Ok(store) => {
            info!(
                "Presence store initialized ({}s liveness window)",
                settings.presence.window_secs
            );
            Arc::new(store)
        }
        Err(e) => {
            error!("Failed to connect to Redis ({}), presence requires it", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                "Redis connection required",
            ));
        }
    };

    // Initialize ranking engine with configured radii
    let engine = RankingEngine::new(
        settings.suggestions.nearby_radius_km,
        settings.suggestions.proximity_radius_km,
    );

    info!(
        "Ranking engine initialized (nearby: {} km, proximity: {} km)",
        settings.suggestions.nearby_radius_km, settings.suggestions.proximity_radius_km
    );

    // Build application state
    let app_state = AppState {
        directory,
        swipe_log,
        presence,
        engine,
        max_limit: settings.suggestions.max_limit,
        within_radius_km: settings.suggestions.within_radius_km,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
