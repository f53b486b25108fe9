//! Ases Kahraba Backend - library for app logic and testing

pub mod analytics;
pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod logging;
pub mod pricing;
pub mod projects;
pub mod routes;
pub mod services;
pub mod settings;
pub mod state;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer,
};

use crate::analytics::AnalyticsConfig;
use crate::config::{AppConfig, Environment};
use crate::error::StartupError;
use crate::state::AppState;

/// Configure CORS from the configured origins.
/// Falls back to the local frontend dev servers when none are set.
pub fn configure_cors(config: &AppConfig) -> CorsLayer {
    let mut origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        origins = vec![
            HeaderValue::from_static("http://localhost:5000"),
            HeaderValue::from_static("http://127.0.0.1:5000"),
            HeaderValue::from_static("http://localhost:3000"),
        ];
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Create and configure the application router.
pub fn create_app(state: AppState) -> Router {
    let cors = configure_cors(&state.config);

    Router::new()
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/verify", post(routes::auth::verify_token))
        .route("/api/content", get(routes::content::list_content))
        .route(
            "/api/content/{section_key}",
            get(routes::content::get_content).put(routes::content::upsert_content),
        )
        .route(
            "/api/content/{section_key}/resolved",
            get(routes::content::get_resolved_content),
        )
        .route("/api/i18n/{lang}", get(routes::content::get_translations))
        .route(
            "/api/calculator/foundation",
            post(routes::calculator::foundation_quote),
        )
        .route(
            "/api/calculator/finishing",
            post(routes::calculator::finishing_quote),
        )
        .route(
            "/api/calculator/finishing/services",
            get(routes::calculator::finishing_services),
        )
        .route(
            "/api/settings",
            get(routes::settings::list_settings).post(routes::settings::save_setting),
        )
        .route("/api/settings/{key}", get(routes::settings::get_setting))
        .route(
            "/api/projects",
            get(routes::projects::list_projects).post(routes::projects::create_project),
        )
        .route(
            "/api/projects/{id}",
            get(routes::projects::get_project)
                .patch(routes::projects::update_project)
                .delete(routes::projects::delete_project),
        )
        .route(
            "/api/services",
            get(routes::services::list_services).post(routes::services::create_service),
        )
        .route(
            "/api/services/{id}",
            get(routes::services::get_service)
                .patch(routes::services::update_service)
                .delete(routes::services::delete_service),
        )
        .route(
            "/api/blog",
            get(routes::blog::list_posts).post(routes::blog::create_post),
        )
        // GET takes a slug; PATCH and DELETE take the numeric id.
        .route(
            "/api/blog/{slug}",
            get(routes::blog::get_post)
                .patch(routes::blog::update_post)
                .delete(routes::blog::delete_post),
        )
        .route("/api/admin/blog", get(routes::blog::list_all_posts))
        .route("/robots.txt", get(routes::seo::robots_txt))
        .route("/sitemap.xml", get(routes::seo::sitemap_xml))
        .route("/health", get(routes::health::health_ping))
        .route("/health/detailed", get(routes::health::health_detailed))
        .route("/health/database", get(routes::health::health_database))
        .route("/health/ready", get(routes::health::health_ready))
        .with_state(state)
        .layer(logging::middleware::propagate_request_id_layer())
        .layer(middleware::from_fn(logging::middleware::log_request))
        .layer(logging::middleware::request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(RequestBodyLimitLayer::new(2 * 1024 * 1024))
        .layer(cors)
}

/// Connect, migrate and seed. Any failure leaves the server on in-memory stores.
async fn connect_database() -> Option<std::sync::Arc<sqlx::PgPool>> {
    if std::env::var("DATABASE_URL").is_err() {
        tracing::info!("DATABASE_URL not set. Running with in-memory stores.");
        return None;
    }

    let pool = match db::init_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::warn!(
                "Failed to initialize database pool: {}. Continuing without database.",
                e
            );
            return None;
        }
    };

    if let Err(e) = db::run_migrations(&pool).await {
        tracing::error!("Failed to run database migrations: {}", e);
        return None;
    }

    Some(pool)
}

async fn seed(state: &AppState) {
    match db::seed::seed_site_content(&state.content).await {
        Ok(0) => {}
        Ok(n) => tracing::info!("Seeded {} site content sections", n),
        Err(e) => tracing::error!("Failed to seed site content: {}", e),
    }
    match db::seed::seed_settings(&state.settings).await {
        Ok(0) => {}
        Ok(n) => tracing::info!("Seeded {} site settings", n),
        Err(e) => tracing::error!("Failed to seed site settings: {}", e),
    }
}

async fn init_analytics(state: &AppState) {
    let value = |key: &'static str| async move {
        state.settings.value(key).await.unwrap_or_else(|e| {
            tracing::warn!("Failed to read setting {}: {}", key, e);
            None
        })
    };

    let config = AnalyticsConfig::from_settings(
        value(settings::FB_PIXEL_ID).await,
        value(settings::GA_MEASUREMENT_ID).await,
    );
    state.analytics.initialize(config);
}

/// Run the server (used by main).
pub async fn run() -> Result<(), StartupError> {
    dotenvy::dotenv().ok();

    // Held for the process lifetime so buffered log lines are flushed.
    let _log_guards = logging::init(Environment::from_env());

    let config = AppConfig::from_env().inspect_err(|e| tracing::error!("FATAL: {}", e))?;
    let addr = config.bind_addr();

    let pool = connect_database().await;
    let state = AppState::new(config, pool);
    seed(&state).await;
    init_analytics(&state).await;

    let app = create_app(state);

    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: addr.clone(),
            source,
        })
        .inspect_err(|e| tracing::error!("{}", e))?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(StartupError::Serve)
    .inspect_err(|e| tracing::error!("{}", e))
}
