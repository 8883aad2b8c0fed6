//! # Web Server
//!
//! The HTTP boundary of the valuation service: one read-only JSON route per
//! analysis under `/api/ma`, the `/api/status` ping log, a health check, CORS
//! and per-request tracing.

use analyzer::MaAnalyzer;
use axum::{
    Router,
    http::HeaderValue,
    routing::get,
};
use configuration::ServerSettings;
use database::{InMemoryStatusCheckStore, PgStatusCheckStore, StatusCheckStore};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<MaAnalyzer>,
    pub status_store: Arc<dyn StatusCheckStore>,
}

/// Loads the reference data and deal assumptions and opens the status store.
///
/// PostgreSQL is used when `DATABASE_URL` is set (migrations run on connect);
/// otherwise status checks live in memory for the life of the process.
pub async fn build_state(settings: &ServerSettings) -> anyhow::Result<AppState> {
    let data = match &settings.data_dir {
        Some(dir) => configuration::load_reference_data_from(dir)?,
        None => configuration::load_reference_data()?,
    };
    let assumptions = configuration::load_deal_assumptions(settings.deal_config.as_deref())?;
    let analyzer = Arc::new(MaAnalyzer::new(Arc::new(data), assumptions));

    let status_store: Arc<dyn StatusCheckStore> = match &settings.database_url {
        Some(url) => {
            let pool = database::connect(url).await?;
            database::run_migrations(&pool).await?;
            Arc::new(PgStatusCheckStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL is not set; status checks are kept in memory.");
            Arc::new(InMemoryStatusCheckStore::new())
        }
    };

    Ok(AppState {
        analyzer,
        status_store,
    })
}

fn cors_layer(settings: &ServerSettings) -> CorsLayer {
    let origins = if settings.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let allowed: Vec<HeaderValue> = settings
            .cors_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(%origin, "Ignoring invalid CORS origin.");
                    None
                }
            })
            .collect();
        AllowOrigin::list(allowed)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
}

/// Assembles the application routes around a prepared state.
pub fn build_router(state: Arc<AppState>, settings: &ServerSettings) -> Router {
    Router::new()
        .route("/api/", get(handlers::api_index))
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/ma/overview", get(handlers::get_overview))
        .route("/api/ma/financials", get(handlers::get_financials))
        .route("/api/ma/dcf", get(handlers::get_dcf))
        .route("/api/ma/comparable-companies", get(handlers::get_comparable_companies))
        .route("/api/ma/precedent-transactions", get(handlers::get_precedent_transactions))
        .route("/api/ma/synergies", get(handlers::get_synergies))
        .route("/api/ma/accretion-dilution", get(handlers::get_accretion_dilution))
        .route("/api/ma/valuation-summary", get(handlers::get_valuation_summary))
        .route("/api/ma/executive-summary", get(handlers::get_executive_summary))
        .route(
            "/api/status",
            get(handlers::list_status_checks).post(handlers::create_status_check),
        )
        .with_state(state)
        .layer(cors_layer(settings))
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
///
/// Tracing is expected to be initialized by the caller.
pub async fn run_server(settings: ServerSettings) -> anyhow::Result<()> {
    let state = Arc::new(build_state(&settings).await?);
    let app = build_router(state, &settings);

    let listener = tokio::net::TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("Web server listening on http://{}", settings.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
