use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use configuration::Settings;
use database::DbRepository;
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub db_repo: DbRepository,
}

/// Builds the application router over an initialized store.
///
/// Every response, errors and fallbacks included, carries the same three CORS
/// headers.
pub fn build_router(db_repo: DbRepository) -> Router {
    let app_state = Arc::new(AppState { db_repo });

    Router::new()
        .route("/", get(handlers::health))
        .route(
            "/api/races",
            get(handlers::list_races)
                .post(handlers::create_race)
                .options(handlers::races_options),
        )
        .fallback(handlers::not_found)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        ))
        .layer(DefaultBodyLimit::disable())
}

/// Initializes the store, then serves requests until the process is stopped.
///
/// A store that cannot be created or opened aborts startup before the socket
/// is bound.
pub async fn run_server(settings: &Settings) -> anyhow::Result<()> {
    let db_path = settings.database_path()?;
    let db_repo = database::open_store(&db_path).await?;
    let app = build_router(db_repo);

    let listener =
        tokio::net::TcpListener::bind((settings.server.host.as_str(), settings.server.port)).await?;
    tracing::info!("Web server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
