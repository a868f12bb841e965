use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Json, Router,
};
use places::StaticPlaceSource;
use serde::Deserialize;
use shared::{
    domain::{Filter, PropertyInfo},
    error::{ApiError, ErrorCode},
    protocol::PlacesView,
};
use tower_http::services::ServeDir;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use view_state::{ViewController, ViewState};

mod app_state;
mod config;
mod page;

use app_state::AppState;
use config::load_settings;

#[derive(Debug, Deserialize)]
struct FilterQuery {
    filter: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings();
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .with_context(|| format!("invalid log filter '{}'", settings.log_filter))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let source = StaticPlaceSource::new(settings.fetch_latency());
    info!(
        latency_ms = settings.fetch_latency_ms,
        "mounting nearby places view"
    );
    let view = ViewController::mount(Arc::new(source));

    let state = AppState {
        view,
        property: PropertyInfo::default(),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let static_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static");

    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/api/places", get(api_places))
        .route("/api/property", get(api_property))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(not_found)
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

/// Snapshot of the shared view with the request's filter applied. The shared
/// view keeps its own filter, so every visitor starts from `all`.
fn request_view(state: &AppState, query: FilterQuery) -> ViewState {
    let mut snapshot = state.view.snapshot();
    if let Some(filter) = query.filter {
        snapshot.set_filter(Filter::from(filter));
    }
    snapshot
}

async fn index(
    State(state): State<Arc<AppState>>,
    Query(q): Query<FilterQuery>,
) -> Result<Html<String>, (StatusCode, Json<ApiError>)> {
    let view = request_view(&state, q);
    let html = page::render_page(&state.property, &view).map_err(|error| {
        error!(%error, "failed to render guest page");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::new(ErrorCode::Internal, error.to_string())),
        )
    })?;
    Ok(Html(html))
}

async fn api_places(
    State(state): State<Arc<AppState>>,
    Query(q): Query<FilterQuery>,
) -> Json<PlacesView> {
    Json(page::places_view(&request_view(&state, q)))
}

async fn api_property(State(state): State<Arc<AppState>>) -> Json<PropertyInfo> {
    Json(state.property.clone())
}

async fn not_found() -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new(ErrorCode::NotFound, "route not found")),
    )
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
