use super::*;
use std::time::Duration;

use async_trait::async_trait;
use axum::{body, body::Body, http::Request};
use places::{reference_places, PlaceSource};
use shared::{domain::Place, error::SourceError, protocol::RenderPhase};
use tokio::sync::{oneshot, Mutex};
use tower::ServiceExt;

/// Source that answers once the test releases the places.
struct GatedSource {
    release: Mutex<Option<oneshot::Receiver<Vec<Place>>>>,
}

#[async_trait]
impl PlaceSource for GatedSource {
    async fn fetch_places(&self) -> Result<Vec<Place>, SourceError> {
        let rx = self
            .release
            .lock()
            .await
            .take()
            .ok_or_else(|| SourceError::new("fetched twice"))?;
        rx.await.map_err(|_| SourceError::new("gate dropped"))
    }
}

async fn test_app(latency: Duration) -> (Router, Arc<AppState>) {
    let view = ViewController::mount(Arc::new(StaticPlaceSource::new(latency)));
    if latency.is_zero() {
        view.wait_loaded().await;
    }
    let state = Arc::new(AppState {
        view,
        property: PropertyInfo::default(),
    });
    (build_router(state.clone()), state)
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf8")
}

async fn get_places_view(app: Router, uri: &str) -> PlacesView {
    let request = Request::get(uri).body(Body::empty()).expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    serde_json::from_str(&body_text(response).await).expect("json")
}

#[tokio::test]
async fn healthz_reports_ok() {
    let (app, _state) = test_app(Duration::ZERO).await;
    let request = Request::get("/healthz")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn index_renders_spinner_while_loading() {
    let (app, _state) = test_app(Duration::from_secs(3600)).await;
    let request = Request::get("/").body(Body::empty()).expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Cargando lugares cercanos..."));
    assert!(!html.contains("<article"));
}

#[tokio::test]
async fn index_filter_query_narrows_grid() {
    let (app, state) = test_app(Duration::ZERO).await;
    let request = Request::get("/?filter=bar")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert_eq!(html.matches("<article").count(), 1);
    assert!(html.contains("Ginjinha Sem Rival"));
    assert_eq!(state.view.active_filter(), Filter::All);
}

#[tokio::test]
async fn filter_query_does_not_leak_to_other_visitors() {
    let (app, _state) = test_app(Duration::ZERO).await;

    let bar = get_places_view(app.clone(), "/api/places?filter=bar").await;
    assert_eq!(bar.places.len(), 1);

    let request = Request::get("/").body(Body::empty()).expect("request");
    let response = app.oneshot(request).await.expect("response");
    let html = body_text(response).await;
    assert_eq!(html.matches("<article").count(), 6);
}

#[tokio::test]
async fn api_places_is_empty_while_loading() {
    let (app, _state) = test_app(Duration::from_secs(3600)).await;
    let view = get_places_view(app, "/api/places").await;
    assert_eq!(view.phase, RenderPhase::Loading);
    assert!(view.is_loading);
    assert!(view.places.is_empty());
}

#[tokio::test]
async fn api_places_applies_filters_in_sequence() {
    let (app, _state) = test_app(Duration::ZERO).await;

    let attraction = get_places_view(app.clone(), "/api/places?filter=attraction").await;
    assert_eq!(attraction.places.len(), 1);
    assert_eq!(attraction.places[0].place.name, "Elevador de Santa Justa");

    let bare = get_places_view(app.clone(), "/api/places").await;
    assert_eq!(bare.active_filter, Filter::All);
    assert_eq!(bare.places.len(), 6);

    let all = get_places_view(app.clone(), "/api/places?filter=all").await;
    assert_eq!(all.places.len(), 6);
    assert!(!all.is_loading);

    let unknown = get_places_view(app, "/api/places?filter=museum").await;
    assert!(unknown.places.is_empty());
    assert_eq!(unknown.phase, RenderPhase::Ready);
}

#[tokio::test]
async fn api_property_returns_listing_details() {
    let (app, _state) = test_app(Duration::ZERO).await;
    let request = Request::get("/api/property")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let info: PropertyInfo = serde_json::from_str(&body_text(response).await).expect("json");
    assert_eq!(info, PropertyInfo::default());
}

#[tokio::test]
async fn unknown_route_returns_not_found_error() {
    let (app, _state) = test_app(Duration::ZERO).await;
    let request = Request::get("/nope").body(Body::empty()).expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let error: ApiError = serde_json::from_str(&body_text(response).await).expect("json");
    assert_eq!(error.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn api_places_moves_from_loading_to_ready_when_source_settles() {
    let (tx, rx) = oneshot::channel();
    let view = ViewController::mount(Arc::new(GatedSource {
        release: Mutex::new(Some(rx)),
    }));
    let state = Arc::new(AppState {
        view,
        property: PropertyInfo::default(),
    });
    let app = build_router(state.clone());

    let loading = get_places_view(app.clone(), "/api/places?filter=bar").await;
    assert_eq!(loading.phase, RenderPhase::Loading);
    assert!(loading.places.is_empty());

    tx.send(reference_places()).expect("release");
    state.view.wait_loaded().await;

    let ready = get_places_view(app, "/api/places?filter=bar").await;
    assert_eq!(ready.phase, RenderPhase::Ready);
    assert_eq!(ready.places.len(), 1);
    assert_eq!(ready.places[0].place.name, "Ginjinha Sem Rival");
}

#[tokio::test]
async fn stylesheet_is_served_from_static_dir() {
    let (app, _state) = test_app(Duration::ZERO).await;
    let request = Request::get("/static/style.css")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(".place-card"));
}
