use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use pawcheck::profile::ProfileStore;
use pawcheck::scan::{scan_router, ScanService};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_scan_routes<S>(service: Arc<ScanService<S>>) -> axum::Router
where
    S: ProfileStore + 'static,
{
    scan_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use pawcheck::allergy::AllergenMatcher;
    use pawcheck::product::ProductLookup;
    use pawcheck::profile::JsonFileProfileStore;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    fn app_state(ready: bool) -> AppState {
        let recorder = PrometheusBuilder::new().build_recorder();
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(recorder.handle()),
        }
    }

    fn offline_router(dir: &tempfile::TempDir, state: AppState) -> axum::Router {
        let service = Arc::new(ScanService::new(
            Arc::new(JsonFileProfileStore::new(dir.path().join("profile.json"))),
            Arc::new(ProductLookup::new(Vec::new())),
            AllergenMatcher::default(),
        ));
        with_scan_routes(service).layer(Extension(state))
    }

    async fn get_json(router: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        let status = response.status();
        let body = to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("body");
        (status, serde_json::from_slice(&body).expect("json"))
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let state = app_state(false);
        let response = readiness_endpoint(Extension(state.clone()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        state.readiness.store(true, Ordering::Release);
        let response = readiness_endpoint(Extension(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn operational_and_profile_routes_share_one_router() {
        let dir = tempfile::tempdir().expect("tempdir");

        let (status, body) = get_json(offline_router(&dir, app_state(true)), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "ok" }));

        let (status, body) =
            get_json(offline_router(&dir, app_state(true)), "/api/v1/profile").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "dogName": "My Dog", "allergens": [] }));
    }

    #[tokio::test]
    async fn scan_without_catalogues_reports_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (status, body) = get_json(
            offline_router(&dir, app_state(true)),
            "/api/v1/scan?barcode=0123456789",
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "barcode": "0123456789", "source": "none" }));
    }
}
