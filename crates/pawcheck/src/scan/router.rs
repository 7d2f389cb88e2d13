use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::service::{ScanError, ScanService};
use crate::product::{LookupError, ProductSource};
use crate::profile::{ProfileStore, StoredProfile};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BarcodeQuery {
    #[serde(default)]
    pub(crate) barcode: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CheckRequest {
    #[serde(default)]
    pub(crate) ingredients_text: Option<String>,
    #[serde(default)]
    pub(crate) allergens: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AllergenRequest {
    pub(crate) allergen: String,
}

/// Router builder exposing lookup, screening, and profile endpoints.
pub fn scan_router<S>(service: Arc<ScanService<S>>) -> Router
where
    S: ProfileStore + 'static,
{
    Router::new()
        .route("/api/v1/lookup", get(lookup_handler::<S>))
        .route("/api/v1/check", post(check_handler::<S>))
        .route("/api/v1/scan", get(scan_handler::<S>))
        .route(
            "/api/v1/profile",
            get(profile_handler::<S>).put(replace_profile_handler::<S>),
        )
        .route("/api/v1/profile/allergens", post(add_allergen_handler::<S>))
        .route(
            "/api/v1/profile/allergens/:allergen",
            delete(remove_allergen_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn lookup_handler<S>(
    State(service): State<Arc<ScanService<S>>>,
    Query(query): Query<BarcodeQuery>,
) -> Response
where
    S: ProfileStore + 'static,
{
    let raw = query.barcode.unwrap_or_default();
    match service.lookup(&raw).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn check_handler<S>(
    State(service): State<Arc<ScanService<S>>>,
    Json(request): Json<CheckRequest>,
) -> Response
where
    S: ProfileStore + 'static,
{
    let allergens = crate::profile::dedupe_allergens(&request.allergens);
    let check = service.check(request.ingredients_text.as_deref(), &allergens);
    (StatusCode::OK, Json(check)).into_response()
}

pub(crate) async fn scan_handler<S>(
    State(service): State<Arc<ScanService<S>>>,
    Query(query): Query<BarcodeQuery>,
) -> Response
where
    S: ProfileStore + 'static,
{
    let raw = query.barcode.unwrap_or_default();
    match service.scan(&raw).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn profile_handler<S>(State(service): State<Arc<ScanService<S>>>) -> Response
where
    S: ProfileStore + 'static,
{
    profile_response(service.profile())
}

pub(crate) async fn replace_profile_handler<S>(
    State(service): State<Arc<ScanService<S>>>,
    Json(profile): Json<StoredProfile>,
) -> Response
where
    S: ProfileStore + 'static,
{
    profile_response(service.replace_profile(profile))
}

pub(crate) async fn add_allergen_handler<S>(
    State(service): State<Arc<ScanService<S>>>,
    Json(request): Json<AllergenRequest>,
) -> Response
where
    S: ProfileStore + 'static,
{
    profile_response(service.add_allergen(&request.allergen))
}

pub(crate) async fn remove_allergen_handler<S>(
    State(service): State<Arc<ScanService<S>>>,
    Path(allergen): Path<String>,
) -> Response
where
    S: ProfileStore + 'static,
{
    profile_response(service.remove_allergen(&allergen))
}

fn profile_response(result: Result<StoredProfile, ScanError>) -> Response {
    match result {
        Ok(profile) => (StatusCode::OK, Json(profile)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: ScanError) -> Response {
    match err {
        ScanError::Lookup(LookupError::NotFound { barcode }) => {
            let payload = json!({
                "barcode": barcode,
                "source": ProductSource::None,
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        ScanError::Lookup(LookupError::MissingBarcode) | ScanError::BlankAllergen => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        ScanError::UnknownAllergen(_) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        ScanError::Lookup(LookupError::Upstream { .. }) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::BAD_GATEWAY, Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
