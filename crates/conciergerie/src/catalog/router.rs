use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{Agency, AgencyId};
use super::filter::FilterCriteria;
use super::repository::{CatalogRepository, RepositoryError};
use super::service::{CatalogService, CatalogServiceError};
use super::snapshot::CatalogScope;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub criteria: FilterCriteria,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ManualScoreRequest {
    pub score: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationRequest {
    pub validated: bool,
}

/// Router builder exposing the public listing and administrative endpoints.
pub fn catalog_router<R>(service: Arc<CatalogService<R>>) -> Router
where
    R: CatalogRepository + 'static,
{
    Router::new()
        .route("/api/v1/catalog/search", post(search_handler::<R>))
        .route(
            "/api/v1/admin/agencies/:agency_id/manual-score",
            put(manual_score_handler::<R>),
        )
        .route(
            "/api/v1/admin/agencies/:agency_id/validation",
            put(validation_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn search_handler<R>(
    State(service): State<Arc<CatalogService<R>>>,
    axum::Json(request): axum::Json<SearchRequest>,
) -> Response
where
    R: CatalogRepository + 'static,
{
    let scope = CatalogScope { city: request.city };
    match service.search(&scope, &request.criteria) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn manual_score_handler<R>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(agency_id): Path<String>,
    axum::Json(request): axum::Json<ManualScoreRequest>,
) -> Response
where
    R: CatalogRepository + 'static,
{
    let id = AgencyId(agency_id);
    agency_response(service.set_manual_score(&id, request.score))
}

pub(crate) async fn validation_handler<R>(
    State(service): State<Arc<CatalogService<R>>>,
    Path(agency_id): Path<String>,
    axum::Json(request): axum::Json<ValidationRequest>,
) -> Response
where
    R: CatalogRepository + 'static,
{
    let id = AgencyId(agency_id);
    agency_response(service.set_validation(&id, request.validated))
}

fn agency_response(result: Result<Agency, CatalogServiceError>) -> Response {
    match result {
        Ok(agency) => (StatusCode::OK, axum::Json(agency)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: CatalogServiceError) -> Response {
    let status = match err {
        CatalogServiceError::InvalidScore(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CatalogServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        CatalogServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
