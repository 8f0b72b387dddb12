use axum::{
    extract::{Path, Query, State},
    Json,
    http::StatusCode,
};
use serde::Serialize;
use crate::server::AppState;
use crate::query::CompanyQuery;
use crate::{Company, Error, Location};
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a core error onto its HTTP outcome
pub fn api_error(err: Error) -> ApiError {
    let (status, detail) = if err.is_not_found() {
        let detail = match &err {
            Error::LocationsNotFound(_) => "Locations not found",
            _ => "Company not found",
        };
        (StatusCode::NOT_FOUND, detail.to_string())
    } else if err.is_unavailable() {
        tracing::error!("Dataset error while serving request: {}", err);
        (StatusCode::SERVICE_UNAVAILABLE, "Dataset unavailable".to_string())
    } else {
        (StatusCode::BAD_REQUEST, err.to_string())
    };
    (status, Json(ErrorResponse { detail }))
}

/// Log line for a lookup miss, worded after what was actually missing
fn not_found_message(err: &Error) -> Option<String> {
    match err {
        Error::CompanyNotFound(id) => Some(format!("Company with ID {} not found.", id)),
        Error::LocationsNotFound(id) => Some(format!("No locations found for company ID {}.", id)),
        _ => None,
    }
}

pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({"message": "Hello World"}))
}

pub async fn healthcheck() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

pub async fn list_companies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CompanyQuery>,
) -> Result<Json<Vec<Company>>, ApiError> {
    match state.engine().find_companies(&query) {
        Ok(companies) => Ok(Json(companies.into_iter().cloned().collect())),
        Err(e) => {
            if e.is_invalid_query() {
                tracing::warn!("Rejected company query: {}", e);
            }
            Err(api_error(e))
        }
    }
}

pub async fn get_company(
    State(state): State<Arc<AppState>>,
    Path(company_id): Path<i64>,
) -> Result<Json<Company>, ApiError> {
    match state.engine().find_company_by_id(company_id) {
        Ok(company) => Ok(Json(company.clone())),
        Err(e) => {
            if let Some(message) = not_found_message(&e) {
                tracing::warn!("{}", message);
            }
            Err(api_error(e))
        }
    }
}

pub async fn get_locations(
    State(state): State<Arc<AppState>>,
    Path(company_id): Path<i64>,
) -> Result<Json<Vec<Location>>, ApiError> {
    match state.engine().find_locations_by_company_id(company_id) {
        Ok(locations) => Ok(Json(locations.into_iter().cloned().collect())),
        Err(e) => {
            if let Some(message) = not_found_message(&e) {
                tracing::warn!("{}", message);
            }
            Err(api_error(e))
        }
    }
}
