//! Company-wide endpoints.

use axum::{extract::State, Json};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::AppState;

use super::error::ApiError;
use super::extract::Params;
use super::Success;

#[derive(Debug, Default, Deserialize)]
pub struct CompanyQuery {
    pub company: Option<String>,
}

/// DELETE /company?company=
///
/// Removes every department, employee and timecard of the company.
pub async fn delete_company(
    State(state): State<Arc<AppState>>,
    Params(query): Params<CompanyQuery>,
) -> Result<Json<Success<String>>, ApiError> {
    let Some(company) = state.company(query.company) else {
        return Err(ApiError::message("Company name is required."));
    };

    let removed = state
        .data
        .delete_company(&company)
        .await
        .map_err(|e| ApiError::storage(e, "Failed to delete company information."))?;

    info!(company = %company, rows = removed, "Company data deleted");

    Ok(Json(Success::new(format!(
        "{}'s information deleted.",
        company
    ))))
}
