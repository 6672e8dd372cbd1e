//! Timecard endpoints.

use axum::{extract::State, Json};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::db::{Timecard, TimecardRequest};
use crate::validation::{parse_id, validate_timecard, validate_timecard_update};
use crate::AppState;

use super::error::ApiError;
use super::extract::{Params, Payload};
use super::Success;

#[derive(Debug, Serialize, Deserialize)]
pub struct TimecardBody {
    pub timecard: Timecard,
}

impl From<Timecard> for TimecardBody {
    fn from(timecard: Timecard) -> Self {
        Self { timecard }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TimecardQuery {
    pub timecard_id: Option<String>,
    pub emp_id: Option<String>,
}

/// GET /timecard?timecard_id=
pub async fn get_timecard(
    State(state): State<Arc<AppState>>,
    Params(query): Params<TimecardQuery>,
) -> Result<Json<TimecardBody>, ApiError> {
    let Some(timecard_id) = parse_id(query.timecard_id.as_deref()) else {
        return Err(ApiError::message("Timecard ID is required."));
    };

    let timecard = state
        .data
        .get_timecard(timecard_id)
        .await
        .map_err(|e| ApiError::storage(e, "Failed to retrieve timecard."))?
        .ok_or_else(|| ApiError::message("Timecard not found."))?;

    Ok(Json(timecard.into()))
}

/// GET /timecards?emp_id=
pub async fn list_timecards(
    State(state): State<Arc<AppState>>,
    Params(query): Params<TimecardQuery>,
) -> Result<Json<Vec<TimecardBody>>, ApiError> {
    let Some(emp_id) = parse_id(query.emp_id.as_deref()) else {
        return Err(ApiError::message("Employee ID is required."));
    };

    let timecards = state
        .data
        .get_all_timecards(emp_id)
        .await
        .map_err(|e| ApiError::storage(e, "Failed to retrieve timecards."))?;

    Ok(Json(timecards.into_iter().map(TimecardBody::from).collect()))
}

/// PUT /timecard
pub async fn insert_timecard(
    State(state): State<Arc<AppState>>,
    Payload(mut req): Payload<TimecardRequest>,
) -> Result<Json<Success<TimecardBody>>, ApiError> {
    const FAILED: &str = "Failed to insert timecard.";
    state.fill_company(&mut req.company);

    let now = Local::now().naive_local();
    let timecard = validate_timecard(state.data.as_ref(), &req, now)
        .await
        .map_err(|e| ApiError::rejected(e, FAILED))?;

    let inserted = state
        .data
        .insert_timecard(timecard)
        .await
        .map_err(|e| ApiError::storage(e, FAILED))?
        .ok_or_else(|| ApiError::message(FAILED))?;

    info!(
        timecard_id = inserted.timecard_id,
        emp_id = inserted.emp_id,
        start_time = %inserted.start_time,
        "Timecard created"
    );

    Ok(Json(Success::new(inserted.into())))
}

/// POST /timecard
pub async fn update_timecard(
    State(state): State<Arc<AppState>>,
    Payload(mut req): Payload<TimecardRequest>,
) -> Result<Json<Success<TimecardBody>>, ApiError> {
    const FAILED: &str = "Failed to update timecard.";
    state.fill_company(&mut req.company);

    let now = Local::now().naive_local();
    let timecard = validate_timecard_update(state.data.as_ref(), &req, now)
        .await
        .map_err(|e| ApiError::rejected(e, FAILED))?;

    let updated = state
        .data
        .update_timecard(timecard)
        .await
        .map_err(|e| ApiError::storage(e, FAILED))?
        .ok_or_else(|| {
            ApiError::message("Failed to update timecard. Timecard may not exist or invalid data.")
        })?;

    info!(timecard_id = updated.timecard_id, "Timecard updated");

    Ok(Json(Success::new(updated.into())))
}

/// DELETE /timecard?timecard_id=
pub async fn delete_timecard(
    State(state): State<Arc<AppState>>,
    Params(query): Params<TimecardQuery>,
) -> Result<Json<Success<String>>, ApiError> {
    let Some(timecard_id) = parse_id(query.timecard_id.as_deref()) else {
        return Err(ApiError::message("Timecard ID is required."));
    };

    let deleted = state
        .data
        .delete_timecard(timecard_id)
        .await
        .map_err(|e| ApiError::storage(e, "Failed to delete timecard."))?;

    if deleted == 0 {
        return Err(ApiError::message(
            "Timecard not found or could not be deleted.",
        ));
    }

    info!(timecard_id, "Timecard deleted");

    Ok(Json(Success::new(format!("Timecard {} deleted.", timecard_id))))
}
