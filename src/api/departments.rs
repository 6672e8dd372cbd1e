//! Department endpoints.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::db::{DataError, Department, DepartmentRequest};
use crate::validation::department::{DEPT_NO_TAKEN, DUPLICATE_DEPT_NO};
use crate::validation::{parse_id, validate_department, validate_department_update};
use crate::AppState;

use super::error::ApiError;
use super::extract::{Params, Payload};
use super::Success;

#[derive(Debug, Serialize, Deserialize)]
pub struct DepartmentBody {
    pub department: Department,
}

impl From<Department> for DepartmentBody {
    fn from(department: Department) -> Self {
        Self { department }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DepartmentQuery {
    pub company: Option<String>,
    pub dept_id: Option<String>,
}

/// `duplicate` answers a dept_no collision that slipped past validation
fn write_failure(err: DataError, duplicate: &str, message: &str) -> ApiError {
    match err {
        DataError::Duplicate(_) => ApiError::message(duplicate),
        err => ApiError::storage(err, message),
    }
}

/// GET /department?company=&dept_id=
pub async fn get_department(
    State(state): State<Arc<AppState>>,
    Params(query): Params<DepartmentQuery>,
) -> Result<Json<DepartmentBody>, ApiError> {
    let company = state.company(query.company);
    let (Some(company), Some(dept_id)) = (company, parse_id(query.dept_id.as_deref())) else {
        return Err(ApiError::message(
            "Company name and department ID are required.",
        ));
    };

    let department = state
        .data
        .get_department(&company, dept_id)
        .await
        .map_err(|e| ApiError::storage(e, "Failed to retrieve department."))?
        .ok_or_else(|| ApiError::message("Department not found."))?;

    Ok(Json(department.into()))
}

/// GET /departments?company=
pub async fn list_departments(
    State(state): State<Arc<AppState>>,
    Params(query): Params<DepartmentQuery>,
) -> Result<Json<Vec<DepartmentBody>>, ApiError> {
    let Some(company) = state.company(query.company) else {
        return Err(ApiError::message("Company name is required."));
    };

    let departments = state
        .data
        .get_all_departments(&company)
        .await
        .map_err(|e| ApiError::storage(e, "Failed to retrieve departments."))?;

    Ok(Json(departments.into_iter().map(DepartmentBody::from).collect()))
}

/// PUT /department
pub async fn insert_department(
    State(state): State<Arc<AppState>>,
    Payload(mut req): Payload<DepartmentRequest>,
) -> Result<Json<Success<DepartmentBody>>, ApiError> {
    const FAILED: &str = "Failed to insert department.";
    state.fill_company(&mut req.company);

    let department = validate_department(state.data.as_ref(), &req)
        .await
        .map_err(|e| ApiError::rejected(e, FAILED))?;

    let inserted = state
        .data
        .insert_department(department)
        .await
        .map_err(|e| write_failure(e, DUPLICATE_DEPT_NO, FAILED))?
        .ok_or_else(|| {
            ApiError::message("Failed to insert department. Department number may already exist.")
        })?;

    info!(
        company = %inserted.company,
        dept_id = inserted.dept_id,
        dept_no = %inserted.dept_no,
        "Department created"
    );

    Ok(Json(Success::new(inserted.into())))
}

/// POST /department
pub async fn update_department(
    State(state): State<Arc<AppState>>,
    Payload(mut req): Payload<DepartmentRequest>,
) -> Result<Json<Success<DepartmentBody>>, ApiError> {
    const FAILED: &str = "Failed to update department.";
    state.fill_company(&mut req.company);

    let department = validate_department_update(state.data.as_ref(), &req)
        .await
        .map_err(|e| ApiError::rejected(e, FAILED))?;

    let updated = state
        .data
        .update_department(department)
        .await
        .map_err(|e| write_failure(e, DEPT_NO_TAKEN, FAILED))?
        .ok_or_else(|| {
            ApiError::message(
                "Failed to update department. Department may not exist or dept_no already exists.",
            )
        })?;

    info!(company = %updated.company, dept_id = updated.dept_id, "Department updated");

    Ok(Json(Success::new(updated.into())))
}

/// DELETE /department?company=&dept_id=
pub async fn delete_department(
    State(state): State<Arc<AppState>>,
    Params(query): Params<DepartmentQuery>,
) -> Result<Json<Success<String>>, ApiError> {
    let company = state.company(query.company);
    let (Some(company), Some(dept_id)) = (company, parse_id(query.dept_id.as_deref())) else {
        return Err(ApiError::message(
            "Company name and department ID are required.",
        ));
    };

    let deleted = state
        .data
        .delete_department(&company, dept_id)
        .await
        .map_err(|e| ApiError::storage(e, "Failed to delete department."))?;

    if deleted == 0 {
        return Err(ApiError::message(
            "Department not found or could not be deleted.",
        ));
    }

    info!(company = %company, dept_id, "Department deleted");

    Ok(Json(Success::new(format!(
        "Department {} from {} deleted.",
        dept_id, company
    ))))
}
