//! Employee endpoints.

use axum::{extract::State, Json};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::db::{DataError, Employee, EmployeeRequest};
use crate::validation::employee::DUPLICATE_EMP_NO;
use crate::validation::{parse_id, validate_employee, validate_employee_update};
use crate::AppState;

use super::error::ApiError;
use super::extract::{Params, Payload};
use super::Success;

#[derive(Debug, Serialize, Deserialize)]
pub struct EmployeeBody {
    pub employee: Employee,
}

impl From<Employee> for EmployeeBody {
    fn from(employee: Employee) -> Self {
        Self { employee }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EmployeeQuery {
    pub company: Option<String>,
    pub emp_id: Option<String>,
}

fn write_failure(err: DataError, message: &str) -> ApiError {
    match err {
        DataError::Duplicate(_) => ApiError::message(DUPLICATE_EMP_NO),
        err => ApiError::storage(err, message),
    }
}

/// GET /employee?emp_id=
pub async fn get_employee(
    State(state): State<Arc<AppState>>,
    Params(query): Params<EmployeeQuery>,
) -> Result<Json<EmployeeBody>, ApiError> {
    let Some(emp_id) = parse_id(query.emp_id.as_deref()) else {
        return Err(ApiError::message("Employee ID is required."));
    };

    let employee = state
        .data
        .get_employee(emp_id)
        .await
        .map_err(|e| ApiError::storage(e, "Failed to retrieve employee."))?
        .ok_or_else(|| ApiError::message("Employee not found."))?;

    Ok(Json(employee.into()))
}

/// GET /employees?company=
pub async fn list_employees(
    State(state): State<Arc<AppState>>,
    Params(query): Params<EmployeeQuery>,
) -> Result<Json<Vec<EmployeeBody>>, ApiError> {
    let Some(company) = state.company(query.company) else {
        return Err(ApiError::message("Company name is required."));
    };

    let employees = state
        .data
        .get_all_employees(&company)
        .await
        .map_err(|e| ApiError::storage(e, "Failed to retrieve employees."))?;

    Ok(Json(employees.into_iter().map(EmployeeBody::from).collect()))
}

/// PUT /employee
pub async fn insert_employee(
    State(state): State<Arc<AppState>>,
    Payload(mut req): Payload<EmployeeRequest>,
) -> Result<Json<Success<EmployeeBody>>, ApiError> {
    const FAILED: &str = "Failed to insert employee.";
    state.fill_company(&mut req.company);

    let today = Local::now().date_naive();
    let employee = validate_employee(state.data.as_ref(), &req, today)
        .await
        .map_err(|e| ApiError::rejected(e, FAILED))?;

    let inserted = state
        .data
        .insert_employee(employee)
        .await
        .map_err(|e| write_failure(e, FAILED))?
        .ok_or_else(|| {
            ApiError::message(
                "Failed to insert employee. Employee number may already exist or invalid data.",
            )
        })?;

    info!(
        emp_id = inserted.emp_id,
        emp_no = %inserted.emp_no,
        dept_id = inserted.dept_id,
        "Employee created"
    );

    Ok(Json(Success::new(inserted.into())))
}

/// POST /employee
pub async fn update_employee(
    State(state): State<Arc<AppState>>,
    Payload(mut req): Payload<EmployeeRequest>,
) -> Result<Json<Success<EmployeeBody>>, ApiError> {
    const FAILED: &str = "Failed to update employee.";
    state.fill_company(&mut req.company);

    let today = Local::now().date_naive();
    let employee = validate_employee_update(state.data.as_ref(), &req, today)
        .await
        .map_err(|e| ApiError::rejected(e, FAILED))?;

    let updated = state
        .data
        .update_employee(employee)
        .await
        .map_err(|e| write_failure(e, FAILED))?
        .ok_or_else(|| {
            ApiError::message("Failed to update employee. Employee may not exist or invalid data.")
        })?;

    info!(emp_id = updated.emp_id, "Employee updated");

    Ok(Json(Success::new(updated.into())))
}

/// DELETE /employee?emp_id=
pub async fn delete_employee(
    State(state): State<Arc<AppState>>,
    Params(query): Params<EmployeeQuery>,
) -> Result<Json<Success<String>>, ApiError> {
    let Some(emp_id) = parse_id(query.emp_id.as_deref()) else {
        return Err(ApiError::message("Employee ID is required."));
    };

    let deleted = state
        .data
        .delete_employee(emp_id)
        .await
        .map_err(|e| ApiError::storage(e, "Failed to delete employee."))?;

    if deleted == 0 {
        return Err(ApiError::message(
            "Employee not found or could not be deleted.",
        ));
    }

    info!(emp_id, "Employee deleted");

    Ok(Json(Success::new(format!("Employee {} deleted.", emp_id))))
}
