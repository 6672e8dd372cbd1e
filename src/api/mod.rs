mod company;
mod departments;
mod employees;
pub mod error;
mod extract;
mod timecards;

pub use departments::DepartmentBody;
pub use employees::EmployeeBody;
pub use timecards::TimecardBody;

use axum::{
    response::{IntoResponse, Response},
    routing::{delete, get},
    Router,
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::AppState;

use error::ApiError;

/// Envelope for successful writes and deletes
#[derive(Debug, Serialize, Deserialize)]
pub struct Success<T> {
    pub success: T,
}

impl<T> Success<T> {
    pub fn new(success: T) -> Self {
        Self { success }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let company_routes = Router::new()
        // Company
        .route("/company", delete(company::delete_company).fallback(not_found))
        // Departments
        .route(
            "/department",
            get(departments::get_department)
                .put(departments::insert_department)
                .post(departments::update_department)
                .delete(departments::delete_department)
                .fallback(not_found),
        )
        .route(
            "/departments",
            get(departments::list_departments).fallback(not_found),
        )
        // Employees
        .route(
            "/employee",
            get(employees::get_employee)
                .put(employees::insert_employee)
                .post(employees::update_employee)
                .delete(employees::delete_employee)
                .fallback(not_found),
        )
        .route(
            "/employees",
            get(employees::list_employees).fallback(not_found),
        )
        // Timecards
        .route(
            "/timecard",
            get(timecards::get_timecard)
                .put(timecards::insert_timecard)
                .post(timecards::update_timecard)
                .delete(timecards::delete_timecard)
                .fallback(not_found),
        )
        .route(
            "/timecards",
            get(timecards::list_timecards).fallback(not_found),
        );

    let base_path = state.config.server.normalized_base_path();
    let router = match base_path {
        Some(base) => Router::new().nest(&base, company_routes),
        None => company_routes,
    };

    router
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::not_found()
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %detail, "Request handler panicked");

    ApiError::internal().into_response()
}
