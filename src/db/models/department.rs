//! Department models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Field;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Department {
    pub dept_id: i64,
    pub company: String,
    pub dept_name: String,
    pub dept_no: String,
    pub location: String,
}

/// A department that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewDepartment {
    pub company: String,
    pub dept_name: String,
    pub dept_no: String,
    pub location: String,
}

/// Body of `PUT /department` and `POST /department`.
///
/// `dept_id` is only read on update.
#[derive(Debug, Default, Deserialize)]
pub struct DepartmentRequest {
    #[serde(default)]
    pub company: Field,
    #[serde(default)]
    pub dept_id: Field,
    #[serde(default)]
    pub dept_name: Field,
    #[serde(default)]
    pub dept_no: Field,
    #[serde(default)]
    pub location: Field,
}
