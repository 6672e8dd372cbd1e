//! Timecard models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Field;

/// One worked shift. Both times are stored as `yyyy-MM-dd HH:mm:ss`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Timecard {
    pub timecard_id: i64,
    pub start_time: String,
    pub end_time: String,
    pub emp_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTimecard {
    pub start_time: String,
    pub end_time: String,
    pub emp_id: i64,
}

/// Body of `PUT /timecard` and `POST /timecard`
#[derive(Debug, Default, Deserialize)]
pub struct TimecardRequest {
    #[serde(default)]
    pub company: Field,
    #[serde(default)]
    pub timecard_id: Field,
    #[serde(default)]
    pub emp_id: Field,
    #[serde(default)]
    pub start_time: Field,
    #[serde(default)]
    pub end_time: Field,
}
