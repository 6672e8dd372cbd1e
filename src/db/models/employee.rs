//! Employee models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Field;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub emp_id: i64,
    pub emp_name: String,
    pub emp_no: String,
    /// Hire date as `yyyy-MM-dd`
    pub hire_date: String,
    pub job: String,
    pub salary: f64,
    pub dept_id: i64,
    /// Manager's emp_id, 0 when the employee has no manager
    pub mng_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub emp_name: String,
    pub emp_no: String,
    pub hire_date: String,
    pub job: String,
    pub salary: f64,
    pub dept_id: i64,
    pub mng_id: i64,
}

impl NewEmployee {
    pub fn with_id(self, emp_id: i64) -> Employee {
        Employee {
            emp_id,
            emp_name: self.emp_name,
            emp_no: self.emp_no,
            hire_date: self.hire_date,
            job: self.job,
            salary: self.salary,
            dept_id: self.dept_id,
            mng_id: self.mng_id,
        }
    }
}

/// Body of `PUT /employee` and `POST /employee`
#[derive(Debug, Default, Deserialize)]
pub struct EmployeeRequest {
    #[serde(default)]
    pub company: Field,
    #[serde(default)]
    pub emp_id: Field,
    #[serde(default)]
    pub emp_name: Field,
    #[serde(default)]
    pub emp_no: Field,
    #[serde(default)]
    pub hire_date: Field,
    #[serde(default)]
    pub job: Field,
    #[serde(default)]
    pub salary: Field,
    #[serde(default)]
    pub dept_id: Field,
    #[serde(default)]
    pub mng_id: Field,
}
