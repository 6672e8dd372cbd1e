//! Repository traits for the company data store.
//!
//! Lookups return `None` when the row does not exist, writes return the stored
//! row, and deletes return the number of rows removed. A UNIQUE violation
//! comes back as [`DataError::Duplicate`](super::DataError::Duplicate).

use async_trait::async_trait;

use super::{
    DataResult, Department, Employee, NewDepartment, NewEmployee, NewTimecard, Timecard,
};

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Remove every timecard, employee and department belonging to `company`
    async fn delete_company(&self, company: &str) -> DataResult<u64>;
}

#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    async fn get_department(&self, company: &str, dept_id: i64) -> DataResult<Option<Department>>;
    async fn get_department_by_no(
        &self,
        company: &str,
        dept_no: &str,
    ) -> DataResult<Option<Department>>;
    async fn get_all_departments(&self, company: &str) -> DataResult<Vec<Department>>;
    async fn insert_department(&self, department: NewDepartment) -> DataResult<Option<Department>>;
    async fn update_department(&self, department: Department) -> DataResult<Option<Department>>;
    async fn delete_department(&self, company: &str, dept_id: i64) -> DataResult<u64>;
}

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn get_employee(&self, emp_id: i64) -> DataResult<Option<Employee>>;
    /// Employees whose department belongs to `company`
    async fn get_all_employees(&self, company: &str) -> DataResult<Vec<Employee>>;
    async fn insert_employee(&self, employee: NewEmployee) -> DataResult<Option<Employee>>;
    async fn update_employee(&self, employee: Employee) -> DataResult<Option<Employee>>;
    async fn delete_employee(&self, emp_id: i64) -> DataResult<u64>;
}

#[async_trait]
pub trait TimecardRepository: Send + Sync {
    async fn get_timecard(&self, timecard_id: i64) -> DataResult<Option<Timecard>>;
    async fn get_all_timecards(&self, emp_id: i64) -> DataResult<Vec<Timecard>>;
    async fn insert_timecard(&self, timecard: NewTimecard) -> DataResult<Option<Timecard>>;
    async fn update_timecard(&self, timecard: Timecard) -> DataResult<Option<Timecard>>;
    async fn delete_timecard(&self, timecard_id: i64) -> DataResult<u64>;
}

/// Everything the API needs from storage
pub trait DataLayer:
    CompanyRepository + DepartmentRepository + EmployeeRepository + TimecardRepository
{
}

impl<T> DataLayer for T where
    T: CompanyRepository + DepartmentRepository + EmployeeRepository + TimecardRepository
{
}
