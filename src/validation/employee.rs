//! Employee validation.

use chrono::NaiveDate;

use crate::db::{
    DepartmentRepository, Employee, EmployeeRepository, EmployeeRequest, Field, NewEmployee,
};

use super::{
    as_number, as_positive_id, as_text, contains_digit, fail, is_defined, is_present, is_weekend,
    parse_date, ValidationResult,
};

pub const DUPLICATE_EMP_NO: &str =
    "Employee number must be unique. This emp_no already exists in the database.";

/// `mng_id` accepts 0 (no manager) or a positive id
fn as_manager_id(field: &Field) -> Option<i64> {
    let n = as_number(field)?.trunc();
    if n == 0.0 {
        return Some(0);
    }
    (n >= 1.0 && n <= i64::MAX as f64).then_some(n as i64)
}

/// Checks shared by insert and update, from the name through the hire date.
fn check_fields(req: &EmployeeRequest, today: NaiveDate) -> ValidationResult<NewEmployee> {
    let Some(emp_name) = as_text(&req.emp_name) else {
        return fail("Employee name must be a valid string.");
    };
    if contains_digit(emp_name) {
        return fail("Employee name cannot contain numbers.");
    }

    let Some(emp_no) = as_text(&req.emp_no) else {
        return fail("Employee number must be a valid string.");
    };

    let salary = match as_number(&req.salary) {
        Some(s) if s >= 0.0 => s,
        _ => return fail("Salary must be a valid positive number."),
    };

    let Some(dept_id) = as_positive_id(&req.dept_id) else {
        return fail("Department ID must be a valid positive number.");
    };

    let Some(mng_id) = as_manager_id(&req.mng_id) else {
        return fail("Manager ID must be 0 or a valid positive number.");
    };

    let Some(hire_date) = req
        .hire_date
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(parse_date)
    else {
        return fail("Hire date must be in format yyyy-MM-dd.");
    };
    if hire_date > today {
        return fail("Hire date must be current date or earlier.");
    }
    if is_weekend(hire_date) {
        return fail("Hire date must be Monday through Friday (not weekend).");
    }

    let job = match &req.job {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };

    Ok(NewEmployee {
        emp_name: emp_name.to_string(),
        emp_no: emp_no.to_string(),
        hire_date: hire_date.format(super::DATE_FORMAT).to_string(),
        job,
        salary,
        dept_id,
        mng_id,
    })
}

fn company_of(req: &EmployeeRequest) -> ValidationResult<&str> {
    match as_text(&req.company) {
        Some(company) => Ok(company),
        None => fail("Company name must be a valid string."),
    }
}

/// Department must exist in the company; a non-zero manager must be an existing employee.
async fn check_references<R>(repo: &R, company: &str, employee: &NewEmployee) -> ValidationResult<()>
where
    R: DepartmentRepository + EmployeeRepository + ?Sized,
{
    if repo
        .get_department(company, employee.dept_id)
        .await?
        .is_none()
    {
        return fail("Department ID does not exist in your company.");
    }

    if employee.mng_id != 0 && repo.get_employee(employee.mng_id).await?.is_none() {
        return fail("Manager ID does not exist.");
    }

    Ok(())
}

/// Validate a new employee hired no later than `today`.
pub async fn validate_employee<R>(
    repo: &R,
    req: &EmployeeRequest,
    today: NaiveDate,
) -> ValidationResult<NewEmployee>
where
    R: DepartmentRepository + EmployeeRepository + ?Sized,
{
    let present = [&req.company, &req.emp_name, &req.emp_no, &req.hire_date, &req.job, &req.dept_id]
        .into_iter()
        .all(is_present);
    if !present || !is_defined(&req.salary) || !is_defined(&req.mng_id) {
        return fail(
            "All fields (company, emp_name, emp_no, hire_date, job, salary, dept_id, mng_id) are required.",
        );
    }

    let employee = check_fields(req, today)?;
    let company = company_of(req)?;
    check_references(repo, company, &employee).await?;

    Ok(employee)
}

/// Validate an update to an existing employee.
pub async fn validate_employee_update<R>(
    repo: &R,
    req: &EmployeeRequest,
    today: NaiveDate,
) -> ValidationResult<Employee>
where
    R: DepartmentRepository + EmployeeRepository + ?Sized,
{
    let present = [
        &req.company,
        &req.emp_id,
        &req.emp_name,
        &req.emp_no,
        &req.hire_date,
        &req.job,
        &req.dept_id,
    ]
    .into_iter()
    .all(is_present);
    if !present || !is_defined(&req.salary) || !is_defined(&req.mng_id) {
        return fail(
            "All fields (company, emp_id, emp_name, emp_no, hire_date, job, salary, dept_id, mng_id) are required.",
        );
    }

    let Some(emp_id) = as_positive_id(&req.emp_id) else {
        return fail("Employee ID must be a valid positive number.");
    };

    let employee = check_fields(req, today)?;
    let company = company_of(req)?;

    if repo.get_employee(emp_id).await?.is_none() {
        return fail("Employee ID does not exist.");
    }

    check_references(repo, company, &employee).await?;

    Ok(employee.with_id(emp_id))
}
