//! Department validation.

use crate::db::{Department, DepartmentRepository, DepartmentRequest, NewDepartment};

use super::{as_positive_id, as_text, fail, is_present, ValidationResult};

pub const DUPLICATE_DEPT_NO: &str = "Department number must be unique. This dept_no already exists.";
pub const DEPT_NO_TAKEN: &str =
    "Department number must be unique. This dept_no is already used by another department.";

/// The string fields shared by insert and update, in check order
struct DepartmentFields<'a> {
    company: &'a str,
    dept_name: &'a str,
    dept_no: &'a str,
    location: &'a str,
}

fn string_fields(req: &DepartmentRequest) -> ValidationResult<DepartmentFields<'_>> {
    let Some(company) = as_text(&req.company) else {
        return fail("Company name must be a valid string.");
    };
    let Some(dept_name) = as_text(&req.dept_name) else {
        return fail("Department name must be a valid string.");
    };
    let Some(dept_no) = as_text(&req.dept_no) else {
        return fail("Department number must be a valid string.");
    };
    let Some(location) = as_text(&req.location) else {
        return fail("Location must be a valid string.");
    };

    Ok(DepartmentFields {
        company,
        dept_name,
        dept_no,
        location,
    })
}

/// Validate a new department. `dept_no` must not exist yet within the company.
pub async fn validate_department<R>(
    repo: &R,
    req: &DepartmentRequest,
) -> ValidationResult<NewDepartment>
where
    R: DepartmentRepository + ?Sized,
{
    let required = [&req.company, &req.dept_name, &req.dept_no, &req.location];
    if !required.into_iter().all(is_present) {
        return fail("All fields (company, dept_name, dept_no, location) are required.");
    }

    let fields = string_fields(req)?;

    if repo
        .get_department_by_no(fields.company, fields.dept_no)
        .await?
        .is_some()
    {
        return fail(DUPLICATE_DEPT_NO);
    }

    Ok(NewDepartment {
        company: fields.company.to_string(),
        dept_name: fields.dept_name.to_string(),
        dept_no: fields.dept_no.to_string(),
        location: fields.location.to_string(),
    })
}

/// Validate a department update. The department must exist in the company and
/// its `dept_no` may only collide with itself.
pub async fn validate_department_update<R>(
    repo: &R,
    req: &DepartmentRequest,
) -> ValidationResult<Department>
where
    R: DepartmentRepository + ?Sized,
{
    let required = [
        &req.company,
        &req.dept_id,
        &req.dept_name,
        &req.dept_no,
        &req.location,
    ];
    if !required.into_iter().all(is_present) {
        return fail("All fields (company, dept_id, dept_name, dept_no, location) are required.");
    }

    let Some(dept_id) = as_positive_id(&req.dept_id) else {
        return fail("Department ID must be a valid positive number.");
    };

    let fields = string_fields(req)?;

    if repo
        .get_department(fields.company, dept_id)
        .await?
        .is_none()
    {
        return fail("Department ID does not exist.");
    }

    if let Some(other) = repo
        .get_department_by_no(fields.company, fields.dept_no)
        .await?
    {
        if other.dept_id != dept_id {
            return fail(DEPT_NO_TAKEN);
        }
    }

    Ok(Department {
        dept_id,
        company: fields.company.to_string(),
        dept_name: fields.dept_name.to_string(),
        dept_no: fields.dept_no.to_string(),
        location: fields.location.to_string(),
    })
}
