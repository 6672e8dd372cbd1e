//! SQLite-backed implementation of the repository traits.

use async_trait::async_trait;

use super::{
    CompanyRepository, DataResult, DbPool, Department, DepartmentRepository, Employee,
    EmployeeRepository, NewDepartment, NewEmployee, NewTimecard, Timecard, TimecardRepository,
};

const DEPARTMENT_COLUMNS: &str = "dept_id, company, dept_name, dept_no, location";
const EMPLOYEE_COLUMNS: &str = "emp_id, emp_name, emp_no, hire_date, job, salary, dept_id, mng_id";
const TIMECARD_COLUMNS: &str = "timecard_id, start_time, end_time, emp_id";

#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl CompanyRepository for SqliteStore {
    async fn delete_company(&self, company: &str) -> DataResult<u64> {
        let mut tx = self.pool.begin().await?;

        let timecards = sqlx::query(
            r#"
            DELETE FROM timecards WHERE emp_id IN (
                SELECT e.emp_id FROM employees e
                JOIN departments d ON d.dept_id = e.dept_id
                WHERE d.company = ?
            )
            "#,
        )
        .bind(company)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let employees = sqlx::query(
            "DELETE FROM employees WHERE dept_id IN (SELECT dept_id FROM departments WHERE company = ?)",
        )
        .bind(company)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let departments = sqlx::query("DELETE FROM departments WHERE company = ?")
            .bind(company)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        tracing::debug!(
            company = %company,
            timecards,
            employees,
            departments,
            "Company data removed"
        );

        Ok(timecards + employees + departments)
    }
}

#[async_trait]
impl DepartmentRepository for SqliteStore {
    async fn get_department(&self, company: &str, dept_id: i64) -> DataResult<Option<Department>> {
        let department = sqlx::query_as::<_, Department>(&format!(
            "SELECT {DEPARTMENT_COLUMNS} FROM departments WHERE company = ? AND dept_id = ?"
        ))
        .bind(company)
        .bind(dept_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(department)
    }

    async fn get_department_by_no(
        &self,
        company: &str,
        dept_no: &str,
    ) -> DataResult<Option<Department>> {
        let department = sqlx::query_as::<_, Department>(&format!(
            "SELECT {DEPARTMENT_COLUMNS} FROM departments WHERE company = ? AND dept_no = ?"
        ))
        .bind(company)
        .bind(dept_no)
        .fetch_optional(&self.pool)
        .await?;
        Ok(department)
    }

    async fn get_all_departments(&self, company: &str) -> DataResult<Vec<Department>> {
        let departments = sqlx::query_as::<_, Department>(&format!(
            "SELECT {DEPARTMENT_COLUMNS} FROM departments WHERE company = ? ORDER BY dept_id"
        ))
        .bind(company)
        .fetch_all(&self.pool)
        .await?;
        Ok(departments)
    }

    async fn insert_department(&self, department: NewDepartment) -> DataResult<Option<Department>> {
        let inserted = sqlx::query_as::<_, Department>(&format!(
            r#"
            INSERT INTO departments (company, dept_name, dept_no, location)
            VALUES (?, ?, ?, ?)
            RETURNING {DEPARTMENT_COLUMNS}
            "#
        ))
        .bind(&department.company)
        .bind(&department.dept_name)
        .bind(&department.dept_no)
        .bind(&department.location)
        .fetch_optional(&self.pool)
        .await?;
        Ok(inserted)
    }

    async fn update_department(&self, department: Department) -> DataResult<Option<Department>> {
        let updated = sqlx::query_as::<_, Department>(&format!(
            r#"
            UPDATE departments
            SET company = ?, dept_name = ?, dept_no = ?, location = ?
            WHERE dept_id = ?
            RETURNING {DEPARTMENT_COLUMNS}
            "#
        ))
        .bind(&department.company)
        .bind(&department.dept_name)
        .bind(&department.dept_no)
        .bind(&department.location)
        .bind(department.dept_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete_department(&self, company: &str, dept_id: i64) -> DataResult<u64> {
        let result = sqlx::query("DELETE FROM departments WHERE company = ? AND dept_id = ?")
            .bind(company)
            .bind(dept_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl EmployeeRepository for SqliteStore {
    async fn get_employee(&self, emp_id: i64) -> DataResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE emp_id = ?"
        ))
        .bind(emp_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(employee)
    }

    async fn get_all_employees(&self, company: &str) -> DataResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT e.emp_id, e.emp_name, e.emp_no, e.hire_date, e.job, e.salary, e.dept_id, e.mng_id
            FROM employees e
            JOIN departments d ON d.dept_id = e.dept_id
            WHERE d.company = ?
            ORDER BY e.emp_id
            "#,
        )
        .bind(company)
        .fetch_all(&self.pool)
        .await?;
        Ok(employees)
    }

    async fn insert_employee(&self, employee: NewEmployee) -> DataResult<Option<Employee>> {
        let inserted = sqlx::query_as::<_, Employee>(&format!(
            r#"
            INSERT INTO employees (emp_name, emp_no, hire_date, job, salary, dept_id, mng_id)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING {EMPLOYEE_COLUMNS}
            "#
        ))
        .bind(&employee.emp_name)
        .bind(&employee.emp_no)
        .bind(&employee.hire_date)
        .bind(&employee.job)
        .bind(employee.salary)
        .bind(employee.dept_id)
        .bind(employee.mng_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(inserted)
    }

    async fn update_employee(&self, employee: Employee) -> DataResult<Option<Employee>> {
        let updated = sqlx::query_as::<_, Employee>(&format!(
            r#"
            UPDATE employees
            SET emp_name = ?, emp_no = ?, hire_date = ?, job = ?, salary = ?, dept_id = ?, mng_id = ?
            WHERE emp_id = ?
            RETURNING {EMPLOYEE_COLUMNS}
            "#
        ))
        .bind(&employee.emp_name)
        .bind(&employee.emp_no)
        .bind(&employee.hire_date)
        .bind(&employee.job)
        .bind(employee.salary)
        .bind(employee.dept_id)
        .bind(employee.mng_id)
        .bind(employee.emp_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete_employee(&self, emp_id: i64) -> DataResult<u64> {
        let result = sqlx::query("DELETE FROM employees WHERE emp_id = ?")
            .bind(emp_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl TimecardRepository for SqliteStore {
    async fn get_timecard(&self, timecard_id: i64) -> DataResult<Option<Timecard>> {
        let timecard = sqlx::query_as::<_, Timecard>(&format!(
            "SELECT {TIMECARD_COLUMNS} FROM timecards WHERE timecard_id = ?"
        ))
        .bind(timecard_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(timecard)
    }

    async fn get_all_timecards(&self, emp_id: i64) -> DataResult<Vec<Timecard>> {
        let timecards = sqlx::query_as::<_, Timecard>(&format!(
            "SELECT {TIMECARD_COLUMNS} FROM timecards WHERE emp_id = ? ORDER BY start_time"
        ))
        .bind(emp_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(timecards)
    }

    async fn insert_timecard(&self, timecard: NewTimecard) -> DataResult<Option<Timecard>> {
        let inserted = sqlx::query_as::<_, Timecard>(&format!(
            r#"
            INSERT INTO timecards (start_time, end_time, emp_id)
            VALUES (?, ?, ?)
            RETURNING {TIMECARD_COLUMNS}
            "#
        ))
        .bind(&timecard.start_time)
        .bind(&timecard.end_time)
        .bind(timecard.emp_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(inserted)
    }

    async fn update_timecard(&self, timecard: Timecard) -> DataResult<Option<Timecard>> {
        let updated = sqlx::query_as::<_, Timecard>(&format!(
            r#"
            UPDATE timecards
            SET start_time = ?, end_time = ?, emp_id = ?
            WHERE timecard_id = ?
            RETURNING {TIMECARD_COLUMNS}
            "#
        ))
        .bind(&timecard.start_time)
        .bind(&timecard.end_time)
        .bind(timecard.emp_id)
        .bind(timecard.timecard_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete_timecard(&self, timecard_id: i64) -> DataResult<u64> {
        let result = sqlx::query("DELETE FROM timecards WHERE timecard_id = ?")
            .bind(timecard_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_memory, DataError};

    async fn store() -> SqliteStore {
        SqliteStore::new(init_memory().await.unwrap())
    }

    fn new_department(company: &str, dept_no: &str) -> NewDepartment {
        NewDepartment {
            company: company.to_string(),
            dept_name: "Engineering".to_string(),
            dept_no: dept_no.to_string(),
            location: "NY".to_string(),
        }
    }

    fn new_employee(emp_no: &str, dept_id: i64) -> NewEmployee {
        NewEmployee {
            emp_name: "Ada Lovelace".to_string(),
            emp_no: emp_no.to_string(),
            hire_date: "2024-03-15".to_string(),
            job: "Engineer".to_string(),
            salary: 85000.0,
            dept_id,
            mng_id: 0,
        }
    }

    #[tokio::test]
    async fn test_department_crud() {
        let store = store().await;

        let dept = store
            .insert_department(new_department("acme", "D1"))
            .await
            .unwrap()
            .unwrap();
        assert!(dept.dept_id > 0);
        assert_eq!(dept.dept_no, "D1");

        let found = store.get_department("acme", dept.dept_id).await.unwrap();
        assert_eq!(found.as_ref(), Some(&dept));

        // Departments are scoped by company
        assert!(store.get_department("other", dept.dept_id).await.unwrap().is_none());

        let by_no = store.get_department_by_no("acme", "D1").await.unwrap();
        assert_eq!(by_no.map(|d| d.dept_id), Some(dept.dept_id));

        let mut changed = dept.clone();
        changed.location = "Boston".to_string();
        let updated = store.update_department(changed).await.unwrap().unwrap();
        assert_eq!(updated.location, "Boston");

        assert_eq!(store.delete_department("acme", dept.dept_id).await.unwrap(), 1);
        assert_eq!(store.delete_department("acme", dept.dept_id).await.unwrap(), 0);
        assert!(store.get_all_departments("acme").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_department_returns_none() {
        let store = store().await;
        let ghost = Department {
            dept_id: 42,
            company: "acme".to_string(),
            dept_name: "Ghost".to_string(),
            dept_no: "D9".to_string(),
            location: "Nowhere".to_string(),
        };
        assert!(store.update_department(ghost).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_dept_no_within_company() {
        let store = store().await;
        store.insert_department(new_department("acme", "D1")).await.unwrap();

        let err = store
            .insert_department(new_department("acme", "D1"))
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::Duplicate(_)));

        // Same number in another company is fine
        assert!(store
            .insert_department(new_department("globex", "D1"))
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_employees_listed_by_company() {
        let store = store().await;
        let acme = store
            .insert_department(new_department("acme", "D1"))
            .await
            .unwrap()
            .unwrap();
        let globex = store
            .insert_department(new_department("globex", "G1"))
            .await
            .unwrap()
            .unwrap();

        store.insert_employee(new_employee("E1", acme.dept_id)).await.unwrap();
        store.insert_employee(new_employee("E2", acme.dept_id)).await.unwrap();
        store.insert_employee(new_employee("E3", globex.dept_id)).await.unwrap();

        let employees = store.get_all_employees("acme").await.unwrap();
        let numbers: Vec<&str> = employees.iter().map(|e| e.emp_no.as_str()).collect();
        assert_eq!(numbers, vec!["E1", "E2"]);

        let err = store
            .insert_employee(new_employee("E1", globex.dept_id))
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_timecard_crud() {
        let store = store().await;
        let tc = store
            .insert_timecard(NewTimecard {
                start_time: "2024-03-14 08:00:00".to_string(),
                end_time: "2024-03-14 16:00:00".to_string(),
                emp_id: 7,
            })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(store.get_all_timecards(7).await.unwrap().len(), 1);

        let mut changed = tc.clone();
        changed.end_time = "2024-03-14 17:00:00".to_string();
        let updated = store.update_timecard(changed).await.unwrap().unwrap();
        assert_eq!(updated.end_time, "2024-03-14 17:00:00");

        assert_eq!(store.delete_timecard(tc.timecard_id).await.unwrap(), 1);
        assert!(store.get_timecard(tc.timecard_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_company_cascades() {
        let store = store().await;
        let acme = store
            .insert_department(new_department("acme", "D1"))
            .await
            .unwrap()
            .unwrap();
        let globex = store
            .insert_department(new_department("globex", "G1"))
            .await
            .unwrap()
            .unwrap();
        let emp = store
            .insert_employee(new_employee("E1", acme.dept_id))
            .await
            .unwrap()
            .unwrap();
        let other = store
            .insert_employee(new_employee("E2", globex.dept_id))
            .await
            .unwrap()
            .unwrap();
        for emp_id in [emp.emp_id, other.emp_id] {
            store
                .insert_timecard(NewTimecard {
                    start_time: "2024-03-14 08:00:00".to_string(),
                    end_time: "2024-03-14 16:00:00".to_string(),
                    emp_id,
                })
                .await
                .unwrap();
        }

        assert_eq!(store.delete_company("acme").await.unwrap(), 3);

        assert!(store.get_all_departments("acme").await.unwrap().is_empty());
        assert!(store.get_employee(emp.emp_id).await.unwrap().is_none());
        assert!(store.get_all_timecards(emp.emp_id).await.unwrap().is_empty());

        assert_eq!(store.get_all_departments("globex").await.unwrap().len(), 1);
        assert_eq!(store.get_all_timecards(other.emp_id).await.unwrap().len(), 1);
    }
}
