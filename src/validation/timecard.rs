//! Timecard validation.
//!
//! A timecard covers part of a single weekday inside the 06:00–18:00 window,
//! lasts at least an hour, starts within the past week, and an employee has
//! at most one per calendar day.

use chrono::{Duration, NaiveDateTime, Timelike};

use crate::db::{EmployeeRepository, NewTimecard, Timecard, TimecardRepository, TimecardRequest};

use super::{
    as_positive_id, fail, is_present, is_weekend, parse_timestamp, ValidationResult,
    TIMESTAMP_FORMAT,
};

const DAY_START_SECS: u32 = 6 * 3600;
const DAY_END_SECS: u32 = 18 * 3600;

fn within_work_hours(t: NaiveDateTime) -> bool {
    (DAY_START_SECS..=DAY_END_SECS).contains(&t.num_seconds_from_midnight())
}

/// Time rules that need no stored data. Returns the parsed start and end.
fn check_times(
    req: &TimecardRequest,
    now: NaiveDateTime,
) -> ValidationResult<(NaiveDateTime, NaiveDateTime)> {
    let start = req.start_time.as_ref().and_then(|v| v.as_str()).and_then(parse_timestamp);
    let end = req.end_time.as_ref().and_then(|v| v.as_str()).and_then(parse_timestamp);
    let (Some(start), Some(end)) = (start, end) else {
        return fail("Start time and end time must be in format yyyy-MM-dd HH:mm:ss.");
    };

    if start > now {
        return fail("Start time must be current date or up to 1 week ago.");
    }
    if start < now - Duration::days(7) {
        return fail("Start time must be within the last week.");
    }

    if end - start < Duration::hours(1) {
        return fail("End time must be at least 1 hour greater than start time.");
    }
    if start.date() != end.date() {
        return fail("End time must be on the same day as start time.");
    }

    if is_weekend(start.date()) {
        return fail("Start time must be Monday through Friday (not weekend).");
    }
    if is_weekend(end.date()) {
        return fail("End time must be Monday through Friday (not weekend).");
    }

    if !within_work_hours(start) {
        return fail("Start time must be between 06:00:00 and 18:00:00.");
    }
    if !within_work_hours(end) {
        return fail("End time must be between 06:00:00 and 18:00:00.");
    }

    Ok((start, end))
}

/// Employee must exist and have no other timecard starting on the same day.
/// `exclude` is the timecard being updated, which may keep its own day.
async fn check_employee_day<R>(
    repo: &R,
    emp_id: i64,
    start: NaiveDateTime,
    exclude: Option<i64>,
) -> ValidationResult<()>
where
    R: EmployeeRepository + TimecardRepository + ?Sized,
{
    if repo.get_employee(emp_id).await?.is_none() {
        return fail("Employee ID does not exist in your company.");
    }

    let existing = repo.get_all_timecards(emp_id).await?;
    let clash = existing
        .iter()
        .filter(|tc| Some(tc.timecard_id) != exclude)
        .filter_map(|tc| parse_timestamp(&tc.start_time))
        .any(|other| other.date() == start.date());
    if clash {
        return fail(
            "Start time cannot be on the same day as an existing timecard for this employee.",
        );
    }

    Ok(())
}

/// Validate a new timecard against the clock reading `now`.
pub async fn validate_timecard<R>(
    repo: &R,
    req: &TimecardRequest,
    now: NaiveDateTime,
) -> ValidationResult<NewTimecard>
where
    R: EmployeeRepository + TimecardRepository + ?Sized,
{
    let required = [&req.company, &req.emp_id, &req.start_time, &req.end_time];
    if !required.into_iter().all(is_present) {
        return fail("All fields (company, emp_id, start_time, end_time) are required.");
    }

    let Some(emp_id) = as_positive_id(&req.emp_id) else {
        return fail("Employee ID must be a valid positive number.");
    };

    let (start, end) = check_times(req, now)?;
    check_employee_day(repo, emp_id, start, None).await?;

    Ok(NewTimecard {
        start_time: start.format(TIMESTAMP_FORMAT).to_string(),
        end_time: end.format(TIMESTAMP_FORMAT).to_string(),
        emp_id,
    })
}

/// Validate a change to an existing timecard against the clock reading `now`.
pub async fn validate_timecard_update<R>(
    repo: &R,
    req: &TimecardRequest,
    now: NaiveDateTime,
) -> ValidationResult<Timecard>
where
    R: EmployeeRepository + TimecardRepository + ?Sized,
{
    let required = [
        &req.company,
        &req.timecard_id,
        &req.emp_id,
        &req.start_time,
        &req.end_time,
    ];
    if !required.into_iter().all(is_present) {
        return fail(
            "All fields (company, timecard_id, emp_id, start_time, end_time) are required.",
        );
    }

    let Some(timecard_id) = as_positive_id(&req.timecard_id) else {
        return fail("Timecard ID must be a valid positive number.");
    };
    let Some(emp_id) = as_positive_id(&req.emp_id) else {
        return fail("Employee ID must be a valid positive number.");
    };

    let (start, end) = check_times(req, now)?;

    if repo.get_timecard(timecard_id).await?.is_none() {
        return fail("Timecard ID does not exist.");
    }

    check_employee_day(repo, emp_id, start, Some(timecard_id)).await?;

    Ok(Timecard {
        timecard_id,
        start_time: start.format(TIMESTAMP_FORMAT).to_string(),
        end_time: end.format(TIMESTAMP_FORMAT).to_string(),
        emp_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqliteStore;
    use crate::validation::test_support::{friday_evening, seed_department, seed_employee, store};
    use crate::validation::ValidationError;
    use serde_json::json;

    fn request(emp_id: i64, start: &str, end: &str) -> TimecardRequest {
        TimecardRequest {
            company: Some(json!("acme")),
            timecard_id: None,
            emp_id: Some(json!(emp_id)),
            start_time: Some(json!(start)),
            end_time: Some(json!(end)),
        }
    }

    fn message(err: ValidationError) -> String {
        match err {
            ValidationError::Invalid(msg) => msg,
            other => panic!("expected a validation message, got {other:?}"),
        }
    }

    async fn store_with_employee() -> (SqliteStore, i64) {
        let store = store().await;
        let dept_id = seed_department(&store, "acme", "D1").await;
        let emp_id = seed_employee(&store, "E1", dept_id).await;
        (store, emp_id)
    }

    async fn reject(store: &SqliteStore, req: &TimecardRequest) -> String {
        message(
            validate_timecard(store, req, friday_evening())
                .await
                .unwrap_err(),
        )
    }

    #[tokio::test]
    async fn test_valid_timecard() {
        let (store, emp_id) = store_with_employee().await;
        let req = request(emp_id, "2024-03-14 08:00:00", "2024-03-14 16:30:00");

        let tc = validate_timecard(&store, &req, friday_evening()).await.unwrap();
        assert_eq!(tc.emp_id, emp_id);
        assert_eq!(tc.start_time, "2024-03-14 08:00:00");
    }

    #[tokio::test]
    async fn test_missing_field_is_required() {
        let (store, emp_id) = store_with_employee().await;
        let mut req = request(emp_id, "2024-03-14 08:00:00", "2024-03-14 16:00:00");
        req.end_time = None;

        assert_eq!(
            reject(&store, &req).await,
            "All fields (company, emp_id, start_time, end_time) are required."
        );
    }

    #[tokio::test]
    async fn test_bad_format_rejected() {
        let (store, emp_id) = store_with_employee().await;
        let req = request(emp_id, "2024-03-14T08:00", "2024-03-14 16:00:00");

        assert_eq!(
            reject(&store, &req).await,
            "Start time and end time must be in format yyyy-MM-dd HH:mm:ss."
        );
    }

    #[tokio::test]
    async fn test_future_start_rejected() {
        let (store, emp_id) = store_with_employee().await;
        let req = request(emp_id, "2024-03-18 08:00:00", "2024-03-18 16:00:00");

        assert_eq!(
            reject(&store, &req).await,
            "Start time must be current date or up to 1 week ago."
        );
    }

    #[tokio::test]
    async fn test_start_older_than_a_week_rejected() {
        let (store, emp_id) = store_with_employee().await;
        // 2024-03-08 08:00 is earlier than now minus 7 days (2024-03-08 20:00)
        let req = request(emp_id, "2024-03-08 08:00:00", "2024-03-08 16:00:00");

        assert_eq!(
            reject(&store, &req).await,
            "Start time must be within the last week."
        );
    }

    #[tokio::test]
    async fn test_minimum_duration_boundary() {
        let (store, emp_id) = store_with_employee().await;

        let short = request(emp_id, "2024-03-14 08:00:00", "2024-03-14 08:59:00");
        assert_eq!(
            reject(&store, &short).await,
            "End time must be at least 1 hour greater than start time."
        );

        let exact = request(emp_id, "2024-03-14 08:00:00", "2024-03-14 09:00:00");
        assert!(validate_timecard(&store, &exact, friday_evening()).await.is_ok());
    }

    #[tokio::test]
    async fn test_end_before_start_rejected() {
        let (store, emp_id) = store_with_employee().await;
        let req = request(emp_id, "2024-03-14 12:00:00", "2024-03-14 08:00:00");

        assert_eq!(
            reject(&store, &req).await,
            "End time must be at least 1 hour greater than start time."
        );
    }

    #[tokio::test]
    async fn test_end_on_next_day_rejected() {
        let (store, emp_id) = store_with_employee().await;
        let req = request(emp_id, "2024-03-13 17:00:00", "2024-03-14 07:00:00");

        assert_eq!(
            reject(&store, &req).await,
            "End time must be on the same day as start time."
        );
    }

    #[tokio::test]
    async fn test_weekend_rejected() {
        let (store, emp_id) = store_with_employee().await;
        let req = request(emp_id, "2024-03-09 08:00:00", "2024-03-09 16:00:00");

        assert_eq!(
            reject(&store, &req).await,
            "Start time must be Monday through Friday (not weekend)."
        );
    }

    #[tokio::test]
    async fn test_work_hours_boundary() {
        let (store, emp_id) = store_with_employee().await;

        let early = request(emp_id, "2024-03-14 05:59:59", "2024-03-14 12:00:00");
        assert_eq!(
            reject(&store, &early).await,
            "Start time must be between 06:00:00 and 18:00:00."
        );

        let late = request(emp_id, "2024-03-14 12:00:00", "2024-03-14 18:00:01");
        assert_eq!(
            reject(&store, &late).await,
            "End time must be between 06:00:00 and 18:00:00."
        );

        let edges = request(emp_id, "2024-03-14 06:00:00", "2024-03-14 18:00:00");
        assert!(validate_timecard(&store, &edges, friday_evening()).await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_employee_rejected() {
        let (store, _) = store_with_employee().await;
        let req = request(999, "2024-03-14 08:00:00", "2024-03-14 16:00:00");

        assert_eq!(
            reject(&store, &req).await,
            "Employee ID does not exist in your company."
        );
    }

    #[tokio::test]
    async fn test_one_timecard_per_day() {
        let (store, emp_id) = store_with_employee().await;
        let first = request(emp_id, "2024-03-14 08:00:00", "2024-03-14 12:00:00");
        let tc = validate_timecard(&store, &first, friday_evening()).await.unwrap();
        let saved = store.insert_timecard(tc).await.unwrap().unwrap();

        let second = request(emp_id, "2024-03-14 13:00:00", "2024-03-14 17:00:00");
        assert_eq!(
            reject(&store, &second).await,
            "Start time cannot be on the same day as an existing timecard for this employee."
        );

        // Updating the existing card within its own day is fine
        let mut update = request(emp_id, "2024-03-14 09:00:00", "2024-03-14 17:00:00");
        update.timecard_id = Some(json!(saved.timecard_id));
        let updated = validate_timecard_update(&store, &update, friday_evening())
            .await
            .unwrap();
        assert_eq!(updated.timecard_id, saved.timecard_id);
        assert_eq!(updated.start_time, "2024-03-14 09:00:00");
    }

    #[tokio::test]
    async fn test_update_cannot_move_onto_another_cards_day() {
        let (store, emp_id) = store_with_employee().await;
        let wednesday = store
            .insert_timecard(NewTimecard {
                start_time: "2024-03-13 08:00:00".to_string(),
                end_time: "2024-03-13 16:00:00".to_string(),
                emp_id,
            })
            .await
            .unwrap()
            .unwrap();
        store
            .insert_timecard(NewTimecard {
                start_time: "2024-03-14 08:00:00".to_string(),
                end_time: "2024-03-14 16:00:00".to_string(),
                emp_id,
            })
            .await
            .unwrap();

        let mut update = request(emp_id, "2024-03-14 10:00:00", "2024-03-14 15:00:00");
        update.timecard_id = Some(json!(wednesday.timecard_id));
        let err = validate_timecard_update(&store, &update, friday_evening())
            .await
            .unwrap_err();
        assert_eq!(
            message(err),
            "Start time cannot be on the same day as an existing timecard for this employee."
        );
    }

    #[tokio::test]
    async fn test_update_requires_existing_timecard() {
        let (store, emp_id) = store_with_employee().await;
        let mut update = request(emp_id, "2024-03-14 08:00:00", "2024-03-14 16:00:00");
        update.timecard_id = Some(json!(77));

        let err = validate_timecard_update(&store, &update, friday_evening())
            .await
            .unwrap_err();
        assert_eq!(message(err), "Timecard ID does not exist.");
    }

    #[tokio::test]
    async fn test_update_rejects_bad_timecard_id() {
        let (store, emp_id) = store_with_employee().await;
        let mut update = request(emp_id, "2024-03-14 08:00:00", "2024-03-14 16:00:00");
        update.timecard_id = Some(json!("x"));

        let err = validate_timecard_update(&store, &update, friday_evening())
            .await
            .unwrap_err();
        assert_eq!(message(err), "Timecard ID must be a valid positive number.");
    }
}
