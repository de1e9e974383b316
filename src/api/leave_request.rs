use crate::api::employee::employee_exists;
use crate::model::leave_request::{LeaveRequest, LeaveRequestWithEmployee, LeaveStatus, LeaveType};
use actix_web::http::header;
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::{error, info};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

fn not_in_past(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date < chrono::Local::now().date_naive() {
        let mut err = ValidationError::new("past_date");
        err.message = Some("Date cannot be in the past.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeaveRequest {
    #[schema(example = 1)]
    #[validate(range(min = 1, message = "EmployeeId must be greater than 0."))]
    pub employee_id: i64,

    #[schema(example = "2026-01-01", value_type = String, format = "date")]
    #[validate(custom(function = not_in_past))]
    pub start_date: NaiveDate,

    #[schema(example = "2026-01-03", value_type = String, format = "date")]
    #[validate(custom(function = not_in_past))]
    pub end_date: NaiveDate,

    #[schema(example = "Flu")]
    #[validate(length(min = 1, max = 500, message = "Reason is required and cannot exceed 500 characters."))]
    pub reason: String,

    #[schema(example = "Sick")]
    pub leave_type: LeaveType,

    /// Ignored on create; every new request starts out Pending.
    #[serde(default)]
    #[schema(example = "Pending", nullable = true)]
    pub status: Option<LeaveStatus>,
}

const LEAVE_SELECT: &str =
    "SELECT id, employee_id, start_date, end_date, reason, leave_type, status FROM leave_requests";

const LEAVE_WITH_EMPLOYEE_SELECT: &str = r#"
    SELECT lr.id, lr.employee_id, e.name AS employee_name, lr.start_date, lr.end_date,
           lr.reason, lr.leave_type, lr.status
    FROM leave_requests lr
    JOIN employees e ON e.id = lr.employee_id
"#;

/// Submit a leave request
#[utoipa::path(
    post,
    path = "/LeaveRequest/RequestLeave",
    request_body = CreateLeaveRequest,
    responses(
        (status = 201, description = "Leave request created, status Pending", body = LeaveRequest),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Employee does not exist"),
        (status = 409, description = "Overlapping leave request exists")
    ),
    tag = "LeaveRequest"
)]
pub async fn request_leave(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateLeaveRequest>,
) -> actix_web::Result<impl Responder> {
    if let Err(errors) = payload.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    if payload.start_date > payload.end_date {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "startDate must be less than or equal to endDate."
        })));
    }

    let exists = employee_exists(pool.get_ref(), payload.employee_id)
        .await
        .map_err(|e| {
            error!(error = %e, employee_id = payload.employee_id, "Failed to look up employee");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    if !exists {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": format!("Employee with ID {} does not exist.", payload.employee_id)
        })));
    }

    // Open-interval overlap: requests touching only at a boundary are allowed.
    // No status filter, so even a Rejected request blocks the dates.
    let overlapping = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM leave_requests
        WHERE employee_id = ? AND start_date < ? AND end_date > ?
        "#,
    )
    .bind(payload.employee_id)
    .bind(payload.end_date)
    .bind(payload.start_date)
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_id = payload.employee_id, "Failed to check leave overlap");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    if overlapping > 0 {
        return Ok(HttpResponse::Conflict().json(json!({
            "message": "A leave request already exists for this employee during the specified dates."
        })));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO leave_requests (employee_id, start_date, end_date, reason, leave_type, status)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(payload.employee_id)
    .bind(payload.start_date)
    .bind(payload.end_date)
    .bind(&payload.reason)
    .bind(payload.leave_type)
    .bind(LeaveStatus::Pending)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_id = payload.employee_id, "Failed to create leave request");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let id = result.last_insert_rowid();

    info!(
        leave_id = id,
        employee_id = payload.employee_id,
        leave_type = %payload.leave_type,
        "Leave request submitted"
    );

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/LeaveRequest/{}", id)))
        .json(LeaveRequest {
            id,
            employee_id: payload.employee_id,
            start_date: payload.start_date,
            end_date: payload.end_date,
            reason: payload.reason.clone(),
            leave_type: payload.leave_type,
            status: LeaveStatus::Pending,
        }))
}

/// Get leave request by ID
#[utoipa::path(
    get,
    path = "/LeaveRequest/{id}",
    params(
        ("id" = i64, Path, description = "Leave request ID")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveRequest),
        (status = 404, description = "Leave request not found")
    ),
    tag = "LeaveRequest"
)]
pub async fn get_leave_request(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let leave_id = path.into_inner();

    let leave = sqlx::query_as::<_, LeaveRequest>(&format!("{} WHERE id = ?", LEAVE_SELECT))
        .bind(leave_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, leave_id, "Failed to fetch leave request");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    match leave {
        Some(record) => Ok(HttpResponse::Ok().json(record)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Leave request not found"
        }))),
    }
}

async fn list_with_employee(
    pool: &SqlitePool,
    status: Option<LeaveStatus>,
) -> Result<Vec<LeaveRequestWithEmployee>, sqlx::Error> {
    match status {
        Some(status) => {
            sqlx::query_as::<_, LeaveRequestWithEmployee>(&format!(
                "{} WHERE lr.status = ? ORDER BY lr.id",
                LEAVE_WITH_EMPLOYEE_SELECT
            ))
            .bind(status)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, LeaveRequestWithEmployee>(&format!(
                "{} ORDER BY lr.id",
                LEAVE_WITH_EMPLOYEE_SELECT
            ))
            .fetch_all(pool)
            .await
        }
    }
}

/// All leave requests, with employee names
#[utoipa::path(
    get,
    path = "/LeaveRequest/AllLeaveRequests",
    responses(
        (status = 200, description = "All leave requests", body = [LeaveRequestWithEmployee])
    ),
    tag = "LeaveRequest"
)]
pub async fn all_leave_requests(pool: web::Data<SqlitePool>) -> actix_web::Result<impl Responder> {
    let leaves = list_with_employee(pool.get_ref(), None).await.map_err(|e| {
        error!(error = %e, "Failed to fetch leave requests");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(leaves))
}

async fn leave_requests_by_status(
    pool: &SqlitePool,
    status: LeaveStatus,
) -> actix_web::Result<HttpResponse> {
    let leaves = list_with_employee(pool, Some(status)).await.map_err(|e| {
        error!(error = %e, status = %status, "Failed to fetch leave requests");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(leaves))
}

/// Approved leave requests
#[utoipa::path(
    get,
    path = "/LeaveRequest/ApprovedLeaveRequests",
    responses(
        (status = 200, description = "Approved leave requests", body = [LeaveRequestWithEmployee])
    ),
    tag = "LeaveRequest"
)]
pub async fn approved_leave_requests(
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    leave_requests_by_status(pool.get_ref(), LeaveStatus::Approved).await
}

/// Pending leave requests
#[utoipa::path(
    get,
    path = "/LeaveRequest/PendingLeaveRequests",
    responses(
        (status = 200, description = "Pending leave requests", body = [LeaveRequestWithEmployee])
    ),
    tag = "LeaveRequest"
)]
pub async fn pending_leave_requests(
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    leave_requests_by_status(pool.get_ref(), LeaveStatus::Pending).await
}

/// Rejected leave requests
#[utoipa::path(
    get,
    path = "/LeaveRequest/RejectedLeaveRequests",
    responses(
        (status = 200, description = "Rejected leave requests", body = [LeaveRequestWithEmployee])
    ),
    tag = "LeaveRequest"
)]
pub async fn rejected_leave_requests(
    pool: web::Data<SqlitePool>,
) -> actix_web::Result<impl Responder> {
    leave_requests_by_status(pool.get_ref(), LeaveStatus::Rejected).await
}

async fn transition_leave(
    pool: &SqlitePool,
    leave_id: i64,
    status: LeaveStatus,
) -> actix_web::Result<HttpResponse> {
    let found = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM leave_requests WHERE id = ?")
        .bind(leave_id)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            error!(error = %e, leave_id, "Failed to fetch leave request");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    if found == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Leave request not found"
        })));
    }

    // No state-machine guard: re-running a transition is allowed and idempotent.
    sqlx::query("UPDATE leave_requests SET status = ? WHERE id = ?")
        .bind(status)
        .bind(leave_id)
        .execute(pool)
        .await
        .map_err(|e| {
            error!(error = %e, leave_id, status = %status, "Failed to update leave status");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    info!(leave_id, status = %status, "Leave request status changed");

    Ok(HttpResponse::NoContent().finish())
}

/// Approve a leave request
#[utoipa::path(
    post,
    path = "/LeaveRequest/ApproveLeave/{id}",
    params(
        ("id" = i64, Path, description = "Leave request ID")
    ),
    responses(
        (status = 204, description = "Leave request approved"),
        (status = 404, description = "Leave request not found")
    ),
    tag = "LeaveRequest"
)]
pub async fn approve_leave(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    transition_leave(pool.get_ref(), path.into_inner(), LeaveStatus::Approved).await
}

/// Reject a leave request
#[utoipa::path(
    post,
    path = "/LeaveRequest/RejectLeave/{id}",
    params(
        ("id" = i64, Path, description = "Leave request ID")
    ),
    responses(
        (status = 204, description = "Leave request rejected"),
        (status = 404, description = "Leave request not found")
    ),
    tag = "LeaveRequest"
)]
pub async fn reject_leave(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    transition_leave(pool.get_ref(), path.into_inner(), LeaveStatus::Rejected).await
}
