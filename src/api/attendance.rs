use crate::api::employee::employee_exists;
use crate::model::attendance::{Attendance, AttendanceStatus};
use crate::utils::clock::Clock;
use actix_web::http::header;
use actix_web::{HttpResponse, Responder, web};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use std::collections::HashSet;
use tracing::{error, info};
use utoipa::ToSchema;
use validator::Validate;

const ATTENDANCE_SELECT: &str =
    "SELECT id, employee_id, date, in_time, out_time, status, is_late FROM attendance";

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetAttendanceStatus {
    #[schema(example = 1)]
    #[validate(range(min = 1, message = "Employee ID must be greater than zero."))]
    pub employee_id: i64,

    #[schema(example = "Present")]
    pub status: AttendanceStatus,

    #[schema(example = "2024-10-05T09:00:00", value_type = Option<String>, format = "date-time", nullable = true)]
    pub in_time: Option<NaiveDateTime>,

    #[schema(example = "2024-10-05T17:00:00", value_type = Option<String>, format = "date-time", nullable = true)]
    pub out_time: Option<NaiveDateTime>,
}

fn office_start(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(8, 0, 0).expect("valid office start time")
}

fn default_out_time(in_time: NaiveDateTime) -> NaiveDateTime {
    in_time + Duration::hours(8)
}

/// Record an attendance event for the current day
#[utoipa::path(
    post,
    path = "/Attendance/SetStatus",
    request_body = SetAttendanceStatus,
    responses(
        (status = 201, description = "Attendance recorded", body = Attendance),
        (status = 400, description = "Validation failed or employee already marked Present today"),
        (status = 404, description = "Employee does not exist")
    ),
    tag = "Attendance"
)]
pub async fn set_attendance_status(
    pool: web::Data<SqlitePool>,
    clock: web::Data<dyn Clock>,
    payload: web::Json<SetAttendanceStatus>,
) -> actix_web::Result<impl Responder> {
    if let Err(errors) = payload.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
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

    let now = clock.now();
    let today = now.date();

    let existing = sqlx::query_as::<_, Attendance>(&format!(
        "{} WHERE employee_id = ? AND date = ?",
        ATTENDANCE_SELECT
    ))
    .bind(payload.employee_id)
    .bind(today)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_id = payload.employee_id, "Failed to fetch attendance");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    if let Some(record) = &existing {
        if record.status == AttendanceStatus::Present
            && payload.status == AttendanceStatus::Present
        {
            return Ok(HttpResponse::BadRequest().json(json!({
                "message": "Employee has already been marked as 'Present' today."
            })));
        }
    }

    let mut in_time = existing.as_ref().and_then(|r| r.in_time);
    let mut out_time = existing.as_ref().and_then(|r| r.out_time);
    let mut is_late = existing.as_ref().map(|r| r.is_late).unwrap_or(false);

    if payload.status == AttendanceStatus::Present {
        let arrived = in_time.unwrap_or_else(|| payload.in_time.unwrap_or(now));
        is_late = arrived > office_start(today);
        if out_time.is_none() {
            out_time = Some(default_out_time(arrived));
        }
        in_time = Some(arrived);
    }

    // Manual checkout always wins over the computed default.
    if let Some(explicit_out) = payload.out_time {
        out_time = Some(explicit_out);
    }

    let id = match &existing {
        Some(record) => {
            sqlx::query(
                "UPDATE attendance SET status = ?, in_time = ?, out_time = ?, is_late = ? WHERE id = ?",
            )
            .bind(payload.status)
            .bind(in_time)
            .bind(out_time)
            .bind(is_late)
            .bind(record.id)
            .execute(pool.get_ref())
            .await
            .map_err(|e| {
                error!(error = %e, attendance_id = record.id, "Failed to update attendance");
                actix_web::error::ErrorInternalServerError("Internal Server Error")
            })?;
            record.id
        }
        None => {
            let result = sqlx::query(
                r#"
                INSERT INTO attendance (employee_id, date, in_time, out_time, status, is_late)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(payload.employee_id)
            .bind(today)
            .bind(in_time)
            .bind(out_time)
            .bind(payload.status)
            .bind(is_late)
            .execute(pool.get_ref())
            .await
            .map_err(|e| {
                error!(error = %e, employee_id = payload.employee_id, "Failed to insert attendance");
                actix_web::error::ErrorInternalServerError("Internal Server Error")
            })?;
            result.last_insert_rowid()
        }
    };

    info!(
        employee_id = payload.employee_id,
        status = %payload.status,
        is_late,
        "Attendance status recorded"
    );

    let record = Attendance {
        id,
        employee_id: payload.employee_id,
        date: today,
        in_time,
        out_time,
        status: payload.status,
        is_late,
    };

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/Attendance/{}", id)))
        .json(record))
}

/// Get attendance record by ID
#[utoipa::path(
    get,
    path = "/Attendance/{id}",
    params(
        ("id" = i64, Path, description = "Attendance record ID")
    ),
    responses(
        (status = 200, description = "Attendance record found", body = Attendance),
        (status = 404, description = "Attendance record not found")
    ),
    tag = "Attendance"
)]
pub async fn get_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let attendance_id = path.into_inner();

    let attendance =
        sqlx::query_as::<_, Attendance>(&format!("{} WHERE id = ?", ATTENDANCE_SELECT))
            .bind(attendance_id)
            .fetch_optional(pool.get_ref())
            .await
            .map_err(|e| {
                error!(error = %e, attendance_id, "Failed to fetch attendance");
                actix_web::error::ErrorInternalServerError("Internal Server Error")
            })?;

    match attendance {
        Some(record) => Ok(HttpResponse::Ok().json(record)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Attendance record not found"
        }))),
    }
}

async fn attendance_for_date(
    pool: &SqlitePool,
    date: NaiveDate,
) -> Result<Vec<Attendance>, sqlx::Error> {
    let mut records =
        sqlx::query_as::<_, Attendance>(&format!("{} WHERE date = ?", ATTENDANCE_SELECT))
            .bind(date)
            .fetch_all(pool)
            .await?;

    let employee_ids = sqlx::query_scalar::<_, i64>("SELECT id FROM employees ORDER BY id")
        .fetch_all(pool)
        .await?;

    // Employees without a record for the day still show up, as "Need to Attend".
    let seen: HashSet<i64> = records.iter().map(|r| r.employee_id).collect();
    for employee_id in employee_ids {
        if !seen.contains(&employee_id) {
            records.push(Attendance {
                id: 0,
                employee_id,
                date,
                in_time: None,
                out_time: None,
                status: AttendanceStatus::NeedToAttend,
                is_late: false,
            });
        }
    }

    Ok(records)
}

/// Today's attendance for every employee
#[utoipa::path(
    get,
    path = "/Attendance/Today",
    responses(
        (status = 200, description = "Attendance for today, placeholders included", body = [Attendance])
    ),
    tag = "Attendance"
)]
pub async fn get_today_attendance(
    pool: web::Data<SqlitePool>,
    clock: web::Data<dyn Clock>,
) -> actix_web::Result<impl Responder> {
    let today = clock.now().date();

    let records = attendance_for_date(pool.get_ref(), today).await.map_err(|e| {
        error!(error = %e, "Failed to fetch today's attendance");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(records))
}

/// Attendance for an arbitrary date
#[utoipa::path(
    get,
    path = "/Attendance/ByDate/{date}",
    params(
        ("date" = String, Path, description = "Calendar date (YYYY-MM-DD)")
    ),
    responses(
        (status = 200, description = "Attendance for the date, placeholders included", body = [Attendance])
    ),
    tag = "Attendance"
)]
pub async fn get_attendance_by_date(
    pool: web::Data<SqlitePool>,
    path: web::Path<NaiveDate>,
) -> actix_web::Result<impl Responder> {
    let date = path.into_inner();

    let records = attendance_for_date(pool.get_ref(), date).await.map_err(|e| {
        error!(error = %e, %date, "Failed to fetch attendance by date");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(records))
}

/// Hours worked for an attendance record
#[utoipa::path(
    get,
    path = "/Attendance/CalculateHours/{id}",
    params(
        ("id" = i64, Path, description = "Attendance record ID")
    ),
    responses(
        (status = 200, description = "Fractional hours between in-time and out-time", body = f64),
        (status = 404, description = "Attendance record not found")
    ),
    tag = "Attendance"
)]
pub async fn calculate_hours(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let attendance_id = path.into_inner();

    let attendance =
        sqlx::query_as::<_, Attendance>(&format!("{} WHERE id = ?", ATTENDANCE_SELECT))
            .bind(attendance_id)
            .fetch_optional(pool.get_ref())
            .await
            .map_err(|e| {
                error!(error = %e, attendance_id, "Failed to fetch attendance");
                actix_web::error::ErrorInternalServerError("Internal Server Error")
            })?;

    let attendance = match attendance {
        Some(record) => record,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "message": "Attendance record not found"
            })));
        }
    };

    let hours = match (attendance.in_time, attendance.out_time) {
        (Some(in_time), Some(out_time)) => {
            (out_time - in_time).num_seconds() as f64 / 3600.0
        }
        _ => 0.0,
    };

    Ok(HttpResponse::Ok().json(hours))
}
