use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Display, EnumString, ToSchema,
)]
pub enum LeaveType {
    #[sqlx(rename = "Sick")]
    Sick,
    #[sqlx(rename = "Vacation")]
    Vacation,
    #[sqlx(rename = "Personal")]
    Personal,
    #[sqlx(rename = "Maternity")]
    Maternity,
    #[sqlx(rename = "Paternity")]
    Paternity,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Display, EnumString, ToSchema,
)]
pub enum LeaveStatus {
    #[sqlx(rename = "Pending")]
    Pending,
    #[sqlx(rename = "Approved")]
    Approved,
    #[sqlx(rename = "Rejected")]
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = "2026-01-01", value_type = String, format = "date")]
    pub start_date: NaiveDate,

    #[schema(example = "2026-01-03", value_type = String, format = "date")]
    pub end_date: NaiveDate,

    #[schema(example = "Flu")]
    pub reason: String,

    #[schema(example = "Sick")]
    pub leave_type: LeaveType,

    #[schema(example = "Pending")]
    pub status: LeaveStatus,
}

/// Read-side projection joining the employee's display name onto the request.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequestWithEmployee {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = "John Doe")]
    pub employee_name: String,

    #[schema(example = "2026-01-01", value_type = String, format = "date")]
    pub start_date: NaiveDate,

    #[schema(example = "2026-01-03", value_type = String, format = "date")]
    pub end_date: NaiveDate,

    #[schema(example = "Flu")]
    pub reason: String,

    #[schema(example = "Sick")]
    pub leave_type: LeaveType,

    #[schema(example = "Pending")]
    pub status: LeaveStatus,
}
