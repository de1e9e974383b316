use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Daily attendance status. Stored as TEXT; the wire names keep their spaces.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Display, EnumString, ToSchema,
)]
pub enum AttendanceStatus {
    #[serde(rename = "Present")]
    #[sqlx(rename = "Present")]
    #[strum(serialize = "Present")]
    Present,

    #[serde(rename = "Not Present")]
    #[sqlx(rename = "Not Present")]
    #[strum(serialize = "Not Present")]
    NotPresent,

    #[serde(rename = "Need to Attend")]
    #[sqlx(rename = "Need to Attend")]
    #[strum(serialize = "Need to Attend")]
    NeedToAttend,
}

/// One row per employee per calendar day, enforced by lookup-before-write.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    /// Zero on synthesized placeholder rows that were never persisted.
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = "2024-10-05", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "2024-10-05T08:55:00", value_type = Option<String>, format = "date-time", nullable = true)]
    pub in_time: Option<NaiveDateTime>,

    #[schema(example = "2024-10-05T16:55:00", value_type = Option<String>, format = "date-time", nullable = true)]
    pub out_time: Option<NaiveDateTime>,

    #[schema(example = "Present")]
    pub status: AttendanceStatus,

    #[schema(example = false)]
    pub is_late: bool,
}
