use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(
    example = json!({
        "id": 1,
        "name": "John Doe",
        "position": "Developer",
        "departmentId": 10,
        "dateOfJoining": "2024-01-01",
        "emailAddress": "john.doe@company.com",
        "phoneNumber": "+8801712345678",
        "departmentName": "Engineering"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "John Doe")]
    pub name: String,

    #[schema(example = "Developer")]
    pub position: String,

    #[schema(example = 10)]
    pub department_id: i64,

    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub date_of_joining: NaiveDate,

    #[schema(example = "john.doe@company.com")]
    pub email_address: String,

    #[schema(example = "+8801712345678")]
    pub phone_number: String,

    /// Joined from the departments table on reads; never stored on the row.
    #[schema(example = "Engineering", nullable = true)]
    pub department_name: Option<String>,
}
