use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Salary {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = 1)]
    pub employee_id: i64,

    #[schema(example = "2026-01")]
    pub month: String,

    #[schema(example = 5000.0)]
    pub basic_salary: f64,

    #[schema(example = 200.0)]
    pub deductions: f64,

    #[schema(example = 500.0)]
    pub bonuses: f64,

    /// basic + bonuses - deductions, fixed at creation time.
    #[schema(example = 5300.0)]
    pub net_salary: f64,
}
