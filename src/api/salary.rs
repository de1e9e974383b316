use crate::model::salary::Salary;
use actix_web::http::header;
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::error;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalary {
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
}

/// Create Salary record
#[utoipa::path(
    post,
    path = "/Salary",
    request_body = CreateSalary,
    responses(
        (status = 201, description = "Salary created with net salary computed", body = Salary)
    ),
    tag = "Salary"
)]
pub async fn create_salary(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateSalary>,
) -> actix_web::Result<impl Responder> {
    let net_salary = payload.basic_salary + payload.bonuses - payload.deductions;

    let result = sqlx::query(
        r#"
        INSERT INTO salaries (employee_id, month, basic_salary, deductions, bonuses, net_salary)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(payload.employee_id)
    .bind(&payload.month)
    .bind(payload.basic_salary)
    .bind(payload.deductions)
    .bind(payload.bonuses)
    .bind(net_salary)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_id = payload.employee_id, "Failed to create salary");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let id = result.last_insert_rowid();

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/Salary/{}", id)))
        .json(Salary {
            id,
            employee_id: payload.employee_id,
            month: payload.month.clone(),
            basic_salary: payload.basic_salary,
            deductions: payload.deductions,
            bonuses: payload.bonuses,
            net_salary,
        }))
}

/// Get Salary by ID
#[utoipa::path(
    get,
    path = "/Salary/{id}",
    params(
        ("id" = i64, Path, description = "Salary record ID")
    ),
    responses(
        (status = 200, description = "Salary found", body = Salary),
        (status = 404, description = "Salary not found")
    ),
    tag = "Salary"
)]
pub async fn get_salary(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let salary_id = path.into_inner();

    let salary = sqlx::query_as::<_, Salary>(
        r#"
        SELECT id, employee_id, month, basic_salary, deductions, bonuses, net_salary
        FROM salaries
        WHERE id = ?
        "#,
    )
    .bind(salary_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, salary_id, "Failed to fetch salary");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    match salary {
        Some(record) => Ok(HttpResponse::Ok().json(record)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Salary not found"
        }))),
    }
}
