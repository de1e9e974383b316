use crate::model::employee::Employee;
use actix_web::http::header;
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::error;
use utoipa::ToSchema;
use validator::Validate;

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9][0-9\s\-]{1,14}$").unwrap());

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployee {
    #[schema(example = "John Doe")]
    #[validate(length(min = 1, max = 100, message = "Employee name is required."))]
    pub name: String,

    #[schema(example = "Developer")]
    #[validate(length(min = 1, max = 50, message = "Position is required."))]
    pub position: String,

    #[schema(example = 1)]
    #[validate(range(min = 1, message = "Department ID is required."))]
    pub department_id: i64,

    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub date_of_joining: NaiveDate,

    #[schema(example = "john.doe@company.com", format = "email")]
    #[validate(email(message = "Invalid email address."))]
    pub email_address: String,

    #[schema(example = "+8801712345678")]
    #[validate(regex(path = *PHONE_RE, message = "Invalid phone number."))]
    pub phone_number: String,
}

/// Full-replace payload; the id must match the path segment.
#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployee {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "John Doe")]
    #[validate(length(min = 1, max = 100, message = "Employee name is required."))]
    pub name: String,

    #[schema(example = "Developer")]
    #[validate(length(min = 1, max = 50, message = "Position is required."))]
    pub position: String,

    #[schema(example = 1)]
    #[validate(range(min = 1, message = "Department ID is required."))]
    pub department_id: i64,

    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub date_of_joining: NaiveDate,

    #[schema(example = "john.doe@company.com", format = "email")]
    #[validate(email(message = "Invalid email address."))]
    pub email_address: String,

    #[schema(example = "+8801712345678")]
    #[validate(regex(path = *PHONE_RE, message = "Invalid phone number."))]
    pub phone_number: String,
}

const EMPLOYEE_SELECT: &str = r#"
    SELECT e.id, e.name, e.position, e.department_id, e.date_of_joining,
           e.email_address, e.phone_number, d.name AS department_name
    FROM employees e
    LEFT JOIN departments d ON d.id = e.department_id
"#;

async fn fetch_employee(pool: &SqlitePool, id: i64) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>(&format!("{} WHERE e.id = ?", EMPLOYEE_SELECT))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn employee_exists(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/// List Employees
#[utoipa::path(
    get,
    path = "/Employee",
    responses(
        (status = 200, description = "All employees", body = [Employee])
    ),
    tag = "Employee"
)]
pub async fn list_employees(pool: web::Data<SqlitePool>) -> actix_web::Result<impl Responder> {
    let employees = sqlx::query_as::<_, Employee>(&format!("{} ORDER BY e.id", EMPLOYEE_SELECT))
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch employees");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(employees))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/Employee/{id}",
    params(
        ("id" = i64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let employee = fetch_employee(pool.get_ref(), employee_id).await.map_err(|e| {
        error!(error = %e, employee_id, "Failed to fetch employee");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    match employee {
        Some(emp) => Ok(HttpResponse::Ok().json(emp)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        }))),
    }
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/Employee",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Validation failed")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateEmployee>,
) -> actix_web::Result<impl Responder> {
    if let Err(errors) = payload.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO employees
        (name, position, department_id, date_of_joining, email_address, phone_number)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.position)
    .bind(payload.department_id)
    .bind(payload.date_of_joining)
    .bind(&payload.email_address)
    .bind(&payload.phone_number)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to create employee");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let id = result.last_insert_rowid();

    let employee = fetch_employee(pool.get_ref(), id).await.map_err(|e| {
        error!(error = %e, employee_id = id, "Failed to fetch created employee");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    match employee {
        Some(emp) => Ok(HttpResponse::Created()
            .insert_header((header::LOCATION, format!("/Employee/{}", id)))
            .json(emp)),
        None => Err(actix_web::error::ErrorInternalServerError(
            "Internal Server Error",
        )),
    }
}

/// Update Employee (full replace)
#[utoipa::path(
    put,
    path = "/Employee/{id}",
    params(
        ("id" = i64, Path, description = "Employee ID")
    ),
    request_body = UpdateEmployee,
    responses(
        (status = 204, description = "Employee updated"),
        (status = 400, description = "ID mismatch or validation failed"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    payload: web::Json<UpdateEmployee>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    if employee_id != payload.id {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Employee ID mismatch."
        })));
    }

    if let Err(errors) = payload.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    let result = sqlx::query(
        r#"
        UPDATE employees
        SET name = ?, position = ?, department_id = ?, date_of_joining = ?,
            email_address = ?, phone_number = ?
        WHERE id = ?
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.position)
    .bind(payload.department_id)
    .bind(payload.date_of_joining)
    .bind(&payload.email_address)
    .bind(&payload.phone_number)
    .bind(employee_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_id, "Failed to update employee");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    // The row may have been deleted between request and write.
    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        })));
    }

    Ok(HttpResponse::NoContent().finish())
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/Employee/{id}",
    params(
        ("id" = i64, Path, description = "Employee ID")
    ),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let result = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(employee_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, employee_id, "Failed to delete employee");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        })));
    }

    Ok(HttpResponse::NoContent().finish())
}
