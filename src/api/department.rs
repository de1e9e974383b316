use crate::model::{department::Department, employee::Employee};
use actix_web::http::header;
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::error;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepartment {
    #[schema(example = "Engineering")]
    #[validate(length(min = 1, max = 100, message = "Department name is required."))]
    pub name: String,

    #[schema(example = 7)]
    #[validate(range(min = 1, message = "Manager ID must be a positive number."))]
    pub manager_id: i64,
}

/// Department plus the employees grouped under it. The employees carry no
/// department back-reference, so the shape stays acyclic.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentWithEmployees {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "Engineering")]
    pub name: String,

    #[schema(example = 7)]
    pub manager_id: i64,

    pub employees: Vec<Employee>,
}

/// List Departments
#[utoipa::path(
    get,
    path = "/Department",
    responses(
        (status = 200, description = "All departments", body = [Department])
    ),
    tag = "Department"
)]
pub async fn list_departments(pool: web::Data<SqlitePool>) -> actix_web::Result<impl Responder> {
    let departments = sqlx::query_as::<_, Department>(
        "SELECT id, name, manager_id FROM departments ORDER BY id",
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to fetch departments");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(departments))
}

/// Get Department by ID, including its employees
#[utoipa::path(
    get,
    path = "/Department/{id}",
    params(
        ("id" = i64, Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "Department found", body = DepartmentWithEmployees),
        (status = 404, description = "Department not found")
    ),
    tag = "Department"
)]
pub async fn get_department(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let department_id = path.into_inner();

    let department = sqlx::query_as::<_, Department>(
        "SELECT id, name, manager_id FROM departments WHERE id = ?",
    )
    .bind(department_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, department_id, "Failed to fetch department");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let department = match department {
        Some(d) => d,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "message": "Department not found"
            })));
        }
    };

    let employees = sqlx::query_as::<_, Employee>(
        r#"
        SELECT e.id, e.name, e.position, e.department_id, e.date_of_joining,
               e.email_address, e.phone_number, d.name AS department_name
        FROM employees e
        LEFT JOIN departments d ON d.id = e.department_id
        WHERE e.department_id = ?
        ORDER BY e.id
        "#,
    )
    .bind(department_id)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, department_id, "Failed to fetch department employees");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(DepartmentWithEmployees {
        id: department.id,
        name: department.name,
        manager_id: department.manager_id,
        employees,
    }))
}

/// Create Department
#[utoipa::path(
    post,
    path = "/Department",
    request_body = CreateDepartment,
    responses(
        (status = 201, description = "Department created", body = Department),
        (status = 400, description = "Validation failed")
    ),
    tag = "Department"
)]
pub async fn create_department(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateDepartment>,
) -> actix_web::Result<impl Responder> {
    if let Err(errors) = payload.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    let result = sqlx::query("INSERT INTO departments (name, manager_id) VALUES (?, ?)")
        .bind(&payload.name)
        .bind(payload.manager_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create department");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let id = result.last_insert_rowid();

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/Department/{}", id)))
        .json(Department {
            id,
            name: payload.name.clone(),
            manager_id: payload.manager_id,
        }))
}
