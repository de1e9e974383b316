#![allow(dead_code)]

use actix_web::body::BoxBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::web::Data;
use actix_web::{App, Error, test};
use chrono::{NaiveDate, NaiveDateTime};
use ems::config::Config;
use ems::db::init_schema;
use ems::routes;
use ems::utils::clock::{Clock, SystemClock};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;

pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

pub fn fixed_clock(now: NaiveDateTime) -> Arc<dyn Clock> {
    Arc::new(FixedClock(now))
}

pub fn system_clock() -> Arc<dyn Clock> {
    Arc::new(SystemClock)
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_addr: "127.0.0.1:0".to_string(),
        rate_api_per_min: 60_000,
    }
}

/// A single-connection pool so the in-memory database is shared by every query.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    init_schema(&pool).await.expect("Failed to apply schema");
    pool
}

pub fn app(
    pool: SqlitePool,
    clock: Arc<dyn Clock>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(Data::new(pool))
        .app_data(Data::new(test_config()))
        .app_data(Data::from(clock))
        .configure(|cfg| routes::configure(cfg, test_config()))
}

// The rate limiter keys on peer IP, so every test request carries one.
fn peer() -> SocketAddr {
    "127.0.0.1:44321".parse().unwrap()
}

pub fn get(uri: &str) -> test::TestRequest {
    test::TestRequest::get().uri(uri).peer_addr(peer())
}

pub fn post(uri: &str) -> test::TestRequest {
    test::TestRequest::post().uri(uri).peer_addr(peer())
}

pub fn post_json(uri: &str, body: serde_json::Value) -> test::TestRequest {
    post(uri).set_json(body)
}

pub fn put_json(uri: &str, body: serde_json::Value) -> test::TestRequest {
    test::TestRequest::put()
        .uri(uri)
        .peer_addr(peer())
        .set_json(body)
}

pub fn delete(uri: &str) -> test::TestRequest {
    test::TestRequest::delete().uri(uri).peer_addr(peer())
}

pub async fn seed_department(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query("INSERT INTO departments (name, manager_id) VALUES (?, ?)")
        .bind(name)
        .bind(1_i64)
        .execute(pool)
        .await
        .expect("Failed to seed department")
        .last_insert_rowid()
}

pub async fn seed_employee(pool: &SqlitePool, department_id: i64, name: &str) -> i64 {
    sqlx::query(
        r#"
        INSERT INTO employees
        (name, position, department_id, date_of_joining, email_address, phone_number)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(name)
    .bind("Developer")
    .bind(department_id)
    .bind(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    .bind(format!(
        "{}@example.com",
        name.to_lowercase().replace(' ', ".")
    ))
    .bind("+8801712345678")
    .execute(pool)
    .await
    .expect("Failed to seed employee")
    .last_insert_rowid()
}
