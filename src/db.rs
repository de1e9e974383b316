use anyhow::Context;
use sqlx::SqlitePool;

pub async fn init_db(database_url: &str) -> SqlitePool {
    SqlitePool::connect(database_url)
        .await
        .expect("Failed to connect to database")
}

// Foreign keys are declarative only (pragma left off): deleting an employee does
// not cascade to attendance or leave rows.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS departments (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        name        TEXT NOT NULL,
        manager_id  INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS employees (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        name            TEXT NOT NULL,
        position        TEXT NOT NULL,
        department_id   INTEGER NOT NULL REFERENCES departments(id),
        date_of_joining TEXT NOT NULL,
        email_address   TEXT NOT NULL,
        phone_number    TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS attendance (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id INTEGER NOT NULL REFERENCES employees(id),
        date        TEXT NOT NULL,
        in_time     TEXT,
        out_time    TEXT,
        status      TEXT NOT NULL,
        is_late     INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS leave_requests (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id INTEGER NOT NULL REFERENCES employees(id),
        start_date  TEXT NOT NULL,
        end_date    TEXT NOT NULL,
        reason      TEXT NOT NULL,
        leave_type  TEXT NOT NULL,
        status      TEXT NOT NULL DEFAULT 'Pending'
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS salaries (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id  INTEGER NOT NULL REFERENCES employees(id),
        month        TEXT NOT NULL,
        basic_salary REAL NOT NULL,
        deductions   REAL NOT NULL,
        bonuses      REAL NOT NULL,
        net_salary   REAL NOT NULL
    )
    "#,
];

pub async fn init_schema(pool: &SqlitePool) -> anyhow::Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("Failed to apply schema statement")?;
    }
    Ok(())
}
