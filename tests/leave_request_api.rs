mod common;

use actix_web::http::header;
use actix_web::test;
use chrono::{Duration, Local, NaiveDate};
use serde_json::{Value, json};

fn day(offset: i64) -> NaiveDate {
    Local::now().date_naive() + Duration::days(offset)
}

fn leave_body(employee_id: i64, start: NaiveDate, end: NaiveDate) -> Value {
    json!({
        "employeeId": employee_id,
        "startDate": start,
        "endDate": end,
        "reason": "Family event",
        "leaveType": "Vacation"
    })
}

#[actix_web::test]
async fn request_leave_creates_pending_request() {
    let pool = common::test_pool().await;
    let department_id = common::seed_department(&pool, "Engineering").await;
    let employee_id = common::seed_employee(&pool, department_id, "John Doe").await;

    let app = test::init_service(common::app(pool.clone(), common::system_clock())).await;

    let mut body = leave_body(employee_id, day(1), day(3));
    // Caller-supplied status is ignored; new requests always start Pending.
    body["status"] = json!("Approved");

    let resp = test::call_service(
        &app,
        common::post_json("/LeaveRequest/RequestLeave", body).to_request(),
    )
    .await;

    assert_eq!(resp.status(), 201);
    let location = resp
        .headers()
        .get(header::LOCATION)
        .expect("Location header")
        .to_str()
        .unwrap()
        .to_string();
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(location, format!("/LeaveRequest/{}", created["id"]));
    assert_eq!(created["status"], json!("Pending"));
    assert_eq!(created["leaveType"], json!("Vacation"));
    assert_eq!(created["employeeId"], json!(employee_id));
}

#[actix_web::test]
async fn request_leave_for_unknown_employee_persists_nothing() {
    let pool = common::test_pool().await;
    let app = test::init_service(common::app(pool.clone(), common::system_clock())).await;

    let resp = test::call_service(
        &app,
        common::post_json("/LeaveRequest/RequestLeave", leave_body(42, day(1), day(3)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 404);

    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM leave_requests")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[actix_web::test]
async fn overlapping_request_conflicts_but_boundary_touch_is_allowed() {
    let pool = common::test_pool().await;
    let department_id = common::seed_department(&pool, "Engineering").await;
    let employee_id = common::seed_employee(&pool, department_id, "John Doe").await;

    let app = test::init_service(common::app(pool.clone(), common::system_clock())).await;

    let first = test::call_service(
        &app,
        common::post_json(
            "/LeaveRequest/RequestLeave",
            leave_body(employee_id, day(1), day(3)),
        )
        .to_request(),
    )
    .await;
    assert_eq!(first.status(), 201);

    let overlapping = test::call_service(
        &app,
        common::post_json(
            "/LeaveRequest/RequestLeave",
            leave_body(employee_id, day(2), day(4)),
        )
        .to_request(),
    )
    .await;
    assert_eq!(overlapping.status(), 409);

    let touching = test::call_service(
        &app,
        common::post_json(
            "/LeaveRequest/RequestLeave",
            leave_body(employee_id, day(3), day(5)),
        )
        .to_request(),
    )
    .await;
    assert_eq!(touching.status(), 201);
}

#[actix_web::test]
async fn rejected_request_still_blocks_the_dates() {
    let pool = common::test_pool().await;
    let department_id = common::seed_department(&pool, "Engineering").await;
    let employee_id = common::seed_employee(&pool, department_id, "John Doe").await;

    let app = test::init_service(common::app(pool.clone(), common::system_clock())).await;

    let first = test::call_service(
        &app,
        common::post_json(
            "/LeaveRequest/RequestLeave",
            leave_body(employee_id, day(1), day(3)),
        )
        .to_request(),
    )
    .await;
    let created: Value = test::read_body_json(first).await;

    let rejected = test::call_service(
        &app,
        common::post(&format!("/LeaveRequest/RejectLeave/{}", created["id"])).to_request(),
    )
    .await;
    assert_eq!(rejected.status(), 204);

    // The overlap check looks at every stored request, whatever its status.
    let resp = test::call_service(
        &app,
        common::post_json(
            "/LeaveRequest/RequestLeave",
            leave_body(employee_id, day(2), day(4)),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 409);
}

#[actix_web::test]
async fn validation_failures_report_per_field_messages() {
    let pool = common::test_pool().await;
    let department_id = common::seed_department(&pool, "Engineering").await;
    let employee_id = common::seed_employee(&pool, department_id, "John Doe").await;

    let app = test::init_service(common::app(pool.clone(), common::system_clock())).await;

    let mut empty_reason = leave_body(employee_id, day(1), day(3));
    empty_reason["reason"] = json!("");
    let resp = test::call_service(
        &app,
        common::post_json("/LeaveRequest/RequestLeave", empty_reason).to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert!(body.get("reason").is_some());

    let mut oversized = leave_body(employee_id, day(1), day(3));
    oversized["reason"] = json!("x".repeat(501));
    let resp = test::call_service(
        &app,
        common::post_json("/LeaveRequest/RequestLeave", oversized).to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);

    let resp = test::call_service(
        &app,
        common::post_json(
            "/LeaveRequest/RequestLeave",
            leave_body(employee_id, day(-3), day(-1)),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);

    let resp = test::call_service(
        &app,
        common::post_json(
            "/LeaveRequest/RequestLeave",
            leave_body(employee_id, day(3), day(1)),
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn approve_is_idempotent_and_reject_remains_permissive() {
    let pool = common::test_pool().await;
    let department_id = common::seed_department(&pool, "Engineering").await;
    let employee_id = common::seed_employee(&pool, department_id, "John Doe").await;

    let app = test::init_service(common::app(pool.clone(), common::system_clock())).await;

    let created = test::call_service(
        &app,
        common::post_json(
            "/LeaveRequest/RequestLeave",
            leave_body(employee_id, day(1), day(3)),
        )
        .to_request(),
    )
    .await;
    let created: Value = test::read_body_json(created).await;
    let leave_id = created["id"].as_i64().unwrap();

    let approve = test::call_service(
        &app,
        common::post(&format!("/LeaveRequest/ApproveLeave/{}", leave_id)).to_request(),
    )
    .await;
    assert_eq!(approve.status(), 204);

    let fetched = test::call_service(
        &app,
        common::get(&format!("/LeaveRequest/{}", leave_id)).to_request(),
    )
    .await;
    let fetched: Value = test::read_body_json(fetched).await;
    assert_eq!(fetched["status"], json!("Approved"));

    let again = test::call_service(
        &app,
        common::post(&format!("/LeaveRequest/ApproveLeave/{}", leave_id)).to_request(),
    )
    .await;
    assert_eq!(again.status(), 204);

    // No state-machine guard: an approved request can still be rejected.
    let reject = test::call_service(
        &app,
        common::post(&format!("/LeaveRequest/RejectLeave/{}", leave_id)).to_request(),
    )
    .await;
    assert_eq!(reject.status(), 204);

    let fetched = test::call_service(
        &app,
        common::get(&format!("/LeaveRequest/{}", leave_id)).to_request(),
    )
    .await;
    let fetched: Value = test::read_body_json(fetched).await;
    assert_eq!(fetched["status"], json!("Rejected"));
}

#[actix_web::test]
async fn transitions_on_unknown_requests_are_not_found() {
    let pool = common::test_pool().await;
    let app = test::init_service(common::app(pool.clone(), common::system_clock())).await;

    let resp = test::call_service(
        &app,
        common::post("/LeaveRequest/ApproveLeave/99").to_request(),
    )
    .await;
    assert_eq!(resp.status(), 404);

    let resp = test::call_service(
        &app,
        common::post("/LeaveRequest/RejectLeave/99").to_request(),
    )
    .await;
    assert_eq!(resp.status(), 404);

    let resp = test::call_service(&app, common::get("/LeaveRequest/99").to_request()).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn listings_include_employee_names_and_filter_by_status() {
    let pool = common::test_pool().await;
    let department_id = common::seed_department(&pool, "Engineering").await;
    let john = common::seed_employee(&pool, department_id, "John Doe").await;
    let jane = common::seed_employee(&pool, department_id, "Jane Doe").await;

    let app = test::init_service(common::app(pool.clone(), common::system_clock())).await;

    let first = test::call_service(
        &app,
        common::post_json(
            "/LeaveRequest/RequestLeave",
            leave_body(john, day(1), day(3)),
        )
        .to_request(),
    )
    .await;
    let first: Value = test::read_body_json(first).await;

    let second = test::call_service(
        &app,
        common::post_json(
            "/LeaveRequest/RequestLeave",
            leave_body(jane, day(1), day(3)),
        )
        .to_request(),
    )
    .await;
    let second: Value = test::read_body_json(second).await;

    let approve = test::call_service(
        &app,
        common::post(&format!("/LeaveRequest/ApproveLeave/{}", first["id"])).to_request(),
    )
    .await;
    assert_eq!(approve.status(), 204);

    let all = test::call_service(
        &app,
        common::get("/LeaveRequest/AllLeaveRequests").to_request(),
    )
    .await;
    let all: Value = test::read_body_json(all).await;
    let all = all.as_array().unwrap();
    assert_eq!(all.len(), 2);
    assert!(
        all.iter()
            .any(|r| r["employeeName"] == json!("John Doe") && r["status"] == json!("Approved"))
    );
    assert!(
        all.iter()
            .any(|r| r["employeeName"] == json!("Jane Doe") && r["status"] == json!("Pending"))
    );

    let approved = test::call_service(
        &app,
        common::get("/LeaveRequest/ApprovedLeaveRequests").to_request(),
    )
    .await;
    let approved: Value = test::read_body_json(approved).await;
    let approved = approved.as_array().unwrap();
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0]["id"], first["id"]);

    let pending = test::call_service(
        &app,
        common::get("/LeaveRequest/PendingLeaveRequests").to_request(),
    )
    .await;
    let pending: Value = test::read_body_json(pending).await;
    let pending = pending.as_array().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["id"], second["id"]);

    let rejected = test::call_service(
        &app,
        common::get("/LeaveRequest/RejectedLeaveRequests").to_request(),
    )
    .await;
    let rejected: Value = test::read_body_json(rejected).await;
    assert!(rejected.as_array().unwrap().is_empty());
}
