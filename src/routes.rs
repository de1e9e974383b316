use crate::{
    api::{attendance, department, employee, leave_request, salary},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-scope limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min.max(1))
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    cfg.service(
        web::scope("/Employee")
            .wrap(build_limiter(config.rate_api_per_min))
            // /Employee
            .service(
                web::resource("")
                    .route(web::get().to(employee::list_employees))
                    .route(web::post().to(employee::create_employee)),
            )
            // /Employee/{id}
            .service(
                web::resource("/{id}")
                    .route(web::get().to(employee::get_employee))
                    .route(web::put().to(employee::update_employee))
                    .route(web::delete().to(employee::delete_employee)),
            ),
    );

    cfg.service(
        web::scope("/Department")
            .wrap(build_limiter(config.rate_api_per_min))
            .service(
                web::resource("")
                    .route(web::get().to(department::list_departments))
                    .route(web::post().to(department::create_department)),
            )
            .service(web::resource("/{id}").route(web::get().to(department::get_department))),
    );

    cfg.service(
        web::scope("/Attendance")
            .wrap(build_limiter(config.rate_api_per_min))
            // Literal segments before the {id} catch-all
            .service(
                web::resource("/SetStatus")
                    .route(web::post().to(attendance::set_attendance_status)),
            )
            .service(web::resource("/Today").route(web::get().to(attendance::get_today_attendance)))
            .service(
                web::resource("/ByDate/{date}")
                    .route(web::get().to(attendance::get_attendance_by_date)),
            )
            .service(
                web::resource("/CalculateHours/{id}")
                    .route(web::get().to(attendance::calculate_hours)),
            )
            .service(web::resource("/{id}").route(web::get().to(attendance::get_attendance))),
    );

    cfg.service(
        web::scope("/LeaveRequest")
            .wrap(build_limiter(config.rate_api_per_min))
            .service(
                web::resource("/RequestLeave").route(web::post().to(leave_request::request_leave)),
            )
            .service(
                web::resource("/AllLeaveRequests")
                    .route(web::get().to(leave_request::all_leave_requests)),
            )
            .service(
                web::resource("/ApprovedLeaveRequests")
                    .route(web::get().to(leave_request::approved_leave_requests)),
            )
            .service(
                web::resource("/PendingLeaveRequests")
                    .route(web::get().to(leave_request::pending_leave_requests)),
            )
            .service(
                web::resource("/RejectedLeaveRequests")
                    .route(web::get().to(leave_request::rejected_leave_requests)),
            )
            .service(
                web::resource("/ApproveLeave/{id}")
                    .route(web::post().to(leave_request::approve_leave)),
            )
            .service(
                web::resource("/RejectLeave/{id}")
                    .route(web::post().to(leave_request::reject_leave)),
            )
            .service(web::resource("/{id}").route(web::get().to(leave_request::get_leave_request))),
    );

    cfg.service(
        web::scope("/Salary")
            .wrap(build_limiter(config.rate_api_per_min))
            .service(web::resource("").route(web::post().to(salary::create_salary)))
            .service(web::resource("/{id}").route(web::get().to(salary::get_salary))),
    );
}
