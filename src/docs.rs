use crate::api::attendance::SetAttendanceStatus;
use crate::api::department::{CreateDepartment, DepartmentWithEmployees};
use crate::api::employee::{CreateEmployee, UpdateEmployee};
use crate::api::leave_request::CreateLeaveRequest;
use crate::api::salary::CreateSalary;
use crate::model::attendance::{Attendance, AttendanceStatus};
use crate::model::department::Department;
use crate::model::employee::Employee;
use crate::model::leave_request::{LeaveRequest, LeaveRequestWithEmployee, LeaveStatus, LeaveType};
use crate::model::salary::Salary;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee Management API",
        version = "1.0.0",
        description = r#"
## Employee Management System

CRUD API for core employee administration.

### Key Features
- **Employee Management**
  - Create, replace, list, view, and delete employee profiles
- **Department Management**
  - Group employees and look up a department with its members
- **Attendance Management**
  - Daily status marking with lateness detection and default checkout
- **Leave Management**
  - Request leave with overlap protection, approve or reject requests
- **Salary Management**
  - Record monthly salary with computed net pay

### Response Format
JSON with camelCase field names; enumerations serialize as their string names.
"#,
    ),
    paths(
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::create_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::department::list_departments,
        crate::api::department::get_department,
        crate::api::department::create_department,

        crate::api::attendance::set_attendance_status,
        crate::api::attendance::get_attendance,
        crate::api::attendance::get_today_attendance,
        crate::api::attendance::get_attendance_by_date,
        crate::api::attendance::calculate_hours,

        crate::api::leave_request::request_leave,
        crate::api::leave_request::get_leave_request,
        crate::api::leave_request::all_leave_requests,
        crate::api::leave_request::approved_leave_requests,
        crate::api::leave_request::pending_leave_requests,
        crate::api::leave_request::rejected_leave_requests,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::reject_leave,

        crate::api::salary::create_salary,
        crate::api::salary::get_salary
    ),
    components(
        schemas(
            Employee,
            CreateEmployee,
            UpdateEmployee,
            Department,
            CreateDepartment,
            DepartmentWithEmployees,
            Attendance,
            AttendanceStatus,
            SetAttendanceStatus,
            LeaveRequest,
            LeaveRequestWithEmployee,
            LeaveStatus,
            LeaveType,
            CreateLeaveRequest,
            Salary,
            CreateSalary
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Department", description = "Department management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
        (name = "LeaveRequest", description = "Leave management APIs"),
        (name = "Salary", description = "Salary management APIs"),
    )
)]
pub struct ApiDoc;
