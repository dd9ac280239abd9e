use crate::api::dtr::{DtrListResponse, DtrQuery, ImportDtrRequest, ImportDtrResponse};
use crate::api::employee::{
    CreateEmployee, EmployeeListResponse, EmployeeQuery, UpdateEmployee,
};
use crate::api::leave_request::{
    CreateLeave, LeaveFilter, LeaveListResponse, LeaveResponse, LeaveType,
};
use crate::dtr::service::{DayRecordInput, Half, SkippedHalf};
use crate::model::dtr::DtrRecord;
use crate::model::employee::Employee;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "DTR Management Service API",
        version = "1.0.0",
        description = r#"
## School Back Office — Daily Time Records

This API powers the attendance side of a school administration back office.

### Key Features
- **Employee Management**
  - Create, update, list, and view staff profiles (soft delete)
- **Leave Management**
  - File leave requests, approve/reject them, and browse leave history
- **DTR Import**
  - Bulk-import a month of AM/PM time pairs for one employee,
    reconciled against approved leave before anything is written
- **DTR Browsing**
  - Month view of stored AM/PM rows per employee

### Response Format
- JSON-based RESTful responses
- Pagination supported for list endpoints

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::leave_request::leave_list,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::create_leave,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::reject_leave,

        crate::api::dtr::import_dtr,
        crate::api::dtr::list_dtr
    ),
    components(
        schemas(
            Employee,
            CreateEmployee,
            UpdateEmployee,
            EmployeeQuery,
            EmployeeListResponse,
            CreateLeave,
            LeaveType,
            LeaveFilter,
            LeaveResponse,
            LeaveListResponse,
            ImportDtrRequest,
            ImportDtrResponse,
            DayRecordInput,
            SkippedHalf,
            Half,
            DtrRecord,
            DtrQuery,
            DtrListResponse
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Leave", description = "Leave management APIs"),
        (name = "DTR", description = "Daily Time Record import and browsing APIs"),
    )
)]
pub struct ApiDoc;
