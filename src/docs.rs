use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse};
use crate::modules::complaints::model::{
    Complaint, ComplaintStatus, CreateComplaintDto, UpdateComplaintDto,
};
use crate::modules::hostels::model::{CreateHostelDto, Hostel, UpdateHostelDto};
use crate::modules::leave_requests::model::{
    CreateLeaveRequestDto, LeaveRequest, LeaveStatus, UpdateLeaveRequestDto,
};
use crate::modules::notices::model::{CreateNoticeDto, Notice, UpdateNoticeDto};
use crate::modules::rooms::model::{CreateRoomDto, Room, UpdateRoomDto};
use crate::modules::students::model::{CreateStudentDto, Student, UpdateStudentDto};
use crate::modules::users::model::{CreateUserDto, Role, UpdateUserDto, User};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_me,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::hostels::controller::create_hostel,
        crate::modules::hostels::controller::get_hostels,
        crate::modules::hostels::controller::get_hostel,
        crate::modules::hostels::controller::update_hostel,
        crate::modules::hostels::controller::delete_hostel,
        crate::modules::rooms::controller::create_room,
        crate::modules::rooms::controller::get_rooms,
        crate::modules::rooms::controller::get_room,
        crate::modules::rooms::controller::update_room,
        crate::modules::rooms::controller::delete_room,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_me,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::complaints::controller::create_complaint,
        crate::modules::complaints::controller::get_complaints,
        crate::modules::complaints::controller::get_complaint,
        crate::modules::complaints::controller::update_complaint,
        crate::modules::complaints::controller::delete_complaint,
        crate::modules::leave_requests::controller::create_leave_request,
        crate::modules::leave_requests::controller::get_leave_requests,
        crate::modules::leave_requests::controller::get_leave_request,
        crate::modules::leave_requests::controller::update_leave_request,
        crate::modules::leave_requests::controller::delete_leave_request,
        crate::modules::leave_requests::controller::approve_leave_request,
        crate::modules::leave_requests::controller::reject_leave_request,
        crate::modules::notices::controller::create_notice,
        crate::modules::notices::controller::get_notices,
        crate::modules::notices::controller::get_notice,
        crate::modules::notices::controller::update_notice,
        crate::modules::notices::controller::delete_notice,
    ),
    components(
        schemas(
            ErrorResponse,
            LoginRequest,
            LoginResponse,
            User,
            Role,
            CreateUserDto,
            UpdateUserDto,
            Hostel,
            CreateHostelDto,
            UpdateHostelDto,
            Room,
            CreateRoomDto,
            UpdateRoomDto,
            Student,
            CreateStudentDto,
            UpdateStudentDto,
            Complaint,
            ComplaintStatus,
            CreateComplaintDto,
            UpdateComplaintDto,
            LeaveRequest,
            LeaveStatus,
            CreateLeaveRequestDto,
            UpdateLeaveRequestDto,
            Notice,
            CreateNoticeDto,
            UpdateNoticeDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and token issuance"),
        (name = "Users", description = "User management and registration"),
        (name = "Hostels", description = "Hostel management"),
        (name = "Rooms", description = "Room management"),
        (name = "Students", description = "Student records"),
        (name = "Complaints", description = "Student complaints, scoped by role"),
        (name = "Leave Requests", description = "Leave requests and approval"),
        (name = "Notices", description = "Notices, scoped by hostel association")
    ),
    info(
        title = "HostelHub API",
        version = "0.1.0",
        description = "A hostel management REST API built with Rust, Axum, and PostgreSQL. \
            Listings of complaints, leave requests, and notices are scoped to what the \
            authenticated role may see.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
