use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::accounts::model::{
    AccountRole, AccountSummary, MessageResponse, ResetPasswordDto, TokenPair, UpdateAccountDto,
    VerifyRecoveryDto,
};
use crate::modules::attendance::model::{
    AttendancePercentage, AttendanceSession, CreateAttendanceDto, UpdateAttendanceDto,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, RefreshRequest};
use crate::modules::grades::model::{CreateGradeDto, GradeReport, UpdateGradeDto};
use crate::modules::parents::model::{CreateParentDto, LinkedStudent, Parent};
use crate::modules::professors::model::{CreateProfessorDto, Professor};
use crate::modules::shared::{Block, Day, Level};
use crate::modules::students::model::{CreateStudentDto, Student};
use crate::modules::subjects::model::{CreateSubjectDto, Subject, SubjectStudent, UpdateSubjectDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::refresh,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_current_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::students::controller::initiate_password_recovery,
        crate::modules::students::controller::verify_password_recovery,
        crate::modules::students::controller::reset_password_recovery,
        crate::modules::parents::controller::create_parent,
        crate::modules::parents::controller::get_parents,
        crate::modules::parents::controller::get_current_parent,
        crate::modules::parents::controller::get_linked_students,
        crate::modules::parents::controller::update_parent,
        crate::modules::parents::controller::delete_parent,
        crate::modules::parents::controller::initiate_password_recovery,
        crate::modules::parents::controller::verify_password_recovery,
        crate::modules::parents::controller::reset_password_recovery,
        crate::modules::professors::controller::create_professor,
        crate::modules::professors::controller::get_professors,
        crate::modules::professors::controller::get_current_professor,
        crate::modules::professors::controller::get_taught_subjects,
        crate::modules::professors::controller::update_professor,
        crate::modules::professors::controller::delete_professor,
        crate::modules::professors::controller::initiate_password_recovery,
        crate::modules::professors::controller::verify_password_recovery,
        crate::modules::professors::controller::reset_password_recovery,
        crate::modules::subjects::controller::create_subject,
        crate::modules::subjects::controller::get_subjects,
        crate::modules::subjects::controller::get_subject,
        crate::modules::subjects::controller::get_subject_students,
        crate::modules::subjects::controller::get_subjects_for_student,
        crate::modules::subjects::controller::update_subject,
        crate::modules::subjects::controller::delete_subject,
        crate::modules::grades::controller::create_grade,
        crate::modules::grades::controller::get_grades,
        crate::modules::grades::controller::get_grade,
        crate::modules::grades::controller::get_student_grades,
        crate::modules::grades::controller::update_grade,
        crate::modules::grades::controller::delete_grade,
        crate::modules::attendance::controller::create_attendance,
        crate::modules::attendance::controller::get_attendance,
        crate::modules::attendance::controller::get_attendance_session,
        crate::modules::attendance::controller::get_student_attendance,
        crate::modules::attendance::controller::get_subject_percentage,
        crate::modules::attendance::controller::get_student_subject_percentage,
        crate::modules::attendance::controller::update_attendance,
        crate::modules::attendance::controller::delete_attendance,
    ),
    components(
        schemas(
            AccountRole,
            AccountSummary,
            TokenPair,
            MessageResponse,
            UpdateAccountDto,
            VerifyRecoveryDto,
            ResetPasswordDto,
            LoginRequest,
            RefreshRequest,
            ErrorResponse,
            Student,
            CreateStudentDto,
            Parent,
            CreateParentDto,
            LinkedStudent,
            Professor,
            CreateProfessorDto,
            Subject,
            CreateSubjectDto,
            UpdateSubjectDto,
            SubjectStudent,
            GradeReport,
            CreateGradeDto,
            UpdateGradeDto,
            AttendanceSession,
            CreateAttendanceDto,
            UpdateAttendanceDto,
            AttendancePercentage,
            Level,
            Day,
            Block,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Role-dispatched login and token refresh"),
        (name = "Students", description = "Student accounts and password recovery"),
        (name = "Parents", description = "Parent accounts and linked students"),
        (name = "Professors", description = "Professor accounts and taught subjects"),
        (name = "Subjects", description = "Subjects and timetable slots"),
        (name = "Grades", description = "Grade records"),
        (name = "Attendance", description = "Attendance sessions and percentages")
    ),
    info(
        title = "Colegio API",
        version = "0.1.0",
        description = "School-management REST API built with Rust, Axum and PostgreSQL.",
        license(
            name = "MIT"
        )
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
