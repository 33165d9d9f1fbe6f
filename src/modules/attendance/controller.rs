use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    AttendancePercentage, AttendanceSession, CreateAttendanceDto, UpdateAttendanceDto,
};
use super::service::AttendanceService;

/// Record an attendance session for a subject
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = CreateAttendanceDto,
    responses(
        (status = 201, description = "Session recorded", body = AttendanceSession),
        (status = 404, description = "Subject not found"),
    ),
    tag = "Attendance"
)]
#[instrument(skip(state, dto))]
pub async fn create_attendance(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAttendanceDto>,
) -> Result<(StatusCode, Json<AttendanceSession>), AppError> {
    let session = AttendanceService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// List attendance sessions
#[utoipa::path(
    get,
    path = "/api/attendance",
    responses((status = 200, description = "All sessions", body = [AttendanceSession])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_attendance(
    State(state): State<AppState>,
) -> Result<Json<Vec<AttendanceSession>>, AppError> {
    let sessions = AttendanceService::find_all(&state.db).await?;
    Ok(Json(sessions))
}

/// Fetch an attendance session by id
#[utoipa::path(
    get,
    path = "/api/attendance/{id}",
    responses(
        (status = 200, description = "The session", body = AttendanceSession),
        (status = 404, description = "Session not found"),
    ),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_attendance_session(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AttendanceSession>, AppError> {
    let session = AttendanceService::find_one(&state.db, id).await?;
    Ok(Json(session))
}

/// Sessions a student appears in
#[utoipa::path(
    get,
    path = "/api/attendance/student/{id}",
    responses(
        (status = 200, description = "Sessions containing the student", body = [AttendanceSession]),
        (status = 404, description = "No records for the student"),
    ),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_student_attendance(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<AttendanceSession>>, AppError> {
    let sessions = AttendanceService::for_student(&state.db, id).await?;
    Ok(Json(sessions))
}

/// Overall attendance percentage for a subject
#[utoipa::path(
    get,
    path = "/api/attendance/subject/{subject_id}/percentage",
    responses((status = 200, description = "Subject percentage", body = AttendancePercentage)),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_subject_percentage(
    State(state): State<AppState>,
    Path(subject_id): Path<i64>,
) -> Result<Json<AttendancePercentage>, AppError> {
    let percentage = AttendanceService::subject_percentage(&state.db, subject_id).await?;
    Ok(Json(AttendancePercentage { percentage }))
}

/// One student's attendance percentage in a subject
#[utoipa::path(
    get,
    path = "/api/attendance/subject/{subject_id}/student/{student_id}/percentage",
    responses((status = 200, description = "Student percentage", body = AttendancePercentage)),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn get_student_subject_percentage(
    State(state): State<AppState>,
    Path((subject_id, student_id)): Path<(i64, i64)>,
) -> Result<Json<AttendancePercentage>, AppError> {
    let percentage =
        AttendanceService::student_subject_percentage(&state.db, subject_id, student_id).await?;
    Ok(Json(AttendancePercentage { percentage }))
}

/// Update an attendance session
#[utoipa::path(
    patch,
    path = "/api/attendance/{id}",
    request_body = UpdateAttendanceDto,
    responses(
        (status = 200, description = "Session updated", body = AttendanceSession),
        (status = 404, description = "Session not found"),
    ),
    tag = "Attendance"
)]
#[instrument(skip(state, dto))]
pub async fn update_attendance(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateAttendanceDto>,
) -> Result<Json<AttendanceSession>, AppError> {
    let session = AttendanceService::update(&state.db, id, dto).await?;
    Ok(Json(session))
}

/// Remove an attendance session
#[utoipa::path(
    delete,
    path = "/api/attendance/{id}",
    responses(
        (status = 200, description = "The removed session", body = AttendanceSession),
        (status = 404, description = "Session not found"),
    ),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn delete_attendance(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AttendanceSession>, AppError> {
    let session = AttendanceService::remove(&state.db, id).await?;
    Ok(Json(session))
}
