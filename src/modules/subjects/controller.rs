use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateSubjectDto, Subject, SubjectStudent, UpdateSubjectDto};
use super::service::SubjectService;

/// Create a subject taught by an existing professor
#[utoipa::path(
    post,
    path = "/api/subjects",
    request_body = CreateSubjectDto,
    responses(
        (status = 201, description = "Subject created", body = Subject),
        (status = 404, description = "Professor not found"),
    ),
    tag = "Subjects"
)]
#[instrument(skip(state, dto))]
pub async fn create_subject(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateSubjectDto>,
) -> Result<(StatusCode, Json<Subject>), AppError> {
    let subject = SubjectService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(subject)))
}

/// List subjects
#[utoipa::path(
    get,
    path = "/api/subjects",
    responses((status = 200, description = "All subjects", body = [Subject])),
    tag = "Subjects"
)]
#[instrument(skip(state))]
pub async fn get_subjects(State(state): State<AppState>) -> Result<Json<Vec<Subject>>, AppError> {
    let subjects = SubjectService::find_all(&state.db).await?;
    Ok(Json(subjects))
}

/// Fetch a subject by id
#[utoipa::path(
    get,
    path = "/api/subjects/{id}",
    responses(
        (status = 200, description = "The subject", body = Subject),
        (status = 404, description = "Subject not found"),
    ),
    tag = "Subjects"
)]
#[instrument(skip(state))]
pub async fn get_subject(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Subject>, AppError> {
    let subject = SubjectService::find_one(&state.db, id).await?;
    Ok(Json(subject))
}

/// Students at the subject's level
#[utoipa::path(
    get,
    path = "/api/subjects/{id}/students",
    responses(
        (status = 200, description = "Subject roster", body = [SubjectStudent]),
        (status = 404, description = "Subject not found"),
    ),
    tag = "Subjects"
)]
#[instrument(skip(state))]
pub async fn get_subject_students(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<SubjectStudent>>, AppError> {
    let students = SubjectService::roster(&state.db, id).await?;
    Ok(Json(students))
}

/// Subjects available to a student's level
#[utoipa::path(
    get,
    path = "/api/subjects/student/{id}",
    responses(
        (status = 200, description = "Subjects for the student", body = [Subject]),
        (status = 404, description = "Student not found"),
    ),
    tag = "Subjects"
)]
#[instrument(skip(state))]
pub async fn get_subjects_for_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Subject>>, AppError> {
    let subjects = SubjectService::for_student(&state.db, id).await?;
    Ok(Json(subjects))
}

/// Update a subject's name or timetable slot
#[utoipa::path(
    patch,
    path = "/api/subjects/{id}",
    request_body = UpdateSubjectDto,
    responses(
        (status = 200, description = "Subject updated", body = Subject),
        (status = 404, description = "Subject not found"),
    ),
    tag = "Subjects"
)]
#[instrument(skip(state, dto))]
pub async fn update_subject(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateSubjectDto>,
) -> Result<Json<Subject>, AppError> {
    let subject = SubjectService::update(&state.db, id, dto).await?;
    Ok(Json(subject))
}

/// Remove a subject
#[utoipa::path(
    delete,
    path = "/api/subjects/{id}",
    responses(
        (status = 200, description = "The removed subject", body = Subject),
        (status = 404, description = "Subject not found"),
    ),
    tag = "Subjects"
)]
#[instrument(skip(state))]
pub async fn delete_subject(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Subject>, AppError> {
    let subject = SubjectService::remove(&state.db, id).await?;
    Ok(Json(subject))
}
