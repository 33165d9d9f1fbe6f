use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateGradeDto, GradeReport, UpdateGradeDto};
use super::service::GradeService;

/// Record a grade for a student in a subject
#[utoipa::path(
    post,
    path = "/api/grades",
    request_body = CreateGradeDto,
    responses(
        (status = 201, description = "Grade recorded", body = GradeReport),
        (status = 404, description = "Student or subject not found"),
    ),
    tag = "Grades"
)]
#[instrument(skip(state, dto))]
pub async fn create_grade(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateGradeDto>,
) -> Result<(StatusCode, Json<GradeReport>), AppError> {
    let grade = GradeService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(grade)))
}

/// List all grades
#[utoipa::path(
    get,
    path = "/api/grades",
    responses((status = 200, description = "All grades", body = [GradeReport])),
    tag = "Grades"
)]
#[instrument(skip(state))]
pub async fn get_grades(State(state): State<AppState>) -> Result<Json<Vec<GradeReport>>, AppError> {
    let grades = GradeService::find_all(&state.db).await?;
    Ok(Json(grades))
}

/// Fetch a grade by id
#[utoipa::path(
    get,
    path = "/api/grades/{id}",
    responses(
        (status = 200, description = "The grade", body = GradeReport),
        (status = 404, description = "Grade not found"),
    ),
    tag = "Grades"
)]
#[instrument(skip(state))]
pub async fn get_grade(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<GradeReport>, AppError> {
    let grade = GradeService::find_one(&state.db, id).await?;
    Ok(Json(grade))
}

/// All grades of one student
#[utoipa::path(
    get,
    path = "/api/grades/student/{id}",
    responses(
        (status = 200, description = "The student's grades", body = [GradeReport]),
        (status = 404, description = "Student not found"),
    ),
    tag = "Grades"
)]
#[instrument(skip(state))]
pub async fn get_student_grades(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<GradeReport>>, AppError> {
    let grades = GradeService::student_grades(&state.db, id).await?;
    Ok(Json(grades))
}

/// Update a grade entry
#[utoipa::path(
    patch,
    path = "/api/grades/{id}",
    request_body = UpdateGradeDto,
    responses(
        (status = 200, description = "Grade updated", body = GradeReport),
        (status = 404, description = "Grade not found"),
    ),
    tag = "Grades"
)]
#[instrument(skip(state, dto))]
pub async fn update_grade(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateGradeDto>,
) -> Result<Json<GradeReport>, AppError> {
    let grade = GradeService::update(&state.db, id, dto).await?;
    Ok(Json(grade))
}

/// Remove a grade entry
#[utoipa::path(
    delete,
    path = "/api/grades/{id}",
    responses(
        (status = 204, description = "Grade removed"),
        (status = 404, description = "Grade not found"),
    ),
    tag = "Grades"
)]
#[instrument(skip(state))]
pub async fn delete_grade(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    GradeService::remove(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
