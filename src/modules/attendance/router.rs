use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_attendance, delete_attendance, get_attendance, get_attendance_session,
    get_student_attendance, get_student_subject_percentage, get_subject_percentage,
    update_attendance,
};

pub fn init_attendance_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_attendance).get(get_attendance))
        .route("/student/{id}", get(get_student_attendance))
        .route(
            "/subject/{subject_id}/percentage",
            get(get_subject_percentage),
        )
        .route(
            "/subject/{subject_id}/student/{student_id}/percentage",
            get(get_student_subject_percentage),
        )
        .route(
            "/{id}",
            get(get_attendance_session)
                .patch(update_attendance)
                .delete(delete_attendance),
        )
}
