use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_subject, delete_subject, get_subject, get_subject_students, get_subjects,
    get_subjects_for_student, update_subject,
};

pub fn init_subjects_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_subject).get(get_subjects))
        .route("/student/{id}", get(get_subjects_for_student))
        .route(
            "/{id}",
            get(get_subject).patch(update_subject).delete(delete_subject),
        )
        .route("/{id}/students", get(get_subject_students))
}
