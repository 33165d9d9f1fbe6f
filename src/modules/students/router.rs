use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

use super::controller::{
    create_student, delete_student, get_current_student, get_students,
    initiate_password_recovery, reset_password_recovery, update_student,
    verify_password_recovery,
};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_student).get(get_students))
        .route("/me", get(get_current_student))
        .route(
            "/initial-password-recovery/{email}",
            patch(initiate_password_recovery),
        )
        .route(
            "/verify-password-recovery/{email}",
            patch(verify_password_recovery),
        )
        .route(
            "/reset-password-recovery/{email}",
            patch(reset_password_recovery),
        )
        .route("/{id}", patch(update_student).delete(delete_student))
}
