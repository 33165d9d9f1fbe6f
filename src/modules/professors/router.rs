use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

use super::controller::{
    create_professor, delete_professor, get_current_professor, get_professors,
    get_taught_subjects, initiate_password_recovery, reset_password_recovery,
    update_professor, verify_password_recovery,
};

pub fn init_professors_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_professor).get(get_professors))
        .route("/me", get(get_current_professor))
        .route("/me/subjects", get(get_taught_subjects))
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
        .route("/{id}", patch(update_professor).delete(delete_professor))
}
