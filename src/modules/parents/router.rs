use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

use super::controller::{
    create_parent, delete_parent, get_current_parent, get_linked_students, get_parents,
    initiate_password_recovery, reset_password_recovery, update_parent,
    verify_password_recovery,
};

pub fn init_parents_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_parent).get(get_parents))
        .route("/me", get(get_current_parent))
        .route("/me/students", get(get_linked_students))
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
        .route("/{id}", patch(update_parent).delete(delete_parent))
}
