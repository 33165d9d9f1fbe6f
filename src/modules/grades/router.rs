use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_grade, delete_grade, get_grade, get_grades, get_student_grades, update_grade,
};

pub fn init_grades_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_grade).get(get_grades))
        .route("/student/{id}", get(get_student_grades))
        .route(
            "/{id}",
            get(get_grade).patch(update_grade).delete(delete_grade),
        )
}
