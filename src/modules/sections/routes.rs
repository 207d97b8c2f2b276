use axum::{
    routing::{get, post},
    Router,
};

use crate::app_state::AppState;

use super::handlers::{
    create_enrollment, create_internship_form, create_requirement_type, create_section,
    list_requirement_types, list_sections, submit_internship_form,
};

pub fn section_routes() -> Router<AppState> {
    Router::new()
        .route("/sections", get(list_sections).post(create_section))
        .route("/enrollments", post(create_enrollment))
        .route(
            "/requirement-types",
            get(list_requirement_types).post(create_requirement_type),
        )
        .route("/internships", post(create_internship_form))
        .route("/internships/:id/submit", post(submit_internship_form))
}
