use axum::{routing::get, Router};

use crate::app_state::AppState;

use super::handlers::{
    create_company, delete_company, get_company, list_companies, update_company,
};

pub fn partner_routes() -> Router<AppState> {
    Router::new()
        .route("/companies", get(list_companies).post(create_company))
        .route(
            "/companies/:id",
            get(get_company).put(update_company).delete(delete_company),
        )
}
