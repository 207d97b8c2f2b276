use axum::{
    routing::{delete, get},
    Router,
};

use crate::app_state::AppState;

use super::handlers::{create_user, delete_user, list_users};

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", delete(delete_user))
}
