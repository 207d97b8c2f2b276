use std::sync::Arc;

use sqlx::PgPool;

use crate::config;
use crate::storage::Storage;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub env: config::Config,
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(db: PgPool, env: config::Config, storage: Arc<dyn Storage>) -> Self {
        Self { db, env, storage }
    }
}
