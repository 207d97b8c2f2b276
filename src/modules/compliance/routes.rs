use std::sync::Arc;

use axum::{routing::get, Router};

use super::handlers::section_compliance;
use super::service::{ComplianceService, ComplianceSource};

pub fn compliance_routes<S>(service: Arc<ComplianceService<S>>) -> Router
where
    S: ComplianceSource + 'static,
{
    Router::new()
        .route("/sections/:id/compliance", get(section_compliance::<S>))
        .with_state(service)
}
