pub mod handlers;
pub mod routes;
pub mod service;
pub mod summary;

pub use routes::compliance_routes;
pub use service::{ComplianceService, ComplianceSource};
