pub mod handlers;
pub mod routes;
pub mod service;
pub mod view;

pub use routes::submission_routes;
pub use service::{SubmissionError, SubmissionService};
