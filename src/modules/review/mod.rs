pub mod handlers;
pub mod routes;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use routes::review_routes;
pub use service::{ReviewError, ReviewService};
