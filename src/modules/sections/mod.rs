pub mod handlers;
pub mod routes;

pub use routes::section_routes;
