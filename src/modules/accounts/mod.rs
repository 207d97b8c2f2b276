pub mod handlers;
pub mod hierarchy;
pub mod principal;
pub mod routes;

pub use principal::Principal;
pub use routes::account_routes;
