//! HTTP request handlers.

pub mod auth_handler;
pub mod collaborator_handler;
pub mod health_handler;

pub use auth_handler::auth_routes;
pub use collaborator_handler::collaborator_routes;
pub use health_handler::health_routes;
