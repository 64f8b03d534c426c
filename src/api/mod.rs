//! HTTP surface of the EHR service.

pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use routes::configure;
