pub mod extract;
pub mod handlers;
pub mod routes;
pub mod services;
