//! InsideOut backend API.
//!
//! An HTTP service exposing a root status endpoint, a health check, and a
//! static test page. It initializes a connection to a hosted database at
//! startup (recording the probe result for the process lifetime) and
//! provides token-based authentication helpers ready for future protected
//! routes.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::AppError;
