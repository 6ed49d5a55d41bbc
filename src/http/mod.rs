//! HTTP server module
//!
//! This module handles HTTP request routing and handling:
//! - Axum router with the conversion and health endpoints
//! - Multipart upload handling and the conversion flow
//! - JSON error responses
//! - Request logging, CORS and body-size middleware

pub mod convert;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use routes::create_router;
