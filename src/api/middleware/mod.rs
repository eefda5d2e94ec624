//! HTTP middleware for request processing and protection.
//!
//! Provides rate limiting, security headers and request tracing.

pub mod rate_limit;
pub mod security_headers;
pub mod tracing;
