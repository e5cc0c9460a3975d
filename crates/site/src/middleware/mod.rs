//! HTTP middleware for the site.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. Security headers (applied to every response, errors included)
//! 3. `TraceLayer` (request span with client IP and request ID)
//! 4. Request ID (reuse or generate, echo in response)
//! 5. Panic recovery, compression, timeout, concurrency limit

pub mod client_ip;
pub mod request_id;
pub mod security_headers;

pub use client_ip::client_ip;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
