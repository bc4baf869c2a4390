//! HTTP middleware stack for the API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request span with a `request_id` field)
//! 3. Request ID (propagate or generate `x-request-id`)
//! 4. CORS

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware, request_span};
