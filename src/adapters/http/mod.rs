//! HTTP transport for call ingestion.

pub mod calls_http;

pub use calls_http::{CallResponse, CallsHttpConfig, CallsHttpServer, ErrorResponse, HealthResponse};
