//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - JSON or pretty stdout output
//! - JSON file output with rotation via tracing-appender

pub mod logger;

pub use logger::LoggerImpl;
