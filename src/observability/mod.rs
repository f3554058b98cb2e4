//! Observability subsystem: metrics exposition.
//!
//! Structured logging is initialized in `main` via `tracing-subscriber`;
//! this module owns the Prometheus exporter and request recording.

pub mod metrics;
