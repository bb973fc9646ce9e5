//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → structured `tracing` events (request ID, operation, status)
//!     → tower-http TraceLayer spans per request
//!
//! Consumers:
//!     → stdout (text for operators, JSON for machines)
//! ```

pub mod logging;
