//! Boundary exposed to the web layer: index lookups that never fail the
//! process, and JSON-ready error payloads.

pub mod payload;
pub mod service;

pub use payload::ErrorPayload;
pub use service::{ExplainEnvelope, ExplainService};
