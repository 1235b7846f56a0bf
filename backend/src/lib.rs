//! Recipe API library: domain model, HTTP adapter and storage adapters.
//!
//! The binary in `main.rs` wires these together; integration tests drive the
//! HTTP surface over [`outbound::memory::MemoryStore`].

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
