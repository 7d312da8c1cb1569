//! Cadenza Test - Fakes and fixtures for pipeline validation
//!
//! The real codec engine is a native black box; tests drive the pipeline
//! against the instrumented [`FakeEngine`] instead, which models the
//! engine contract (geometry queries, setup-into-memory, status codes,
//! concealment) and counts every call so tests can assert things like
//! "zero engine calls happened" or "released exactly once".

pub mod engine;
pub mod signal;

pub use engine::*;
pub use signal::*;
