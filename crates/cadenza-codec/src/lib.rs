//! Cadenza Codec - Engine capability and frame sessions
//!
//! The codec's DSP lives behind the [`CodecEngine`] capability; this crate
//! owns everything that makes such a black box usable correctly:
//! geometry-checked setup, exact-size frame buffers, loss concealment
//! exposure, and exactly-once release of engine memory.
//!
//! Engines of this family are stateful (prediction context carries from
//! frame to frame), so one engine instance belongs to exactly one session
//! and frames must pass through it strictly in order.

pub mod engine;
pub mod session;

pub use engine::*;
pub use session::*;
