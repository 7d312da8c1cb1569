//! Cadenza Pipeline - Drives a codec session across a whole stream
//!
//! One pipeline pass pulls fixed-size chunks from a byte source, feeds
//! each to a codec session, streams each result to a byte sink, and
//! accumulates run statistics. The policies live here:
//! - frames move strictly in source order (the codec is stateful);
//! - one bad frame is counted and skipped, never aborting the run;
//! - a trailing chunk shorter than one frame is discarded unseen by the
//!   engine;
//! - a run that produced no frames at all is an error, not empty output.

pub mod observer;
pub mod ops;
pub mod pipeline;
pub mod stats;

pub use observer::*;
pub use ops::*;
pub use pipeline::*;
pub use stats::*;
