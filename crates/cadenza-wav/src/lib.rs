//! Cadenza WAV - RIFF/WAVE container collaborator
//!
//! The pipeline itself never looks inside the container; it only needs the
//! typed record parsed here (channel count, sample rate, bit depth, raw
//! sample bytes) on the way in, and header synthesis on the way out.
//!
//! Layout handled: little-endian RIFF, "fmt " sub-chunk (PCM format tag 1,
//! trailing extension bytes skipped), "data" sub-chunk with raw samples.
//! Unknown chunks are skipped, odd-sized chunks carry a pad byte.

pub mod info;
pub mod reader;
pub mod writer;

pub use info::*;
pub use reader::*;
pub use writer::*;
