//! Cadenza Core - Fundamental types for the streaming codec pipeline
//!
//! This crate defines the types shared across the Cadenza workspace:
//! - Codec configuration (frame duration, sample rate, byte budget)
//! - Frame geometry (samples/frame, PCM bytes/frame, compressed bytes/frame)
//! - The workspace-wide error taxonomy

pub mod config;
pub mod error;
pub mod geometry;

pub use config::*;
pub use error::*;
pub use geometry::*;
