//! Frame geometry
//!
//! The codec family served here is fixed-frame-duration and constant
//! bitrate: every frame carries the same number of PCM samples in and the
//! same number of compressed bytes out. Getting either size wrong silently
//! corrupts audio or crashes the native call, so both are pinned in one
//! immutable value derived once at session setup.

use crate::{CadenzaError, CadenzaResult};

/// Bytes per PCM sample (16-bit signed, little-endian)
pub const BYTES_PER_SAMPLE: usize = 2;

/// Fixed per-frame sizing for one codec session
///
/// Immutable once computed; every frame of the session is encoded and
/// decoded with exactly these buffer sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGeometry {
    frame_duration_us: u32,
    sample_rate_hz: u32,
    samples_per_frame: usize,
    compressed_bytes_per_frame: usize,
}

impl FrameGeometry {
    /// Derive geometry from configuration plus the engine's sample count.
    ///
    /// `samples_from_engine` is the engine's answer for the duration/rate
    /// pair; a non-positive answer means the engine rejected the pair.
    /// Pure function of its inputs, no engine state is touched.
    pub fn compute(
        frame_duration_us: u32,
        sample_rate_hz: u32,
        compressed_bytes_per_frame: usize,
        samples_from_engine: i32,
    ) -> CadenzaResult<Self> {
        if samples_from_engine <= 0 {
            return Err(CadenzaError::InvalidGeometry(format!(
                "engine rejected {} us at {} Hz",
                frame_duration_us, sample_rate_hz
            )));
        }
        if compressed_bytes_per_frame == 0 {
            return Err(CadenzaError::InvalidGeometry(
                "compressed frame size must be positive".into(),
            ));
        }

        Ok(FrameGeometry {
            frame_duration_us,
            sample_rate_hz,
            samples_per_frame: samples_from_engine as usize,
            compressed_bytes_per_frame,
        })
    }

    /// Frame duration in microseconds
    #[inline]
    pub fn frame_duration_us(&self) -> u32 {
        self.frame_duration_us
    }

    /// Sample rate in Hz
    #[inline]
    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    /// PCM samples per frame
    #[inline]
    pub fn samples_per_frame(&self) -> usize {
        self.samples_per_frame
    }

    /// Uncompressed frame size in bytes
    #[inline]
    pub fn pcm_bytes_per_frame(&self) -> usize {
        self.samples_per_frame * BYTES_PER_SAMPLE
    }

    /// Compressed frame size in bytes
    #[inline]
    pub fn compressed_bytes_per_frame(&self) -> usize {
        self.compressed_bytes_per_frame
    }
}
