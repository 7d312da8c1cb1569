//! Codec configuration
//!
//! Frame duration, sample rate and byte budget travel together as one
//! explicit value passed into session construction; nothing here is
//! process-wide state.

use crate::{CadenzaError, CadenzaResult};

/// Configuration for one codec session
///
/// `compressed_bytes_per_frame` is the constant-bitrate knob: every
/// compressed frame occupies exactly this many bytes, so the effective
/// bitrate is `compressed_bytes_per_frame * 8 / frame_duration`.
///
/// The engine is authoritative for which duration/rate pairs it supports;
/// validation here only rejects degenerate values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Frame duration in microseconds
    pub frame_duration_us: u32,

    /// Sample rate in Hz
    pub sample_rate_hz: u32,

    /// Compressed frame size in bytes
    pub compressed_bytes_per_frame: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        // 10 ms frames at 48 kHz, 120 B/frame (96 kbit/s)
        CodecConfig {
            frame_duration_us: 10_000,
            sample_rate_hz: 48_000,
            compressed_bytes_per_frame: 120,
        }
    }
}

impl CodecConfig {
    /// Create a new configuration
    pub fn new(
        frame_duration_us: u32,
        sample_rate_hz: u32,
        compressed_bytes_per_frame: usize,
    ) -> Self {
        CodecConfig {
            frame_duration_us,
            sample_rate_hz,
            compressed_bytes_per_frame,
        }
    }

    /// Reject degenerate values before any engine call
    pub fn validate(&self) -> CadenzaResult<()> {
        if self.frame_duration_us == 0 {
            return Err(CadenzaError::InvalidGeometry(
                "frame duration must be positive".into(),
            ));
        }
        if self.sample_rate_hz == 0 {
            return Err(CadenzaError::InvalidGeometry(
                "sample rate must be positive".into(),
            ));
        }
        if self.compressed_bytes_per_frame == 0 {
            return Err(CadenzaError::InvalidGeometry(
                "compressed frame size must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Effective bitrate in bits per second
    pub fn bitrate_bps(&self) -> u64 {
        (self.compressed_bytes_per_frame as u64 * 8 * 1_000_000) / self.frame_duration_us as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CodecConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bitrate_bps(), 96_000);
    }

    #[test]
    fn test_zero_fields_rejected() {
        assert!(CodecConfig::new(0, 48_000, 120).validate().is_err());
        assert!(CodecConfig::new(10_000, 0, 120).validate().is_err());
        assert!(CodecConfig::new(10_000, 48_000, 0).validate().is_err());
    }
}
