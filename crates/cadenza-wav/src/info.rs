//! Typed container record

/// PCM format tag in the "fmt " sub-chunk
pub const FORMAT_PCM: u16 = 1;

/// The fields of a WAVE "fmt " sub-chunk the pipeline depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavInfo {
    /// Channel count
    pub channels: u16,

    /// Sample rate in Hz
    pub sample_rate_hz: u32,

    /// Bits per sample
    pub bits_per_sample: u16,
}

impl WavInfo {
    /// Mono 16-bit info at the given rate
    pub fn mono_16bit(sample_rate_hz: u32) -> Self {
        WavInfo {
            channels: 1,
            sample_rate_hz,
            bits_per_sample: 16,
        }
    }

    /// Bytes per sample frame across all channels
    #[inline]
    pub fn block_align(&self) -> u16 {
        self.channels * (self.bits_per_sample / 8)
    }

    /// Bytes per second of audio
    #[inline]
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate_hz * self.block_align() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mono_16bit_derived_fields() {
        let info = WavInfo::mono_16bit(48_000);
        assert_eq!(info.block_align(), 2);
        assert_eq!(info.byte_rate(), 96_000);
    }

    #[test]
    fn test_stereo_block_align() {
        let info = WavInfo {
            channels: 2,
            sample_rate_hz: 44_100,
            bits_per_sample: 16,
        };
        assert_eq!(info.block_align(), 4);
        assert_eq!(info.byte_rate(), 176_400);
    }
}
