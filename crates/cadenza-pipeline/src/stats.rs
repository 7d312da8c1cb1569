//! Run statistics
//!
//! Accumulated over one encode-or-decode pass; one success, concealment
//! or failure is recorded per full-size chunk read, so
//! `frames_processed + frames_failed` always equals the number of
//! full-size chunks pulled from the source.

/// Statistics for one pipeline run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Frames transformed successfully (concealed frames included)
    pub frames_processed: u64,

    /// Frames the engine rejected; skipped, nothing written for them
    pub frames_failed: u64,

    /// Frames the engine synthesized via loss concealment
    pub frames_concealed: u64,

    /// Total bytes read from the source, discarded tail included
    pub input_bytes: u64,

    /// Bytes written to the sink
    pub output_bytes: u64,

    /// Length of the trailing short chunk, never fed to the engine
    pub tail_bytes_discarded: usize,
}

impl RunStats {
    /// Input-to-output byte ratio; `None` when nothing was written
    pub fn compression_ratio(&self) -> Option<f64> {
        if self.output_bytes == 0 {
            return None;
        }
        Some(self.input_bytes as f64 / self.output_bytes as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_ratio() {
        let stats = RunStats {
            frames_processed: 10,
            input_bytes: 9600,
            output_bytes: 1200,
            ..RunStats::default()
        };
        assert_eq!(stats.compression_ratio(), Some(8.0));
    }

    #[test]
    fn test_ratio_undefined_without_output() {
        assert_eq!(RunStats::default().compression_ratio(), None);
    }
}
