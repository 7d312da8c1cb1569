//! Error types for the Cadenza pipeline

use thiserror::Error;

/// Core Cadenza errors
///
/// Contract errors (`SessionClosed`, `BufferSizeMismatch`) indicate caller
/// misuse and are kept distinct from engine-reported codec errors
/// (`EncodeFailed`, `DecodeFailed`) so tests can tell the two apart.
#[derive(Error, Debug)]
pub enum CadenzaError {
    // Configuration errors
    #[error("invalid frame geometry: {0}")]
    InvalidGeometry(String),

    // Resource errors
    #[error("engine setup failed: {0}")]
    EngineSetupFailed(String),

    // Per-frame transform errors
    #[error("encode failed with engine status {0}")]
    EncodeFailed(i32),

    #[error("decode failed with engine status {0}")]
    DecodeFailed(i32),

    // Contract errors
    #[error("session is closed")]
    SessionClosed,

    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    // Run-level errors
    #[error("no frames produced")]
    NoFramesProduced,

    #[error("expected mono input, container declares {0} channels")]
    ChannelCountMismatch(u16),

    #[error("container sample rate {container} Hz does not match configured {configured} Hz")]
    SampleRateMismatch { container: u32, configured: u32 },

    #[error("unsupported bit depth: {0} bits per sample")]
    UnsupportedBitDepth(u16),

    // Container errors
    #[error("invalid container: {0}")]
    InvalidContainer(String),

    // I/O errors from the byte source/sink collaborators
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl CadenzaError {
    /// Whether this error is local to one frame and the run may continue
    pub fn is_frame_local(&self) -> bool {
        matches!(
            self,
            CadenzaError::EncodeFailed(_) | CadenzaError::DecodeFailed(_)
        )
    }

    /// Engine status code carried by a per-frame error, if any
    pub fn engine_status(&self) -> Option<i32> {
        match self {
            CadenzaError::EncodeFailed(status) | CadenzaError::DecodeFailed(status) => {
                Some(*status)
            }
            _ => None,
        }
    }
}

/// Result type for Cadenza operations
pub type CadenzaResult<T> = Result<T, CadenzaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_local_classification() {
        assert!(CadenzaError::EncodeFailed(-2).is_frame_local());
        assert!(CadenzaError::DecodeFailed(-1).is_frame_local());
        assert!(!CadenzaError::SessionClosed.is_frame_local());
        assert!(!CadenzaError::NoFramesProduced.is_frame_local());
    }

    #[test]
    fn test_engine_status() {
        assert_eq!(CadenzaError::DecodeFailed(-7).engine_status(), Some(-7));
        assert_eq!(CadenzaError::SessionClosed.engine_status(), None);
    }

    #[test]
    fn test_messages_name_the_stage() {
        let err = CadenzaError::BufferSizeMismatch {
            expected: 960,
            actual: 100,
        };
        assert!(err.to_string().contains("960"));
        assert!(err.to_string().contains("100"));
    }
}
