//! Frame sessions
//!
//! A session binds one frame geometry to one live engine instance and
//! enforces the buffer-size contract on every call. Lifecycle is
//! `open -> frames -> close`; close is idempotent and `Drop` closes, so
//! the engine instance is released exactly once however a run ends.
//!
//! Sessions are `Send` but not `Sync`: an engine instance is not
//! reentrant, so a session must be driven from one thread at a time.
//! Callers wanting parallel throughput open independent sessions.

use bytes::Bytes;

use cadenza_core::{CadenzaError, CadenzaResult, CodecConfig, FrameGeometry};

use crate::{CodecEngine, DecoderHandle, EncoderHandle};

/// Result of decoding one frame
#[derive(Debug, Clone)]
pub enum DecodeOutcome {
    /// A clean decode of real bitstream bytes
    Clean(Bytes),
    /// The engine synthesized this frame (packet-loss concealment)
    Concealed(Bytes),
}

impl DecodeOutcome {
    /// The decoded PCM, concealed or not
    pub fn pcm(&self) -> &Bytes {
        match self {
            DecodeOutcome::Clean(pcm) | DecodeOutcome::Concealed(pcm) => pcm,
        }
    }

    /// Consume into the decoded PCM
    pub fn into_pcm(self) -> Bytes {
        match self {
            DecodeOutcome::Clean(pcm) | DecodeOutcome::Concealed(pcm) => pcm,
        }
    }

    /// Whether this frame was synthesized rather than decoded
    pub fn is_concealed(&self) -> bool {
        matches!(self, DecodeOutcome::Concealed(_))
    }
}

/// Shared open sequence: geometry gate, size query, allocate, initialize.
///
/// Order matters: a degenerate configuration must fail before the engine
/// is asked anything at all, and a failed initialization must not leak
/// the just-allocated block (the engine drops it with the `None` return).
fn open_instance<H>(
    config: &CodecConfig,
    samples_from_engine: impl FnOnce() -> i32,
    instance_size: impl FnOnce() -> i32,
    init: impl FnOnce(Vec<u8>) -> Option<H>,
    role: &str,
) -> CadenzaResult<(FrameGeometry, H)> {
    config.validate()?;

    let geometry = FrameGeometry::compute(
        config.frame_duration_us,
        config.sample_rate_hz,
        config.compressed_bytes_per_frame,
        samples_from_engine(),
    )?;

    let instance_size = instance_size();
    if instance_size <= 0 {
        tracing::warn!(
            "{} setup rejected: size {} for {} us at {} Hz",
            role,
            instance_size,
            config.frame_duration_us,
            config.sample_rate_hz
        );
        return Err(CadenzaError::EngineSetupFailed(format!(
            "engine reported {} size {} for {} us at {} Hz",
            role, instance_size, config.frame_duration_us, config.sample_rate_hz
        )));
    }

    let memory = vec![0u8; instance_size as usize];
    let handle = init(memory).ok_or_else(|| {
        tracing::warn!("{} initialization failed", role);
        CadenzaError::EngineSetupFailed(format!("{} initialization returned no instance", role))
    })?;

    Ok((geometry, handle))
}

/// An open encoder bound to its frame geometry
pub struct EncoderSession {
    geometry: FrameGeometry,
    handle: Option<Box<dyn EncoderHandle>>,
}

impl std::fmt::Debug for EncoderSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncoderSession")
            .field("geometry", &self.geometry)
            .finish_non_exhaustive()
    }
}

impl EncoderSession {
    /// Open an encoder on `engine` with the given configuration.
    pub fn open(engine: &dyn CodecEngine, config: &CodecConfig) -> CadenzaResult<Self> {
        let (geometry, handle) = open_instance(
            config,
            || engine.frame_samples(config.frame_duration_us, config.sample_rate_hz),
            || engine.encoder_size(config.frame_duration_us, config.sample_rate_hz),
            |memory| engine.init_encoder(config.frame_duration_us, config.sample_rate_hz, memory),
            "encoder",
        )?;

        Ok(EncoderSession {
            geometry,
            handle: Some(handle),
        })
    }

    /// The fixed frame sizing of this session
    #[inline]
    pub fn geometry(&self) -> FrameGeometry {
        self.geometry
    }

    /// Encode exactly one frame of little-endian 16-bit PCM bytes.
    ///
    /// `pcm` must be exactly `geometry().pcm_bytes_per_frame()` bytes; any
    /// other length is a caller contract error, never truncated or padded.
    /// The output is exactly `geometry().compressed_bytes_per_frame()`
    /// bytes.
    pub fn encode_frame(&mut self, pcm: &[u8]) -> CadenzaResult<Bytes> {
        let handle = self.handle.as_mut().ok_or(CadenzaError::SessionClosed)?;

        let expected = self.geometry.pcm_bytes_per_frame();
        if pcm.len() != expected {
            return Err(CadenzaError::BufferSizeMismatch {
                expected,
                actual: pcm.len(),
            });
        }

        let samples: Vec<i16> = pcm
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        let mut out = vec![0u8; self.geometry.compressed_bytes_per_frame()];
        let status = handle.encode(&samples, &mut out);
        if status < 0 {
            return Err(CadenzaError::EncodeFailed(status));
        }

        Ok(Bytes::from(out))
    }

    /// Release the engine instance. Idempotent; later frames fail with
    /// [`CadenzaError::SessionClosed`].
    pub fn close(&mut self) {
        self.handle = None;
    }

    /// Whether the session has been closed
    pub fn is_closed(&self) -> bool {
        self.handle.is_none()
    }
}

impl Drop for EncoderSession {
    fn drop(&mut self) {
        self.close();
    }
}

/// An open decoder bound to its frame geometry
pub struct DecoderSession {
    geometry: FrameGeometry,
    handle: Option<Box<dyn DecoderHandle>>,
}

impl std::fmt::Debug for DecoderSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecoderSession")
            .field("geometry", &self.geometry)
            .finish_non_exhaustive()
    }
}

impl DecoderSession {
    /// Open a decoder on `engine` with the given configuration.
    pub fn open(engine: &dyn CodecEngine, config: &CodecConfig) -> CadenzaResult<Self> {
        let (geometry, handle) = open_instance(
            config,
            || engine.frame_samples(config.frame_duration_us, config.sample_rate_hz),
            || engine.decoder_size(config.frame_duration_us, config.sample_rate_hz),
            |memory| engine.init_decoder(config.frame_duration_us, config.sample_rate_hz, memory),
            "decoder",
        )?;

        Ok(DecoderSession {
            geometry,
            handle: Some(handle),
        })
    }

    /// The fixed frame sizing of this session
    #[inline]
    pub fn geometry(&self) -> FrameGeometry {
        self.geometry
    }

    /// Decode one compressed frame, or conceal a lost one.
    ///
    /// `frame = None` (or an empty slice) signals a lost packet; the
    /// engine synthesizes a plausible frame from its internal state and
    /// the outcome is tagged [`DecodeOutcome::Concealed`]. A present frame
    /// must be exactly `geometry().compressed_bytes_per_frame()` bytes.
    /// The output is always `geometry().pcm_bytes_per_frame()` bytes.
    pub fn decode_frame(&mut self, frame: Option<&[u8]>) -> CadenzaResult<DecodeOutcome> {
        let handle = self.handle.as_mut().ok_or(CadenzaError::SessionClosed)?;

        let frame = frame.filter(|f| !f.is_empty());
        if let Some(frame) = frame {
            let expected = self.geometry.compressed_bytes_per_frame();
            if frame.len() != expected {
                return Err(CadenzaError::BufferSizeMismatch {
                    expected,
                    actual: frame.len(),
                });
            }
        }

        let mut samples = vec![0i16; self.geometry.samples_per_frame()];
        let status = handle.decode(frame, &mut samples);
        if status < 0 {
            return Err(CadenzaError::DecodeFailed(status));
        }

        let mut pcm = Vec::with_capacity(self.geometry.pcm_bytes_per_frame());
        for sample in &samples {
            pcm.extend_from_slice(&sample.to_le_bytes());
        }
        let pcm = Bytes::from(pcm);

        if status == 1 {
            Ok(DecodeOutcome::Concealed(pcm))
        } else {
            Ok(DecodeOutcome::Clean(pcm))
        }
    }

    /// Release the engine instance. Idempotent; later frames fail with
    /// [`CadenzaError::SessionClosed`].
    pub fn close(&mut self) {
        self.handle = None;
    }

    /// Whether the session has been closed
    pub fn is_closed(&self) -> bool {
        self.handle.is_none()
    }
}

impl Drop for DecoderSession {
    fn drop(&mut self) {
        self.close();
    }
}
