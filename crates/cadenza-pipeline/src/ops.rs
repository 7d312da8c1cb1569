//! File-level operations
//!
//! The convenience layer over the stream pipeline: WAV in on the encode
//! side, WAV out on the decode side. Container gates run before any
//! engine call, so a rejected file costs no engine setup at all.

use std::io::{Read, Write};

use cadenza_codec::{CodecEngine, DecoderSession, EncoderSession};
use cadenza_core::{CadenzaError, CadenzaResult, CodecConfig};
use cadenza_wav::{read_wav, write_wav, WavInfo};

use crate::{run_decode, run_encode, PipelineObserver, RunStats};

/// Encode a mono 16-bit WAV stream into a flat compressed-frame stream.
///
/// The container must declare exactly one channel, 16 bits per sample,
/// and the configured sample rate; violations are rejected before the
/// engine is touched.
pub fn encode_wav<R: Read, W: Write>(
    reader: &mut R,
    sink: &mut W,
    engine: &dyn CodecEngine,
    config: &CodecConfig,
    observer: &mut dyn PipelineObserver,
) -> CadenzaResult<RunStats> {
    let (info, samples) = read_wav(reader)?;

    if info.channels != 1 {
        return Err(CadenzaError::ChannelCountMismatch(info.channels));
    }
    if info.bits_per_sample != 16 {
        return Err(CadenzaError::UnsupportedBitDepth(info.bits_per_sample));
    }
    if info.sample_rate_hz != config.sample_rate_hz {
        return Err(CadenzaError::SampleRateMismatch {
            container: info.sample_rate_hz,
            configured: config.sample_rate_hz,
        });
    }

    let mut session = EncoderSession::open(engine, config)?;
    run_encode(&mut samples.as_slice(), sink, &mut session, observer)
}

/// Decode a flat compressed-frame stream into a playable mono WAV file.
///
/// Raw decoded PCM is not playable on its own; this buffers the run's
/// output and finalizes it with a canonical WAV header at the configured
/// sample rate.
pub fn decode_to_wav<R: Read, W: Write>(
    source: &mut R,
    writer: &mut W,
    engine: &dyn CodecEngine,
    config: &CodecConfig,
    observer: &mut dyn PipelineObserver,
) -> CadenzaResult<RunStats> {
    let mut session = DecoderSession::open(engine, config)?;

    let mut pcm = Vec::new();
    let stats = run_decode(source, &mut pcm, &mut session, observer)?;

    write_wav(writer, &WavInfo::mono_16bit(config.sample_rate_hz), &pcm)?;
    Ok(stats)
}
