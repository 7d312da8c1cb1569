//! WAVE header synthesis
//!
//! Decoded PCM is not itself a playable artifact; this wraps it in the
//! canonical 44-byte RIFF/WAVE header.

use std::io::Write;

use cadenza_core::CadenzaResult;

use crate::{WavInfo, FORMAT_PCM};

/// Size of the canonical header (RIFF descriptor + fmt + data header)
pub const HEADER_SIZE: usize = 44;

/// Write a complete WAVE file: canonical header followed by the samples.
pub fn write_wav<W: Write>(writer: &mut W, info: &WavInfo, samples: &[u8]) -> CadenzaResult<()> {
    let data_size = samples.len() as u32;

    writer.write_all(b"RIFF")?;
    writer.write_all(&(36 + data_size).to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?;
    writer.write_all(&FORMAT_PCM.to_le_bytes())?;
    writer.write_all(&info.channels.to_le_bytes())?;
    writer.write_all(&info.sample_rate_hz.to_le_bytes())?;
    writer.write_all(&info.byte_rate().to_le_bytes())?;
    writer.write_all(&info.block_align().to_le_bytes())?;
    writer.write_all(&info.bits_per_sample.to_le_bytes())?;

    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(samples)?;

    Ok(())
}
