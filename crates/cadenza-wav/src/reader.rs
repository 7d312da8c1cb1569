//! WAVE container parsing

use std::io::{self, Read};

use cadenza_core::{CadenzaError, CadenzaResult};

use crate::{WavInfo, FORMAT_PCM};

/// Parse a WAVE stream into its format record and raw sample bytes.
///
/// Walks the chunk list until the "data" sub-chunk; unknown chunks are
/// skipped. The "fmt " sub-chunk must appear before "data".
pub fn read_wav<R: Read>(reader: &mut R) -> CadenzaResult<(WavInfo, Vec<u8>)> {
    let mut riff = [0u8; 12];
    fill(reader, &mut riff)?;

    if &riff[0..4] != b"RIFF" {
        return Err(CadenzaError::InvalidContainer("missing RIFF tag".into()));
    }
    if &riff[8..12] != b"WAVE" {
        return Err(CadenzaError::InvalidContainer("missing WAVE tag".into()));
    }

    let mut info: Option<WavInfo> = None;

    loop {
        let mut chunk_header = [0u8; 8];
        fill(reader, &mut chunk_header)?;

        let size = u32::from_le_bytes(chunk_header[4..8].try_into().unwrap()) as u64;

        match &chunk_header[0..4] {
            b"fmt " => {
                if size < 16 {
                    return Err(CadenzaError::InvalidContainer(format!(
                        "fmt chunk too short: {} bytes",
                        size
                    )));
                }

                let mut fmt = [0u8; 16];
                fill(reader, &mut fmt)?;

                let format_tag = u16::from_le_bytes([fmt[0], fmt[1]]);
                if format_tag != FORMAT_PCM {
                    return Err(CadenzaError::InvalidContainer(format!(
                        "unsupported audio format tag {}",
                        format_tag
                    )));
                }

                info = Some(WavInfo {
                    channels: u16::from_le_bytes([fmt[2], fmt[3]]),
                    sample_rate_hz: u32::from_le_bytes(fmt[4..8].try_into().unwrap()),
                    bits_per_sample: u16::from_le_bytes([fmt[14], fmt[15]]),
                });

                // Trailing extension bytes (fmt chunks can be 18+ bytes)
                skip(reader, padded(size) - 16)?;
            }
            b"data" => {
                let info = info.ok_or_else(|| {
                    CadenzaError::InvalidContainer("data chunk before fmt chunk".into())
                })?;

                // The declared size is untrusted; grow with the bytes
                // actually present rather than allocating it up front.
                let mut samples = Vec::new();
                let copied = io::copy(&mut reader.by_ref().take(size), &mut samples)?;
                if copied != size {
                    return Err(CadenzaError::InvalidContainer(format!(
                        "data chunk declares {} bytes but holds {}",
                        size, copied
                    )));
                }
                return Ok((info, samples));
            }
            _ => {
                skip(reader, padded(size))?;
            }
        }
    }
}

/// RIFF chunks are word-aligned: odd sizes carry one pad byte
fn padded(size: u64) -> u64 {
    size + (size & 1)
}

fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> CadenzaResult<()> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            CadenzaError::InvalidContainer("truncated container".into())
        } else {
            CadenzaError::Io(e)
        }
    })
}

fn skip<R: Read>(reader: &mut R, bytes: u64) -> CadenzaResult<()> {
    let copied = io::copy(&mut reader.by_ref().take(bytes), &mut io::sink())?;
    if copied != bytes {
        return Err(CadenzaError::InvalidContainer("truncated container".into()));
    }
    Ok(())
}
