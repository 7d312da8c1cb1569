//! Stream pipeline
//!
//! Each pass reads frame-sized chunks oldest-first, transforms them
//! through one session, and streams results to the sink immediately.
//! Per-frame engine errors are counted and skipped; contract and I/O
//! errors abort the pass. A pass is synchronous and belongs to one
//! thread; callers wrap a whole run off the main thread if they have one.

use std::io::{self, Read, Write};

use cadenza_codec::{DecoderSession, EncoderSession};
use cadenza_core::{CadenzaError, CadenzaResult};

use crate::{PipelineObserver, RunStats};

/// Fill `buf` from `reader`, tolerating short reads.
///
/// Returns the bytes read; anything less than `buf.len()` means the
/// source is exhausted mid-frame.
fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Encode an entire PCM stream into a flat sequence of compressed frames.
///
/// Reads `pcm_bytes_per_frame`-sized chunks from `source` in order; each
/// successful frame is appended to `sink` immediately. A trailing chunk
/// shorter than one frame (including an empty read at end of stream) is
/// recorded in the stats and never reaches the engine. Fails with
/// [`CadenzaError::NoFramesProduced`] when the stream yields no frames.
pub fn run_encode<R: Read, W: Write>(
    source: &mut R,
    sink: &mut W,
    session: &mut EncoderSession,
    observer: &mut dyn PipelineObserver,
) -> CadenzaResult<RunStats> {
    let frame_bytes = session.geometry().pcm_bytes_per_frame();
    let mut chunk = vec![0u8; frame_bytes];
    let mut stats = RunStats::default();
    let mut index: u64 = 0;

    loop {
        let n = read_chunk(source, &mut chunk)?;
        stats.input_bytes += n as u64;
        if n < frame_bytes {
            if n > 0 {
                tracing::debug!("discarding {} byte tail after {} frames", n, index);
                observer.tail_discarded(n);
            }
            stats.tail_bytes_discarded = n;
            break;
        }

        match session.encode_frame(&chunk) {
            Ok(compressed) => {
                sink.write_all(&compressed)?;
                stats.output_bytes += compressed.len() as u64;
                stats.frames_processed += 1;
                observer.frame_ok(index, n, compressed.len());
            }
            Err(err) if err.is_frame_local() => {
                let status = err.engine_status().unwrap_or(0);
                tracing::warn!("frame {} encode failed with engine status {}", index, status);
                stats.frames_failed += 1;
                observer.frame_failed(index, status);
            }
            Err(err) => return Err(err),
        }

        index += 1;
    }

    if stats.frames_processed == 0 {
        return Err(CadenzaError::NoFramesProduced);
    }

    tracing::debug!(
        "encode run finished: {} frames, {} failed, {} -> {} bytes",
        stats.frames_processed,
        stats.frames_failed,
        stats.input_bytes,
        stats.output_bytes
    );
    observer.run_finished(&stats);
    Ok(stats)
}

/// Decode a flat sequence of compressed frames back into a PCM stream.
///
/// Symmetric to [`run_encode`] at `compressed_bytes_per_frame`
/// granularity. Every chunk read from a contiguous source is real
/// bitstream, so this path never requests concealment itself; frames the
/// engine nonetheless reports as concealed are counted separately in the
/// stats. Loss signalling for gappy transports lives at the session layer
/// ([`DecoderSession::decode_frame`] with `None`).
pub fn run_decode<R: Read, W: Write>(
    source: &mut R,
    sink: &mut W,
    session: &mut DecoderSession,
    observer: &mut dyn PipelineObserver,
) -> CadenzaResult<RunStats> {
    let frame_bytes = session.geometry().compressed_bytes_per_frame();
    let mut chunk = vec![0u8; frame_bytes];
    let mut stats = RunStats::default();
    let mut index: u64 = 0;

    loop {
        let n = read_chunk(source, &mut chunk)?;
        stats.input_bytes += n as u64;
        if n < frame_bytes {
            if n > 0 {
                tracing::debug!("discarding {} byte tail after {} frames", n, index);
                observer.tail_discarded(n);
            }
            stats.tail_bytes_discarded = n;
            break;
        }

        match session.decode_frame(Some(&chunk)) {
            Ok(outcome) => {
                let pcm = outcome.pcm();
                sink.write_all(pcm)?;
                stats.output_bytes += pcm.len() as u64;
                stats.frames_processed += 1;
                if outcome.is_concealed() {
                    stats.frames_concealed += 1;
                    observer.frame_concealed(index);
                } else {
                    observer.frame_ok(index, n, pcm.len());
                }
            }
            Err(err) if err.is_frame_local() => {
                let status = err.engine_status().unwrap_or(0);
                tracing::warn!("frame {} decode failed with engine status {}", index, status);
                stats.frames_failed += 1;
                observer.frame_failed(index, status);
            }
            Err(err) => return Err(err),
        }

        index += 1;
    }

    if stats.frames_processed == 0 {
        return Err(CadenzaError::NoFramesProduced);
    }

    tracing::debug!(
        "decode run finished: {} frames, {} failed, {} concealed",
        stats.frames_processed,
        stats.frames_failed,
        stats.frames_concealed
    );
    observer.run_finished(&stats);
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_chunk_exact_and_tail() {
        let data = vec![1u8; 10];
        let mut cursor = Cursor::new(data);

        let mut buf = [0u8; 4];
        assert_eq!(read_chunk(&mut cursor, &mut buf).unwrap(), 4);
        assert_eq!(read_chunk(&mut cursor, &mut buf).unwrap(), 4);
        assert_eq!(read_chunk(&mut cursor, &mut buf).unwrap(), 2);
        assert_eq!(read_chunk(&mut cursor, &mut buf).unwrap(), 0);
    }

    /// Reader that returns one byte per call, forcing the fill loop to
    /// assemble chunks from short reads.
    struct TrickleReader {
        data: Vec<u8>,
        pos: usize,
    }

    impl Read for TrickleReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pos >= self.data.len() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.data[self.pos];
            self.pos += 1;
            Ok(1)
        }
    }

    #[test]
    fn test_read_chunk_assembles_short_reads() {
        let mut reader = TrickleReader {
            data: (0..7).collect(),
            pos: 0,
        };

        let mut buf = [0u8; 4];
        assert_eq!(read_chunk(&mut reader, &mut buf).unwrap(), 4);
        assert_eq!(buf, [0, 1, 2, 3]);
        assert_eq!(read_chunk(&mut reader, &mut buf).unwrap(), 3);
    }
}
