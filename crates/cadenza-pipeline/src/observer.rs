//! Structured pipeline observation
//!
//! The pipeline reports structured events rather than log strings, so
//! tests assert on events instead of parsing text. All methods have
//! empty defaults; an observer implements only what it cares about.

use crate::RunStats;

/// Receiver for per-frame pipeline events
pub trait PipelineObserver {
    /// A frame was transformed and written to the sink
    fn frame_ok(&mut self, index: u64, bytes_in: usize, bytes_out: usize) {
        let _ = (index, bytes_in, bytes_out);
    }

    /// A decoded frame was synthesized by loss concealment
    fn frame_concealed(&mut self, index: u64) {
        let _ = index;
    }

    /// The engine rejected a frame; the run continues with the next one
    fn frame_failed(&mut self, index: u64, engine_status: i32) {
        let _ = (index, engine_status);
    }

    /// A trailing short chunk was discarded without reaching the engine
    fn tail_discarded(&mut self, bytes: usize) {
        let _ = bytes;
    }

    /// The run finished; `stats` is the final accumulator
    fn run_finished(&mut self, stats: &RunStats) {
        let _ = stats;
    }
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl PipelineObserver for NullObserver {}

/// Observer that records every event, for tests and diagnostics
#[derive(Debug, Default)]
pub struct RecordingObserver {
    /// (index, bytes_in, bytes_out) per successful frame
    pub ok_frames: Vec<(u64, usize, usize)>,
    /// Indices of concealed frames
    pub concealed: Vec<u64>,
    /// (index, engine status) per failed frame
    pub failed: Vec<(u64, i32)>,
    /// Tail lengths observed (at most one per run)
    pub tails: Vec<usize>,
    /// Final stats of finished runs
    pub finished: Vec<RunStats>,
}

impl PipelineObserver for RecordingObserver {
    fn frame_ok(&mut self, index: u64, bytes_in: usize, bytes_out: usize) {
        self.ok_frames.push((index, bytes_in, bytes_out));
    }

    fn frame_concealed(&mut self, index: u64) {
        self.concealed.push(index);
    }

    fn frame_failed(&mut self, index: u64, engine_status: i32) {
        self.failed.push((index, engine_status));
    }

    fn tail_discarded(&mut self, bytes: usize) {
        self.tails.push(bytes);
    }

    fn run_finished(&mut self, stats: &RunStats) {
        self.finished.push(*stats);
    }
}
