//! Instrumented fake codec engine
//!
//! Models the geometry and call shape of the LC3 codec family: fixed
//! frame durations of 7.5 ms or 10 ms, the standard rate ladder, sample
//! count = duration x rate. The "compression" is a deterministic fold of
//! the input, good enough to make frame counts and sizes meaningful;
//! concealment synthesizes seeded low-level noise the way a real decoder
//! fades in comfort noise.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use cadenza_codec::{CodecEngine, DecoderHandle, EncoderHandle};
use cadenza_core::CodecConfig;

/// Sample rates the fake engine accepts
pub const SUPPORTED_SAMPLE_RATES: [u32; 6] = [8_000, 16_000, 24_000, 32_000, 44_100, 48_000];

/// Frame durations the fake engine accepts, in microseconds
pub const SUPPORTED_FRAME_DURATIONS_US: [u32; 2] = [7_500, 10_000];

/// Call counters shared between an engine and the handles it spawned
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EngineCounters {
    /// Geometry queries answered
    pub geometry_queries: u64,
    /// Memory size queries answered
    pub size_queries: u64,
    /// Encoder instances initialized
    pub encoders_created: u64,
    /// Decoder instances initialized
    pub decoders_created: u64,
    /// Encode calls received
    pub encode_calls: u64,
    /// Decode calls received (concealment included)
    pub decode_calls: u64,
    /// Concealment syntheses performed
    pub conceal_calls: u64,
    /// Handles dropped (instance memory released)
    pub handles_released: u64,
}

impl EngineCounters {
    /// Total calls of any kind the engine has seen
    pub fn total(&self) -> u64 {
        self.geometry_queries
            + self.size_queries
            + self.encoders_created
            + self.decoders_created
            + self.encode_calls
            + self.decode_calls
    }
}

/// Instrumented, scriptable codec engine for tests
pub struct FakeEngine {
    counters: Arc<Mutex<EngineCounters>>,
    fail_encode_at: HashSet<u64>,
    fail_decode_at: HashSet<u64>,
    fail_init: bool,
}

impl Default for FakeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeEngine {
    /// A well-behaved engine
    pub fn new() -> Self {
        FakeEngine {
            counters: Arc::new(Mutex::new(EngineCounters::default())),
            fail_encode_at: HashSet::new(),
            fail_decode_at: HashSet::new(),
            fail_init: false,
        }
    }

    /// Make the listed encode calls (0-based per handle) fail with -3
    pub fn fail_encode_at(mut self, frames: impl IntoIterator<Item = u64>) -> Self {
        self.fail_encode_at.extend(frames);
        self
    }

    /// Make the listed decode calls (0-based per handle) fail with -4
    pub fn fail_decode_at(mut self, frames: impl IntoIterator<Item = u64>) -> Self {
        self.fail_decode_at.extend(frames);
        self
    }

    /// Make every `init_encoder`/`init_decoder` call return no instance
    pub fn fail_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    /// Snapshot of the call counters
    pub fn counters(&self) -> EngineCounters {
        *self.counters.lock().unwrap()
    }

    /// Whether a configuration names a duration/rate pair this engine
    /// accepts; the session layer still owns the actual rejection.
    pub fn supports(&self, config: &CodecConfig) -> bool {
        Self::supported(config.frame_duration_us, config.sample_rate_hz)
    }

    fn supported(frame_duration_us: u32, sample_rate_hz: u32) -> bool {
        SUPPORTED_FRAME_DURATIONS_US.contains(&frame_duration_us)
            && SUPPORTED_SAMPLE_RATES.contains(&sample_rate_hz)
    }
}

impl CodecEngine for FakeEngine {
    fn frame_samples(&self, frame_duration_us: u32, sample_rate_hz: u32) -> i32 {
        self.counters.lock().unwrap().geometry_queries += 1;
        if !Self::supported(frame_duration_us, sample_rate_hz) {
            return -1;
        }
        (frame_duration_us as u64 * sample_rate_hz as u64 / 1_000_000) as i32
    }

    fn encoder_size(&self, frame_duration_us: u32, sample_rate_hz: u32) -> i32 {
        self.counters.lock().unwrap().size_queries += 1;
        if !Self::supported(frame_duration_us, sample_rate_hz) {
            return 0;
        }
        let samples = frame_duration_us as u64 * sample_rate_hz as u64 / 1_000_000;
        (samples * 4 + 256) as i32
    }

    fn decoder_size(&self, frame_duration_us: u32, sample_rate_hz: u32) -> i32 {
        self.counters.lock().unwrap().size_queries += 1;
        if !Self::supported(frame_duration_us, sample_rate_hz) {
            return 0;
        }
        let samples = frame_duration_us as u64 * sample_rate_hz as u64 / 1_000_000;
        (samples * 6 + 256) as i32
    }

    fn init_encoder(
        &self,
        frame_duration_us: u32,
        sample_rate_hz: u32,
        memory: Vec<u8>,
    ) -> Option<Box<dyn EncoderHandle>> {
        if self.fail_init || !Self::supported(frame_duration_us, sample_rate_hz) {
            return None;
        }
        self.counters.lock().unwrap().encoders_created += 1;
        Some(Box::new(FakeEncoder {
            counters: Arc::clone(&self.counters),
            fail_at: self.fail_encode_at.clone(),
            frame_index: 0,
            _memory: memory,
        }))
    }

    fn init_decoder(
        &self,
        frame_duration_us: u32,
        sample_rate_hz: u32,
        memory: Vec<u8>,
    ) -> Option<Box<dyn DecoderHandle>> {
        if self.fail_init || !Self::supported(frame_duration_us, sample_rate_hz) {
            return None;
        }
        self.counters.lock().unwrap().decoders_created += 1;
        Some(Box::new(FakeDecoder {
            counters: Arc::clone(&self.counters),
            fail_at: self.fail_decode_at.clone(),
            frame_index: 0,
            rng: StdRng::seed_from_u64(0xCAD0),
            _memory: memory,
        }))
    }
}

struct FakeEncoder {
    counters: Arc<Mutex<EngineCounters>>,
    fail_at: HashSet<u64>,
    frame_index: u64,
    _memory: Vec<u8>,
}

impl EncoderHandle for FakeEncoder {
    fn encode(&mut self, pcm: &[i16], out: &mut [u8]) -> i32 {
        self.counters.lock().unwrap().encode_calls += 1;

        let index = self.frame_index;
        self.frame_index += 1;
        if self.fail_at.contains(&index) {
            return -3;
        }

        // Deterministic fold of the samples into the byte budget
        let out_len = out.len();
        for (i, byte) in out.iter_mut().enumerate() {
            let sample = pcm[i * pcm.len() / out_len];
            *byte = (sample as u8) ^ (sample >> 8) as u8 ^ index as u8;
        }
        out.len() as i32
    }
}

impl Drop for FakeEncoder {
    fn drop(&mut self) {
        self.counters.lock().unwrap().handles_released += 1;
    }
}

struct FakeDecoder {
    counters: Arc<Mutex<EngineCounters>>,
    fail_at: HashSet<u64>,
    frame_index: u64,
    rng: StdRng,
    _memory: Vec<u8>,
}

impl DecoderHandle for FakeDecoder {
    fn decode(&mut self, frame: Option<&[u8]>, out: &mut [i16]) -> i32 {
        let index = self.frame_index;
        self.frame_index += 1;

        {
            let mut counters = self.counters.lock().unwrap();
            counters.decode_calls += 1;
            if frame.is_none() {
                counters.conceal_calls += 1;
            }
        }

        match frame {
            Some(frame) => {
                if self.fail_at.contains(&index) {
                    return -4;
                }
                let out_len = out.len();
                for (i, sample) in out.iter_mut().enumerate() {
                    *sample = frame[i * frame.len() / out_len] as i16 * 64;
                }
                0
            }
            None => {
                // Comfort noise in place of the lost frame
                for sample in out.iter_mut() {
                    *sample = self.rng.gen_range(-128..=128);
                }
                1
            }
        }
    }
}

impl Drop for FakeDecoder {
    fn drop(&mut self) {
        self.counters.lock().unwrap().handles_released += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_matches_lc3_shape() {
        let engine = FakeEngine::new();
        assert_eq!(engine.frame_samples(10_000, 48_000), 480);
        assert_eq!(engine.frame_samples(7_500, 16_000), 120);
        assert!(engine.frame_samples(10_000, 11_025) <= 0);
        assert!(engine.frame_samples(5_000, 48_000) <= 0);
    }

    #[test]
    fn test_supports_follows_the_rate_ladder() {
        let engine = FakeEngine::new();
        assert!(engine.supports(&CodecConfig::default()));
        assert!(engine.supports(&CodecConfig::new(7_500, 16_000, 40)));
        assert!(!engine.supports(&CodecConfig::new(10_000, 11_025, 120)));
        assert!(!engine.supports(&CodecConfig::new(5_000, 48_000, 120)));
    }

    #[test]
    fn test_counters_track_calls() {
        let engine = FakeEngine::new();
        engine.frame_samples(10_000, 48_000);
        engine.encoder_size(10_000, 48_000);
        let handle = engine.init_encoder(10_000, 48_000, vec![0; 16]).unwrap();
        drop(handle);

        let counters = engine.counters();
        assert_eq!(counters.geometry_queries, 1);
        assert_eq!(counters.size_queries, 1);
        assert_eq!(counters.encoders_created, 1);
        assert_eq!(counters.handles_released, 1);
    }

    #[test]
    fn test_scripted_encode_failure() {
        let engine = FakeEngine::new().fail_encode_at([1]);
        let mut handle = engine.init_encoder(10_000, 48_000, vec![0; 16]).unwrap();

        let pcm = [0i16; 480];
        let mut out = [0u8; 120];
        assert_eq!(handle.encode(&pcm, &mut out), 120);
        assert_eq!(handle.encode(&pcm, &mut out), -3);
        assert_eq!(handle.encode(&pcm, &mut out), 120);
    }

    #[test]
    fn test_concealment_status_and_count() {
        let engine = FakeEngine::new();
        let mut handle = engine.init_decoder(10_000, 48_000, vec![0; 16]).unwrap();

        let mut out = [0i16; 480];
        assert_eq!(handle.decode(Some(&[1u8; 120]), &mut out), 0);
        assert_eq!(handle.decode(None, &mut out), 1);

        drop(handle);
        let counters = engine.counters();
        assert_eq!(counters.decode_calls, 2);
        assert_eq!(counters.conceal_calls, 1);
    }
}
