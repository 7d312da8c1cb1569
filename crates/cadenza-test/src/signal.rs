//! Synthetic PCM signal generators

use std::f32::consts::TAU;

/// Little-endian 16-bit sine wave
pub fn sine_pcm(num_samples: usize, sample_rate_hz: u32, freq_hz: f32, amplitude: f32) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(num_samples * 2);
    let amplitude = amplitude.clamp(0.0, 1.0) * i16::MAX as f32;

    for n in 0..num_samples {
        let t = n as f32 / sample_rate_hz as f32;
        let sample = ((TAU * freq_hz * t).sin() * amplitude) as i16;
        pcm.extend_from_slice(&sample.to_le_bytes());
    }
    pcm
}

/// Little-endian 16-bit silence
pub fn silence_pcm(num_samples: usize) -> Vec<u8> {
    vec![0u8; num_samples * 2]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_length_and_range() {
        let pcm = sine_pcm(480, 48_000, 440.0, 0.5);
        assert_eq!(pcm.len(), 960);

        let peak = pcm
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]).unsigned_abs())
            .max()
            .unwrap();
        assert!(peak > 0);
        assert!(peak <= (i16::MAX as f32 * 0.5) as u16 + 1);
    }

    #[test]
    fn test_silence_is_zero() {
        let pcm = silence_pcm(100);
        assert_eq!(pcm.len(), 200);
        assert!(pcm.iter().all(|&b| b == 0));
    }
}
