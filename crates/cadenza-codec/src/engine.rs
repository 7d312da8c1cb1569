//! Codec engine capability
//!
//! Native codecs in this family expose C-style calls: geometry queries,
//! setup into caller-allocated memory, and stateful per-frame transforms
//! on raw handles. The traits here keep that call shape (integer status
//! codes included) but replace raw addresses with owned, typed handles;
//! dropping a handle is the one and only release of the instance.

/// A live encoder instance
pub trait EncoderHandle: Send {
    /// Encode exactly one frame of PCM samples into `out`.
    ///
    /// `out.len()` is the byte budget for the frame and the engine fills
    /// it completely. Returns the bytes written (>= 0) or a negative
    /// engine status code on error.
    fn encode(&mut self, pcm: &[i16], out: &mut [u8]) -> i32;
}

/// A live decoder instance
pub trait DecoderHandle: Send {
    /// Decode one compressed frame into `out`, or conceal a lost one.
    ///
    /// `frame = None` requests packet-loss concealment: the engine
    /// synthesizes a plausible frame from its internal state. Returns 0
    /// for a clean decode, 1 when concealment was performed, or a
    /// negative engine status code on error.
    fn decode(&mut self, frame: Option<&[u8]>, out: &mut [i16]) -> i32;
}

/// The opaque codec engine capability
///
/// Geometry queries answer with non-positive values for unsupported
/// duration/rate pairs; the engine is authoritative for what it supports.
pub trait CodecEngine {
    /// PCM samples in one frame for the pair, or <= 0 if unsupported
    fn frame_samples(&self, frame_duration_us: u32, sample_rate_hz: u32) -> i32;

    /// Bytes of working memory an encoder instance needs, or <= 0 if invalid
    fn encoder_size(&self, frame_duration_us: u32, sample_rate_hz: u32) -> i32;

    /// Bytes of working memory a decoder instance needs, or <= 0 if invalid
    fn decoder_size(&self, frame_duration_us: u32, sample_rate_hz: u32) -> i32;

    /// Initialize an encoder into `memory` (sized via [`Self::encoder_size`]).
    ///
    /// Returns `None` if initialization fails; `memory` is dropped with it.
    fn init_encoder(
        &self,
        frame_duration_us: u32,
        sample_rate_hz: u32,
        memory: Vec<u8>,
    ) -> Option<Box<dyn EncoderHandle>>;

    /// Initialize a decoder into `memory` (sized via [`Self::decoder_size`]).
    fn init_decoder(
        &self,
        frame_duration_us: u32,
        sample_rate_hz: u32,
        memory: Vec<u8>,
    ) -> Option<Box<dyn DecoderHandle>>;
}
