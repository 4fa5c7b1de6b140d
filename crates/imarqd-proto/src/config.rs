//! Fixed block/coefficient layout and the per-call QIM/channel configuration.
//!
//! `spec.md` §3 fixes `block_size = 8` and `coeff_pos = (3, 4)`: these are not
//! knobs, they are the wire-compatible contract between embed and extract, so
//! they are plain `const`s rather than fields on a config struct a caller
//! could accidentally vary.

use crate::error::ProtoError;

/// Side length of a DCT block, in pixels. Fixed by `spec.md` §3.
pub const BLOCK_SIZE: usize = 8;

/// `(row, col)` of the mid-frequency coefficient modulated by QIM. Fixed by
/// `spec.md` §3/§4.3.
pub const COEFF_POS: (usize, usize) = (3, 4);

/// Which plane an image embed/extract call reads and writes.
///
/// `spec.md` §3 calls this a boolean (`use_y_channel`) fixed per call; it is
/// modeled as an enum here because "the wrong channel" is a silent-corruption
/// bug class worth naming, and `original_source` had two near-duplicate
/// function pairs (`embed_dct_image` / `embed_dct_image_ychannel`) instead of
/// a parameter precisely because it never named the choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelMode {
    /// Operate on a single grayscale plane.
    Grayscale,
    /// Operate on the Y (luma) plane of a BGR image, leaving Cb/Cr untouched.
    Luma,
}

impl ChannelMode {
    /// `spec.md`'s own boolean framing, for call sites that mirror
    /// `original_source`'s `use_y_channel` flag directly (CLI flags, preset
    /// fields).
    #[must_use]
    pub fn use_y_channel(self) -> bool {
        matches!(self, Self::Luma)
    }
}

impl From<bool> for ChannelMode {
    fn from(use_y: bool) -> Self {
        if use_y { Self::Luma } else { Self::Grayscale }
    }
}

/// Per-call QIM strength and repetition request.
///
/// `repetition` here is the *requested* value; the effective repetition
/// actually used is derived from block capacity identically on embed and
/// extract (`spec.md` §3's key invariant, implemented in
/// `imarqd-core::repetition`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QimConfig {
    /// Quantization step. Larger is more robust and more visible.
    pub step: f32,
    /// Requested number of blocks carrying each payload bit.
    pub repetition: u32,
}

impl QimConfig {
    /// Validates and builds a [`QimConfig`].
    pub fn new(step: f32, repetition: u32) -> Result<Self, ProtoError> {
        if !(step.is_finite() && step > 0.0) {
            return Err(ProtoError::InvalidQimStep(step));
        }
        if repetition == 0 {
            return Err(ProtoError::InvalidRepetition);
        }
        Ok(Self { step, repetition })
    }
}
