//! Configuration and result types for the video pipeline (`spec.md` §4.7).

use std::time::Duration;

use imarqd_proto::{ChannelMode, QimConfig};

use crate::tools::DEFAULT_TIMEOUT;

/// Configuration for [`crate::embed_video`].
#[derive(Debug, Clone)]
pub struct VideoEmbedConfig {
    /// QIM step and requested repetition, applied per marked frame.
    pub qim: QimConfig,
    /// Which plane(s) each marked frame is embedded into.
    pub channel: ChannelMode,
    /// Embed every Nth frame; other frames are copied verbatim.
    pub frame_step: u32,
    /// Pre-normalize long edge, if resizing is wanted.
    pub long_edge: Option<u32>,
    /// Pre-normalize / re-encode target frame rate.
    pub target_fps: Option<u32>,
    /// Final re-encode CRF (ignored in lossless mode).
    pub crf: u8,
    /// Final re-encode `libx264` preset name (ignored in lossless mode).
    pub x264_preset: String,
    /// Whether to run the one-time pre-normalize pass before embedding.
    pub pre_normalize: bool,
    /// Wall-clock timeout for each external tool invocation.
    pub timeout: Duration,
}

impl Default for VideoEmbedConfig {
    fn default() -> Self {
        Self {
            qim: QimConfig::new(24.0, 160).expect("default QIM config is always valid"),
            channel: ChannelMode::Luma,
            frame_step: 2,
            long_edge: Some(2048),
            target_fps: Some(30),
            crf: 22,
            x264_preset: "faster".to_string(),
            pre_normalize: true,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Report returned by [`crate::embed_video`].
#[derive(Debug, Clone, Copy)]
pub struct VideoEmbedReport {
    /// Total frames decoded from the (possibly pre-normalized) source.
    pub frames_total: usize,
    /// Frames that actually received a watermark (every `frame_step`th).
    pub frames_marked: usize,
    /// Whether an audio side-file was found and carried through.
    pub has_audio: bool,
}

/// Configuration for [`crate::extract_video`].
#[derive(Debug, Clone)]
pub struct VideoExtractConfig {
    /// QIM step and requested repetition, matching the embed call.
    pub qim: QimConfig,
    /// Which plane(s) each sampled frame is read from.
    pub channel: ChannelMode,
    /// Analyze every Nth frame.
    pub frame_step: u32,
    /// Cap on the number of sampled frames (`spec.md` §4.7 default 120).
    pub max_frames: Option<usize>,
    /// Wall-clock timeout for each external tool invocation.
    pub timeout: Duration,
}

impl Default for VideoExtractConfig {
    fn default() -> Self {
        Self {
            qim: QimConfig::new(24.0, 160).expect("default QIM config is always valid"),
            channel: ChannelMode::Luma,
            frame_step: 2,
            max_frames: Some(120),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Report returned by [`crate::extract_video`] (`spec.md` §6).
#[derive(Debug, Clone)]
pub struct VideoExtractReport {
    /// Number of sampled frames actually analyzed.
    pub frames_used: usize,
    /// Repetition factor used by the per-frame image extractor.
    pub used_repetition: u32,
    /// Hex digest of the raw recovered codeword bytes (post cross-frame
    /// majority vote, pre-ECC-decode) — a debugging aid, not an equality
    /// check; it hashes the possibly-still-corrupt bytes.
    pub recovered_hex: String,
    /// Whether ECC decoding succeeded, if a parity was supplied.
    pub ecc_ok: Option<bool>,
    /// Whether the ECC-decoded message matches `SHA256(check_text)`, if both
    /// a parity and `check_text` were supplied.
    pub match_text_hash: Option<bool>,
    /// Bit-level similarity of the voted bits against the expected codeword
    /// (ECC path) or expected digest bits (no-ECC path), if `check_text` was
    /// supplied.
    pub similarity: Option<f64>,
}
