//! `embed_video`: pre-normalize → extract frames/audio → embed on stride →
//! re-encode (`spec.md` §4.7).

use std::path::Path;

use imarqd_core::ImageCodecConfig;
use tracing::instrument;

use crate::config::{VideoEmbedConfig, VideoEmbedReport};
use crate::error::VideoError;
use crate::ffmpeg_ops::{self, EncodeMode};
use crate::frames::{embed_on_stride, list_frame_files};
use crate::workdir::TempWorkDir;

/// Embeds `payload_bits` into `input_video`, writing the watermarked MP4 to
/// `output_video`.
///
/// When `lossless` is set, the final re-encode uses `crf=0`, `yuv444p`,
/// `preset=veryslow`, `g=1` instead of `cfg.crf`/`cfg.x264_preset` — intended
/// for local ground-truth tests, not platform delivery.
#[instrument(skip(payload_bits, cfg), fields(frame_step = cfg.frame_step))]
pub fn embed_video(
    input_video: &Path,
    output_video: &Path,
    payload_bits: &[bool],
    cfg: &VideoEmbedConfig,
    lossless: bool,
) -> Result<VideoEmbedReport, VideoError> {
    let work = TempWorkDir::new()?;

    let source_for_embed = if cfg.pre_normalize {
        let dst = work.normalized_path();
        ffmpeg_ops::pre_normalize(
            input_video,
            &dst,
            cfg.long_edge,
            cfg.target_fps,
            cfg.crf,
            &cfg.x264_preset,
            cfg.timeout,
        )?;
        dst
    } else {
        input_video.to_path_buf()
    };

    let (scale_filter, target_fps_for_extract) = if cfg.pre_normalize {
        (None, None)
    } else {
        (ffmpeg_ops::scale_filter_expr(cfg.long_edge), cfg.target_fps)
    };

    ffmpeg_ops::extract_frames(
        &source_for_embed,
        &work.frames_dir(),
        target_fps_for_extract,
        scale_filter.as_deref(),
        cfg.timeout,
    )?;
    let has_audio = ffmpeg_ops::extract_audio(&source_for_embed, &work.audio_path(), cfg.timeout);

    let frame_paths = list_frame_files(&work.frames_dir())?;
    if frame_paths.is_empty() {
        return Err(VideoError::NoFrames);
    }

    let codec_cfg = ImageCodecConfig { qim: cfg.qim, channel: cfg.channel };
    let frames_marked =
        embed_on_stride(&frame_paths, &work.marked_dir(), payload_bits, &codec_cfg, cfg.frame_step)?;

    let fps = cfg.target_fps.unwrap_or(30);
    let mode = if lossless {
        EncodeMode::Lossless
    } else {
        EncodeMode::Delivery { crf: cfg.crf, x264_preset: &cfg.x264_preset }
    };
    let frame_pattern = work.marked_dir().join("frame_%08d.png");
    let audio = has_audio.then(|| work.audio_path());

    ffmpeg_ops::reencode(&frame_pattern, audio.as_deref(), output_video, fps, &mode, cfg.timeout)?;

    Ok(VideoEmbedReport { frames_total: frame_paths.len(), frames_marked, has_audio })
}
