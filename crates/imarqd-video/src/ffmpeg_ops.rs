//! ffmpeg/ffprobe command construction for pre-normalization, frame/audio
//! extraction, and re-encoding (`spec.md` §4.7).

use std::path::Path;
use std::time::Duration;

use tracing::instrument;

use crate::error::VideoError;
use crate::tools::{ffmpeg_bin, ffprobe_bin, run, run_capture_stdout};

/// Builds the `scale=...:flags=lanczos` filter expression that resizes the
/// long edge to `long_edge`, preserving aspect ratio, or `None` if no resize
/// is requested.
#[must_use]
pub fn scale_filter_expr(long_edge: Option<u32>) -> Option<String> {
    let long_edge = long_edge?;
    Some(format!(
        "scale='if(gt(iw,ih),{long_edge},-2)':'if(gt(iw,ih),-2,{long_edge})':flags=lanczos"
    ))
}

fn video_filter_chain(scale_filter: Option<&str>, target_fps: Option<u32>) -> String {
    let mut parts = Vec::new();
    if let Some(scale) = scale_filter {
        parts.push(scale.to_string());
    }
    if let Some(fps) = target_fps {
        parts.push(format!("fps={fps}"));
    }
    if parts.is_empty() { "null".to_string() } else { parts.join(",") }
}

/// Probes the source frame rate via `ffprobe`, falling back to `30.0` on any
/// parse failure (matching `original_source`'s defensive fallback).
#[instrument]
pub fn probe_fps(video_path: &Path, timeout: Duration) -> f64 {
    let path = video_path.to_string_lossy();
    let args = [
        "-v",
        "error",
        "-select_streams",
        "v:0",
        "-show_entries",
        "stream=r_frame_rate",
        "-of",
        "default=nk=1:nw=1",
        path.as_ref(),
    ];
    let Ok(stdout) = run_capture_stdout(&ffprobe_bin(), &args, timeout) else {
        return 30.0;
    };
    let trimmed = stdout.trim();
    trimmed
        .split_once('/')
        .and_then(|(num, den)| {
            let num: f64 = num.parse().ok()?;
            let den: f64 = den.parse().ok()?;
            if den == 0.0 { None } else { Some(num / den) }
        })
        .unwrap_or(30.0)
}

/// Pre-normalizes `src` into `dst`: resize/fps, `libx264` at `crf`/`x264_preset`,
/// `yuv420p`, profile main level 4.1, GOP `2 * fps`, 96k AAC audio,
/// `+faststart`.
#[instrument(skip(crf, x264_preset))]
pub fn pre_normalize(
    src: &Path,
    dst: &Path,
    long_edge: Option<u32>,
    target_fps: Option<u32>,
    crf: u8,
    x264_preset: &str,
    timeout: Duration,
) -> Result<(), VideoError> {
    let scale = scale_filter_expr(long_edge);
    let vf = video_filter_chain(scale.as_deref(), target_fps);
    let fps = target_fps.unwrap_or(30);
    let gop = (fps * 2).to_string();
    let keyint_min = fps.to_string();
    let crf_s = crf.to_string();

    let src = src.to_string_lossy();
    let dst = dst.to_string_lossy();

    let args = [
        "-y",
        "-i",
        src.as_ref(),
        "-vf",
        &vf,
        "-c:v",
        "libx264",
        "-preset",
        x264_preset,
        "-crf",
        &crf_s,
        "-pix_fmt",
        "yuv420p",
        "-profile:v",
        "main",
        "-level",
        "4.1",
        "-g",
        &gop,
        "-keyint_min",
        &keyint_min,
        "-c:a",
        "aac",
        "-b:a",
        "96k",
        "-movflags",
        "+faststart",
        dst.as_ref(),
    ];
    run(&ffmpeg_bin(), &args, timeout)
}

/// Decodes `video_path` to lossless PNG frames under `out_dir`, applying
/// `scale_filter`/`target_fps` if given (skipped when the source was already
/// pre-normalized).
#[instrument(skip(scale_filter))]
pub fn extract_frames(
    video_path: &Path,
    out_dir: &Path,
    target_fps: Option<u32>,
    scale_filter: Option<&str>,
    timeout: Duration,
) -> Result<(), VideoError> {
    std::fs::create_dir_all(out_dir)?;
    let vf = video_filter_chain(scale_filter, target_fps);
    let src = video_path.to_string_lossy();
    let pattern = out_dir.join("frame_%08d.png");
    let pattern = pattern.to_string_lossy();
    let args = ["-y", "-i", src.as_ref(), "-vf", &vf, pattern.as_ref()];
    run(&ffmpeg_bin(), &args, timeout)
}

/// Decodes `video_path` to PNG frames at native cadence (no scale/fps
/// filter), for the extract path (`spec.md` §4.7: "frame sampling ignores
/// `frame_step` during decode").
#[instrument]
pub fn extract_frames_native(video_path: &Path, out_dir: &Path, timeout: Duration) -> Result<(), VideoError> {
    std::fs::create_dir_all(out_dir)?;
    let src = video_path.to_string_lossy();
    let pattern = out_dir.join("frame_%08d.png");
    let pattern = pattern.to_string_lossy();
    let args = ["-y", "-i", src.as_ref(), pattern.as_ref()];
    run(&ffmpeg_bin(), &args, timeout)
}

/// Extracts the audio track to an AAC side-file at 192k. Returns `false`
/// (rather than erroring) when the source has no audio or ffmpeg fails,
/// matching `original_source`'s best-effort extraction.
#[instrument]
pub fn extract_audio(video_path: &Path, audio_out: &Path, timeout: Duration) -> bool {
    let src = video_path.to_string_lossy();
    let dst = audio_out.to_string_lossy();
    let args = ["-y", "-i", src.as_ref(), "-vn", "-acodec", "aac", "-b:a", "192k", dst.as_ref()];
    if run(&ffmpeg_bin(), &args, timeout).is_err() {
        return false;
    }
    audio_out.metadata().map(|m| m.len() > 0).unwrap_or(false)
}

/// Re-encoding parameters, either the caller's CRF/preset or the fixed
/// lossless bundle (`crf=0`, `yuv444p`, `veryslow`, `g=1`).
pub enum EncodeMode<'a> {
    /// Final delivery encode at the given CRF/preset, `yuv420p`.
    Delivery { crf: u8, x264_preset: &'a str },
    /// Lossless local ground-truth encode.
    Lossless,
}

/// Muxes the marked frame sequence (and audio side-file, if present) into
/// `output_video` at `fps`.
#[instrument(skip(mode))]
pub fn reencode(
    frame_pattern: &Path,
    audio_path: Option<&Path>,
    output_video: &Path,
    fps: u32,
    mode: &EncodeMode<'_>,
    timeout: Duration,
) -> Result<(), VideoError> {
    let pattern = frame_pattern.to_string_lossy();
    let fps_s = fps.to_string();
    let out = output_video.to_string_lossy();

    let crf_s;
    let encode_args: Vec<&str> = match mode {
        EncodeMode::Lossless => {
            vec!["-c:v", "libx264", "-preset", "veryslow", "-crf", "0", "-g", "1", "-pix_fmt", "yuv444p"]
        },
        EncodeMode::Delivery { crf, x264_preset } => {
            crf_s = crf.to_string();
            vec!["-c:v", "libx264", "-preset", x264_preset, "-crf", &crf_s, "-pix_fmt", "yuv420p"]
        },
    };

    let mut args: Vec<&str> = vec!["-y", "-r", &fps_s, "-i", pattern.as_ref()];
    let audio_str;
    if let Some(audio) = audio_path {
        audio_str = audio.to_string_lossy();
        args.push("-i");
        args.push(audio_str.as_ref());
    }
    args.extend(encode_args);
    if audio_path.is_some() {
        args.extend(["-c:a", "aac", "-b:a", "192k", "-shortest"]);
    }
    args.extend(["-movflags", "+faststart", out.as_ref()]);

    run(&ffmpeg_bin(), &args, timeout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_filter_is_none_without_long_edge() {
        assert!(scale_filter_expr(None).is_none());
    }

    #[test]
    fn scale_filter_embeds_long_edge() {
        let expr = scale_filter_expr(Some(1080)).unwrap();
        assert!(expr.contains("1080"));
        assert!(expr.contains("lanczos"));
    }

    #[test]
    fn video_filter_chain_falls_back_to_null() {
        assert_eq!(video_filter_chain(None, None), "null");
    }

    #[test]
    fn video_filter_chain_joins_scale_and_fps() {
        let chain = video_filter_chain(Some("scale=x"), Some(30));
        assert_eq!(chain, "scale=x,fps=30");
    }
}
