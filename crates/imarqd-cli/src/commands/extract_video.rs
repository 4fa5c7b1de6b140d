//! `imarqd extract-video`.

use tracing::info;

use crate::cli::ExtractVideoArgs;
use crate::error::CliError;
use imarqd_proto::{ChannelMode, QimConfig};
use imarqd_video::VideoExtractConfig;

/// Runs the `extract-video` subcommand.
pub fn run(args: &ExtractVideoArgs) -> Result<(), CliError> {
    let bitlen = match args.parity {
        Some(p) => imarqd_core::payload_bitlen(Some(p)),
        None => args.bitlen,
    };

    let cfg = VideoExtractConfig {
        qim: QimConfig::new(args.qim, args.rep)?,
        channel: ChannelMode::Luma,
        frame_step: args.frame_step,
        max_frames: Some(args.max_frames),
        ..VideoExtractConfig::default()
    };

    let report = imarqd_video::extract_video(
        &args.input,
        bitlen,
        &cfg,
        args.parity,
        args.check_text.as_deref(),
    )?;

    info!(
        frames_used = report.frames_used,
        used_repetition = report.used_repetition,
        recovered_hex = %report.recovered_hex,
        ecc_ok = ?report.ecc_ok,
        match_text_hash = ?report.match_text_hash,
        similarity = ?report.similarity,
        "video extraction complete"
    );
    Ok(())
}
