//! `imarqd embed-video`.

use tracing::info;

use crate::cli::EmbedVideoArgs;
use crate::error::CliError;
use imarqd_proto::{ChannelMode, QimConfig};
use imarqd_video::VideoEmbedConfig;

/// Runs the `embed-video` subcommand.
pub fn run(args: &EmbedVideoArgs) -> Result<(), CliError> {
    let payload = imarqd_core::payload_from_text(&args.text, Some(args.ecc))?;

    let cfg = VideoEmbedConfig {
        qim: QimConfig::new(args.qim, args.rep)?,
        channel: ChannelMode::Luma,
        frame_step: args.frame_step,
        pre_normalize: !args.no_pre_normalize,
        ..VideoEmbedConfig::default()
    };

    let report = imarqd_video::embed_video(&args.input, &args.output, &payload, &cfg, args.lossless)?;

    info!(
        out = %args.output.display(),
        frames_total = report.frames_total,
        frames_marked = report.frames_marked,
        has_audio = report.has_audio,
        "video watermark embedded"
    );
    Ok(())
}
