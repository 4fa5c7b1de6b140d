//! `imarqd embed-image`.

use tracing::info;

use crate::cli::EmbedImageArgs;
use crate::error::CliError;
use imarqd_core::ImageCodecConfig;
use imarqd_proto::{ChannelMode, QimConfig};

/// Runs the `embed-image` subcommand.
pub fn run(args: &EmbedImageArgs) -> Result<(), CliError> {
    let payload = imarqd_core::payload_from_text(&args.text, args.parity)?;
    let cfg = ImageCodecConfig {
        qim: QimConfig::new(args.qim, args.rep)?,
        channel: ChannelMode::from(args.use_y),
    };

    let report = imarqd_core::embed_image(&args.input, &args.output, &payload, &cfg)?;

    info!(
        out = %args.output.display(),
        psnr_y = report.psnr_y,
        ssim_y = report.ssim_y,
        used_repetition = report.used_repetition,
        written_slots = report.written_slots,
        "watermark embedded"
    );
    Ok(())
}
