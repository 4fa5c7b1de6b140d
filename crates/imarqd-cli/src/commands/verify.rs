//! `imarqd verify`.

use tracing::info;

use crate::cli::VerifyArgs;
use crate::error::CliError;
use imarqd_proto::{ChannelMode, Hex32, QimConfig};
use imarqd_verify::VerifyConfig;

/// Runs the `verify` subcommand.
pub fn run(args: &VerifyArgs) -> Result<(), CliError> {
    let owner_sha = Hex32::parse(&args.owner_sha)?;
    let media_ids = args
        .media_ids
        .iter()
        .map(|s| Hex32::parse(s.as_str()))
        .collect::<Result<Vec<_>, _>>()?;

    let cfg = VerifyConfig {
        qim: QimConfig::new(args.qim, args.rep)?,
        channel: ChannelMode::from(args.use_y),
        ecc_parity_bytes: args.parity,
    };

    let result = imarqd_verify::verify_auto(&args.input, owner_sha, &media_ids, &cfg)?;

    info!(
        exists = result.exists,
        matched_media_id = ?result.matched_media_id,
        ecc_ok = ?result.ecc_ok,
        similarity = ?result.similarity,
        checked_media_ids = result.checked_media_ids,
        "verification complete"
    );
    Ok(())
}
