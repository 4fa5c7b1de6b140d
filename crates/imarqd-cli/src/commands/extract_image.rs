//! `imarqd extract-image`.

use sha2::{Digest, Sha256};
use tracing::info;

use crate::cli::ExtractImageArgs;
use crate::error::CliError;
use imarqd_core::ImageCodecConfig;
use imarqd_proto::{ChannelMode, QimConfig};

/// Runs the `extract-image` subcommand.
pub fn run(args: &ExtractImageArgs) -> Result<(), CliError> {
    let cfg = ImageCodecConfig {
        qim: QimConfig::new(args.qim, args.rep)?,
        channel: ChannelMode::from(args.use_y),
    };

    let bitlen = match args.parity {
        Some(p) => imarqd_core::payload_bitlen(Some(p)),
        None => args.bitlen,
    };
    let report = imarqd_core::extract_image(&args.input, bitlen, &cfg)?;
    let recovered_bytes = imarqd_core::pack_bits(&report.bits);

    info!(bits = report.bits.len(), used_repetition = report.used_repetition, "bits recovered");

    if let Some(parity) = args.parity {
        let (message, ok) = imarqd_ecc::ecc_decode(&recovered_bytes, parity)?;
        info!(ecc_ok = ok, message_hex = %hex_encode(&message), "ecc decode complete");

        if let Some(text) = &args.check_text {
            let want: [u8; 32] = Sha256::digest(text.as_bytes()).into();
            info!(match_text_hash = ok && message == want, "check-text comparison");
        }
    } else if let Some(text) = &args.check_text {
        let want_bits = imarqd_core::unpack_bits(&Sha256::digest(text.as_bytes()));
        let len = report.bits.len().min(want_bits.len());
        let matches = report.bits[..len].iter().zip(&want_bits[..len]).filter(|(a, b)| a == b).count();
        let similarity = matches as f64 / len.max(1) as f64;
        info!(similarity, hit = similarity > 0.95, "check-text similarity");
    } else {
        info!(recovered_hex = %hex_encode(&recovered_bytes), "no check-text provided");
    }

    Ok(())
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
