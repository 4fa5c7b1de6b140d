//! `imarqd ecc-encode` / `imarqd ecc-decode`.

use sha2::{Digest, Sha256};
use tracing::info;

use crate::cli::{EccDecodeArgs, EccEncodeArgs};
use crate::error::CliError;

/// Runs the `ecc-encode` subcommand.
pub fn encode(args: &EccEncodeArgs) -> Result<(), CliError> {
    let digest: [u8; 32] = Sha256::digest(args.text.as_bytes()).into();
    let codeword = imarqd_ecc::ecc_encode(&digest, args.parity)?;
    info!(codeword_hex = %hex_encode(&codeword), "encoded");
    Ok(())
}

/// Runs the `ecc-decode` subcommand.
pub fn decode(args: &EccDecodeArgs) -> Result<(), CliError> {
    let codeword = hex_decode(&args.codeword_hex).map_err(|_| {
        imarqd_proto::ProtoError::InvalidHex(args.codeword_hex.clone())
    })?;
    let (message, ok) = imarqd_ecc::ecc_decode(&codeword, args.parity)?;
    info!(ecc_ok = ok, message_hex = %hex_encode(&message), "decoded");
    Ok(())
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn hex_decode(s: &str) -> Result<Vec<u8>, std::num::ParseIntError> {
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16))
        .collect()
}
