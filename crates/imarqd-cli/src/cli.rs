//! Argument parsing: one struct per subcommand, mirroring `original_source`'s
//! `cli_embed.py`/`cli_extract.py`/video mains' `argparse` defaults.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// imarqd: invisible watermarking core
#[derive(Parser, Debug)]
#[command(name = "imarqd")]
#[command(about = "Block-DCT QIM watermarking for images and video")]
#[command(version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Embed a text-derived payload into an image.
    EmbedImage(EmbedImageArgs),
    /// Recover a payload from an image.
    ExtractImage(ExtractImageArgs),
    /// Embed a text-derived payload into a video.
    EmbedVideo(EmbedVideoArgs),
    /// Recover a payload from a video.
    ExtractVideo(ExtractVideoArgs),
    /// Reed-Solomon encode a 32-byte SHA-256 digest of some text.
    EccEncode(EccEncodeArgs),
    /// Reed-Solomon decode a hex codeword.
    EccDecode(EccDecodeArgs),
    /// Check a candidate image against a set of known media-ids.
    Verify(VerifyArgs),
}

/// `imarqd embed-image` arguments. Defaults mirror `cli_embed.py`
/// (`qim=8.0, rep=20`, no ECC unless `--parity` is given).
#[derive(clap::Args, Debug)]
pub struct EmbedImageArgs {
    /// Input image path.
    #[arg(long = "in")]
    pub input: PathBuf,
    /// Output watermarked image path.
    #[arg(long = "out")]
    pub output: PathBuf,
    /// Text used to derive the payload (`SHA256(text)`, optionally
    /// Reed-Solomon encoded).
    #[arg(long)]
    pub text: String,
    /// QIM step (strength).
    #[arg(long, default_value_t = 8.0)]
    pub qim: f32,
    /// Requested repetition factor.
    #[arg(long, default_value_t = 20)]
    pub rep: u32,
    /// Reed-Solomon parity byte count; omit for the no-ECC 256-bit payload.
    #[arg(long)]
    pub parity: Option<u8>,
    /// Embed into the Y (luma) plane instead of grayscale.
    #[arg(long)]
    pub use_y: bool,
}

/// `imarqd extract-image` arguments. Defaults mirror `cli_extract.py`.
#[derive(clap::Args, Debug)]
pub struct ExtractImageArgs {
    /// Input (possibly watermarked) image path.
    #[arg(long = "in")]
    pub input: PathBuf,
    /// Expected payload length in bits.
    #[arg(long, default_value_t = 256)]
    pub bitlen: usize,
    /// QIM step (must match the embed call).
    #[arg(long, default_value_t = 8.0)]
    pub qim: f32,
    /// Requested repetition factor (must match the embed call).
    #[arg(long, default_value_t = 20)]
    pub rep: u32,
    /// Reed-Solomon parity byte count, if the embed call used ECC.
    #[arg(long)]
    pub parity: Option<u8>,
    /// Read from the Y (luma) plane instead of grayscale.
    #[arg(long)]
    pub use_y: bool,
    /// If given, reports similarity / hash-match against `SHA256(check-text)`.
    #[arg(long = "check-text")]
    pub check_text: Option<String>,
}

/// `imarqd embed-video` arguments. Defaults mirror the video mains'
/// `argparse` defaults (`qim=24.0, rep=160, ecc=64, frame_step=2`).
#[derive(clap::Args, Debug)]
pub struct EmbedVideoArgs {
    /// Input video path.
    #[arg(long = "in")]
    pub input: PathBuf,
    /// Output watermarked video path.
    #[arg(long = "out")]
    pub output: PathBuf,
    /// Text used to derive the payload.
    #[arg(long)]
    pub text: String,
    /// QIM step (strength).
    #[arg(long, default_value_t = 24.0)]
    pub qim: f32,
    /// Requested repetition factor.
    #[arg(long, default_value_t = 160)]
    pub rep: u32,
    /// Reed-Solomon parity byte count.
    #[arg(long, default_value_t = 64)]
    pub ecc: u8,
    /// Embed every Nth frame.
    #[arg(long, default_value_t = 2)]
    pub frame_step: u32,
    /// Skip the pre-normalize pass.
    #[arg(long)]
    pub no_pre_normalize: bool,
    /// Use a lossless final re-encode instead of the delivery preset.
    #[arg(long)]
    pub lossless: bool,
}

/// `imarqd extract-video` arguments.
#[derive(clap::Args, Debug)]
pub struct ExtractVideoArgs {
    /// Input (possibly watermarked) video path.
    #[arg(long = "in")]
    pub input: PathBuf,
    /// Expected payload length in bits (ignored if `--parity` is given).
    #[arg(long, default_value_t = 256)]
    pub bitlen: usize,
    /// QIM step (must match the embed call).
    #[arg(long, default_value_t = 24.0)]
    pub qim: f32,
    /// Requested repetition factor (must match the embed call).
    #[arg(long, default_value_t = 160)]
    pub rep: u32,
    /// Reed-Solomon parity byte count, if the embed call used ECC.
    #[arg(long)]
    pub parity: Option<u8>,
    /// Analyze every Nth frame.
    #[arg(long, default_value_t = 2)]
    pub frame_step: u32,
    /// Cap on the number of sampled frames.
    #[arg(long, default_value_t = 120)]
    pub max_frames: usize,
    /// If given, reports similarity / hash-match against `SHA256(check-text)`.
    #[arg(long = "check-text")]
    pub check_text: Option<String>,
}

/// `imarqd ecc-encode` arguments.
#[derive(clap::Args, Debug)]
pub struct EccEncodeArgs {
    /// Text to hash and encode.
    #[arg(long)]
    pub text: String,
    /// Reed-Solomon parity byte count.
    #[arg(long, default_value_t = 32)]
    pub parity: u8,
}

/// `imarqd ecc-decode` arguments.
#[derive(clap::Args, Debug)]
pub struct EccDecodeArgs {
    /// Hex-encoded codeword (message bytes followed by parity bytes).
    #[arg(long)]
    pub codeword_hex: String,
    /// Reed-Solomon parity byte count.
    #[arg(long, default_value_t = 32)]
    pub parity: u8,
}

/// `imarqd verify` arguments.
#[derive(clap::Args, Debug)]
pub struct VerifyArgs {
    /// Candidate image path.
    #[arg(long = "in")]
    pub input: PathBuf,
    /// Owner identifier, 64 lowercase hex characters.
    #[arg(long = "owner-sha")]
    pub owner_sha: String,
    /// A known media-id for this owner, 64 lowercase hex characters. May be
    /// given more than once.
    #[arg(long = "media-id", required = true)]
    pub media_ids: Vec<String>,
    /// QIM step used by the embed call.
    #[arg(long, default_value_t = 18.0)]
    pub qim: f32,
    /// Requested repetition factor used by the embed call.
    #[arg(long, default_value_t = 120)]
    pub rep: u32,
    /// Reed-Solomon parity byte count, if the embed call used ECC.
    #[arg(long)]
    pub parity: Option<u8>,
    /// Read from the Y (luma) plane instead of grayscale.
    #[arg(long, default_value_t = true)]
    pub use_y: bool,
}
