//! The image watermarking core: pixel I/O, the block DCT engine, the QIM
//! coder, the repetition inner code, and their composition into
//! [`embed_image`]/[`extract_image`].
//!
//! This crate has no knowledge of video or the preset registry's named
//! bundles beyond the bare [`imarqd_proto::QimConfig`] it consumes —
//! `imarqd-video` drives this crate per-frame, and `imarqd-verify` drives it
//! per-candidate, mirroring how `lockframe-core` is driven by
//! `lockframe-client`/`lockframe-app` without knowing about either.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod bits;
mod codec;
mod color;
mod dct;
mod error;
mod pixels;
mod qim;
mod repetition;

pub use bits::{pack_bits, unpack_bits};
pub use codec::{
    embed_image, extract_image, payload_bitlen, payload_from_text, EmbedReport, ExtractReport,
    ImageCodecConfig,
};
pub use color::{bgr_to_ycrcb, psnr, ssim, ycrcb_to_bgr, YCrCbPlanes};
pub use dct::{
    block_grid, forward_dct8x8, inverse_dct8x8, pad_to_block_multiple, read_block, unpad,
    write_block, PaddedPlane, BLOCK_SIZE,
};
pub use error::CoreError;
pub use pixels::{center_crop_to_mod, jpeg_roundtrip, resize_long_edge, BgrImage};
pub use qim::{embed_bit, guess_bit};
pub use repetition::{effective_repetition, majority, pad_or_truncate, tile_to_length, written_slots};
