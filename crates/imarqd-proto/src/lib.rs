//! Shared types for the imarqd invisible-watermarking core.
//!
//! This crate holds the data that every other crate in the workspace agrees
//! on: the fixed block/coefficient layout, per-call QIM configuration,
//! claim-string parsing, and the platform preset registry
//! (`spec.md` §3, §4.8). It has no I/O and no algorithmic logic of its own —
//! `imarqd-core`, `imarqd-ecc` and `imarqd-video` all depend on it, mirroring
//! how `lockframe-proto` underlies `lockframe-core`/`lockframe-crypto` in the
//! protocol this workspace was adapted from.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod claim;
mod config;
mod error;
mod hex32;
mod preset;

pub use claim::ClaimString;
pub use config::{ChannelMode, QimConfig, BLOCK_SIZE, COEFF_POS};
pub use error::ProtoError;
pub use hex32::Hex32;
pub use preset::{resolve, Preset, PresetName, PresetOverrides};
