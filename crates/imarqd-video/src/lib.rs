//! The video watermarking pipeline: pre-normalize, extract frames/audio,
//! embed on a frame stride via `imarqd-core`, and re-encode (`spec.md`
//! §4.7).
//!
//! Drives `imarqd-core` per-frame the way `lockframe-client` drives
//! `lockframe-core` per-connection — this crate owns no codec logic of its
//! own, only the ffmpeg orchestration and temp-resource lifecycle around it.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod embed;
mod error;
mod extract;
mod ffmpeg_ops;
mod frames;
mod tools;
mod workdir;

pub use config::{VideoEmbedConfig, VideoEmbedReport, VideoExtractConfig, VideoExtractReport};
pub use embed::embed_video;
pub use error::VideoError;
pub use extract::extract_video;
pub use tools::DEFAULT_TIMEOUT;
pub use workdir::TempWorkDir;
