//! Error types for the video watermarking pipeline.

use std::time::Duration;

use thiserror::Error;

/// Errors raised by [`crate::embed_video`]/[`crate::extract_video`].
#[derive(Error, Debug)]
pub enum VideoError {
    /// An external tool (`ffmpeg`/`ffprobe`) exited non-zero.
    #[error("{tool} exited with status {status:?}: {stderr}")]
    ToolFailure {
        /// The tool invoked (`"ffmpeg"` or `"ffprobe"`).
        tool: String,
        /// The process's exit status, if one was observed.
        status: Option<i32>,
        /// Captured stderr.
        stderr: String,
    },

    /// An external tool did not finish within the configured wall-clock
    /// timeout.
    #[error("{tool} timed out after {after:?}")]
    Timeout {
        /// The tool invoked.
        tool: String,
        /// How long the pipeline waited before giving up.
        after: Duration,
    },

    /// No frames were extracted from the input video.
    #[error("no frames extracted from input video")]
    NoFrames,

    /// The image codec layer failed on one frame.
    #[error("core codec error: {0}")]
    Core(#[from] imarqd_core::CoreError),

    /// The ECC layer rejected a parameter.
    #[error("ecc error: {0}")]
    Ecc(#[from] imarqd_ecc::EccError),

    /// A filesystem operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
