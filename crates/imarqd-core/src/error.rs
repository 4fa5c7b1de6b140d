//! Error types for the image watermarking core.

use thiserror::Error;

/// Errors raised by [`crate::embed_image`]/[`crate::extract_image`] and the
/// primitives underneath them.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The image could not be decoded, or decoded to zero pixels.
    #[error("unreadable media: {0}")]
    UnreadableMedia(String),

    /// The image's channel layout isn't one this codec handles.
    #[error("unsupported channel layout: {0}")]
    UnsupportedChannelLayout(String),

    /// `payload_bits` exceeded the block budget `B` for this image size.
    #[error("payload of {payload_bits} bits exceeds capacity of {available_bits} bits")]
    CapacityExceeded {
        /// Requested payload length in bits.
        payload_bits: usize,
        /// Bits available given the image's block count.
        available_bits: usize,
    },

    /// A caller-supplied configuration value was out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Underlying image decode/encode failure.
    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),

    /// Underlying filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The Reed-Solomon layer rejected a parameter.
    #[error("ecc error: {0}")]
    Ecc(#[from] imarqd_ecc::EccError),

    /// The shared configuration layer rejected a parameter.
    #[error("proto error: {0}")]
    Proto(#[from] imarqd_proto::ProtoError),
}
