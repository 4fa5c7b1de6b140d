//! The CLI's top-level error type: a thin union of every library crate's
//! error, since a binary has nothing further to recover from.

use thiserror::Error;

/// Errors surfaced to `main`.
#[derive(Error, Debug)]
pub enum CliError {
    /// The image codec failed.
    #[error(transparent)]
    Core(#[from] imarqd_core::CoreError),
    /// The ECC codec rejected a configuration or input.
    #[error(transparent)]
    Ecc(#[from] imarqd_ecc::EccError),
    /// A shared protocol type (hex id, claim string, QIM config) was invalid.
    #[error(transparent)]
    Proto(#[from] imarqd_proto::ProtoError),
    /// The video pipeline failed.
    #[error(transparent)]
    Video(#[from] imarqd_video::VideoError),
    /// The verifier failed for a reason other than an ordinary miss.
    #[error(transparent)]
    Verify(#[from] imarqd_verify::VerifyError),
}
