//! Errors raised while running the auto-verifier.

use thiserror::Error;

/// Errors raised by [`crate::verify_auto`].
#[derive(Error, Debug)]
pub enum VerifyError {
    /// No `media_id` candidate produced a match.
    #[error("no matching media id among {checked} checked")]
    NoMatch {
        /// How many media-ids were tried before giving up.
        checked: usize,
    },

    /// The image codec failed while extracting a candidate.
    #[error(transparent)]
    Core(#[from] imarqd_core::CoreError),

    /// The ECC codec rejected a configuration.
    #[error(transparent)]
    Ecc(#[from] imarqd_ecc::EccError),

    /// A claim string or hex identifier was malformed.
    #[error(transparent)]
    Proto(#[from] imarqd_proto::ProtoError),
}
