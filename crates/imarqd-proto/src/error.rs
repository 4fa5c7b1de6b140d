//! Error types shared by every crate that consumes `imarqd-proto`'s types.
//!
//! These are the `InvalidInput` kind of `spec.md` §7: malformed hex, unknown
//! preset names, out-of-range parity/strength/repetition. Everything here is
//! caught at construction time so downstream crates never have to re-validate
//! a `Preset` or `ClaimString` they were handed.

use thiserror::Error;

/// Errors raised while constructing or parsing shared protocol types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtoError {
    /// A hex string was not valid hex.
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    /// A hex string did not decode to the expected byte length.
    #[error("expected {expected} bytes, got {actual}")]
    WrongHexLength {
        /// Expected byte length.
        expected: usize,
        /// Actual decoded byte length.
        actual: usize,
    },

    /// A claim string did not match `owner:<64hex>|media:<64hex>`.
    #[error("malformed claim string: {0}")]
    MalformedClaim(String),

    /// An unrecognized preset name was requested.
    #[error("unknown preset '{0}'")]
    UnknownPreset(String),

    /// Reed-Solomon parity byte count outside the supported `[2, 64]` range.
    #[error("parity bytes must be in [2, 64], got {0}")]
    InvalidParity(u8),

    /// QIM step was not a positive, finite number.
    #[error("qim_step must be a positive finite number, got {0}")]
    InvalidQimStep(f32),

    /// Repetition factor was zero.
    #[error("repetition must be >= 1")]
    InvalidRepetition,
}
