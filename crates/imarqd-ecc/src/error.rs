//! Errors for the Reed-Solomon outer code.

use thiserror::Error;

/// Errors raised by [`crate::ecc_encode`]/[`crate::ecc_decode`] and
/// [`crate::EccCodec`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EccError {
    /// `spec.md` §3: parity must be in `[2, 64]`.
    #[error("parity bytes must be in [2, 64], got {0}")]
    InvalidParity(u8),

    /// The message to encode was not exactly 32 bytes.
    #[error("message must be exactly 32 bytes, got {0}")]
    WrongMessageLength(usize),

    /// The codeword to decode did not have the length `32 + parity`.
    #[error("codeword must be exactly {expected} bytes, got {actual}")]
    WrongCodewordLength {
        /// Expected codeword length (`32 + parity`).
        expected: usize,
        /// Actual codeword length supplied.
        actual: usize,
    },
}
