//! Reed-Solomon outer code over GF(2⁸) for the imarqd watermarking core.
//!
//! `spec.md` §4.5: `encode(msg32, P)` returns a `32 + P`-byte systematic
//! codeword (message bytes followed by parity); `decode(codeword, P)` returns
//! `(msg32, ok)`, correcting up to `⌊P/2⌋` byte errors. `ok = false` means the
//! message bytes are **undefined** and must not be trusted (`spec.md` §7,
//! `EccUndecodable`) — this crate returns a zeroed array rather than the
//! decoder's best guess, so a caller that forgets to check `ok` gets
//! obviously-wrong output instead of a plausible-looking one.
//!
//! Grounded on `original_source`'s `ecc.py`, which wraps Python's `reedsolo`
//! (classic systematic Reed-Solomon, same GF(2⁸) field, same
//! encode/correct-in-place shape); here the equivalent is the `reed-solomon`
//! crate.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;

pub use error::EccError;

use reed_solomon::{Decoder, Encoder};

/// Message length in bytes: a SHA-256 digest (`spec.md` §3).
pub const MESSAGE_LEN: usize = 32;

/// A Reed-Solomon codec bound to one parity length.
///
/// Building one validates `parity` once; [`EccCodec::encode`]/
/// [`EccCodec::decode`] then never need to re-check it, unlike
/// `original_source`'s `ecc.py`, which constructed a fresh `RSCodec` and
/// re-validated bounds on every call.
#[derive(Debug, Clone, Copy)]
pub struct EccCodec {
    parity: u8,
}

impl EccCodec {
    /// Builds a codec for the given parity byte count, which must be in
    /// `[2, 64]` (`spec.md` §3).
    pub fn new(parity: u8) -> Result<Self, EccError> {
        if !(2..=64).contains(&parity) {
            return Err(EccError::InvalidParity(parity));
        }
        Ok(Self { parity })
    }

    /// The parity byte count this codec was built with.
    #[must_use]
    pub fn parity(&self) -> u8 {
        self.parity
    }

    /// Total codeword length: `MESSAGE_LEN + parity`.
    #[must_use]
    pub fn codeword_len(&self) -> usize {
        MESSAGE_LEN + self.parity as usize
    }

    /// Encodes a 32-byte message into a systematic codeword.
    #[must_use]
    pub fn encode(&self, message: &[u8; MESSAGE_LEN]) -> Vec<u8> {
        let encoder = Encoder::new(self.parity as usize);
        encoder.encode(message).to_vec()
    }

    /// Decodes a codeword, correcting up to `⌊parity / 2⌋` byte errors.
    ///
    /// Returns `(message, false)` with an undefined (zeroed) message on
    /// decode failure; the caller must check the bool before trusting the
    /// bytes.
    pub fn decode(&self, codeword: &[u8]) -> Result<([u8; MESSAGE_LEN], bool), EccError> {
        let expected = self.codeword_len();
        if codeword.len() != expected {
            return Err(EccError::WrongCodewordLength { expected, actual: codeword.len() });
        }

        let decoder = Decoder::new(self.parity as usize);
        let mut buf = codeword.to_vec();
        match decoder.correct(&mut buf, None) {
            Ok(corrected) => {
                let data = corrected.data();
                let mut message = [0u8; MESSAGE_LEN];
                message.copy_from_slice(&data[..MESSAGE_LEN]);
                Ok((message, true))
            },
            Err(_) => Ok(([0u8; MESSAGE_LEN], false)),
        }
    }
}

/// Encodes a 32-byte message with `parity` Reed-Solomon parity bytes.
pub fn ecc_encode(message: &[u8; MESSAGE_LEN], parity: u8) -> Result<Vec<u8>, EccError> {
    Ok(EccCodec::new(parity)?.encode(message))
}

/// Decodes a codeword produced by [`ecc_encode`] with the same `parity`.
pub fn ecc_decode(codeword: &[u8], parity: u8) -> Result<([u8; MESSAGE_LEN], bool), EccError> {
    EccCodec::new(parity)?.decode(codeword)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(seed: u8) -> [u8; MESSAGE_LEN] {
        let mut m = [0u8; MESSAGE_LEN];
        for (i, b) in m.iter_mut().enumerate() {
            *b = seed.wrapping_add(i as u8);
        }
        m
    }

    #[test]
    fn round_trips_without_corruption() {
        let msg = message(7);
        let codeword = ecc_encode(&msg, 32).unwrap();
        assert_eq!(codeword.len(), 64);
        let (decoded, ok) = ecc_decode(&codeword, 32).unwrap();
        assert!(ok);
        assert_eq!(decoded, msg);
    }

    #[test]
    fn corrects_up_to_half_parity_byte_errors() {
        let msg = message(1);
        let parity = 32u8;
        let mut codeword = ecc_encode(&msg, parity).unwrap();

        // Flip floor(parity / 2) = 16 bytes at spread-out positions.
        let t = (parity / 2) as usize;
        for i in 0..t {
            let pos = i * 3;
            codeword[pos] ^= 0xFF;
        }

        let (decoded, ok) = ecc_decode(&codeword, parity).unwrap();
        assert!(ok, "expected correction of {t} byte errors to succeed");
        assert_eq!(decoded, msg);
    }

    #[test]
    fn fails_closed_beyond_correction_radius() {
        let msg = message(2);
        let parity = 32u8;
        let mut codeword = ecc_encode(&msg, parity).unwrap();

        let t = (parity / 2) as usize;
        for i in 0..=t {
            let pos = i * 3;
            codeword[pos] ^= 0xFF;
        }

        let (_, ok) = ecc_decode(&codeword, parity).unwrap();
        assert!(!ok, "expected correction beyond {t} byte errors to fail");
    }

    #[test]
    fn rejects_out_of_range_parity() {
        assert!(EccCodec::new(1).is_err());
        assert!(EccCodec::new(65).is_err());
        assert!(EccCodec::new(0).is_err());
    }

    #[test]
    fn rejects_wrong_codeword_length() {
        let codec = EccCodec::new(24).unwrap();
        assert!(matches!(
            codec.decode(&[0u8; 10]),
            Err(EccError::WrongCodewordLength { expected: 56, actual: 10 })
        ));
    }
}
