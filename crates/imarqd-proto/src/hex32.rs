//! 32-byte hex identifiers (owner/media SHA-256 digests as carried in claim
//! strings).

use std::fmt;

use crate::error::ProtoError;

/// A validated 32-byte value rendered as 64 lowercase hex characters.
///
/// Used for both the `owner_sha` and `media_id` halves of a [`crate::ClaimString`];
/// both are 64-hex digests in `original_source`'s routes even though only the
/// owner half is actually a content hash there.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hex32(pub [u8; 32]);

impl Hex32 {
    /// Parses a 64-character hex string, tolerating an optional `0x` prefix.
    pub fn parse(s: &str) -> Result<Self, ProtoError> {
        let trimmed = s.strip_prefix("0x").unwrap_or(s);
        if trimmed.len() != 64 {
            return Err(ProtoError::WrongHexLength { expected: 32, actual: trimmed.len() / 2 });
        }
        let mut out = [0u8; 32];
        for (i, chunk) in trimmed.as_bytes().chunks(2).enumerate() {
            let byte_str = std::str::from_utf8(chunk)
                .map_err(|_| ProtoError::InvalidHex(s.to_string()))?;
            out[i] = u8::from_str_radix(byte_str, 16)
                .map_err(|_| ProtoError::InvalidHex(s.to_string()))?;
        }
        Ok(Self(out))
    }

    /// Renders as 64 lowercase hex characters, no prefix.
    #[must_use]
    pub fn to_hex(self) -> String {
        let mut s = String::with_capacity(64);
        for byte in self.0 {
            s.push_str(&format!("{byte:02x}"));
        }
        s
    }

    /// Renders with a leading `0x`.
    #[must_use]
    pub fn to_hex_prefixed(self) -> String {
        format!("0x{}", self.to_hex())
    }

    /// The underlying 32 bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Hex32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hex32({})", self.to_hex())
    }
}

impl fmt::Display for Hex32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for Hex32 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_hex() {
        let bytes = [0xABu8; 32];
        let hex = Hex32(bytes).to_hex();
        assert_eq!(Hex32::parse(&hex).unwrap(), Hex32(bytes));
    }

    #[test]
    fn tolerates_0x_prefix() {
        let bytes = [0x01u8; 32];
        let hex = Hex32(bytes).to_hex();
        let prefixed = format!("0x{hex}");
        assert_eq!(Hex32::parse(&prefixed).unwrap(), Hex32(bytes));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(matches!(
            Hex32::parse("abcd"),
            Err(ProtoError::WrongHexLength { expected: 32, actual: 2 })
        ));
    }

    #[test]
    fn rejects_non_hex() {
        let bad = "z".repeat(64);
        assert!(matches!(Hex32::parse(&bad), Err(ProtoError::InvalidHex(_))));
    }
}
