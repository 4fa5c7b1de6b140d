//! Canonical claim strings: `owner:<64hex>|media:<64hex>`.
//!
//! The embedded payload is always `SHA256(claim.canonical())` (or
//! `SHA256(claim.media_prefixed())`, see [`ClaimString::media_prefixed`]).
//! `spec.md` §3 and §4.9 require the verifier to try both the bare-hex and
//! `0x`-prefixed forms of the media half, since `original_source`'s registry
//! routes accepted either.

use std::fmt;

use crate::error::ProtoError;
use crate::hex32::Hex32;

/// A parsed `owner:<64hex>|media:<64hex>` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimString {
    owner_sha: Hex32,
    media_id: Hex32,
}

impl ClaimString {
    /// Builds a claim from already-validated owner/media digests.
    #[must_use]
    pub fn new(owner_sha: Hex32, media_id: Hex32) -> Self {
        Self { owner_sha, media_id }
    }

    /// Parses `owner:<hex>|media:<hex>`, tolerating a leading `0x` on the
    /// media half.
    pub fn parse(s: &str) -> Result<Self, ProtoError> {
        let rest = s
            .strip_prefix("owner:")
            .ok_or_else(|| ProtoError::MalformedClaim(s.to_string()))?;
        let (owner_part, media_part) = rest
            .split_once("|media:")
            .ok_or_else(|| ProtoError::MalformedClaim(s.to_string()))?;
        let owner_sha = Hex32::parse(owner_part)?;
        let media_id = Hex32::parse(media_part)?;
        Ok(Self { owner_sha, media_id })
    }

    /// The owner half.
    #[must_use]
    pub fn owner_sha(&self) -> Hex32 {
        self.owner_sha
    }

    /// The media half.
    #[must_use]
    pub fn media_id(&self) -> Hex32 {
        self.media_id
    }

    /// Canonical form with no `0x` prefix on the media half.
    #[must_use]
    pub fn canonical(&self) -> String {
        format!("owner:{}|media:{}", self.owner_sha.to_hex(), self.media_id.to_hex())
    }

    /// Alternate form with a `0x`-prefixed media half.
    #[must_use]
    pub fn media_prefixed(&self) -> String {
        format!("owner:{}|media:{}", self.owner_sha.to_hex(), self.media_id.to_hex_prefixed())
    }

    /// Both candidate text forms a verifier should try, in the order
    /// `original_source`'s `verify_auto.py` tries them (bare hex first).
    #[must_use]
    pub fn candidates(&self) -> [String; 2] {
        [self.canonical(), self.media_prefixed()]
    }
}

impl fmt::Display for ClaimString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(byte: u8) -> Hex32 {
        Hex32([byte; 32])
    }

    #[test]
    fn parses_canonical_form() {
        let text = format!("owner:{}|media:{}", hex(0xAA).to_hex(), hex(0xBB).to_hex());
        let claim = ClaimString::parse(&text).unwrap();
        assert_eq!(claim.owner_sha(), hex(0xAA));
        assert_eq!(claim.media_id(), hex(0xBB));
    }

    #[test]
    fn parses_0x_prefixed_media() {
        let text = format!("owner:{}|media:{}", hex(0xAA).to_hex(), hex(0xBB).to_hex_prefixed());
        let claim = ClaimString::parse(&text).unwrap();
        assert_eq!(claim.media_id(), hex(0xBB));
    }

    #[test]
    fn candidates_cover_both_forms() {
        let claim = ClaimString::new(hex(0x01), hex(0x02));
        let [bare, prefixed] = claim.candidates();
        assert!(bare.ends_with(&hex(0x02).to_hex()));
        assert!(prefixed.ends_with(&hex(0x02).to_hex_prefixed()));
    }

    #[test]
    fn rejects_missing_prefix() {
        assert!(ClaimString::parse("nonsense").is_err());
    }
}
