//! Preset-aware auto-verification: given a candidate image, an owner's SHA
//! and a set of known media-ids, find which (if any) media-id is actually
//! watermarked into the image (`spec.md` §4.9).
//!
//! Drives `imarqd-core::extract_image` once per claim-string candidate per
//! media-id, the way `original_source`'s `verify_auto.py` drives
//! `extract_dct_image`/`extract_dct_image_ychannel` in its `_try_one_candidate`
//! helper — this crate has no route/HTTP concerns of its own, only the
//! candidate-building and first-match-wins loop.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;

pub use error::VerifyError;

use imarqd_core::ImageCodecConfig;
use imarqd_proto::{ChannelMode, ClaimString, Hex32, QimConfig};
use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

/// Configuration for one [`verify_auto`] call, mirroring the fields a preset
/// resolves to (`spec.md` §4.8/§4.9).
#[derive(Debug, Clone, Copy)]
pub struct VerifyConfig {
    /// QIM step and requested repetition used by the original embed call.
    pub qim: QimConfig,
    /// Which plane the original embed call used.
    pub channel: ChannelMode,
    /// ECC parity bytes, if the original embed call used ECC.
    pub ecc_parity_bytes: Option<u8>,
}

/// Result of a [`verify_auto`] call.
#[derive(Debug, Clone)]
pub struct AutoVerifyResult {
    /// Whether any `media_id` candidate matched.
    pub exists: bool,
    /// The matched media-id, `0x`-prefixed, if `exists`.
    pub matched_media_id: Option<String>,
    /// ECC decode status of the winning (or last-tried) candidate.
    pub ecc_ok: Option<bool>,
    /// Whether the decoded/compared message matched the candidate's hash.
    pub match_text_hash: Option<bool>,
    /// Bit-level similarity of the winning (or last-tried) candidate.
    pub similarity: Option<f64>,
    /// Repetition factor actually used by the per-frame/image extractor.
    pub used_repetition: Option<u32>,
    /// How many `media_id`s were checked before a match was found or the set
    /// was exhausted.
    pub checked_media_ids: usize,
}

/// Tries every `media_id` in `media_ids` against `image_path`, returning the
/// first claim-string candidate (bare-hex or `0x`-prefixed media half) that
/// decodes to a matching hash (`spec.md` §4.9).
///
/// Returns `Ok` with `exists: false` when no candidate matches; this is not
/// an error, matching `original_source`'s `verify_auto` route, which returns
/// a normal `200` response with `exists=false` rather than a `4xx`.
#[instrument(skip(image_path, cfg), fields(media_ids = media_ids.len()))]
pub fn verify_auto(
    image_path: &std::path::Path,
    owner_sha: Hex32,
    media_ids: &[Hex32],
    cfg: &VerifyConfig,
) -> Result<AutoVerifyResult, VerifyError> {
    let payload_bitlen = match cfg.ecc_parity_bytes {
        Some(parity) => (imarqd_ecc::MESSAGE_LEN + parity as usize) * 8,
        None => imarqd_ecc::MESSAGE_LEN * 8,
    };

    let codec_cfg = ImageCodecConfig { qim: cfg.qim, channel: cfg.channel };

    let mut last_repetition = None;

    for media_id in media_ids {
        let claim = ClaimString::new(owner_sha, *media_id);

        for candidate in claim.candidates() {
            let report = imarqd_core::extract_image(image_path, payload_bitlen, &codec_cfg)?;
            last_repetition = Some(report.used_repetition);

            let want: [u8; 32] = Sha256::digest(candidate.as_bytes()).into();

            let (ecc_ok, matched, similarity) = if let Some(parity) = cfg.ecc_parity_bytes {
                let recovered_bytes = imarqd_core::pack_bits(&report.bits);
                let (message, ok) = imarqd_ecc::ecc_decode(&recovered_bytes, parity)?;

                let expected_codeword = imarqd_ecc::ecc_encode(&want, parity)?;
                let expected_bits = imarqd_core::unpack_bits(&expected_codeword);
                let sim = bit_similarity(&report.bits, &expected_bits);

                (Some(ok), ok && message == want, Some(sim))
            } else {
                let expected_bits = imarqd_core::unpack_bits(&want);
                let sim = bit_similarity(&report.bits, &expected_bits);
                (None, sim > 0.95, Some(sim))
            };

            if matched {
                debug!(media_id = %media_id.to_hex_prefixed(), "matched");
                return Ok(AutoVerifyResult {
                    exists: true,
                    matched_media_id: Some(media_id.to_hex_prefixed()),
                    ecc_ok,
                    match_text_hash: ecc_ok.is_some().then_some(true),
                    similarity,
                    used_repetition: last_repetition,
                    checked_media_ids: media_ids.len(),
                });
            }
        }
    }

    debug!(checked = media_ids.len(), "no media id matched");
    Ok(AutoVerifyResult {
        exists: false,
        matched_media_id: None,
        ecc_ok: cfg.ecc_parity_bytes.is_some().then_some(false),
        match_text_hash: Some(false),
        similarity: None,
        used_repetition: last_repetition,
        checked_media_ids: media_ids.len(),
    })
}

/// Like [`verify_auto`] but returns [`VerifyError::NoMatch`] instead of an
/// `exists: false` report, for call sites that want to use `?` directly.
pub fn verify_auto_or_err(
    image_path: &std::path::Path,
    owner_sha: Hex32,
    media_ids: &[Hex32],
    cfg: &VerifyConfig,
) -> Result<AutoVerifyResult, VerifyError> {
    let result = verify_auto(image_path, owner_sha, media_ids, cfg)?;
    if result.exists {
        Ok(result)
    } else {
        Err(VerifyError::NoMatch { checked: result.checked_media_ids })
    }
}

fn bit_similarity(a: &[bool], b: &[bool]) -> f64 {
    let len = a.len().min(b.len());
    if len == 0 {
        return 0.0;
    }
    let matches = a[..len].iter().zip(&b[..len]).filter(|(x, y)| x == y).count();
    matches as f64 / len as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn gradient_png(width: u32, height: u32) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.png");
        let mut img = image::RgbImage::new(width, height);
        for (x, y, px) in img.enumerate_pixels_mut() {
            let v = ((x + y) % 256) as u8;
            *px = image::Rgb([v, v.wrapping_add(10), v.wrapping_add(20)]);
        }
        img.save(&path).unwrap();
        (dir, path)
    }

    #[test]
    fn exhausts_media_ids_and_reports_no_match() {
        let (_dir, path) = gradient_png(128, 128);
        let owner = Hex32([0xAAu8; 32]);
        let media_ids = [Hex32([0x01u8; 32]), Hex32([0x02u8; 32])];
        let cfg = VerifyConfig {
            qim: QimConfig::new(18.0, 120).unwrap(),
            channel: ChannelMode::Grayscale,
            ecc_parity_bytes: Some(32),
        };

        let result = verify_auto(&path, owner, &media_ids, &cfg).unwrap();
        assert!(!result.exists);
        assert_eq!(result.checked_media_ids, media_ids.len());
        assert!(result.matched_media_id.is_none());
    }

    #[test]
    fn embedded_claim_is_recovered_for_the_right_media_id() {
        let (_dir, path) = gradient_png(256, 256);
        let owner = Hex32([0x11u8; 32]);
        let right_media = Hex32([0x22u8; 32]);
        let wrong_media = Hex32([0x33u8; 32]);
        let parity = 32u8;

        let claim = ClaimString::new(owner, right_media);
        let payload = imarqd_core::payload_from_text(&claim.canonical(), Some(parity)).unwrap();

        let codec_cfg = ImageCodecConfig {
            qim: QimConfig::new(18.0, 120).unwrap(),
            channel: ChannelMode::Grayscale,
        };
        let out_path = path.with_file_name("marked.png");
        imarqd_core::embed_image(&path, &out_path, &payload, &codec_cfg).unwrap();

        let cfg = VerifyConfig {
            qim: QimConfig::new(18.0, 120).unwrap(),
            channel: ChannelMode::Grayscale,
            ecc_parity_bytes: Some(parity),
        };
        let result =
            verify_auto(&out_path, owner, &[wrong_media, right_media], &cfg).unwrap();
        assert!(result.exists);
        assert_eq!(result.matched_media_id, Some(right_media.to_hex_prefixed()));
        assert_eq!(result.checked_media_ids, 2);
        assert_eq!(result.ecc_ok, Some(true));
    }
}
