//! End-to-end image scenarios spanning `imarqd-proto`, `imarqd-core`,
//! `imarqd-ecc` and `imarqd-verify` together (`spec.md` §8).

use imarqd_core::ImageCodecConfig;
use imarqd_proto::{ChannelMode, ClaimString, Hex32, QimConfig};
use imarqd_verify::VerifyConfig;
use sha2::{Digest, Sha256};

/// Scenario 1: lossless PNG round-trip recovers the exact message.
#[test]
fn lossless_round_trip_recovers_exact_message() {
    let dir = tempfile::tempdir().unwrap();
    let src = imarqd_harness::write_gradient_png(dir.path(), "in.png", 384, 384, 1);
    let out = dir.path().join("marked.png");

    let parity = 24u8;
    let payload = imarqd_core::payload_from_text("klyvo-demo", Some(parity)).unwrap();
    assert_eq!(payload.len(), (32 + parity as usize) * 8);

    let cfg = ImageCodecConfig {
        qim: QimConfig::new(8.0, 20).unwrap(),
        channel: ChannelMode::Luma,
    };
    imarqd_core::embed_image(&src, &out, &payload, &cfg).unwrap();

    let report = imarqd_core::extract_image(&out, payload.len(), &cfg).unwrap();
    let recovered_bytes = imarqd_core::pack_bits(&report.bits);
    let (message, ok) = imarqd_ecc::ecc_decode(&recovered_bytes, parity).unwrap();
    assert!(ok);

    let want: [u8; 32] = Sha256::digest("klyvo-demo").into();
    assert_eq!(message, want);
}

/// Scenario 3: tiny image clamps repetition to 1 and pads the remaining bits.
#[test]
fn capacity_clamp_pads_remaining_bits() {
    let dir = tempfile::tempdir().unwrap();
    let src = imarqd_harness::write_gradient_png(dir.path(), "in.png", 64, 64, 2);
    let out = dir.path().join("marked.png");

    let payload = vec![true; 448];
    let cfg = ImageCodecConfig {
        qim: QimConfig::new(18.0, 20).unwrap(),
        channel: ChannelMode::Grayscale,
    };
    let embed_report = imarqd_core::embed_image(&src, &out, &payload, &cfg).unwrap();
    assert_eq!(embed_report.used_repetition, 1);
    assert_eq!(embed_report.written_slots, 64);

    let extract_report = imarqd_core::extract_image(&out, 448, &cfg).unwrap();
    assert_eq!(extract_report.used_repetition, 1);
    assert!(extract_report.bits[64..].iter().all(|bit| !bit));
}

/// Scenario 5: verifier exhausts a two-media-id owner set and reports a miss.
#[test]
fn verify_auto_reports_miss_against_unrelated_media_ids() {
    let dir = tempfile::tempdir().unwrap();
    let src = imarqd_harness::write_gradient_png(dir.path(), "in.png", 256, 256, 3);
    let out = dir.path().join("marked.png");

    let owner = Hex32([0x77u8; 32]);
    let embedded_media = Hex32([0xEEu8; 32]);
    let claim = ClaimString::new(owner, embedded_media);
    let parity = 32u8;
    let payload = imarqd_core::payload_from_text(&claim.canonical(), Some(parity)).unwrap();

    let codec_cfg =
        ImageCodecConfig { qim: QimConfig::new(18.0, 120).unwrap(), channel: ChannelMode::Luma };
    imarqd_core::embed_image(&src, &out, &payload, &codec_cfg).unwrap();

    let known_ids = [Hex32([0xAAu8; 32]), Hex32([0xBBu8; 32])];
    let verify_cfg = VerifyConfig {
        qim: QimConfig::new(18.0, 120).unwrap(),
        channel: ChannelMode::Luma,
        ecc_parity_bytes: Some(parity),
    };
    let result = imarqd_verify::verify_auto(&out, owner, &known_ids, &verify_cfg).unwrap();
    assert!(!result.exists);
    assert_eq!(result.checked_media_ids, 2);
}

/// Scenario 2: JPEG Q=75 recompression. Needs the `image` crate's JPEG
/// codec, which this workspace carries, but is marked `#[ignore]` since it
/// exercises a probabilistic robustness property rather than an exact one.
#[test]
#[ignore = "probabilistic JPEG robustness property, not an exact invariant"]
fn jpeg_q75_round_trip_survives_with_high_probability() {
    let dir = tempfile::tempdir().unwrap();
    let src = imarqd_harness::write_gradient_png(dir.path(), "in.png", 384, 384, 4);
    let out = dir.path().join("marked.png");

    let parity = 24u8;
    let payload = imarqd_core::payload_from_text("klyvo-demo", Some(parity)).unwrap();
    let cfg = ImageCodecConfig {
        qim: QimConfig::new(8.0, 20).unwrap(),
        channel: ChannelMode::Luma,
    };
    imarqd_core::embed_image(&src, &out, &payload, &cfg).unwrap();

    let marked = imarqd_core::BgrImage::load(&out).unwrap();
    let jpeg = imarqd_core::jpeg_roundtrip(&marked, 75).unwrap();
    let jpeg_path = dir.path().join("marked.jpg.png");
    jpeg.save_png(&jpeg_path).unwrap();

    let report = imarqd_core::extract_image(&jpeg_path, payload.len(), &cfg).unwrap();
    let recovered_bytes = imarqd_core::pack_bits(&report.bits);
    let (_message, ok) = imarqd_ecc::ecc_decode(&recovered_bytes, parity).unwrap();
    assert!(ok);
}
