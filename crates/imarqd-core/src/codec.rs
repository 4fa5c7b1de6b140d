//! Image embed/extract composition (`spec.md` §4.6).

use std::path::Path;

use imarqd_proto::{ChannelMode, QimConfig, COEFF_POS};
use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

use crate::color::{bgr_to_ycrcb, psnr, ssim, ycrcb_to_bgr, YCrCbPlanes};
use crate::dct::{block_grid, forward_dct8x8, inverse_dct8x8, pad_to_block_multiple, read_block, unpad, write_block};
use crate::error::CoreError;
use crate::pixels::BgrImage;
use crate::qim::{embed_bit, guess_bit};
use crate::repetition::{effective_repetition, majority, pad_or_truncate, tile_to_length, written_slots};

/// Configuration shared by [`embed_image`] and [`extract_image`].
#[derive(Debug, Clone, Copy)]
pub struct ImageCodecConfig {
    /// QIM step and requested repetition.
    pub qim: QimConfig,
    /// Which plane(s) to operate on.
    pub channel: ChannelMode,
}

/// Everything a caller needs to know about how an embed actually ran
/// (`spec.md` §6: `embed_image` header/metadata).
#[derive(Debug, Clone, Copy)]
pub struct EmbedReport {
    /// PSNR of the luma (or grayscale) plane, in dB.
    pub psnr_y: f64,
    /// SSIM of the luma (or grayscale) plane.
    pub ssim_y: f64,
    /// QIM step used.
    pub qim_step: f32,
    /// Repetition factor requested by the caller.
    pub requested_repetition: u32,
    /// Repetition factor actually used after the capacity clamp.
    pub used_repetition: u32,
    /// Total 8×8 block count `B`.
    pub block_count: usize,
    /// Number of bit slots actually written, `N`.
    pub written_slots: usize,
}

/// Everything a caller needs back from an extract (`spec.md` §6).
#[derive(Debug, Clone)]
pub struct ExtractReport {
    /// The recovered payload bits, length `payload_bitlen`.
    pub bits: Vec<bool>,
    /// Repetition factor actually used after the capacity clamp.
    pub used_repetition: u32,
    /// Number of bit slots that received at least one vote.
    pub written_slots: usize,
    /// Total 8×8 block count `B`.
    pub block_count: usize,
}

fn plane_from_image(img: &BgrImage, channel: ChannelMode) -> (Vec<f32>, Option<YCrCbPlanes>) {
    match channel {
        ChannelMode::Luma => {
            let planes = bgr_to_ycrcb(&img.data, img.width, img.height);
            let y = planes.y.clone();
            (y, Some(planes))
        },
        ChannelMode::Grayscale => {
            let n = img.width * img.height;
            let mut y = vec![0.0f32; n];
            for i in 0..n {
                let b = img.data[i * 3];
                let g = img.data[i * 3 + 1];
                let r = img.data[i * 3 + 2];
                y[i] = 0.299 * r + 0.587 * g + 0.114 * b;
            }
            (y, None)
        },
    }
}

fn recombine(y: Vec<f32>, planes: Option<YCrCbPlanes>, width: usize, height: usize) -> BgrImage {
    match planes {
        Some(mut planes) => {
            planes.y = y;
            BgrImage { data: ycrcb_to_bgr(&planes), width, height }
        },
        None => {
            let mut data = vec![0.0f32; width * height * 3];
            for i in 0..(width * height) {
                data[i * 3] = y[i];
                data[i * 3 + 1] = y[i];
                data[i * 3 + 2] = y[i];
            }
            BgrImage { data, width, height }
        },
    }
}

/// Embeds `payload_bits` into the image at `in_path`, writing the watermarked
/// PNG to `out_path`.
#[instrument(skip(payload_bits, cfg), fields(requested_repetition = cfg.qim.repetition))]
pub fn embed_image(
    in_path: &Path,
    out_path: &Path,
    payload_bits: &[bool],
    cfg: &ImageCodecConfig,
) -> Result<EmbedReport, CoreError> {
    let img = BgrImage::load(in_path)?;
    let (y, planes) = plane_from_image(&img, cfg.channel);
    let y_reference = y.clone();

    let padded = pad_to_block_multiple(&y, img.width, img.height);
    let (grid_h, grid_w) = block_grid(&padded);
    let block_count = grid_h * grid_w;

    let used_repetition = effective_repetition(cfg.qim.repetition, block_count, payload_bits.len());
    let n = written_slots(block_count, payload_bits.len(), used_repetition);
    let tiled = tile_to_length(payload_bits, n);

    debug!(block_count, used_repetition, written_slots = n, "embedding payload");

    let mut padded = padded;
    for br in 0..grid_h {
        for bc in 0..grid_w {
            let flat_index = br * grid_w + bc;
            let slot = flat_index / used_repetition as usize;
            if slot >= n {
                continue;
            }
            let bit = tiled[slot];
            let mut block = read_block(&padded, br, bc);
            forward_dct8x8(&mut block);
            block[COEFF_POS.0][COEFF_POS.1] = embed_bit(block[COEFF_POS.0][COEFF_POS.1], bit, cfg.qim.step);
            inverse_dct8x8(&mut block);
            write_block(&mut padded, br, bc, &block);
        }
    }

    let watermarked_y = unpad(&padded);
    let out_image = recombine(watermarked_y.clone(), planes, img.width, img.height);
    out_image.save_png(out_path)?;

    let psnr_y = psnr(&y_reference, &watermarked_y);
    let ssim_y = ssim(&y_reference, &watermarked_y, img.width, img.height);

    Ok(EmbedReport {
        psnr_y,
        ssim_y,
        qim_step: cfg.qim.step,
        requested_repetition: cfg.qim.repetition,
        used_repetition,
        block_count,
        written_slots: n,
    })
}

/// Extracts a `payload_bitlen`-bit payload from the image at `in_path`.
#[instrument(skip(cfg), fields(requested_repetition = cfg.qim.repetition))]
pub fn extract_image(
    in_path: &Path,
    payload_bitlen: usize,
    cfg: &ImageCodecConfig,
) -> Result<ExtractReport, CoreError> {
    let img = BgrImage::load(in_path)?;
    let (y, _planes) = plane_from_image(&img, cfg.channel);

    let padded = pad_to_block_multiple(&y, img.width, img.height);
    let (grid_h, grid_w) = block_grid(&padded);
    let block_count = grid_h * grid_w;

    let used_repetition = effective_repetition(cfg.qim.repetition, block_count, payload_bitlen);
    let n = written_slots(block_count, payload_bitlen, used_repetition);

    let mut votes: Vec<Vec<bool>> = vec![Vec::new(); n];
    for br in 0..grid_h {
        for bc in 0..grid_w {
            let flat_index = br * grid_w + bc;
            let slot = flat_index / used_repetition as usize;
            if slot >= n {
                continue;
            }
            let mut block = read_block(&padded, br, bc);
            forward_dct8x8(&mut block);
            let guess = guess_bit(block[COEFF_POS.0][COEFF_POS.1], cfg.qim.step);
            votes[slot].push(guess);
        }
    }

    debug!(block_count, used_repetition, written_slots = n, "extracted votes");

    let decided: Vec<bool> = votes.iter().map(|v| majority(v)).collect();
    let bits = pad_or_truncate(&decided, payload_bitlen);

    Ok(ExtractReport { bits, used_repetition, written_slots: n, block_count })
}

/// `payload = unpack_bits(ecc_encode(sha256(text), P))` when `parity` is
/// `Some`, otherwise `payload = unpack_bits(sha256(text))` (`spec.md` §4.6).
pub fn payload_from_text(text: &str, parity: Option<u8>) -> Result<Vec<bool>, CoreError> {
    let digest: [u8; 32] = Sha256::digest(text.as_bytes()).into();
    let bytes = match parity {
        Some(p) => imarqd_ecc::ecc_encode(&digest, p)?,
        None => digest.to_vec(),
    };
    Ok(crate::bits::unpack_bits(&bytes))
}

/// Payload bit-length for a given ECC configuration: `(32 + P) * 8` or `256`.
#[must_use]
pub fn payload_bitlen(parity: Option<u8>) -> usize {
    match parity {
        Some(p) => (32 + p as usize) * 8,
        None => 256,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn gradient_png(dir: &Path, width: u32, height: u32) -> PathBuf {
        let mut img = image::RgbImage::new(width, height);
        for (x, y, px) in img.enumerate_pixels_mut() {
            *px = image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8]);
        }
        let path = dir.join("gradient.png");
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn lossless_round_trip_recovers_text_hash() {
        let dir = tempfile::tempdir().unwrap();
        let src = gradient_png(dir.path(), 384, 384);
        let out = dir.path().join("watermarked.png");

        let parity = Some(24u8);
        let payload = payload_from_text("klyvo-demo", parity).unwrap();
        let bitlen = payload_bitlen(parity);
        assert_eq!(bitlen, 448);

        let cfg = ImageCodecConfig {
            qim: QimConfig::new(8.0, 20).unwrap(),
            channel: ChannelMode::Luma,
        };

        embed_image(&src, &out, &payload, &cfg).unwrap();
        let report = extract_image(&out, bitlen, &cfg).unwrap();

        let bytes = crate::bits::pack_bits(&report.bits);
        let (recovered, ok) = imarqd_ecc::ecc_decode(&bytes, parity.unwrap()).unwrap();
        assert!(ok);

        let expected_hash: [u8; 32] = Sha256::digest(b"klyvo-demo").into();
        assert_eq!(recovered, expected_hash);
    }

    #[test]
    fn capacity_clamp_matches_scenario_3() {
        let dir = tempfile::tempdir().unwrap();
        let src = gradient_png(dir.path(), 64, 64);
        let out = dir.path().join("watermarked.png");

        let payload = vec![true; 448];
        let cfg = ImageCodecConfig {
            qim: QimConfig::new(18.0, 20).unwrap(),
            channel: ChannelMode::Grayscale,
        };

        let embed_report = embed_image(&src, &out, &payload, &cfg).unwrap();
        assert_eq!(embed_report.used_repetition, 1);
        assert_eq!(embed_report.written_slots, 64);

        let extract_report = extract_image(&out, 448, &cfg).unwrap();
        assert_eq!(extract_report.used_repetition, 1);
        assert_eq!(extract_report.written_slots, 64);
        assert_eq!(extract_report.bits.len(), 448);
        assert!(extract_report.bits[64..].iter().all(|&b| !b));
    }
}
