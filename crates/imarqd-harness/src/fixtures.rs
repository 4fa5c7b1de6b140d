//! Deterministic synthetic image fixtures.
//!
//! No binary fixtures are checked in; every test image is generated from a
//! seed at test time, the way `lockframe-harness`'s `ModelWorld` generates
//! deterministic protocol scenarios from a seeded RNG instead of replaying
//! captured traffic.

use std::path::{Path, PathBuf};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Builds a deterministic `width x height` RGB image from `seed`.
///
/// Mixes a smooth gradient (so DCT blocks have real mid-frequency content to
/// modulate) with bounded per-pixel noise (so blocks aren't perfectly flat,
/// which would make every block's coefficient trivially zero).
#[must_use]
pub fn synthetic_gradient_image(width: u32, height: u32, seed: u64) -> image::RgbImage {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut img = image::RgbImage::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let base = ((x * 255 / width.max(1)) + (y * 255 / height.max(1))) / 2;
        let noise: i32 = rng.gen_range(-12..=12);
        let v = (base as i32 + noise).clamp(0, 255) as u8;
        *pixel = image::Rgb([v, v.wrapping_add(15), v.wrapping_add(30)]);
    }
    img
}

/// Writes a [`synthetic_gradient_image`] to `dir/name` and returns the path.
///
/// # Panics
///
/// Panics if the image cannot be encoded or written; fixture generation
/// failures should fail the test loudly rather than be propagated as a
/// `Result` every caller must thread through.
#[must_use]
pub fn write_gradient_png(dir: &Path, name: &str, width: u32, height: u32, seed: u64) -> PathBuf {
    let path = dir.join(name);
    synthetic_gradient_image(width, height, seed)
        .save(&path)
        .expect("fixture image must encode and write");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_produces_identical_pixels() {
        let a = synthetic_gradient_image(64, 64, 42);
        let b = synthetic_gradient_image(64, 64, 42);
        assert_eq!(a.into_raw(), b.into_raw());
    }

    #[test]
    fn different_seeds_produce_different_pixels() {
        let a = synthetic_gradient_image(64, 64, 1);
        let b = synthetic_gradient_image(64, 64, 2);
        assert_ne!(a.into_raw(), b.into_raw());
    }
}
