//! Full-range ITU-R BT.601 BGR↔YCrCb conversion and luminance quality
//! metrics (`spec.md` §4.1).
//!
//! The channel order here is named `(y, cr, cb)`, not `(y, cb, cr)` —
//! matching the common imaging library this was ported from, whose
//! `BGR2YCrCb` conversion produces planes in that historical order despite
//! the color space's name. Keeping the same order on both embed and extract
//! is what matters; which plane is called "second" is a naming accident this
//! crate preserves rather than "fixes", since fixing it would silently swap
//! which plane callers read.

/// A single-precision luma/chroma plane set, all planes the same
/// `width × height`.
#[derive(Debug, Clone)]
pub struct YCrCbPlanes {
    /// Luma plane, row-major, length `width * height`.
    pub y: Vec<f32>,
    /// First chroma plane (red-difference).
    pub cr: Vec<f32>,
    /// Second chroma plane (blue-difference).
    pub cb: Vec<f32>,
    /// Plane width in pixels.
    pub width: usize,
    /// Plane height in pixels.
    pub height: usize,
}

/// Converts an interleaved BGR float buffer (values in `[0, 255]`) to
/// `YCrCbPlanes` using the full-range BT.601 matrix.
#[must_use]
pub fn bgr_to_ycrcb(bgr: &[f32], width: usize, height: usize) -> YCrCbPlanes {
    let n = width * height;
    let mut y = vec![0.0f32; n];
    let mut cr = vec![0.0f32; n];
    let mut cb = vec![0.0f32; n];

    for i in 0..n {
        let b = bgr[i * 3];
        let g = bgr[i * 3 + 1];
        let r = bgr[i * 3 + 2];

        y[i] = 0.299 * r + 0.587 * g + 0.114 * b;
        cr[i] = 0.5 * r - 0.418_688 * g - 0.081_312 * b + 128.0;
        cb[i] = -0.168_736 * r - 0.331_264 * g + 0.5 * b + 128.0;
    }

    YCrCbPlanes { y, cr, cb, width, height }
}

/// Converts `YCrCbPlanes` back to an interleaved BGR float buffer.
#[must_use]
pub fn ycrcb_to_bgr(planes: &YCrCbPlanes) -> Vec<f32> {
    let n = planes.width * planes.height;
    let mut bgr = vec![0.0f32; n * 3];

    for i in 0..n {
        let y = planes.y[i];
        let cr = planes.cr[i] - 128.0;
        let cb = planes.cb[i] - 128.0;

        let r = y + 1.402 * cr;
        let g = y - 0.714_136 * cr - 0.344_136 * cb;
        let b = y + 1.772 * cb;

        bgr[i * 3] = b;
        bgr[i * 3 + 1] = g;
        bgr[i * 3 + 2] = r;
    }

    bgr
}

/// Clips a float sample to `[0, 255]` and rounds to the nearest 8-bit value.
#[must_use]
pub fn clip_round_u8(v: f32) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}

/// Peak signal-to-noise ratio between two equal-length luminance planes, in
/// dB. MSE is floored at `1e-12`, yielding a sentinel `99.0` for
/// (near-)identical planes.
#[must_use]
pub fn psnr(reference: &[f32], candidate: &[f32]) -> f64 {
    debug_assert_eq!(reference.len(), candidate.len());
    let mse: f64 = reference
        .iter()
        .zip(candidate)
        .map(|(a, b)| {
            let d = f64::from(*a) - f64::from(*b);
            d * d
        })
        .sum::<f64>()
        / reference.len() as f64;
    if mse <= 1e-12 {
        return 99.0;
    }
    10.0 * (255.0f64 * 255.0 / mse).log10()
}

const SSIM_WINDOW: usize = 11;
const SSIM_SIGMA: f64 = 1.5;
const SSIM_C1: f64 = 0.01 * 255.0 * 0.01 * 255.0;
const SSIM_C2: f64 = 0.03 * 255.0 * 0.03 * 255.0;

fn gaussian_kernel_1d(size: usize, sigma: f64) -> Vec<f64> {
    let half = (size / 2) as isize;
    let mut kernel: Vec<f64> = (-half..=half)
        .map(|x| {
            let x = x as f64;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = kernel.iter().sum();
    for v in &mut kernel {
        *v /= sum;
    }
    kernel
}

/// Separable Gaussian blur with reflective border handling.
fn gaussian_blur(plane: &[f64], width: usize, height: usize) -> Vec<f64> {
    let kernel = gaussian_kernel_1d(SSIM_WINDOW, SSIM_SIGMA);
    let half = (SSIM_WINDOW / 2) as isize;

    let reflect = |idx: isize, len: usize| -> usize {
        let len = len as isize;
        let mut i = idx;
        if i < 0 {
            i = -i - 1;
        }
        if i >= len {
            i = 2 * len - i - 1;
        }
        i.clamp(0, len - 1) as usize
    };

    let mut horizontal = vec![0.0f64; width * height];
    for row in 0..height {
        for col in 0..width {
            let mut acc = 0.0;
            for (k, &w) in kernel.iter().enumerate() {
                let dx = k as isize - half;
                let c = reflect(col as isize + dx, width);
                acc += w * plane[row * width + c];
            }
            horizontal[row * width + col] = acc;
        }
    }

    let mut vertical = vec![0.0f64; width * height];
    for row in 0..height {
        for col in 0..width {
            let mut acc = 0.0;
            for (k, &w) in kernel.iter().enumerate() {
                let dy = k as isize - half;
                let r = reflect(row as isize + dy, height);
                acc += w * horizontal[r * width + col];
            }
            vertical[row * width + col] = acc;
        }
    }

    vertical
}

/// Structural similarity index between two equal-size luminance planes,
/// using an 11×11 Gaussian window (σ = 1.5). Returns the mean of the SSIM
/// map, clamped to `[0, 1]`.
#[must_use]
pub fn ssim(reference: &[f32], candidate: &[f32], width: usize, height: usize) -> f64 {
    let n = width * height;
    debug_assert_eq!(reference.len(), n);
    debug_assert_eq!(candidate.len(), n);

    let a: Vec<f64> = reference.iter().map(|&v| f64::from(v)).collect();
    let b: Vec<f64> = candidate.iter().map(|&v| f64::from(v)).collect();

    let mu_a = gaussian_blur(&a, width, height);
    let mu_b = gaussian_blur(&b, width, height);

    let aa: Vec<f64> = a.iter().map(|v| v * v).collect();
    let bb: Vec<f64> = b.iter().map(|v| v * v).collect();
    let ab: Vec<f64> = a.iter().zip(&b).map(|(x, y)| x * y).collect();

    let mu_aa = gaussian_blur(&aa, width, height);
    let mu_bb = gaussian_blur(&bb, width, height);
    let mu_ab = gaussian_blur(&ab, width, height);

    let mut sum = 0.0f64;
    for i in 0..n {
        let mu_a_sq = mu_a[i] * mu_a[i];
        let mu_b_sq = mu_b[i] * mu_b[i];
        let mu_ab_i = mu_a[i] * mu_b[i];

        let sigma_a_sq = mu_aa[i] - mu_a_sq;
        let sigma_b_sq = mu_bb[i] - mu_b_sq;
        let sigma_ab = mu_ab[i] - mu_ab_i;

        let numerator = (2.0 * mu_ab_i + SSIM_C1) * (2.0 * sigma_ab + SSIM_C2);
        let denominator = (mu_a_sq + mu_b_sq + SSIM_C1) * (sigma_a_sq + sigma_b_sq + SSIM_C2);
        sum += numerator / denominator;
    }

    (sum / n as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bgr_ycrcb_round_trips_within_float_tolerance() {
        let bgr = vec![10.0, 120.0, 250.0, 0.0, 0.0, 0.0, 255.0, 255.0, 255.0];
        let planes = bgr_to_ycrcb(&bgr, 3, 1);
        let back = ycrcb_to_bgr(&planes);
        for (a, b) in bgr.iter().zip(back.iter()) {
            assert!((a - b).abs() < 0.01, "{a} vs {b}");
        }
    }

    #[test]
    fn psnr_of_identical_planes_hits_sentinel() {
        let plane = vec![100.0f32; 64];
        assert!((psnr(&plane, &plane) - 99.0).abs() < 1e-6);
    }

    #[test]
    fn psnr_decreases_with_noise() {
        let a = vec![100.0f32; 64];
        let mut b = a.clone();
        for v in &mut b {
            *v += 10.0;
        }
        assert!(psnr(&a, &b) < 99.0);
    }

    #[test]
    fn ssim_of_identical_planes_is_one() {
        let plane: Vec<f32> = (0..256).map(|i| (i % 255) as f32).collect();
        let value = ssim(&plane, &plane, 16, 16);
        assert!((value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn ssim_drops_for_very_different_planes() {
        let a = vec![10.0f32; 256];
        let b = vec![240.0f32; 256];
        assert!(ssim(&a, &b, 16, 16) < 0.5);
    }
}
