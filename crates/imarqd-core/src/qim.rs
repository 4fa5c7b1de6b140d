//! The QIM coder: embed and guess a single bit on one DCT coefficient
//! (`spec.md` §4.3).

/// Dither offset for codebook 0.
fn dither0(step: f32) -> f32 {
    -step / 4.0
}

/// Dither offset for codebook 1.
fn dither1(step: f32) -> f32 {
    step / 4.0
}

fn dither(step: f32, bit: bool) -> f32 {
    if bit { dither1(step) } else { dither0(step) }
}

/// Quantizes `c` onto the codebook for `bit`, with quantization step `k`.
///
/// `c' = k * round((c - d_b) / k) + d_b`, `d_0 = -k/4`, `d_1 = +k/4`.
#[must_use]
pub fn embed_bit(c: f32, bit: bool, k: f32) -> f32 {
    let d = dither(k, bit);
    k * ((c - d) / k).round() + d
}

/// Distance from `c` to the nearest grid point of the codebook for `bit`.
fn codebook_distance(c: f32, bit: bool, k: f32) -> f32 {
    let d = dither(k, bit);
    ((c - d) - k * ((c - d) / k).round()).abs()
}

/// Guesses which bit was embedded into `c`, by nearest-codebook distance.
/// Ties resolve to `false` (codebook 0).
#[must_use]
pub fn guess_bit(c: f32, k: f32) -> bool {
    let r0 = codebook_distance(c, false, k);
    let r1 = codebook_distance(c, true, k);
    r1 < r0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn embed_then_guess_recovers_bit_exactly() {
        for bit in [false, true] {
            for raw in [-500.0f32, -1.0, 0.0, 0.3, 17.0, 512.5] {
                let k = 18.0f32;
                let embedded = embed_bit(raw, bit, k);
                assert_eq!(guess_bit(embedded, k), bit, "raw={raw} bit={bit}");
            }
        }
    }

    proptest! {
        #[test]
        fn qim_saturation_holds_for_any_real_coefficient(
            c in -10_000.0f32..10_000.0,
            bit in any::<bool>(),
            k in 1.0f32..200.0,
        ) {
            let embedded = embed_bit(c, bit, k);
            prop_assert_eq!(guess_bit(embedded, k), bit);
        }

        #[test]
        fn guess_is_robust_to_noise_under_quarter_step(
            c in -1_000.0f32..1_000.0,
            bit in any::<bool>(),
            k in 4.0f32..200.0,
            noise_frac in -0.2499f32..0.2499,
        ) {
            let embedded = embed_bit(c, bit, k);
            let noisy = embedded + noise_frac * k;
            prop_assert_eq!(guess_bit(noisy, k), bit);
        }
    }
}
