//! The capacity-aware repetition/majority-vote inner code (`spec.md` §4.4).

/// Computes the effective repetition factor `R = max(1, min(R_req,
/// ⌊B / L_bits⌋))`, given the requested repetition, block count `B`, and
/// payload length `L_bits`.
///
/// Identical on embed and extract given the same `(B, L_bits, R_req)`,
/// satisfying the determinism law in `spec.md` §8.
#[must_use]
pub fn effective_repetition(requested: u32, block_count: usize, payload_bits: usize) -> u32 {
    let cap = if payload_bits == 0 { block_count } else { block_count / payload_bits };
    let cap = u32::try_from(cap).unwrap_or(u32::MAX);
    requested.min(cap).max(1)
}

/// Computes the number of effectively-written bit slots `N = min(⌈B/R⌉,
/// L_bits)`.
#[must_use]
pub fn written_slots(block_count: usize, payload_bits: usize, repetition: u32) -> usize {
    let r = repetition as usize;
    let n = block_count.div_ceil(r.max(1));
    n.min(payload_bits)
}

/// Cyclically tiles (if shorter) or truncates (if longer) `bits` to exactly
/// `n` bits.
#[must_use]
pub fn tile_to_length(bits: &[bool], n: usize) -> Vec<bool> {
    if bits.is_empty() {
        return vec![false; n];
    }
    (0..n).map(|i| bits[i % bits.len()]).collect()
}

/// Majority vote over one slot's votes. Empty slots decode to `false`; ties
/// resolve to `false`.
#[must_use]
pub fn majority(votes: &[bool]) -> bool {
    if votes.is_empty() {
        return false;
    }
    let true_count = votes.iter().filter(|&&v| v).count();
    true_count * 2 > votes.len()
}

/// Right-pads (with `false`) or truncates `bits` to exactly `len`.
#[must_use]
pub fn pad_or_truncate(bits: &[bool], len: usize) -> Vec<bool> {
    let mut out = bits.to_vec();
    out.resize(len, false);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn capacity_clamp_matches_scenario_3() {
        let r = effective_repetition(20, 64, 448);
        assert_eq!(r, 1);
        let n = written_slots(64, 448, r);
        assert_eq!(n, 64);
    }

    #[test]
    fn baseline_repetition_is_unclamped_when_capacity_allows() {
        let r = effective_repetition(120, 100_000, 256);
        assert_eq!(r, 120);
    }

    #[test]
    fn tile_to_length_cycles_short_input() {
        let bits = [true, false, true];
        let tiled = tile_to_length(&bits, 7);
        assert_eq!(tiled, vec![true, false, true, true, false, true, true]);
    }

    #[test]
    fn majority_breaks_ties_to_false() {
        assert!(!majority(&[true, false]));
        assert!(majority(&[true, true, false]));
        assert!(!majority(&[]));
    }

    proptest! {
        #[test]
        fn effective_repetition_and_written_slots_are_deterministic(
            requested in 1u32..500,
            block_count in 1usize..100_000,
            payload_bits in 1usize..2_000,
        ) {
            let r1 = effective_repetition(requested, block_count, payload_bits);
            let r2 = effective_repetition(requested, block_count, payload_bits);
            prop_assert_eq!(r1, r2);
            let n1 = written_slots(block_count, payload_bits, r1);
            let n2 = written_slots(block_count, payload_bits, r2);
            prop_assert_eq!(n1, n2);
            prop_assert!(r1 >= 1);
            prop_assert!(n1 <= payload_bits);
        }
    }
}
