//! Integration coverage for the Reed-Solomon correction radius
//! (`spec.md` §8, scenario 4).

use imarqd_ecc::{ecc_decode, ecc_encode};
use proptest::prelude::*;

fn corrupt(codeword: &mut [u8], positions: &[usize]) {
    for &pos in positions {
        codeword[pos] ^= 0xA5;
    }
}

#[test]
fn all_supported_parity_lengths_round_trip_clean() {
    let msg = [9u8; 32];
    for parity in [2u8, 8, 16, 24, 32, 48, 64] {
        let codeword = ecc_encode(&msg, parity).unwrap();
        assert_eq!(codeword.len(), 32 + parity as usize);
        let (decoded, ok) = ecc_decode(&codeword, parity).unwrap();
        assert!(ok, "parity {parity} should decode cleanly");
        assert_eq!(decoded, msg);
    }
}

proptest! {
    #[test]
    fn corrects_within_radius_for_varied_messages(seed: u8, parity_idx in 0usize..4) {
        let parity = [8u8, 16, 32, 48][parity_idx];
        let msg: [u8; 32] = core::array::from_fn(|i| seed.wrapping_add(i as u8));
        let mut codeword = ecc_encode(&msg, parity).unwrap();

        let t = (parity / 2) as usize;
        let positions: Vec<usize> = (0..t).map(|i| (i * 2) % codeword.len()).collect();
        corrupt(&mut codeword, &positions);

        let (decoded, ok) = ecc_decode(&codeword, parity).unwrap();
        prop_assert!(ok);
        prop_assert_eq!(decoded, msg);
    }
}
