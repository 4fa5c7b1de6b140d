//! The 8×8 block DCT engine (`spec.md` §4.2).
//!
//! Padding, block iteration and the separable type-II DCT/inverse-DCT. No
//! numeric array crate is pulled in for this — planes are flat `Vec<f32>`
//! with an explicit stride, and blocks are `[[f32; 8]; 8]` scratch buffers
//! copied in and out of the plane.

use std::f64::consts::PI;
use std::sync::OnceLock;

/// Block edge length used throughout the codec.
pub const BLOCK_SIZE: usize = imarqd_proto::BLOCK_SIZE;

/// A zero-padded plane, with the original (pre-pad) dimensions recorded so
/// the pad can be removed identically after processing.
#[derive(Debug, Clone)]
pub struct PaddedPlane {
    /// Row-major samples, `padded_width * padded_height` long.
    pub data: Vec<f32>,
    /// Width after padding to a multiple of [`BLOCK_SIZE`].
    pub padded_width: usize,
    /// Height after padding to a multiple of [`BLOCK_SIZE`].
    pub padded_height: usize,
    /// Original width before padding.
    pub width: usize,
    /// Original height before padding.
    pub height: usize,
}

fn pad_up(value: usize, block: usize) -> usize {
    let rem = value % block;
    if rem == 0 { value } else { value + (block - rem) }
}

/// Pads `plane` to a multiple of [`BLOCK_SIZE`] with zero rows/columns
/// appended at the bottom/right.
#[must_use]
pub fn pad_to_block_multiple(plane: &[f32], width: usize, height: usize) -> PaddedPlane {
    let padded_width = pad_up(width, BLOCK_SIZE);
    let padded_height = pad_up(height, BLOCK_SIZE);

    let mut data = vec![0.0f32; padded_width * padded_height];
    for row in 0..height {
        let src_start = row * width;
        let dst_start = row * padded_width;
        data[dst_start..dst_start + width].copy_from_slice(&plane[src_start..src_start + width]);
    }

    PaddedPlane { data, padded_width, padded_height, width, height }
}

/// Removes the padding added by [`pad_to_block_multiple`], returning a plane
/// of the original `width * height`.
#[must_use]
pub fn unpad(padded: &PaddedPlane) -> Vec<f32> {
    let mut out = vec![0.0f32; padded.width * padded.height];
    for row in 0..padded.height {
        let src_start = row * padded.padded_width;
        let dst_start = row * padded.width;
        out[dst_start..dst_start + padded.width]
            .copy_from_slice(&padded.data[src_start..src_start + padded.width]);
    }
    out
}

/// Number of 8×8 blocks along each axis of a padded plane.
#[must_use]
pub fn block_grid(padded: &PaddedPlane) -> (usize, usize) {
    (padded.padded_height / BLOCK_SIZE, padded.padded_width / BLOCK_SIZE)
}

/// Copies one 8×8 block out of a padded plane, at block row/col `(br, bc)`.
#[must_use]
pub fn read_block(padded: &PaddedPlane, br: usize, bc: usize) -> [[f32; BLOCK_SIZE]; BLOCK_SIZE] {
    let mut block = [[0.0f32; BLOCK_SIZE]; BLOCK_SIZE];
    let row0 = br * BLOCK_SIZE;
    let col0 = bc * BLOCK_SIZE;
    for r in 0..BLOCK_SIZE {
        let src = (row0 + r) * padded.padded_width + col0;
        block[r].copy_from_slice(&padded.data[src..src + BLOCK_SIZE]);
    }
    block
}

/// Writes one 8×8 block back into a padded plane, at block row/col
/// `(br, bc)`.
pub fn write_block(padded: &mut PaddedPlane, br: usize, bc: usize, block: &[[f32; BLOCK_SIZE]; BLOCK_SIZE]) {
    let row0 = br * BLOCK_SIZE;
    let col0 = bc * BLOCK_SIZE;
    let width = padded.padded_width;
    for r in 0..BLOCK_SIZE {
        let dst = (row0 + r) * width + col0;
        padded.data[dst..dst + BLOCK_SIZE].copy_from_slice(&block[r]);
    }
}

/// Precomputed `cos((2x+1) u pi / 16)` table and per-frequency alpha
/// normalization, shared by forward and inverse transforms.
struct DctTables {
    cos: [[f64; BLOCK_SIZE]; BLOCK_SIZE],
    alpha: [f64; BLOCK_SIZE],
}

fn tables() -> &'static DctTables {
    static TABLES: OnceLock<DctTables> = OnceLock::new();
    TABLES.get_or_init(|| {
        let n = BLOCK_SIZE as f64;
        let mut cos = [[0.0f64; BLOCK_SIZE]; BLOCK_SIZE];
        for (x, row) in cos.iter_mut().enumerate() {
            for (u, slot) in row.iter_mut().enumerate() {
                *slot = (PI * (2.0 * x as f64 + 1.0) * u as f64 / (2.0 * n)).cos();
            }
        }
        let mut alpha = [0.0f64; BLOCK_SIZE];
        for (u, slot) in alpha.iter_mut().enumerate() {
            *slot = if u == 0 { (1.0 / n).sqrt() } else { (2.0 / n).sqrt() };
        }
        DctTables { cos, alpha }
    })
}

/// Forward separable 8×8 type-II DCT, in place.
pub fn forward_dct8x8(block: &mut [[f32; BLOCK_SIZE]; BLOCK_SIZE]) {
    let t = tables();
    let mut tmp = [[0.0f64; BLOCK_SIZE]; BLOCK_SIZE];

    // Rows: spatial -> frequency along columns.
    for row in 0..BLOCK_SIZE {
        for u in 0..BLOCK_SIZE {
            let mut sum = 0.0;
            for x in 0..BLOCK_SIZE {
                sum += f64::from(block[row][x]) * t.cos[x][u];
            }
            tmp[row][u] = t.alpha[u] * sum;
        }
    }

    // Columns: frequency -> frequency along rows.
    for col in 0..BLOCK_SIZE {
        for v in 0..BLOCK_SIZE {
            let mut sum = 0.0;
            for y in 0..BLOCK_SIZE {
                sum += tmp[y][col] * t.cos[y][v];
            }
            block[v][col] = (t.alpha[v] * sum) as f32;
        }
    }
}

/// Inverse separable 8×8 type-II DCT, in place.
pub fn inverse_dct8x8(block: &mut [[f32; BLOCK_SIZE]; BLOCK_SIZE]) {
    let t = tables();
    let mut tmp = [[0.0f64; BLOCK_SIZE]; BLOCK_SIZE];

    for col in 0..BLOCK_SIZE {
        for y in 0..BLOCK_SIZE {
            let mut sum = 0.0;
            for v in 0..BLOCK_SIZE {
                sum += t.alpha[v] * f64::from(block[v][col]) * t.cos[y][v];
            }
            tmp[y][col] = sum;
        }
    }

    for row in 0..BLOCK_SIZE {
        for x in 0..BLOCK_SIZE {
            let mut sum = 0.0;
            for u in 0..BLOCK_SIZE {
                sum += t.alpha[u] * tmp[row][u] * t.cos[x][u];
            }
            block[row][x] = sum as f32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dct_round_trips_within_float_tolerance() {
        let mut block = [[0.0f32; BLOCK_SIZE]; BLOCK_SIZE];
        for (r, row) in block.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = ((r * 37 + c * 11) % 255) as f32;
            }
        }
        let original = block;
        forward_dct8x8(&mut block);
        inverse_dct8x8(&mut block);
        for r in 0..BLOCK_SIZE {
            for c in 0..BLOCK_SIZE {
                assert!((block[r][c] - original[r][c]).abs() < 1e-3, "mismatch at {r},{c}");
            }
        }
    }

    #[test]
    fn pad_then_unpad_recovers_original() {
        let plane: Vec<f32> = (0..(13 * 9)).map(|i| i as f32).collect();
        let padded = pad_to_block_multiple(&plane, 9, 13);
        assert_eq!(padded.padded_width, 16);
        assert_eq!(padded.padded_height, 16);
        let recovered = unpad(&padded);
        assert_eq!(recovered, plane);
    }

    #[test]
    fn block_read_write_round_trips() {
        let plane = vec![0.0f32; BLOCK_SIZE * BLOCK_SIZE];
        let mut padded = pad_to_block_multiple(&plane, BLOCK_SIZE, BLOCK_SIZE);
        let mut block = read_block(&padded, 0, 0);
        block[3][4] = 42.0;
        write_block(&mut padded, 0, 0, &block);
        assert_eq!(padded.data[3 * BLOCK_SIZE + 4], 42.0);
    }
}
