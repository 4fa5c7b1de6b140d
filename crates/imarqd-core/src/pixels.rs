//! Pixel I/O and pre-normalization primitives (`spec.md` §4.1).

use std::io::Cursor;
use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader, RgbImage};

use crate::error::CoreError;

/// An interleaved BGR float image, values in `[0, 255]`.
#[derive(Debug, Clone)]
pub struct BgrImage {
    /// Interleaved `b, g, r` samples, row-major, length `width * height * 3`.
    pub data: Vec<f32>,
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
}

impl BgrImage {
    /// Loads an image file into a BGR float buffer.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let img = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| CoreError::UnreadableMedia(e.to_string()))?;
        Ok(Self::from_dynamic(&img))
    }

    /// Builds a `BgrImage` from a decoded [`DynamicImage`].
    #[must_use]
    pub fn from_dynamic(img: &DynamicImage) -> Self {
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let mut data = vec![0.0f32; width as usize * height as usize * 3];
        for (i, px) in rgb.pixels().enumerate() {
            data[i * 3] = f32::from(px.0[2]);
            data[i * 3 + 1] = f32::from(px.0[1]);
            data[i * 3 + 2] = f32::from(px.0[0]);
        }
        Self { data, width: width as usize, height: height as usize }
    }

    /// Converts back to an owned [`RgbImage`], clipping and rounding each
    /// sample to 8-bit (`spec.md` §4.1: "save path clips... and rounds").
    #[must_use]
    pub fn to_rgb_image(&self) -> RgbImage {
        let mut out = RgbImage::new(self.width as u32, self.height as u32);
        for (i, px) in out.pixels_mut().enumerate() {
            let b = crate::color::clip_round_u8(self.data[i * 3]);
            let g = crate::color::clip_round_u8(self.data[i * 3 + 1]);
            let r = crate::color::clip_round_u8(self.data[i * 3 + 2]);
            *px = image::Rgb([r, g, b]);
        }
        out
    }

    /// Saves the image as a lossless 8-bit PNG.
    pub fn save_png(&self, path: &Path) -> Result<(), CoreError> {
        self.to_rgb_image().save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

/// Downsamples (never upsamples) `img` via Lanczos so `max(width, height) ==
/// long_edge`. Images already at or below `long_edge` are returned
/// unchanged.
#[must_use]
pub fn resize_long_edge(img: &BgrImage, long_edge: u32) -> BgrImage {
    let max_dim = img.width.max(img.height) as u32;
    if max_dim <= long_edge {
        return img.clone();
    }

    let scale = f64::from(long_edge) / f64::from(max_dim);
    let new_w = ((img.width as f64) * scale).round().max(1.0) as u32;
    let new_h = ((img.height as f64) * scale).round().max(1.0) as u32;

    let rgb = img.to_rgb_image();
    let resized = image::imageops::resize(&rgb, new_w, new_h, FilterType::Lanczos3);
    BgrImage::from_dynamic(&DynamicImage::ImageRgb8(resized))
}

/// Crops symmetrically so both dimensions become multiples of `modulus`.
#[must_use]
pub fn center_crop_to_mod(img: &BgrImage, modulus: u32) -> BgrImage {
    let target_w = (img.width as u32 / modulus) * modulus;
    let target_h = (img.height as u32 / modulus) * modulus;
    if target_w == 0 || target_h == 0 || (target_w == img.width as u32 && target_h == img.height as u32) {
        return img.clone();
    }

    let off_x = (img.width as u32 - target_w) / 2;
    let off_y = (img.height as u32 - target_h) / 2;

    let mut data = vec![0.0f32; target_w as usize * target_h as usize * 3];
    for row in 0..target_h as usize {
        for col in 0..target_w as usize {
            let src_row = row + off_y as usize;
            let src_col = col + off_x as usize;
            let src_idx = (src_row * img.width + src_col) * 3;
            let dst_idx = (row * target_w as usize + col) * 3;
            data[dst_idx..dst_idx + 3].copy_from_slice(&img.data[src_idx..src_idx + 3]);
        }
    }

    BgrImage { data, width: target_w as usize, height: target_h as usize }
}

/// Encodes then decodes the image as JPEG at the given quality, simulating
/// lossy recompression in-memory.
pub fn jpeg_roundtrip(img: &BgrImage, quality: u8) -> Result<BgrImage, CoreError> {
    let rgb = img.to_rgb_image();
    let mut buf = Vec::new();
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality);
    encoder
        .encode(rgb.as_raw(), rgb.width(), rgb.height(), image::ColorType::Rgb8.into())
        .map_err(CoreError::Image)?;

    let decoded = ImageReader::with_format(Cursor::new(buf), ImageFormat::Jpeg)
        .decode()
        .map_err(|e| CoreError::UnreadableMedia(e.to_string()))?;
    Ok(BgrImage::from_dynamic(&decoded))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: usize, height: usize) -> BgrImage {
        let mut data = vec![0.0f32; width * height * 3];
        for row in 0..height {
            for col in 0..width {
                let idx = (row * width + col) * 3;
                data[idx] = (col % 256) as f32;
                data[idx + 1] = (row % 256) as f32;
                data[idx + 2] = ((row + col) % 256) as f32;
            }
        }
        BgrImage { data, width, height }
    }

    #[test]
    fn resize_long_edge_never_upsamples() {
        let img = gradient(32, 32);
        let resized = resize_long_edge(&img, 64);
        assert_eq!(resized.width, 32);
        assert_eq!(resized.height, 32);
    }

    #[test]
    fn resize_long_edge_downsamples_to_target() {
        let img = gradient(128, 64);
        let resized = resize_long_edge(&img, 64);
        assert_eq!(resized.width.max(resized.height), 64);
    }

    #[test]
    fn center_crop_to_mod_reduces_to_multiples() {
        let img = gradient(70, 65);
        let cropped = center_crop_to_mod(&img, 16);
        assert_eq!(cropped.width % 16, 0);
        assert_eq!(cropped.height % 16, 0);
    }

    #[test]
    fn jpeg_roundtrip_preserves_dimensions() {
        let img = gradient(24, 24);
        let round_tripped = jpeg_roundtrip(&img, 75).unwrap();
        assert_eq!(round_tripped.width, img.width);
        assert_eq!(round_tripped.height, img.height);
    }
}
