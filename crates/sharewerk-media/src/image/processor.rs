// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — bounded downscale and JPEG encode for previews.
// Operates on in-memory images using the `image` crate.

use image::DynamicImage;
use image::imageops::FilterType;
use sharewerk_core::error::ShareError;
use tracing::{debug, instrument};

/// Target size for fitting `width` x `height` inside a `bound` x `bound`
/// square.
///
/// Images that already fit are returned unchanged. Otherwise the longer side
/// becomes exactly `bound` and the shorter side is scaled by the same factor,
/// rounded to nearest and never below 1.
pub fn scaled_dimensions(width: u32, height: u32, bound: u32) -> (u32, u32) {
    let bound = bound.max(1);
    let larger = width.max(height);
    if larger <= bound {
        return (width, height);
    }

    let scale = |side: u32| -> u32 {
        let scaled = (u64::from(side) * u64::from(bound) + u64::from(larger) / 2) / u64::from(larger);
        // scaled <= bound, so the cast cannot truncate
        (scaled as u32).max(1)
    };

    if width >= height {
        (bound, scale(height))
    } else {
        (scale(width), bound)
    }
}

/// Preview pipeline over a single decoded image.
///
/// Methods consume `self` and return a new processor, so calls chain:
///
/// ```ignore
/// let jpeg = ImageProcessor::from_dynamic(frame)
///     .scale_to_bound(512)
///     .to_jpeg_bytes(85)?;
/// ```
pub struct ImageProcessor {
    image: DynamicImage,
}

impl ImageProcessor {
    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Transformations ------------------------------------------------------

    /// Downscale to fit within `bound` x `bound` using bilinear filtering.
    /// Never upscales.
    #[instrument(skip(self), fields(bound))]
    pub fn scale_to_bound(self, bound: u32) -> Self {
        let (from_w, from_h) = (self.image.width(), self.image.height());
        let (to_w, to_h) = scaled_dimensions(from_w, from_h, bound);
        if (to_w, to_h) == (from_w, from_h) {
            debug!(from_w, from_h, "Image already within bound");
            return self;
        }
        let resized = self.image.resize_exact(to_w, to_h, FilterType::Triangle);
        debug!(from_w, from_h, to_w, to_h, "Scaled image");
        Self { image: resized }
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as JPEG bytes with the given quality (1-100).
    /// Alpha is dropped.
    pub fn to_jpeg_bytes(&self, quality: u8) -> Result<Vec<u8>, ShareError> {
        let mut buffer = Vec::new();
        let rgb = self.image.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
        rgb.write_with_encoder(encoder)
            .map_err(|err| ShareError::ImageError(format!("JPEG encoding failed: {}", err)))?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    #[test]
    fn small_images_are_not_upscaled() {
        assert_eq!(scaled_dimensions(300, 200, 512), (300, 200));
        assert_eq!(scaled_dimensions(512, 512, 512), (512, 512));
    }

    #[test]
    fn landscape_longer_side_hits_bound() {
        assert_eq!(scaled_dimensions(4000, 3000, 512), (512, 384));
        assert_eq!(scaled_dimensions(1920, 1080, 512), (512, 288));
    }

    #[test]
    fn portrait_longer_side_hits_bound() {
        assert_eq!(scaled_dimensions(3000, 4000, 512), (384, 512));
    }

    #[test]
    fn extreme_aspect_keeps_one_pixel() {
        assert_eq!(scaled_dimensions(10_000, 3, 512), (512, 1));
        assert_eq!(scaled_dimensions(1, 9_000, 100), (1, 100));
    }

    #[test]
    fn aspect_ratio_is_preserved_within_rounding() {
        for (w, h) in [(1000, 777), (4032, 3024), (641, 480), (513, 1)] {
            let (rw, rh) = scaled_dimensions(w, h, 512);
            assert_eq!(rw.max(rh), 512, "{w}x{h}");
            let expected = f64::from(w) / f64::from(h);
            let got = f64::from(rw) / f64::from(rh);
            // one pixel of rounding on the shorter side
            let shorter = f64::from(rw.min(rh));
            assert!((expected - got).abs() / expected <= 1.0 / shorter + 1e-9, "{w}x{h}");
        }
    }

    #[test]
    fn scale_then_encode_jpeg() {
        let img = RgbaImage::from_pixel(1024, 256, Rgba([10, 200, 30, 128]));
        let jpeg = ImageProcessor::from_dynamic(DynamicImage::ImageRgba8(img))
            .scale_to_bound(512)
            .to_jpeg_bytes(85)
            .expect("encode");

        assert_eq!(image::guess_format(&jpeg).expect("format"), ImageFormat::Jpeg);
        let decoded = image::load_from_memory(&jpeg).expect("decode");
        assert_eq!((decoded.width(), decoded.height()), (512, 128));
    }
}
