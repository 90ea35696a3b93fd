// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// sharewerk-media — Preview generation for shared content.
//
// Decoding goes through the platform adapter; scaling and JPEG encoding are
// done here so every platform produces the same thumbnails.

pub mod image;
pub mod thumbnail;

pub use self::image::processor::{ImageProcessor, scaled_dimensions};
pub use thumbnail::ThumbnailGenerator;
