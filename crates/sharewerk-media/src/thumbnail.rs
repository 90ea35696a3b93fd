// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JPEG previews for shared images and videos, written into the cache
// directory. Generation is best-effort: any failure leaves the descriptor
// without a thumbnail.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use sharewerk_bridge::{FrameRequest, PlatformAdapter};
use sharewerk_core::config::ReceiverConfig;
use sharewerk_core::error::{Result, ShareError};
use sharewerk_core::types::ContentHandle;
use tracing::{debug, instrument, warn};

use crate::image::ImageProcessor;

const IMAGE_PREFIX: &str = "thumb";
const VIDEO_PREFIX: &str = "thumb_video";

/// Writes bounded JPEG previews into a cache directory.
#[derive(Debug, Clone)]
pub struct ThumbnailGenerator {
    cache_dir: PathBuf,
    bound: u32,
    quality: u8,
    video_offset_ms: u64,
}

impl ThumbnailGenerator {
    pub fn new(config: &ReceiverConfig) -> Self {
        Self {
            cache_dir: config.cache_dir.clone(),
            bound: config.thumbnail_size,
            quality: config.jpeg_quality,
            video_offset_ms: config.video_frame_offset_ms,
        }
    }

    /// Preview for the image behind `handle`, or `None` if it cannot be
    /// decoded or written.
    #[instrument(skip_all, fields(handle = %handle))]
    pub fn generate_image(
        &self,
        adapter: &dyn PlatformAdapter,
        handle: &ContentHandle,
    ) -> Option<PathBuf> {
        let result = adapter
            .decode_image(handle)
            .and_then(|img| self.write_thumbnail(img, IMAGE_PREFIX));
        self.settle(result)
    }

    /// Preview for a video already copied to `video`.
    #[instrument(skip_all, fields(path = %video.display()))]
    pub fn generate_video(&self, adapter: &dyn PlatformAdapter, video: &Path) -> Option<PathBuf> {
        let request = FrameRequest {
            bound: self.bound,
            offset_ms: self.video_offset_ms,
        };
        let result = adapter
            .extract_video_frame(video, request)
            .and_then(|frame| self.write_thumbnail(frame, VIDEO_PREFIX));
        self.settle(result)
    }

    fn settle(&self, result: Result<PathBuf>) -> Option<PathBuf> {
        match result {
            Ok(path) => Some(path),
            Err(ShareError::PlatformUnavailable) => {
                debug!("thumbnail not supported on this platform");
                None
            }
            Err(e) => {
                warn!(error = %e, "thumbnail generation failed");
                None
            }
        }
    }

    /// Scale, encode and write. The decoded frame is consumed here, so only
    /// the encoded bytes outlive the scaling step.
    fn write_thumbnail(&self, img: DynamicImage, prefix: &str) -> Result<PathBuf> {
        let jpeg = ImageProcessor::from_dynamic(img)
            .scale_to_bound(self.bound)
            .to_jpeg_bytes(self.quality)?;

        std::fs::create_dir_all(&self.cache_dir)?;
        let path = self.cache_dir.join(thumbnail_name(prefix));
        std::fs::write(&path, &jpeg)?;
        debug!(path = %path.display(), bytes = jpeg.len(), "thumbnail written");
        Ok(path)
    }
}

/// `<prefix>_<millis>_<short id>.jpg`.
fn thumbnail_name(prefix: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("{prefix}_{millis}_{}.jpg", &id[..8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use sharewerk_bridge::{NativeContent, NativeMedia};
    use sharewerk_core::types::HandleMetadata;

    /// Serves one fixed image as both still and video frame.
    struct FixedFrame(Option<DynamicImage>);

    impl PlatformAdapter for FixedFrame {
        fn platform_name(&self) -> &str {
            "test"
        }
    }

    impl NativeContent for FixedFrame {
        fn resolve_handle(&self, _handle: &ContentHandle) -> Result<HandleMetadata> {
            Ok(HandleMetadata::default())
        }

        fn copy_bytes(&self, _handle: &ContentHandle, _dest: &Path) -> Result<u64> {
            Ok(0)
        }
    }

    impl NativeMedia for FixedFrame {
        fn decode_image(&self, _handle: &ContentHandle) -> Result<DynamicImage> {
            self.0
                .clone()
                .ok_or_else(|| ShareError::ImageError("undecodable".into()))
        }

        fn extract_video_frame(&self, _video: &Path, _request: FrameRequest) -> Result<DynamicImage> {
            self.0
                .clone()
                .ok_or_else(|| ShareError::VideoFrame("no frame".into()))
        }
    }

    fn generator(dir: &Path) -> ThumbnailGenerator {
        ThumbnailGenerator::new(&ReceiverConfig::with_cache_dir(dir.join("cache")))
    }

    fn frame(w: u32, h: u32) -> FixedFrame {
        FixedFrame(Some(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            w,
            h,
            Rgb([40, 80, 160]),
        ))))
    }

    #[test]
    fn image_thumbnail_is_bounded_jpeg() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = generator(dir.path())
            .generate_image(&frame(2048, 1024), &ContentHandle::new("/photo.png"))
            .expect("thumbnail");

        let name = path.file_name().and_then(|n| n.to_str()).expect("name");
        assert!(name.starts_with("thumb_") && !name.starts_with("thumb_video_"));
        assert!(name.ends_with(".jpg"));

        let thumb = image::open(&path).expect("open thumbnail");
        assert_eq!((thumb.width(), thumb.height()), (512, 256));
    }

    #[test]
    fn video_thumbnail_uses_same_scaling() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = generator(dir.path())
            .generate_video(&frame(1280, 720), Path::new("/clip.mp4"))
            .expect("thumbnail");

        let name = path.file_name().and_then(|n| n.to_str()).expect("name");
        assert!(name.starts_with("thumb_video_"));

        let thumb = image::open(&path).expect("open thumbnail");
        assert_eq!((thumb.width(), thumb.height()), (512, 288));
    }

    #[test]
    fn small_image_keeps_its_size() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = generator(dir.path())
            .generate_image(&frame(64, 48), &ContentHandle::new("/icon.png"))
            .expect("thumbnail");

        let thumb = image::open(&path).expect("open thumbnail");
        assert_eq!((thumb.width(), thumb.height()), (64, 48));
    }

    #[test]
    fn decode_failure_yields_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let thumbs = generator(dir.path());
        assert!(
            thumbs.generate_image(&FixedFrame(None), &ContentHandle::new("/broken.jpg"))
                .is_none()
        );
        assert!(thumbs.generate_video(&FixedFrame(None), Path::new("/broken.mp4")).is_none());
    }

    #[test]
    fn names_are_unique_within_a_millisecond() {
        let a = thumbnail_name(IMAGE_PREFIX);
        let b = thumbnail_name(IMAGE_PREFIX);
        assert_ne!(a, b);
    }
}
