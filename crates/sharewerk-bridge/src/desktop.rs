// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop/CI adapter. Handles plain paths and `file://` handles; provider
// handles (`content://`) and video frame grabbing need a mobile OS.

use std::path::Path;

use image::DynamicImage;
use sharewerk_core::error::{Result, ShareError};
use sharewerk_core::types::{ContentHandle, HandleMetadata};

use crate::local;
use crate::traits::*;

/// Adapter returned on non-mobile platforms.
pub struct DesktopAdapter;

impl PlatformAdapter for DesktopAdapter {
    fn platform_name(&self) -> &str {
        "Desktop"
    }
}

impl NativeContent for DesktopAdapter {
    fn resolve_handle(&self, handle: &ContentHandle) -> Result<HandleMetadata> {
        if handle.is_content() {
            tracing::warn!(%handle, "content provider handle on desktop");
            return Err(ShareError::PlatformUnavailable);
        }
        local::local_metadata(&local::local_path(handle)?)
    }

    fn copy_bytes(&self, handle: &ContentHandle, dest: &Path) -> Result<u64> {
        if handle.is_content() {
            return Err(ShareError::PlatformUnavailable);
        }
        local::copy_local(&local::local_path(handle)?, dest)
    }
}

impl NativeMedia for DesktopAdapter {
    fn decode_image(&self, handle: &ContentHandle) -> Result<DynamicImage> {
        local::open_local_image(&local::local_path(handle)?)
    }

    fn extract_video_frame(&self, video: &Path, _request: FrameRequest) -> Result<DynamicImage> {
        tracing::debug!(path = %video.display(), "no video decoder on desktop");
        Err(ShareError::PlatformUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn resolves_plain_path_and_file_url() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").expect("write");

        let plain = ContentHandle::new(path.to_string_lossy());
        let url = ContentHandle::new(format!("file://{}", path.display()));

        for handle in [plain, url] {
            let meta = DesktopAdapter.resolve_handle(&handle).expect("resolve");
            assert_eq!(meta.size_bytes, Some(5));
        }
    }

    #[test]
    fn content_handles_are_unavailable() {
        let handle = ContentHandle::new("content://media/external/images/42");
        assert!(matches!(
            DesktopAdapter.resolve_handle(&handle),
            Err(ShareError::PlatformUnavailable)
        ));
    }

    #[test]
    fn missing_file_is_resolution_error() {
        let handle = ContentHandle::new("/definitely/not/here.png");
        assert!(matches!(
            DesktopAdapter.resolve_handle(&handle),
            Err(ShareError::Resolution(_))
        ));
    }

    #[test]
    fn decodes_png_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("red.png");
        RgbImage::from_pixel(4, 3, Rgb([255, 0, 0]))
            .save(&path)
            .expect("save png");

        let img = DesktopAdapter
            .decode_image(&ContentHandle::new(path.to_string_lossy()))
            .expect("decode");
        assert_eq!((img.width(), img.height()), (4, 3));
    }

    #[test]
    fn video_frames_are_unavailable() {
        let request = FrameRequest {
            bound: 512,
            offset_ms: 1000,
        };
        assert!(matches!(
            DesktopAdapter.extract_video_frame(Path::new("/tmp/clip.mp4"), request),
            Err(ShareError::PlatformUnavailable)
        ));
    }
}
