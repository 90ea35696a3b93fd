// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory platform adapter for pipeline tests.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use image::{DynamicImage, Rgb, RgbImage};
use sharewerk_bridge::{FrameRequest, NativeContent, NativeMedia, PlatformAdapter};
use sharewerk_core::config::ReceiverConfig;
use sharewerk_core::error::{Result, ShareError};
use sharewerk_core::types::{ContentHandle, HandleMetadata};

/// One fake provider entry.
#[derive(Clone, Default)]
pub struct FakeContent {
    pub meta: HandleMetadata,
    /// `None` makes `copy_bytes` fail.
    pub bytes: Option<Vec<u8>>,
    /// Returned by `decode_image` and as the video frame.
    pub pixels: Option<(u32, u32)>,
}

impl FakeContent {
    pub fn file(name: &str, mime: &str, bytes: &[u8]) -> Self {
        Self {
            meta: HandleMetadata {
                display_name: Some(name.into()),
                size_bytes: Some(bytes.len() as u64),
                mime_type: Some(mime.into()),
            },
            bytes: Some(bytes.to_vec()),
            pixels: None,
        }
    }

    pub fn image(name: &str, width: u32, height: u32) -> Self {
        Self {
            pixels: Some((width, height)),
            ..Self::file(name, "image/png", b"png bytes")
        }
    }

    pub fn video(name: &str, width: u32, height: u32) -> Self {
        Self {
            pixels: Some((width, height)),
            ..Self::file(name, "video/mp4", b"mp4 bytes")
        }
    }

    pub fn unreadable(name: &str, mime: &str) -> Self {
        Self {
            bytes: None,
            ..Self::file(name, mime, b"")
        }
    }
}

/// Adapter answering from a fixed table keyed by handle string. Video
/// frames are looked up by the file name of the copied video.
#[derive(Default)]
pub struct FakeAdapter {
    entries: HashMap<String, FakeContent>,
}

impl FakeAdapter {
    pub fn with(mut self, handle: &str, content: FakeContent) -> Self {
        self.entries.insert(handle.to_owned(), content);
        self
    }

    pub fn shared(self) -> Arc<dyn PlatformAdapter> {
        Arc::new(self)
    }

    fn entry(&self, handle: &ContentHandle) -> Result<&FakeContent> {
        self.entries
            .get(handle.as_str())
            .ok_or_else(|| ShareError::Resolution(format!("unknown handle {handle}")))
    }
}

fn solid(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([200, 120, 40])))
}

impl PlatformAdapter for FakeAdapter {
    fn platform_name(&self) -> &str {
        "fake"
    }
}

impl NativeContent for FakeAdapter {
    fn resolve_handle(&self, handle: &ContentHandle) -> Result<HandleMetadata> {
        Ok(self.entry(handle)?.meta.clone())
    }

    fn copy_bytes(&self, handle: &ContentHandle, dest: &Path) -> Result<u64> {
        let bytes = self
            .entry(handle)?
            .bytes
            .as_ref()
            .ok_or_else(|| ShareError::Copy(format!("permission denied: {handle}")))?;
        std::fs::write(dest, bytes)?;
        Ok(bytes.len() as u64)
    }
}

impl NativeMedia for FakeAdapter {
    fn decode_image(&self, handle: &ContentHandle) -> Result<DynamicImage> {
        let (w, h) = self
            .entry(handle)?
            .pixels
            .ok_or_else(|| ShareError::ImageError("not an image".into()))?;
        Ok(solid(w, h))
    }

    fn extract_video_frame(&self, video: &Path, _request: FrameRequest) -> Result<DynamicImage> {
        let name = video.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        self.entries
            .values()
            .find(|c| c.meta.display_name.as_deref() == Some(name))
            .and_then(|c| c.pixels)
            .map(|(w, h)| solid(w, h))
            .ok_or_else(|| ShareError::VideoFrame("no frame".into()))
    }
}

/// Config rooted in a temp dir.
pub fn config(dir: &Path) -> ReceiverConfig {
    ReceiverConfig::with_cache_dir(dir.join("cache"))
}
