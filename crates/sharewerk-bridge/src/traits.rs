// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the OS calls the share pipeline
// needs.
//
// Everything deterministic (classification, scaling, event assembly) lives
// above this layer and is shared by every platform. Implementations only
// touch the OS.

use std::path::Path;

use image::DynamicImage;
use sharewerk_core::error::Result;
use sharewerk_core::types::{ContentHandle, HandleMetadata};

/// Unified adapter that groups the native capabilities.
///
/// Adapters are shared across the blocking tasks that resolve attachments
/// in parallel, hence `Send + Sync`.
pub trait PlatformAdapter: NativeContent + NativeMedia + Send + Sync {
    /// Human-readable platform name (e.g. "iOS", "Android").
    fn platform_name(&self) -> &str;
}

/// Access to shared content behind an opaque handle.
pub trait NativeContent {
    /// Query display name, size and explicit content type for a handle.
    ///
    /// Fields the provider does not expose come back as `None`; an `Err`
    /// means the handle could not be queried at all.
    fn resolve_handle(&self, handle: &ContentHandle) -> Result<HandleMetadata>;

    /// Stream every byte behind `handle` into `dest`, replacing any existing
    /// file. Returns the number of bytes written.
    fn copy_bytes(&self, handle: &ContentHandle, dest: &Path) -> Result<u64>;
}

/// Decoding of shared media into pixels.
pub trait NativeMedia {
    /// Decode the full image behind `handle`.
    fn decode_image(&self, handle: &ContentHandle) -> Result<DynamicImage>;

    /// Grab one representative frame from a video already copied to disk.
    ///
    /// The frame may be larger than `request.bound`; callers scale it with
    /// the same function used for still images.
    fn extract_video_frame(&self, video: &Path, request: FrameRequest) -> Result<DynamicImage>;
}

/// Parameters for [`NativeMedia::extract_video_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest {
    /// Preferred bounding size; platforms that can decode at a target size
    /// use it, others return the native frame.
    pub bound: u32,
    /// Offset into the video, for platforms that seek by time.
    pub offset_ms: u64,
}

/// Key-value store shared between the share extension and the main app.
///
/// Written by the extension process; read and cleared by the main process.
pub trait SharedStore: Send + Sync {
    /// Store `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Read `key` and remove it in the same call. `Ok(None)` when absent.
    fn take(&self, key: &str) -> Result<Option<String>>;
}
