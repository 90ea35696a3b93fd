// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// iOS adapter via objc2.
//
// Requires compilation with the iOS SDK (Xcode). By the time a handle gets
// here the share extension has already loaded each attachment as a file
// URL, so content access is plain filesystem work; UIKit and AVFoundation
// are only needed to decode media the `image` crate cannot (HEIC photos,
// video frames).
//
// Calls run on blocking worker threads, never the main thread, and each
// one drains its own autorelease pool.

#![cfg(target_os = "ios")]

use std::path::Path;

use image::DynamicImage;
use objc2::encode::{Encode, Encoding, RefEncode};
use objc2::rc::{Allocated, Retained, autoreleasepool};
use objc2::runtime::AnyObject;
use objc2::{class, msg_send};
use objc2_foundation::{NSData, NSString, NSURL};

use sharewerk_core::error::{Result, ShareError};
use sharewerk_core::types::{ContentHandle, HandleMetadata};

use crate::local;
use crate::traits::*;

// ---------------------------------------------------------------------------
// C structs and functions not wrapped by objc2
// ---------------------------------------------------------------------------

/// `CMTime` from CoreMedia.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
struct CMTime {
    value: i64,
    timescale: i32,
    flags: u32,
    epoch: i64,
}

/// `kCMTimeFlags_Valid`.
const CM_TIME_FLAGS_VALID: u32 = 1;

impl CMTime {
    fn from_millis(ms: u64) -> Self {
        Self {
            value: i64::try_from(ms).unwrap_or(i64::MAX),
            timescale: 1000,
            flags: CM_TIME_FLAGS_VALID,
            epoch: 0,
        }
    }
}

// SAFETY: layout matches the C declaration; the type is anonymous in the
// SDK headers, hence the `?` name.
unsafe impl Encode for CMTime {
    const ENCODING: Encoding = Encoding::Struct(
        "?",
        &[i64::ENCODING, i32::ENCODING, u32::ENCODING, i64::ENCODING],
    );
}

unsafe impl RefEncode for CMTime {
    const ENCODING_REF: Encoding = Encoding::Pointer(&Self::ENCODING);
}

/// `CGSize` from CoreGraphics (64-bit `CGFloat`).
#[repr(C)]
#[derive(Debug, Clone, Copy)]
struct CGSize {
    width: f64,
    height: f64,
}

// SAFETY: layout matches the C declaration.
unsafe impl Encode for CGSize {
    const ENCODING: Encoding = Encoding::Struct("CGSize", &[f64::ENCODING, f64::ENCODING]);
}

/// Opaque `CGImage`, only handled by pointer.
#[repr(C)]
struct CGImage {
    _private: [u8; 0],
}

// SAFETY: `CGImageRef` is `struct CGImage *`.
unsafe impl RefEncode for CGImage {
    const ENCODING_REF: Encoding = Encoding::Pointer(&Encoding::Struct("CGImage", &[]));
}

#[link(name = "UIKit", kind = "framework")]
unsafe extern "C" {
    /// ```c
    /// NSData * _Nullable UIImageJPEGRepresentation(UIImage *image,
    ///                                              CGFloat compressionQuality);
    /// ```
    fn UIImageJPEGRepresentation(image: *const AnyObject, compression_quality: f64)
    -> *mut AnyObject;
}

#[link(name = "CoreGraphics", kind = "framework")]
unsafe extern "C" {
    fn CGImageRelease(image: *mut CGImage);
}

#[link(name = "AVFoundation", kind = "framework")]
unsafe extern "C" {}

/// Quality used when UIKit re-encodes a decoded image for the Rust decoder.
/// Thumbnails are re-encoded again afterwards, so this stays high.
const REENCODE_QUALITY: f64 = 0.95;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// JPEG-encode a `UIImage` through UIKit and decode it with the `image`
/// crate.
fn ui_image_to_dynamic(ui_image: &AnyObject) -> Result<DynamicImage> {
    // SAFETY: UIImageJPEGRepresentation is a UIKit C function. Returns an
    // autoreleased NSData* or nil.
    let raw = unsafe { UIImageJPEGRepresentation(ui_image as *const AnyObject, REENCODE_QUALITY) };
    if raw.is_null() {
        return Err(ShareError::ImageError(
            "UIImageJPEGRepresentation returned nil".into(),
        ));
    }
    // SAFETY: non-null result is an NSData*; the bytes are copied before the
    // enclosing autorelease pool drains.
    let ns_data: &NSData = unsafe { &*(raw as *const NSData) };
    local::decode_image_bytes(&ns_data.to_vec())
}

// ---------------------------------------------------------------------------
// Adapter struct
// ---------------------------------------------------------------------------

/// iOS implementation of the share adapter.
pub struct IosAdapter;

impl IosAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IosAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformAdapter for IosAdapter {
    fn platform_name(&self) -> &str {
        "iOS"
    }
}

// ---------------------------------------------------------------------------
// NativeContent -- sandbox files
// ---------------------------------------------------------------------------

impl NativeContent for IosAdapter {
    fn resolve_handle(&self, handle: &ContentHandle) -> Result<HandleMetadata> {
        local::local_metadata(&local::local_path(handle)?)
    }

    /// Copy a file the extension loaded into the sandbox.
    ///
    /// Files outside the sandbox need a security-scoped access session
    /// started by the host before this is called.
    fn copy_bytes(&self, handle: &ContentHandle, dest: &Path) -> Result<u64> {
        let src = local::local_path(handle)?;
        tracing::debug!(src = %src.display(), dest = %dest.display(), "iOS: copying shared file");
        local::copy_local(&src, dest)
    }
}

// ---------------------------------------------------------------------------
// NativeMedia -- UIImage / AVAssetImageGenerator
// ---------------------------------------------------------------------------

impl NativeMedia for IosAdapter {
    /// Decode with the `image` crate, falling back to `UIImage` for formats
    /// only the system understands.
    fn decode_image(&self, handle: &ContentHandle) -> Result<DynamicImage> {
        let path = local::local_path(handle)?;
        match local::open_local_image(&path) {
            Ok(img) => Ok(img),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "iOS: falling back to UIImage");
                autoreleasepool(|_| {
                    let ns_path = NSString::from_str(&path.to_string_lossy());
                    // SAFETY: +[UIImage imageWithContentsOfFile:] takes an
                    // NSString path and returns an autoreleased UIImage or nil.
                    let ui_image: Option<Retained<AnyObject>> =
                        unsafe { msg_send![class!(UIImage), imageWithContentsOfFile: &*ns_path] };
                    let ui_image = ui_image.ok_or_else(|| {
                        ShareError::ImageError(format!("UIImage cannot decode {}", path.display()))
                    })?;
                    ui_image_to_dynamic(&ui_image)
                })
            }
        }
    }

    /// Grab the frame at `request.offset_ms`, honouring the track's preferred
    /// transform and capped at `request.bound` on each side.
    fn extract_video_frame(&self, video: &Path, request: FrameRequest) -> Result<DynamicImage> {
        autoreleasepool(|_| {
            let ns_path = NSString::from_str(&video.to_string_lossy());
            let url = NSURL::fileURLWithPath(&ns_path);

            // SAFETY: +[AVURLAsset URLAssetWithURL:options:] with a file URL
            // and nil options returns an autoreleased asset.
            let asset: Option<Retained<AnyObject>> = unsafe {
                msg_send![
                    class!(AVURLAsset),
                    URLAssetWithURL: &*url,
                    options: std::ptr::null::<AnyObject>()
                ]
            };
            let asset = asset.ok_or_else(|| {
                ShareError::VideoFrame(format!("cannot open asset {}", video.display()))
            })?;

            // SAFETY: standard alloc/init pair on AVAssetImageGenerator.
            let generator: Option<Retained<AnyObject>> = unsafe {
                let alloc: Allocated<AnyObject> = msg_send![class!(AVAssetImageGenerator), alloc];
                msg_send![alloc, initWithAsset: &*asset]
            };
            let generator = generator
                .ok_or_else(|| ShareError::VideoFrame("AVAssetImageGenerator init failed".into()))?;

            let bound = f64::from(request.bound);
            // SAFETY: property setters declared on AVAssetImageGenerator.
            unsafe {
                let _: () = msg_send![&*generator, setAppliesPreferredTrackTransform: true];
                let _: () = msg_send![
                    &*generator,
                    setMaximumSize: CGSize { width: bound, height: bound }
                ];
            }

            let mut error: *mut AnyObject = std::ptr::null_mut();
            // SAFETY: copyCGImageAtTime:actualTime:error: returns a +1
            // CGImageRef (or NULL and sets `error`). Released below.
            let cg_image: *mut CGImage = unsafe {
                msg_send![
                    &*generator,
                    copyCGImageAtTime: CMTime::from_millis(request.offset_ms),
                    actualTime: std::ptr::null_mut::<CMTime>(),
                    error: &mut error as *mut *mut AnyObject
                ]
            };
            if cg_image.is_null() {
                return Err(ShareError::VideoFrame(format!(
                    "no frame at {} ms in {}",
                    request.offset_ms,
                    video.display()
                )));
            }

            // SAFETY: +[UIImage imageWithCGImage:] retains the CGImage it wraps,
            // so our +1 reference is released right after.
            let ui_image: Option<Retained<AnyObject>> =
                unsafe { msg_send![class!(UIImage), imageWithCGImage: cg_image] };
            unsafe { CGImageRelease(cg_image) };

            let ui_image = ui_image
                .ok_or_else(|| ShareError::VideoFrame("UIImage imageWithCGImage failed".into()))?;
            tracing::debug!(path = %video.display(), "iOS: video frame extracted");
            ui_image_to_dynamic(&ui_image)
        })
    }
}

// ---------------------------------------------------------------------------
// SharedStore -- app-group NSUserDefaults
// ---------------------------------------------------------------------------

/// Handoff store backed by `NSUserDefaults(suiteName:)` for the app group
/// shared by the extension and the main app.
pub struct UserDefaultsStore {
    suite_name: String,
}

impl UserDefaultsStore {
    pub fn new(suite_name: &str) -> Self {
        Self {
            suite_name: suite_name.to_owned(),
        }
    }

    /// `[[NSUserDefaults alloc] initWithSuiteName:]`. Re-created per call;
    /// the Objective-C object is not `Send`.
    fn defaults(&self) -> Result<Retained<AnyObject>> {
        let ns_suite = NSString::from_str(&self.suite_name);
        // SAFETY: standard alloc/init pair; returns nil for an invalid suite.
        let defaults: Option<Retained<AnyObject>> = unsafe {
            let alloc: Allocated<AnyObject> = msg_send![class!(NSUserDefaults), alloc];
            msg_send![alloc, initWithSuiteName: &*ns_suite]
        };
        defaults.ok_or_else(|| {
            ShareError::Handoff(format!("no NSUserDefaults suite {}", self.suite_name))
        })
    }
}

impl SharedStore for UserDefaultsStore {
    fn put(&self, key: &str, value: &str) -> Result<()> {
        autoreleasepool(|_| {
            let defaults = self.defaults()?;
            let ns_key = NSString::from_str(key);
            let ns_value = NSString::from_str(value);
            // SAFETY: setObject:forKey: with property-list values.
            unsafe {
                let _: () = msg_send![&*defaults, setObject: &*ns_value, forKey: &*ns_key];
            }
            tracing::info!(key, suite = %self.suite_name, "iOS: pending share stored");
            Ok(())
        })
    }

    fn take(&self, key: &str) -> Result<Option<String>> {
        autoreleasepool(|_| {
            let defaults = self.defaults()?;
            let ns_key = NSString::from_str(key);
            // SAFETY: stringForKey: returns an NSString or nil.
            let value: Option<Retained<NSString>> =
                unsafe { msg_send![&*defaults, stringForKey: &*ns_key] };
            let Some(value) = value else {
                return Ok(None);
            };
            // SAFETY: removeObjectForKey: takes an NSString key.
            unsafe {
                let _: () = msg_send![&*defaults, removeObjectForKey: &*ns_key];
            }
            tracing::info!(key, suite = %self.suite_name, "iOS: pending share taken");
            Ok(Some(value.to_string()))
        })
    }
}
