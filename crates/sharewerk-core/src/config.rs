// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Receiver configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, ShareError};

/// Default bounding box (pixels) for generated thumbnails.
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 512;

/// Default JPEG quality for generated thumbnails.
pub const DEFAULT_JPEG_QUALITY: u8 = 85;

/// Settings for the share receiver pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiverConfig {
    /// Writable cache directory for copied content and thumbnails.
    pub cache_dir: PathBuf,
    /// Thumbnails are scaled so their longer side is at most this many pixels.
    pub thumbnail_size: u32,
    /// JPEG quality (1-100) for thumbnails.
    pub jpeg_quality: u8,
    /// Where in a video to grab the preview frame.
    pub video_frame_offset_ms: u64,
    /// Name of the message channel shared with the application layer.
    pub channel_name: String,
    /// App-group identifier for the extension → app handoff store.
    pub app_group: String,
    /// Key under which the extension stores the pending share.
    pub shared_key: String,
    /// Custom URL scheme the extension opens to wake the main app.
    pub url_scheme: String,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            cache_dir: std::env::temp_dir().join("sharewerk"),
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            video_frame_offset_ms: 1000,
            channel_name: "sharewerk/share".into(),
            app_group: "group.dev.sharewerk".into(),
            shared_key: "ShareKey".into(),
            url_scheme: "sharewerk".into(),
        }
    }
}

impl ReceiverConfig {
    /// Config rooted at the given cache directory, defaults elsewhere.
    pub fn with_cache_dir(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            ..Self::default()
        }
    }

    /// Load from a JSON file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Write as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.thumbnail_size == 0 {
            return Err(ShareError::Config("thumbnail_size must be non-zero".into()));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ShareError::Config(format!(
                "jpeg_quality must be 1-100, got {}",
                self.jpeg_quality
            )));
        }
        if self.url_scheme.is_empty() || self.shared_key.is_empty() {
            warn!("empty url_scheme or shared_key; extension handoff will not match");
        }
        Ok(())
    }
}
