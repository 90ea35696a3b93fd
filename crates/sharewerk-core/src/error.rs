// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Sharewerk.
//
// None of these ever reach the application layer. The resolver and the
// thumbnail generator turn them into absent descriptor fields and log them.

use thiserror::Error;

/// Top-level error type for all Sharewerk operations.
#[derive(Debug, Error)]
pub enum ShareError {
    // -- Resolution --
    #[error("content resolution failed: {0}")]
    Resolution(String),

    #[error("copy to cache failed: {0}")]
    Copy(String),

    // -- Media --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("video frame extraction failed: {0}")]
    VideoFrame(String),

    // -- Handoff / persistence --
    #[error("handoff store error: {0}")]
    Handoff(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ShareError>;
