// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// MIME type → file category classification.

use crate::types::FileCategory;

/// MIME type of an Android application package.
pub const APK_MIME: &str = "application/vnd.android.package-archive";

/// Map a MIME type to its coarse category.
///
/// Total and deterministic: every input, including `None`, maps to exactly
/// one category. Rules are checked in order and the first match wins.
/// Parameters (`; charset=utf-8`) and letter case are ignored.
pub fn classify(mime_type: Option<&str>) -> FileCategory {
    let Some(raw) = mime_type else {
        return FileCategory::File;
    };
    let essence = raw.split(';').next().unwrap_or_default().trim();
    let mime = essence.to_ascii_lowercase();

    if mime.starts_with("image/") {
        FileCategory::Image
    } else if mime.starts_with("video/") {
        FileCategory::Video
    } else if mime.starts_with("audio/") {
        FileCategory::Audio
    } else if mime == "application/pdf" {
        FileCategory::Pdf
    } else if mime.contains("wordprocessing") || mime.contains("msword") {
        FileCategory::Document
    } else if mime.contains("spreadsheet") || mime.contains("excel") {
        FileCategory::Spreadsheet
    } else if mime.contains("presentation") || mime.contains("powerpoint") {
        FileCategory::Presentation
    } else if mime.contains("zip")
        || mime.contains("compressed")
        || mime.contains("x-rar")
        || mime.contains("x-7z")
    {
        FileCategory::Archive
    } else if mime == APK_MIME {
        FileCategory::Apk
    } else if mime.starts_with("text/") {
        FileCategory::Text
    } else {
        FileCategory::File
    }
}
