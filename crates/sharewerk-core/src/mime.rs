// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Static file-extension → MIME type table, used when a content handle does
// not carry an explicit content type.

/// Infer a MIME type from a file extension (without the dot).
///
/// Lookup is case-insensitive. Returns `None` for unknown extensions.
pub fn mime_from_extension(ext: &str) -> Option<&'static str> {
    let mime = match ext.to_ascii_lowercase().as_str() {
        // Images
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "tif" | "tiff" => "image/tiff",

        // Video
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "mkv" => "video/x-matroska",
        "m4v" => "video/x-m4v",
        "webm" => "video/webm",
        "3gp" => "video/3gpp",

        // Audio
        "mp3" => "audio/mpeg",
        "m4a" => "audio/mp4",
        "wav" => "audio/wav",
        "aac" => "audio/aac",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",

        // Documents
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",

        // Archives and packages
        "zip" => "application/zip",
        "rar" => "application/x-rar-compressed",
        "7z" => "application/x-7z-compressed",
        "apk" => crate::classify::APK_MIME,

        // Text and structured data
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        "csv" => "text/csv",
        "json" => "application/json",
        "xml" => "application/xml",

        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::types::FileCategory;

    #[test]
    fn known_extensions() {
        assert_eq!(mime_from_extension("jpg"), Some("image/jpeg"));
        assert_eq!(mime_from_extension("mov"), Some("video/quicktime"));
        assert_eq!(mime_from_extension("7z"), Some("application/x-7z-compressed"));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(mime_from_extension("PNG"), Some("image/png"));
        assert_eq!(mime_from_extension("Docx"), mime_from_extension("docx"));
    }

    #[test]
    fn unknown_extension_is_none() {
        assert_eq!(mime_from_extension("xyz"), None);
        assert_eq!(mime_from_extension(""), None);
    }

    #[test]
    fn table_entries_classify_as_expected() {
        let cases = [
            ("heic", FileCategory::Image),
            ("mkv", FileCategory::Video),
            ("m4a", FileCategory::Audio),
            ("pdf", FileCategory::Pdf),
            ("doc", FileCategory::Document),
            ("xlsx", FileCategory::Spreadsheet),
            ("pptx", FileCategory::Presentation),
            ("rar", FileCategory::Archive),
            ("apk", FileCategory::Apk),
            ("csv", FileCategory::Text),
            ("json", FileCategory::File),
        ];
        for (ext, expected) in cases {
            assert_eq!(classify(mime_from_extension(ext)), expected, "{ext}");
        }
    }
}
