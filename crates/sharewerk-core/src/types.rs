// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Sharewerk share receiver.
//
// The serde layout of `ShareEvent` and `FileDescriptor` is the wire format
// the application layer consumes over the share channel, so field renames
// here are a compatibility break.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::classify::classify;
use crate::size::format_file_size;

/// Android action string for a single-item share.
pub const ACTION_SEND: &str = "android.intent.action.SEND";

/// Android action string for a multi-item share.
pub const ACTION_SEND_MULTIPLE: &str = "android.intent.action.SEND_MULTIPLE";

/// Opaque OS reference to shared data.
///
/// May be a `content://` URI (Android), a `file://` URL (iOS extension
/// items), or a bare filesystem path. Nothing guarantees that it maps to a
/// real file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHandle(String);

impl ContentHandle {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URI scheme, if the handle has the `scheme://` form.
    pub fn scheme(&self) -> Option<&str> {
        let (scheme, _) = self.0.split_once("://")?;
        let valid = !scheme.is_empty()
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        valid.then_some(scheme)
    }

    /// Whether this is an Android `content://` handle that needs a
    /// `ContentResolver` to open.
    pub fn is_content(&self) -> bool {
        self.scheme()
            .is_some_and(|s| s.eq_ignore_ascii_case("content"))
    }

    /// Filesystem path for `file://` URLs and bare paths.
    pub fn as_local_path(&self) -> Option<PathBuf> {
        match self.scheme() {
            None => Some(PathBuf::from(&self.0)),
            Some(s) if s.eq_ignore_ascii_case("file") => {
                let rest = &self.0[s.len() + 3..];
                // file://localhost/tmp/x and file:///tmp/x both mean /tmp/x
                let path = rest.strip_prefix("localhost").unwrap_or(rest);
                Some(PathBuf::from(percent_decode(strip_query(path))))
            }
            Some(_) => None,
        }
    }

    /// Last `/`-separated segment of the path, percent-decoded.
    pub fn last_path_segment(&self) -> Option<String> {
        let path = match self.scheme() {
            Some(s) => {
                let rest = &self.0[s.len() + 3..];
                // Drop the authority; what follows is the path.
                match rest.find('/') {
                    Some(idx) => &rest[idx..],
                    None => "",
                }
            }
            None => self.0.as_str(),
        };
        let path = strip_query(path);
        let segment = path
            .trim_end_matches(['/', '\\'])
            .rsplit(['/', '\\'])
            .next()?;
        if segment.is_empty() {
            return None;
        }
        Some(percent_decode(segment))
    }

    /// Lowercased extension of the last path segment.
    pub fn extension(&self) -> Option<String> {
        let segment = self.last_path_segment()?;
        let (stem, ext) = segment.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

impl fmt::Display for ContentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentHandle {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ContentHandle {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

fn strip_query(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Metadata the platform reports for a content handle.
///
/// Every field is best-effort; `None` means the provider did not expose it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandleMetadata {
    /// `OpenableColumns.DISPLAY_NAME` or equivalent.
    pub display_name: Option<String>,
    /// `OpenableColumns.SIZE` or equivalent.
    pub size_bytes: Option<u64>,
    /// Explicit content type carried by the handle.
    pub mime_type: Option<String>,
}

/// Coarse classification of a shared file, derived from its MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Image,
    Video,
    Audio,
    Pdf,
    Document,
    Spreadsheet,
    Presentation,
    Archive,
    Apk,
    Text,
    File,
}

impl FileCategory {
    /// The string the application layer switches on.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Pdf => "pdf",
            Self::Document => "document",
            Self::Spreadsheet => "spreadsheet",
            Self::Presentation => "presentation",
            Self::Archive => "archive",
            Self::Apk => "apk",
            Self::Text => "text",
            Self::File => "file",
        }
    }

    /// Whether a preview image is generated for this category.
    pub fn has_thumbnail(&self) -> bool {
        matches!(self, Self::Image | Self::Video)
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized description of one shared file.
///
/// On deserialization `type` and `sizeFormatted` are re-derived from
/// `mimeType` and `size`; whatever the input says for them is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WireFileDescriptor")]
pub struct FileDescriptor {
    #[serde(rename = "uri")]
    pub source_handle: ContentHandle,
    /// Copy of the content inside the receiver's cache directory.
    #[serde(rename = "path")]
    pub local_path: Option<PathBuf>,
    #[serde(rename = "name")]
    pub display_name: Option<String>,
    #[serde(rename = "type")]
    category: FileCategory,
    mime_type: Option<String>,
    #[serde(rename = "thumbnail")]
    pub thumbnail_path: Option<PathBuf>,
    #[serde(rename = "size")]
    size_bytes: Option<u64>,
    size_formatted: Option<String>,
}

impl FileDescriptor {
    /// Create a descriptor whose category is derived from `mime_type`.
    pub fn new(source_handle: ContentHandle, mime_type: Option<String>) -> Self {
        let category = classify(mime_type.as_deref());
        Self {
            source_handle,
            local_path: None,
            display_name: None,
            category,
            mime_type,
            thumbnail_path: None,
            size_bytes: None,
            size_formatted: None,
        }
    }

    /// Set the byte size; the formatted size follows it.
    pub fn with_size(mut self, size_bytes: Option<u64>) -> Self {
        self.size_bytes = size_bytes;
        self.size_formatted = size_bytes.map(format_file_size);
        self
    }

    pub fn category(&self) -> FileCategory {
        self.category
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn size_bytes(&self) -> Option<u64> {
        self.size_bytes
    }

    pub fn size_formatted(&self) -> Option<&str> {
        self.size_formatted.as_deref()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireFileDescriptor {
    uri: ContentHandle,
    path: Option<PathBuf>,
    name: Option<String>,
    mime_type: Option<String>,
    thumbnail: Option<PathBuf>,
    size: Option<u64>,
}

impl From<WireFileDescriptor> for FileDescriptor {
    fn from(wire: WireFileDescriptor) -> Self {
        let mut descriptor = FileDescriptor::new(wire.uri, wire.mime_type).with_size(wire.size);
        descriptor.local_path = wire.path;
        descriptor.display_name = wire.name;
        descriptor.thumbnail_path = wire.thumbnail;
        descriptor
    }
}

/// What kind of content a share event carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareKind {
    Text,
    File,
    Files,
}

/// Normalized descriptor of what was shared.
///
/// Text events carry `text`/`subject` and no files; file events carry files
/// and no text. The constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireShareEvent")]
pub struct ShareEvent {
    #[serde(rename = "type")]
    kind: ShareKind,
    text: Option<String>,
    subject: Option<String>,
    files: Option<Vec<FileDescriptor>>,
}

impl ShareEvent {
    pub fn text(text: impl Into<String>, subject: Option<String>) -> Self {
        Self {
            kind: ShareKind::Text,
            text: Some(text.into()),
            subject,
            files: None,
        }
    }

    pub fn file(descriptor: FileDescriptor) -> Self {
        Self {
            kind: ShareKind::File,
            text: None,
            subject: None,
            files: Some(vec![descriptor]),
        }
    }

    pub fn files(descriptors: Vec<FileDescriptor>) -> Self {
        Self {
            kind: ShareKind::Files,
            text: None,
            subject: None,
            files: Some(descriptors),
        }
    }

    pub fn kind(&self) -> ShareKind {
        self.kind
    }

    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Shared files; empty for text events.
    pub fn file_descriptors(&self) -> &[FileDescriptor] {
        self.files.as_deref().unwrap_or_default()
    }
}

/// Deserialized form of [`ShareEvent`], checked against the kind before
/// it becomes one.
#[derive(Deserialize)]
struct WireShareEvent {
    #[serde(rename = "type")]
    kind: ShareKind,
    text: Option<String>,
    subject: Option<String>,
    files: Option<Vec<FileDescriptor>>,
}

impl TryFrom<WireShareEvent> for ShareEvent {
    type Error = String;

    fn try_from(wire: WireShareEvent) -> Result<Self, Self::Error> {
        match (wire.kind, wire.text, wire.files) {
            (ShareKind::Text, Some(text), None) => Ok(Self::text(text, wire.subject)),
            (ShareKind::File, None, Some(mut files)) if files.len() == 1 && wire.subject.is_none() => {
                files.pop().map(Self::file).ok_or_else(|| "file event without a file".to_owned())
            }
            (ShareKind::Files, None, Some(files)) if wire.subject.is_none() => Ok(Self::files(files)),
            (kind, text, files) => Err(format!(
                "inconsistent {kind:?} event: text {}, files {}",
                if text.is_some() { "present" } else { "absent" },
                files.map_or_else(|| "absent".to_owned(), |f| f.len().to_string()),
            )),
        }
    }
}

/// Action carried by an inbound Android-style share intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentAction {
    Send,
    SendMultiple,
    Other(String),
}

impl IntentAction {
    /// Map an `Intent.getAction()` string.
    pub fn from_android(action: &str) -> Self {
        match action {
            ACTION_SEND => Self::Send,
            ACTION_SEND_MULTIPLE => Self::SendMultiple,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// Inbound share as delivered by the OS to the receiving activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareIntent {
    pub action: IntentAction,
    /// `Intent.getType()`; shares without a type are ignored.
    pub mime_type: Option<String>,
    /// `EXTRA_TEXT`.
    pub text: Option<String>,
    /// `EXTRA_SUBJECT`.
    pub subject: Option<String>,
    /// `EXTRA_STREAM` (one for SEND, many for SEND_MULTIPLE).
    pub streams: Vec<ContentHandle>,
}

impl ShareIntent {
    pub fn send_text(text: impl Into<String>, subject: Option<String>) -> Self {
        Self {
            action: IntentAction::Send,
            mime_type: Some("text/plain".into()),
            text: Some(text.into()),
            subject,
            streams: Vec::new(),
        }
    }

    pub fn send_stream(mime_type: impl Into<String>, handle: ContentHandle) -> Self {
        Self {
            action: IntentAction::Send,
            mime_type: Some(mime_type.into()),
            text: None,
            subject: None,
            streams: vec![handle],
        }
    }

    pub fn send_multiple(mime_type: impl Into<String>, handles: Vec<ContentHandle>) -> Self {
        Self {
            action: IntentAction::SendMultiple,
            mime_type: Some(mime_type.into()),
            text: None,
            subject: None,
            streams: handles,
        }
    }
}

/// One item loaded by the iOS share extension from its input items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionAttachment {
    /// Conforms to `public.plain-text`.
    Text(String),
    /// Conforms to `public.url`; carried as its absolute string.
    Url(String),
    /// Conforms to `public.image`.
    Image(ContentHandle),
    /// Conforms to `public.movie`.
    Movie(ContentHandle),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_handle_scheme_detection() {
        assert_eq!(
            ContentHandle::new("content://media/external/images/42").scheme(),
            Some("content")
        );
        assert_eq!(ContentHandle::new("/tmp/photo.jpg").scheme(), None);
        assert!(ContentHandle::new("content://x/y").is_content());
        assert!(!ContentHandle::new("file:///tmp/y").is_content());
    }

    #[test]
    fn file_url_maps_to_local_path() {
        let handle = ContentHandle::new("file:///private/tmp/My%20Photo.png");
        assert_eq!(
            handle.as_local_path(),
            Some(PathBuf::from("/private/tmp/My Photo.png"))
        );
        assert_eq!(
            ContentHandle::new("/data/x.pdf").as_local_path(),
            Some(PathBuf::from("/data/x.pdf"))
        );
        assert!(ContentHandle::new("content://a/b").as_local_path().is_none());
    }

    #[test]
    fn last_segment_is_percent_decoded() {
        let handle = ContentHandle::new("content://com.example.provider/files/report%202024.pdf");
        assert_eq!(handle.last_path_segment().as_deref(), Some("report 2024.pdf"));
        assert_eq!(handle.extension().as_deref(), Some("pdf"));
    }

    #[test]
    fn last_segment_absent_for_bare_authority() {
        assert!(ContentHandle::new("content://authority").last_path_segment().is_none());
        assert!(ContentHandle::new("content://authority/").last_path_segment().is_none());
    }

    #[test]
    fn extension_ignores_dotfiles_and_query() {
        assert!(ContentHandle::new("/home/u/.bashrc").extension().is_none());
        assert_eq!(
            ContentHandle::new("file:///tmp/CLIP.MOV?x=1").extension().as_deref(),
            Some("mov")
        );
    }

    #[test]
    fn descriptor_category_follows_mime() {
        let descriptor = FileDescriptor::new(
            ContentHandle::new("content://x/1"),
            Some("image/png".into()),
        );
        assert_eq!(descriptor.category(), FileCategory::Image);

        let unknown = FileDescriptor::new(ContentHandle::new("content://x/2"), None);
        assert_eq!(unknown.category(), FileCategory::File);
    }

    #[test]
    fn descriptor_size_formatting_tracks_bytes() {
        let descriptor = FileDescriptor::new(ContentHandle::new("/tmp/a"), None)
            .with_size(Some(2_097_152));
        assert_eq!(descriptor.size_bytes(), Some(2_097_152));
        assert_eq!(descriptor.size_formatted(), Some("2.00 MB"));

        let cleared = descriptor.with_size(None);
        assert!(cleared.size_formatted().is_none());
    }

    #[test]
    fn text_event_wire_format() {
        let event = ShareEvent::text("hello", None);
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "type": "text",
                "text": "hello",
                "subject": null,
                "files": null,
            })
        );
        assert!(event.file_descriptors().is_empty());
    }

    #[test]
    fn file_event_wire_format_uses_app_keys() {
        let mut descriptor = FileDescriptor::new(
            ContentHandle::new("content://docs/7"),
            Some("application/pdf".into()),
        )
        .with_size(Some(512));
        descriptor.local_path = Some(PathBuf::from("/cache/doc.pdf"));
        descriptor.display_name = Some("doc.pdf".into());

        let json = serde_json::to_value(ShareEvent::file(descriptor)).expect("serialize");
        let file = &json["files"][0];
        assert_eq!(json["type"], "file");
        assert!(json["text"].is_null());
        assert_eq!(file["uri"], "content://docs/7");
        assert_eq!(file["path"], "/cache/doc.pdf");
        assert_eq!(file["name"], "doc.pdf");
        assert_eq!(file["type"], "pdf");
        assert_eq!(file["mimeType"], "application/pdf");
        assert!(file["thumbnail"].is_null());
        assert_eq!(file["size"], 512);
        assert_eq!(file["sizeFormatted"], "512 B");
    }

    #[test]
    fn event_survives_json_handoff() {
        let descriptor = FileDescriptor::new(
            ContentHandle::new("file:///tmp/clip.mov"),
            Some("video/quicktime".into()),
        );
        let event = ShareEvent::files(vec![descriptor.clone(), descriptor]);
        let json = serde_json::to_string(&event).expect("serialize");
        let back: ShareEvent = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, event);
        assert_eq!(back.kind(), ShareKind::Files);
    }

    #[test]
    fn inconsistent_events_are_rejected() {
        let file = serde_json::json!({ "uri": "content://p/1", "mimeType": "image/png" });
        let bad = [
            serde_json::json!({ "type": "text", "text": null, "files": [file.clone()] }),
            serde_json::json!({ "type": "text", "text": "hi", "files": [] }),
            serde_json::json!({ "type": "file", "text": null, "files": [] }),
            serde_json::json!({ "type": "file", "text": null, "files": [file.clone(), file.clone()] }),
            serde_json::json!({ "type": "files", "text": "hi", "files": [file.clone()] }),
            serde_json::json!({ "type": "files", "text": null, "files": null }),
        ];
        for value in bad {
            assert!(serde_json::from_value::<ShareEvent>(value.clone()).is_err(), "{value}");
        }

        let ok: ShareEvent = serde_json::from_value(serde_json::json!({
            "type": "file", "text": null, "subject": null, "files": [file]
        }))
        .expect("valid file event");
        assert_eq!(ok.kind(), ShareKind::File);
    }

    #[test]
    fn derived_descriptor_fields_are_recomputed() {
        let event: ShareEvent = serde_json::from_value(serde_json::json!({
            "type": "file",
            "files": [{
                "uri": "content://p/1",
                "mimeType": "application/pdf",
                "type": "image",
                "size": 2_097_152,
                "sizeFormatted": "tiny"
            }]
        }))
        .expect("deserialize");

        let file = &event.file_descriptors()[0];
        assert_eq!(file.category(), FileCategory::Pdf);
        assert_eq!(file.size_formatted(), Some("2.00 MB"));
    }

    #[test]
    fn intent_action_mapping() {
        assert_eq!(IntentAction::from_android(ACTION_SEND), IntentAction::Send);
        assert_eq!(
            IntentAction::from_android(ACTION_SEND_MULTIPLE),
            IntentAction::SendMultiple
        );
        assert_eq!(
            IntentAction::from_android("android.intent.action.VIEW"),
            IntentAction::Other("android.intent.action.VIEW".into())
        );
    }
}
