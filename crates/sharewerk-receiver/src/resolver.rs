// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// File resolver — turns one content handle into a `FileDescriptor`.
//
// Every step is best-effort. A failed metadata query, copy or thumbnail
// leaves the matching field empty and the rest of the descriptor intact.

use std::path::PathBuf;
use std::sync::Arc;

use sharewerk_bridge::PlatformAdapter;
use sharewerk_core::config::ReceiverConfig;
use sharewerk_core::mime::mime_from_extension;
use sharewerk_core::types::{ContentHandle, FileCategory, FileDescriptor, HandleMetadata};
use sharewerk_media::ThumbnailGenerator;
use tracing::{debug, instrument, warn};

/// Resolves content handles against one platform adapter and cache dir.
pub struct FileResolver {
    adapter: Arc<dyn PlatformAdapter>,
    cache_dir: PathBuf,
    thumbnails: ThumbnailGenerator,
}

impl FileResolver {
    pub fn new(adapter: Arc<dyn PlatformAdapter>, config: &ReceiverConfig) -> Self {
        Self {
            adapter,
            cache_dir: config.cache_dir.clone(),
            thumbnails: ThumbnailGenerator::new(config),
        }
    }

    /// Resolve metadata, copy into the cache and generate a thumbnail.
    ///
    /// `local_path` is `None` exactly when the copy failed. Blocking; run it
    /// off the async executor.
    #[instrument(skip_all, fields(handle = %handle))]
    pub fn resolve(&self, handle: &ContentHandle) -> FileDescriptor {
        let meta = self.adapter.resolve_handle(handle).unwrap_or_else(|e| {
            warn!(error = %e, "metadata query failed");
            HandleMetadata::default()
        });

        let name = resolve_name(handle, meta.display_name.as_deref());
        let mime = resolve_mime(handle, &name, meta.mime_type);

        let mut descriptor = FileDescriptor::new(handle.clone(), mime).with_size(meta.size_bytes);
        descriptor.display_name = Some(name.clone());
        descriptor.local_path = self.copy_to_cache(handle, &name);
        descriptor.thumbnail_path = match descriptor.category() {
            FileCategory::Image => self.thumbnails.generate_image(self.adapter.as_ref(), handle),
            FileCategory::Video => descriptor
                .local_path
                .as_deref()
                .and_then(|path| self.thumbnails.generate_video(self.adapter.as_ref(), path)),
            _ => None,
        };

        debug!(
            name = %name,
            category = %descriptor.category(),
            copied = descriptor.local_path.is_some(),
            thumbnail = descriptor.thumbnail_path.is_some(),
            "handle resolved"
        );
        descriptor
    }

    /// Stream the content to `<cache>/<name>`, replacing any earlier copy
    /// with the same name.
    ///
    /// Bytes land in a uniquely named temp file first and are renamed into
    /// place, so attachments resolved in parallel under one name never
    /// interleave: the last rename wins whole.
    fn copy_to_cache(&self, handle: &ContentHandle, name: &str) -> Option<PathBuf> {
        if let Err(e) = std::fs::create_dir_all(&self.cache_dir) {
            warn!(dir = %self.cache_dir.display(), error = %e, "cannot create cache dir");
            return None;
        }
        let staging = match tempfile::Builder::new()
            .prefix(".partial_")
            .tempfile_in(&self.cache_dir)
        {
            Ok(file) => file.into_temp_path(),
            Err(e) => {
                warn!(dir = %self.cache_dir.display(), error = %e, "cannot create staging file");
                return None;
            }
        };

        let bytes = match self.adapter.copy_bytes(handle, &staging) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "copy to cache failed");
                return None;
            }
        };
        let dest = self.cache_dir.join(name);
        match staging.persist(&dest) {
            Ok(()) => {
                debug!(path = %dest.display(), bytes, "copied to cache");
                Some(dest)
            }
            Err(e) => {
                warn!(path = %dest.display(), error = %e, "cannot move copy into place");
                None
            }
        }
    }
}

/// Display name, else last path segment, else `shared_file_<millis>`;
/// reduced to a single safe path component.
fn resolve_name(handle: &ContentHandle, display_name: Option<&str>) -> String {
    display_name
        .and_then(sanitize_name)
        .or_else(|| handle.last_path_segment().as_deref().and_then(sanitize_name))
        .unwrap_or_else(synthesized_name)
}

fn sanitize_name(raw: &str) -> Option<String> {
    let last = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    let cleaned: String = last.chars().filter(|c| !c.is_control()).collect();
    let cleaned = cleaned.trim();
    match cleaned {
        "" | "." | ".." => None,
        name => Some(name.to_owned()),
    }
}

fn synthesized_name() -> String {
    format!("shared_file_{}", chrono::Utc::now().timestamp_millis())
}

/// Explicit content type, else a lookup on the handle's extension, else on
/// the resolved name's extension.
fn resolve_mime(handle: &ContentHandle, name: &str, explicit: Option<String>) -> Option<String> {
    if let Some(mime) = explicit.filter(|m| !m.trim().is_empty()) {
        return Some(mime);
    }
    let from_name = name
        .rsplit_once('.')
        .filter(|(stem, _)| !stem.is_empty())
        .map(|(_, ext)| ext.to_owned());
    handle
        .extension()
        .or(from_name)
        .and_then(|ext| mime_from_extension(&ext))
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeAdapter, FakeContent, config};

    fn resolver(adapter: FakeAdapter, dir: &std::path::Path) -> FileResolver {
        FileResolver::new(adapter.shared(), &config(dir))
    }

    #[test]
    fn resolves_metadata_copy_and_size() {
        let dir = tempfile::tempdir().expect("tempdir");
        let handle = "content://docs/document/7";
        let r = resolver(
            FakeAdapter::default().with(handle, FakeContent::file("report.pdf", "application/pdf", &[1; 2048])),
            dir.path(),
        );

        let desc = r.resolve(&ContentHandle::new(handle));
        assert_eq!(desc.display_name.as_deref(), Some("report.pdf"));
        assert_eq!(desc.category(), FileCategory::Pdf);
        assert_eq!(desc.size_bytes(), Some(2048));
        assert_eq!(desc.size_formatted(), Some("2.00 KB"));
        assert!(desc.thumbnail_path.is_none());

        let path = desc.local_path.expect("copied");
        assert_eq!(path, dir.path().join("cache").join("report.pdf"));
        assert_eq!(std::fs::read(path).expect("read").len(), 2048);
    }

    #[test]
    fn name_falls_back_to_last_segment_then_synthesized() {
        let handle = ContentHandle::new("content://media/external/IMG%201.jpg");
        assert_eq!(resolve_name(&handle, None), "IMG 1.jpg");
        assert_eq!(resolve_name(&handle, Some("")), "IMG 1.jpg");

        let bare = ContentHandle::new("content://media");
        assert!(resolve_name(&bare, None).starts_with("shared_file_"));
    }

    #[test]
    fn names_cannot_escape_cache_dir() {
        assert_eq!(sanitize_name("../../etc/passwd").as_deref(), Some("passwd"));
        assert_eq!(sanitize_name("a\\b\\c.txt").as_deref(), Some("c.txt"));
        assert_eq!(sanitize_name(".."), None);
        assert_eq!(sanitize_name("dir/"), None);
    }

    #[test]
    fn mime_prefers_explicit_then_extension() {
        let handle = ContentHandle::new("/downloads/song.MP3");
        assert_eq!(
            resolve_mime(&handle, "song.MP3", Some("audio/x-custom".into())).as_deref(),
            Some("audio/x-custom")
        );
        assert_eq!(resolve_mime(&handle, "song.MP3", None).as_deref(), Some("audio/mpeg"));

        // provider handle without extension, name carries it
        let opaque = ContentHandle::new("content://media/external/file/12");
        assert_eq!(
            resolve_mime(&opaque, "slides.pptx", None).as_deref(),
            Some("application/vnd.openxmlformats-officedocument.presentationml.presentation")
        );
        assert_eq!(resolve_mime(&opaque, "README", None), None);
    }

    #[test]
    fn copy_failure_keeps_other_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let handle = "content://locked/9";
        let r = resolver(
            FakeAdapter::default().with(handle, FakeContent::unreadable("secret.zip", "application/zip")),
            dir.path(),
        );

        let desc = r.resolve(&ContentHandle::new(handle));
        assert!(desc.local_path.is_none());
        assert_eq!(desc.display_name.as_deref(), Some("secret.zip"));
        assert_eq!(desc.category(), FileCategory::Archive);

        // the staging file goes away with the failed copy
        let leftovers = std::fs::read_dir(dir.path().join("cache")).expect("cache dir").count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn metadata_failure_degrades_to_handle_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let r = resolver(FakeAdapter::default(), dir.path());

        let desc = r.resolve(&ContentHandle::new("content://gone/holiday.mov"));
        assert_eq!(desc.display_name.as_deref(), Some("holiday.mov"));
        assert_eq!(desc.mime_type(), Some("video/quicktime"));
        assert_eq!(desc.size_bytes(), None);
        assert!(desc.local_path.is_none());
        assert!(desc.thumbnail_path.is_none());
    }

    #[test]
    fn images_and_videos_get_thumbnails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let r = resolver(
            FakeAdapter::default()
                .with("content://p/1", FakeContent::image("photo.png", 1600, 1200))
                .with("content://p/2", FakeContent::video("clip.mp4", 1920, 1080)),
            dir.path(),
        );

        let photo = r.resolve(&ContentHandle::new("content://p/1"));
        let thumb = image::open(photo.thumbnail_path.expect("image thumb")).expect("open");
        assert_eq!((thumb.width(), thumb.height()), (512, 384));

        let clip = r.resolve(&ContentHandle::new("content://p/2"));
        let thumb = image::open(clip.thumbnail_path.expect("video thumb")).expect("open");
        assert_eq!((thumb.width(), thumb.height()), (512, 288));
    }
}
