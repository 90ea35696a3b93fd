// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plain-filesystem helpers shared by every adapter.
//
// iOS extension items and `file://` streams on Android are ordinary paths,
// so all three adapters fall back to these for non-`content://` handles.

use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use image::DynamicImage;
use sharewerk_core::error::{Result, ShareError};
use sharewerk_core::types::{ContentHandle, HandleMetadata};
use tracing::{debug, warn};

use crate::traits::SharedStore;

/// Path behind a handle, or a resolution error for non-file handles.
pub fn local_path(handle: &ContentHandle) -> Result<PathBuf> {
    handle.as_local_path().ok_or_else(|| {
        ShareError::Resolution(format!("handle is not a local file: {handle}"))
    })
}

/// Metadata for a plain file. Filesystems carry no display name or content
/// type, so only the size is filled in.
pub fn local_metadata(path: &Path) -> Result<HandleMetadata> {
    let meta = std::fs::metadata(path)
        .map_err(|e| ShareError::Resolution(format!("{}: {e}", path.display())))?;
    Ok(HandleMetadata {
        display_name: None,
        size_bytes: meta.is_file().then_some(meta.len()),
        mime_type: None,
    })
}

/// Stream `src` into `dest`, replacing `dest`.
///
/// Copying a file onto itself is a no-op that reports its length; opening
/// the destination for writing first would truncate the source.
pub fn copy_local(src: &Path, dest: &Path) -> Result<u64> {
    if same_file(src, dest) {
        debug!(path = %src.display(), "source already in cache, skipping copy");
        return Ok(std::fs::metadata(src)?.len());
    }
    let mut input =
        File::open(src).map_err(|e| ShareError::Copy(format!("{}: {e}", src.display())))?;
    let mut output =
        File::create(dest).map_err(|e| ShareError::Copy(format!("{}: {e}", dest.display())))?;
    let written = io::copy(&mut input, &mut output)
        .map_err(|e| ShareError::Copy(format!("{} -> {}: {e}", src.display(), dest.display())))?;
    Ok(written)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Decode an image file with the `image` crate.
pub fn open_local_image(path: &Path) -> Result<DynamicImage> {
    image::open(path)
        .map_err(|e| ShareError::ImageError(format!("failed to open {}: {e}", path.display())))
}

/// Decode already-encoded image bytes (JPEG, PNG, ...).
pub fn decode_image_bytes(data: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(data)
        .map_err(|e| ShareError::ImageError(format!("failed to decode image: {e}")))
}

// ---------------------------------------------------------------------------
// Shared stores
// ---------------------------------------------------------------------------

/// Handoff store backed by one JSON object on disk.
///
/// Desktop stand-in for an app-group container: both "processes" point at
/// the same file. The in-process mutex serialises read-modify-write cycles.
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Store file for `group` inside `dir`.
    pub fn new(dir: &Path, group: &str) -> Self {
        Self {
            path: dir.join(format!("{group}.json")),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(data) => Ok(serde_json::from_str(&data)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(ShareError::Handoff(format!("{}: {e}", self.path.display()))),
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if entries.is_empty() {
            return match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(ShareError::Handoff(format!("{}: {e}", self.path.display()))),
            };
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string(entries)?)
            .map_err(|e| ShareError::Handoff(format!("{}: {e}", self.path.display())))
    }
}

impl SharedStore for FileStore {
    fn put(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| ShareError::Handoff("store lock poisoned".into()))?;
        let mut entries = self.read_entries().unwrap_or_else(|e| {
            warn!(error = %e, "discarding unreadable handoff store");
            BTreeMap::new()
        });
        entries.insert(key.to_owned(), value.to_owned());
        self.write_entries(&entries)
    }

    fn take(&self, key: &str) -> Result<Option<String>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| ShareError::Handoff("store lock poisoned".into()))?;
        let mut entries = self.read_entries()?;
        let value = entries.remove(key);
        if value.is_some() {
            self.write_entries(&entries)?;
        }
        Ok(value)
    }
}

/// In-memory store for a single process (tests, embedded hosts).
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SharedStore for MemoryStore {
    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .map_err(|_| ShareError::Handoff("store lock poisoned".into()))?
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn take(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .entries
            .lock()
            .map_err(|_| ShareError::Handoff("store lock poisoned".into()))?
            .remove(key))
    }
}
