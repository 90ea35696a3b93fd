// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Event router — decides what an inbound share means and builds the
// `ShareEvent` for it.
//
// Attachments are resolved in parallel on the blocking pool and collected
// in input order; nothing is emitted until every attachment has settled.

use std::sync::Arc;

use sharewerk_core::types::{
    ContentHandle, ExtensionAttachment, FileDescriptor, IntentAction, ShareEvent, ShareIntent,
};
use tracing::{debug, info, instrument, warn};

use crate::resolver::FileResolver;

pub struct EventRouter {
    resolver: Arc<FileResolver>,
}

impl EventRouter {
    pub fn new(resolver: FileResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }

    /// Route an Android-style share intent.
    ///
    /// Returns `None` for shares that carry nothing usable: no content type,
    /// an unknown action, or a multi-share where every copy failed.
    #[instrument(skip_all, fields(action = ?intent.action, mime = ?intent.mime_type))]
    pub async fn route_intent(&self, intent: ShareIntent) -> Option<ShareEvent> {
        let Some(mime) = intent.mime_type.as_deref() else {
            debug!("share without content type ignored");
            return None;
        };
        let is_text = mime.to_ascii_lowercase().starts_with("text/");

        match intent.action {
            IntentAction::Send => {
                if is_text {
                    if let Some(text) = intent.text {
                        info!(len = text.len(), "text share received");
                        return Some(ShareEvent::text(text, intent.subject));
                    }
                }
                let handle = intent.streams.into_iter().next()?;
                // a single share is forwarded even when its copy failed
                let descriptor = self.resolve_one(handle).await?;
                info!(category = %descriptor.category(), "file share received");
                Some(ShareEvent::file(descriptor))
            }
            IntentAction::SendMultiple => {
                let files = self.resolve_all(intent.streams).await;
                if files.is_empty() {
                    warn!("no attachment of the multi-share could be copied");
                    return None;
                }
                info!(count = files.len(), "multi-file share received");
                Some(ShareEvent::files(files))
            }
            IntentAction::Other(action) => {
                debug!(action = %action, "unhandled intent action ignored");
                None
            }
        }
    }

    /// Route the attachments an iOS share extension loaded.
    ///
    /// Files win over text: if any image or movie resolves, text and URL
    /// attachments are dropped. Otherwise the first text or URL becomes a
    /// text event.
    #[instrument(skip_all, fields(count = items.len()))]
    pub async fn route_attachments(&self, items: Vec<ExtensionAttachment>) -> Option<ShareEvent> {
        let mut text = None;
        let mut handles = Vec::new();
        for item in items {
            match item {
                ExtensionAttachment::Text(s) | ExtensionAttachment::Url(s) => {
                    if text.is_none() {
                        text = Some(s);
                    }
                }
                ExtensionAttachment::Image(h) | ExtensionAttachment::Movie(h) => handles.push(h),
            }
        }

        let mut files = self.resolve_all(handles).await;
        match (files.len(), text) {
            (0, Some(text)) => {
                info!(len = text.len(), "text share received from extension");
                Some(ShareEvent::text(text, None))
            }
            (0, None) => {
                debug!("extension produced nothing to share");
                None
            }
            (1, _) => files.pop().map(ShareEvent::file),
            (count, _) => {
                info!(count, "file share received from extension");
                Some(ShareEvent::files(files))
            }
        }
    }

    /// Resolve on the blocking pool.
    async fn resolve_one(&self, handle: ContentHandle) -> Option<FileDescriptor> {
        let resolver = Arc::clone(&self.resolver);
        match tokio::task::spawn_blocking(move || resolver.resolve(&handle)).await {
            Ok(descriptor) => Some(descriptor),
            Err(e) => {
                warn!(error = %e, "resolver task failed");
                None
            }
        }
    }

    /// Fan out one blocking task per handle, then collect in input order,
    /// skipping attachments whose copy failed.
    async fn resolve_all(&self, handles: Vec<ContentHandle>) -> Vec<FileDescriptor> {
        let tasks: Vec<_> = handles
            .into_iter()
            .map(|handle| {
                let resolver = Arc::clone(&self.resolver);
                tokio::task::spawn_blocking(move || resolver.resolve(&handle))
            })
            .collect();

        let mut files = Vec::with_capacity(tasks.len());
        for (index, task) in tasks.into_iter().enumerate() {
            match task.await {
                Ok(descriptor) if descriptor.local_path.is_some() => files.push(descriptor),
                Ok(descriptor) => {
                    warn!(index, handle = %descriptor.source_handle, "skipping attachment, copy failed");
                }
                Err(e) => warn!(index, error = %e, "resolver task failed"),
            }
        }
        files
    }
}
