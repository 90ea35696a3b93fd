// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Extension → app handoff.
//
// The share extension runs in its own process. It writes the event JSON
// into a store both processes can reach, then opens `<scheme>://share` to
// wake the main app, which reads and clears the entry.

use std::sync::Arc;

use sharewerk_bridge::SharedStore;
use sharewerk_core::config::ReceiverConfig;
use sharewerk_core::error::Result;
use sharewerk_core::types::ShareEvent;
use tracing::{debug, warn};

/// Host part of the wake-up URL.
const SHARE_HOST: &str = "share";

pub struct Handoff {
    store: Arc<dyn SharedStore>,
    key: String,
    scheme: String,
}

impl Handoff {
    pub fn new(store: Arc<dyn SharedStore>, config: &ReceiverConfig) -> Self {
        Self {
            store,
            key: config.shared_key.clone(),
            scheme: config.url_scheme.clone(),
        }
    }

    /// URL the extension opens after publishing.
    pub fn wake_url(&self) -> String {
        format!("{}://{SHARE_HOST}", self.scheme)
    }

    /// Extension side: store `event` for the main app, replacing any entry
    /// it has not picked up yet.
    pub fn publish(&self, event: &ShareEvent) -> Result<()> {
        let json = serde_json::to_string(event)?;
        self.store.put(&self.key, &json)?;
        debug!(key = %self.key, bytes = json.len(), "share published for main app");
        Ok(())
    }

    /// Main-app side: read and clear the published event.
    ///
    /// An entry that does not parse is cleared and reported as absent.
    pub fn take(&self) -> Result<Option<ShareEvent>> {
        let Some(json) = self.store.take(&self.key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&json) {
            Ok(event) => Ok(Some(event)),
            Err(e) => {
                warn!(key = %self.key, error = %e, "discarding malformed handoff entry");
                Ok(None)
            }
        }
    }

    /// Whether `url` is the extension's wake-up URL.
    ///
    /// The scheme compares case-insensitively. The host, if there is one,
    /// must be `share`.
    pub fn matches_url(&self, url: &str) -> bool {
        let Some((scheme, rest)) = url.split_once("://") else {
            return false;
        };
        if self.scheme.is_empty() || !scheme.eq_ignore_ascii_case(&self.scheme) {
            return false;
        }
        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        host.is_empty() || host.eq_ignore_ascii_case(SHARE_HOST)
    }
}
