// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Share receiver — the entry points the host app wires OS callbacks to.
//
// Nothing here returns an error to the host. Failures degrade to missing
// fields or an ignored share and are logged where they happen.

use std::sync::Arc;

use serde_json::Value;
use sharewerk_bridge::{PlatformAdapter, SharedStore};
use sharewerk_core::config::ReceiverConfig;
use sharewerk_core::types::{ExtensionAttachment, ShareEvent, ShareIntent};
use tracing::{debug, error, info, instrument, warn};

use crate::forwarder::{Forwarder, GET_INITIAL_SHARE, MethodResult, PendingSlot, ShareChannel};
use crate::handoff::Handoff;
use crate::resolver::FileResolver;
use crate::router::EventRouter;

pub struct ShareReceiver {
    router: EventRouter,
    forwarder: Forwarder,
    handoff: Handoff,
}

impl ShareReceiver {
    pub fn new(
        config: ReceiverConfig,
        adapter: Arc<dyn PlatformAdapter>,
        store: Arc<dyn SharedStore>,
    ) -> Self {
        info!(
            platform = adapter.platform_name(),
            cache_dir = %config.cache_dir.display(),
            channel = %config.channel_name,
            "share receiver ready"
        );
        Self {
            router: EventRouter::new(FileResolver::new(adapter, &config)),
            forwarder: Forwarder::new(PendingSlot::new()),
            handoff: Handoff::new(store, &config),
        }
    }

    /// Receiver wired to the adapter and handoff store of the OS this was
    /// built for.
    pub fn for_platform(config: ReceiverConfig) -> Self {
        let adapter = sharewerk_bridge::platform_adapter();
        let store = sharewerk_bridge::shared_store(&config);
        Self::new(config, adapter, store)
    }

    pub fn handoff(&self) -> &Handoff {
        &self.handoff
    }

    /// Application layer is listening; push future shares to `channel`.
    pub fn attach(&self, channel: Arc<dyn ShareChannel>) {
        self.forwarder.attach(channel);
    }

    pub fn detach(&self) {
        self.forwarder.detach();
    }

    /// Android `onCreate` / `onNewIntent`. Returns the event that was
    /// delivered or parked.
    #[instrument(skip_all)]
    pub async fn handle_intent(&self, intent: ShareIntent) -> Option<ShareEvent> {
        let event = self.router.route_intent(intent).await?;
        self.forwarder.deliver(event.clone());
        Some(event)
    }

    /// iOS share extension: normalize the loaded attachments and publish
    /// them for the main app. The caller then opens
    /// [`Handoff::wake_url`].
    #[instrument(skip_all, fields(count = items.len()))]
    pub async fn handle_extension_items(
        &self,
        items: Vec<ExtensionAttachment>,
    ) -> Option<ShareEvent> {
        let event = self.router.route_attachments(items).await?;
        if let Err(e) = self.handoff.publish(&event) {
            error!(error = %e, "could not publish share for main app");
        }
        Some(event)
    }

    /// iOS main app URL-scheme callback. A matching URL picks up the
    /// published event and delivers it; returns that event.
    #[instrument(skip(self))]
    pub fn handle_open_url(&self, url: &str) -> Option<ShareEvent> {
        if !self.handoff.matches_url(url) {
            debug!("URL is not a share wake-up");
            return None;
        }
        let event = self.take_handoff()?;
        self.forwarder.deliver(event.clone());
        Some(event)
    }

    /// Share that arrived before the application was listening. Checks the
    /// in-process slot, then the handoff store. Read-once.
    pub fn get_initial_share(&self) -> Option<ShareEvent> {
        self.forwarder
            .retrieve_initial()
            .or_else(|| self.take_handoff())
    }

    /// Method-channel dispatch.
    #[instrument(skip(self))]
    pub fn handle_method_call(&self, method: &str) -> MethodResult {
        match method {
            GET_INITIAL_SHARE => {
                let payload = self
                    .get_initial_share()
                    .and_then(|event| match serde_json::to_value(&event) {
                        Ok(value) => Some(value),
                        Err(e) => {
                            warn!(error = %e, "cannot serialize pending share");
                            None
                        }
                    })
                    .unwrap_or_else(|| Value::Object(Default::default()));
                MethodResult::Success(payload)
            }
            _ => MethodResult::NotImplemented,
        }
    }

    fn take_handoff(&self) -> Option<ShareEvent> {
        self.handoff.take().unwrap_or_else(|e| {
            warn!(error = %e, "handoff store unreadable");
            None
        })
    }
}
