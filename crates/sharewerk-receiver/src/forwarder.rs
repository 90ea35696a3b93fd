// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge forwarder — pushes events to the application layer when it is
// listening, and parks the latest one otherwise.

use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;
use sharewerk_core::types::ShareEvent;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Method name the application layer calls for a share that arrived before
/// it was listening.
pub const GET_INITIAL_SHARE: &str = "getInitialShare";

/// Push channel into the application layer (`onShareReceived`).
pub trait ShareChannel: Send + Sync {
    fn on_share_received(&self, event: &ShareEvent);
}

/// Reply to a method call from the application layer.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodResult {
    Success(Value),
    NotImplemented,
}

/// At most one share that arrived before the application was listening.
///
/// A second pre-bridge share replaces the first.
#[derive(Debug, Default)]
pub struct PendingSlot {
    event: Mutex<Option<ShareEvent>>,
}

impl PendingSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park `event`; returns `true` if it replaced an earlier one.
    pub fn store(&self, event: ShareEvent) -> bool {
        self.event
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(event)
            .is_some()
    }

    /// Take the parked event, leaving the slot empty.
    pub fn take(&self) -> Option<ShareEvent> {
        self.event.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}

/// [`ShareChannel`] feeding a tokio unbounded channel, for async hosts.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<ShareEvent>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ShareEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ShareChannel for ChannelSink {
    fn on_share_received(&self, event: &ShareEvent) {
        if self.tx.send(event.clone()).is_err() {
            warn!("share channel receiver dropped, event lost");
        }
    }
}

/// Delivers events to the attached channel or the pending slot.
pub struct Forwarder {
    slot: PendingSlot,
    channel: Mutex<Option<Arc<dyn ShareChannel>>>,
}

impl Forwarder {
    pub fn new(slot: PendingSlot) -> Self {
        Self {
            slot,
            channel: Mutex::new(None),
        }
    }

    /// Start pushing events to `channel`. Events parked earlier stay in the
    /// slot until retrieved.
    pub fn attach(&self, channel: Arc<dyn ShareChannel>) {
        *self.channel.lock().unwrap_or_else(PoisonError::into_inner) = Some(channel);
        debug!("share channel attached");
    }

    /// Stop pushing; later events are parked.
    pub fn detach(&self) -> Option<Arc<dyn ShareChannel>> {
        let previous = self.channel.lock().unwrap_or_else(PoisonError::into_inner).take();
        debug!(was_attached = previous.is_some(), "share channel detached");
        previous
    }

    /// Push to the attached channel, or park in the slot.
    pub fn deliver(&self, event: ShareEvent) {
        // clone out so the callback runs without the lock held
        let channel = self.channel.lock().unwrap_or_else(PoisonError::into_inner).clone();
        match channel {
            Some(channel) => {
                info!(kind = ?event.kind(), "forwarding share to application");
                channel.on_share_received(&event);
            }
            None => {
                let replaced = self.slot.store(event);
                if replaced {
                    warn!("pending share replaced by a newer one");
                } else {
                    info!("share parked until the application asks");
                }
            }
        }
    }

    /// The parked event, if any. Read-once.
    pub fn retrieve_initial(&self) -> Option<ShareEvent> {
        self.slot.take()
    }
}
