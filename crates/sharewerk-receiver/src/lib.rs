// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// sharewerk-receiver — Turns inbound OS share events into normalized
// `ShareEvent`s and hands them to the application layer.
//
// Pipeline: `router` decides what an inbound share means, `resolver` turns
// each content handle into a `FileDescriptor` (metadata, cache copy,
// thumbnail), `forwarder` delivers the result or parks it until the
// application asks, and `handoff` carries events from the iOS extension
// process to the main app.

pub mod forwarder;
pub mod handoff;
pub mod receiver;
pub mod resolver;
pub mod router;

#[cfg(test)]
pub(crate) mod testing;

pub use forwarder::{ChannelSink, Forwarder, MethodResult, PendingSlot, ShareChannel};
pub use handoff::Handoff;
pub use receiver::ShareReceiver;
pub use resolver::FileResolver;
pub use router::EventRouter;
