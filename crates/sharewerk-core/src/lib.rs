// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sharewerk — Core types, classification, and error definitions shared
// across all crates.

pub mod classify;
pub mod config;
pub mod error;
pub mod mime;
pub mod size;
pub mod types;

pub use classify::classify;
pub use config::ReceiverConfig;
pub use error::ShareError;
pub use types::*;
