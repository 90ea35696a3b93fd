// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sharewerk — Native platform adapters.
//
// Defines the OS-facing traits and picks the implementation for the target
// operating system. Everything above this crate is platform-independent.

pub mod local;
pub mod traits;

#[cfg(target_os = "ios")]
pub mod ios;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub mod desktop;

use std::sync::Arc;

use sharewerk_core::config::ReceiverConfig;

pub use local::{FileStore, MemoryStore};
pub use traits::{FrameRequest, NativeContent, NativeMedia, PlatformAdapter, SharedStore};

/// Adapter for the operating system this binary was built for.
///
/// Shared behind an `Arc` because attachment resolution fans out across
/// blocking worker threads.
pub fn platform_adapter() -> Arc<dyn PlatformAdapter> {
    #[cfg(target_os = "ios")]
    {
        Arc::new(ios::IosAdapter::new())
    }
    #[cfg(target_os = "android")]
    {
        Arc::new(android::AndroidAdapter::new())
    }
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        Arc::new(desktop::DesktopAdapter)
    }
}

/// Handoff store shared with the share extension.
///
/// iOS uses the app-group `UserDefaults` suite, Android a private
/// `SharedPreferences` file, and desktop builds a JSON file in the cache
/// directory.
pub fn shared_store(config: &ReceiverConfig) -> Arc<dyn SharedStore> {
    #[cfg(target_os = "ios")]
    {
        Arc::new(ios::UserDefaultsStore::new(&config.app_group))
    }
    #[cfg(target_os = "android")]
    {
        Arc::new(android::PreferencesStore::new(&config.app_group))
    }
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        Arc::new(FileStore::new(&config.cache_dir, &config.app_group))
    }
}
