// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware cache directory resolution.

use std::ffi::OsString;
use std::path::PathBuf;

/// Return the cache directory for copied shares and thumbnails.
///
/// On desktop this uses the XDG cache location. On mobile the host app
/// passes its own cache directory instead.
pub fn cache_dir() -> PathBuf {
    cache_dir_from(
        std::env::var_os("XDG_CACHE_HOME"),
        std::env::var_os("HOME"),
    )
}

fn cache_dir_from(xdg_cache: Option<OsString>, home: Option<OsString>) -> PathBuf {
    let base = match (xdg_cache, home) {
        (Some(xdg), _) if !xdg.is_empty() => PathBuf::from(xdg),
        (_, Some(home)) if !home.is_empty() => PathBuf::from(home).join(".cache"),
        // Last resort
        _ => std::env::temp_dir(),
    };
    base.join("sharewerk")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdg_wins_over_home() {
        let dir = cache_dir_from(Some("/xdg".into()), Some("/home/u".into()));
        assert_eq!(dir, PathBuf::from("/xdg/sharewerk"));
    }

    #[test]
    fn home_cache_when_no_xdg() {
        let dir = cache_dir_from(None, Some("/home/u".into()));
        assert_eq!(dir, PathBuf::from("/home/u/.cache/sharewerk"));

        let empty_xdg = cache_dir_from(Some("".into()), Some("/home/u".into()));
        assert_eq!(empty_xdg, dir);
    }

    #[test]
    fn temp_dir_as_last_resort() {
        assert_eq!(cache_dir_from(None, None), std::env::temp_dir().join("sharewerk"));
    }
}
