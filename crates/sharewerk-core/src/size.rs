// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable byte sizes for the application layer.

const KIB: f64 = 1024.0;

/// Format a byte count with binary units and two decimals.
///
/// Sizes under 1 KiB are printed as whole bytes (`"512 B"`).
pub fn format_file_size(bytes: u64) -> String {
    let kb = bytes as f64 / KIB;
    let mb = kb / KIB;
    let gb = mb / KIB;

    if gb >= 1.0 {
        format!("{gb:.2} GB")
    } else if mb >= 1.0 {
        format!("{mb:.2} MB")
    } else if kb >= 1.0 {
        format!("{kb:.2} KB")
    } else {
        format!("{bytes} B")
    }
}
