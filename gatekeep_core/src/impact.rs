//! Severity classification of a diff.

use crate::api::{DiffStats, Impact};

/// Largest number of changed lines still classified as [`Impact::Low`].
pub const LOW_MAX_CHANGES: usize = 5;
/// Largest number of changed lines still classified as [`Impact::Medium`].
pub const MEDIUM_MAX_CHANGES: usize = 20;

/// Map the total number of changed lines to a severity.
///
/// The breakpoints are fixed and independent of file size.
#[must_use]
pub const fn classify(stats: DiffStats) -> Impact {
    if stats.total <= LOW_MAX_CHANGES {
        Impact::Low
    } else if stats.total <= MEDIUM_MAX_CHANGES {
        Impact::Medium
    } else {
        Impact::High
    }
}
