//! Line-level sequence alignment.
//!
//! [`compute_diff`] produces an exact minimal edit script from the classic
//! longest-common-subsequence table. Time and space are `O(n * m)` in the
//! number of lines, so callers facing untrusted input go through
//! [`DiffEngine`], which refuses inputs whose table would exceed a cell cap.

use tracing::{debug, warn};

use crate::api::EditOp;
use crate::{Error, Result};

/// Default cap on `(old_lines + 1) * (new_lines + 1)`.
pub const DEFAULT_MAX_CELLS: usize = 16_000_000;

/// Size-guarded entry point for diff generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffEngine {
    max_cells: usize,
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffEngine {
    /// Construct an engine with the default cell cap.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_max_cells(DEFAULT_MAX_CELLS)
    }

    /// Construct an engine that refuses tables larger than `max_cells`.
    #[must_use]
    pub const fn with_max_cells(max_cells: usize) -> Self {
        Self { max_cells }
    }

    /// The configured cell cap.
    #[must_use]
    pub const fn max_cells(&self) -> usize {
        self.max_cells
    }

    /// Compute the edit script turning `old` into `new`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputTooLarge`] when the alignment table would exceed
    /// the cell cap. Nothing is allocated in that case.
    pub fn diff(&self, old: &str, new: &str) -> Result<Vec<EditOp>> {
        let old_lines = split_lines(old);
        let new_lines = split_lines(new);

        let cells = (old_lines.len() + 1).checked_mul(new_lines.len() + 1);
        if cells.map_or(true, |cells| cells > self.max_cells) {
            warn!(
                old_lines = old_lines.len(),
                new_lines = new_lines.len(),
                limit = self.max_cells,
                "refusing to diff oversized input"
            );
            return Err(Error::InputTooLarge {
                old_lines: old_lines.len(),
                new_lines: new_lines.len(),
                limit: self.max_cells,
            });
        }

        Ok(align(&old_lines, &new_lines))
    }
}

/// Compute the edit script turning `old` into `new`, with no size guard.
///
/// Both texts are split on `\n` without normalization: an empty text is one
/// empty line and a trailing newline yields a trailing empty line.
#[must_use]
pub fn compute_diff(old: &str, new: &str) -> Vec<EditOp> {
    align(&split_lines(old), &split_lines(new))
}

fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

fn align(old: &[&str], new: &[&str]) -> Vec<EditOp> {
    let table = lcs_table(old, new);

    let mut ops = Vec::with_capacity(old.len().max(new.len()));
    let mut i = old.len();
    let mut j = new.len();
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && old[i - 1] == new[j - 1] {
            ops.push(EditOp::equal(old[i - 1], i, j));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || table[i][j - 1] >= table[i - 1][j]) {
            // Inserts are emitted first while walking backwards, so after the
            // reversal a tied delete/insert pair reads delete-then-insert.
            ops.push(EditOp::insert(new[j - 1], j));
            j -= 1;
        } else {
            ops.push(EditOp::delete(old[i - 1], i));
            i -= 1;
        }
    }
    ops.reverse();

    debug!(
        old_lines = old.len(),
        new_lines = new.len(),
        ops = ops.len(),
        common = table[old.len()][new.len()],
        "aligned line sequences"
    );
    ops
}

/// `table[i][j]` is the LCS length of `old[..i]` and `new[..j]`.
fn lcs_table(old: &[&str], new: &[&str]) -> Vec<Vec<u32>> {
    let mut table = vec![vec![0u32; new.len() + 1]; old.len() + 1];
    for i in 1..=old.len() {
        for j in 1..=new.len() {
            table[i][j] = if old[i - 1] == new[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }
    table
}
