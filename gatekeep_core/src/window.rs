//! Context windowing of edit scripts.

use tracing::debug;

use crate::api::{DisplayLine, EditOp};

/// Unchanged lines shown on each side of a change, as in unified diffs.
pub const DEFAULT_CONTEXT_RADIUS: usize = 3;

/// Trim an edit script down to its changes plus `context_radius` lines of
/// surrounding context.
///
/// Overlapping context ranges merge into one run. A gap marker separates two
/// visible runs that have hidden operations between them; hidden operations
/// before the first run or after the last one are dropped without a marker.
/// A script with no changes yields no lines at all.
#[must_use]
pub fn window(ops: &[EditOp], context_radius: usize) -> Vec<DisplayLine> {
    let mut visible = vec![false; ops.len()];
    for (index, _) in ops.iter().enumerate().filter(|(_, op)| op.is_change()) {
        let start = index.saturating_sub(context_radius);
        let end = index.saturating_add(context_radius).min(ops.len() - 1);
        visible[start..=end].fill(true);
    }

    let mut lines = Vec::new();
    let mut last_emitted: Option<usize> = None;
    for (index, op) in ops.iter().enumerate() {
        if !visible[index] {
            continue;
        }
        if last_emitted.is_some_and(|last| index > last + 1) {
            lines.push(DisplayLine::gap());
        }
        lines.push(DisplayLine::from(op));
        last_emitted = Some(index);
    }

    debug!(
        ops = ops.len(),
        lines = lines.len(),
        context_radius,
        "windowed edit script"
    );
    lines
}
