use serde::{Deserialize, Serialize};

/// Role of a single operation in a line-level edit script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditTag {
    /// Line present, unchanged, on both sides.
    Equal,
    /// Line only present in the old content.
    Delete,
    /// Line only present in the new content.
    Insert,
}

/// One alignment result produced by the diff engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditOp {
    /// Whether the line is kept, removed, or added.
    pub tag: EditTag,
    /// Raw text of the line, without its trailing newline.
    pub text: String,
    /// 1-based line number in the old content (`Equal` and `Delete` only).
    #[serde(default)]
    pub old_line: Option<usize>,
    /// 1-based line number in the new content (`Equal` and `Insert` only).
    #[serde(default)]
    pub new_line: Option<usize>,
}

impl EditOp {
    /// An unchanged line present at `old_line` and `new_line`.
    pub fn equal(text: impl Into<String>, old_line: usize, new_line: usize) -> Self {
        Self {
            tag: EditTag::Equal,
            text: text.into(),
            old_line: Some(old_line),
            new_line: Some(new_line),
        }
    }

    /// A line removed from `old_line`.
    pub fn delete(text: impl Into<String>, old_line: usize) -> Self {
        Self {
            tag: EditTag::Delete,
            text: text.into(),
            old_line: Some(old_line),
            new_line: None,
        }
    }

    /// A line added at `new_line`.
    pub fn insert(text: impl Into<String>, new_line: usize) -> Self {
        Self {
            tag: EditTag::Insert,
            text: text.into(),
            old_line: None,
            new_line: Some(new_line),
        }
    }

    /// Returns `true` for `Delete` and `Insert` operations.
    pub const fn is_change(&self) -> bool {
        !matches!(self.tag, EditTag::Equal)
    }
}

/// Type of a line prepared for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayLineKind {
    /// A newly added line.
    Added,
    /// A deleted line.
    Deleted,
    /// Unchanged line shown around a change.
    Context,
    /// Marker standing in for one or more hidden unchanged lines.
    Gap,
}

/// A rendering-ready line of a windowed diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayLine {
    /// The role the line plays in the rendered diff.
    pub kind: DisplayLineKind,
    /// Raw text of the line. Empty for gap markers.
    #[serde(default)]
    pub text: String,
    /// 1-based line number on the old side if applicable.
    #[serde(default)]
    pub old_line: Option<usize>,
    /// 1-based line number on the new side if applicable.
    #[serde(default)]
    pub new_line: Option<usize>,
}

impl DisplayLine {
    /// A gap marker separating two disjoint visible regions.
    pub const fn gap() -> Self {
        Self {
            kind: DisplayLineKind::Gap,
            text: String::new(),
            old_line: None,
            new_line: None,
        }
    }

    /// Returns `true` if the line is a gap marker.
    pub const fn is_gap(&self) -> bool {
        matches!(self.kind, DisplayLineKind::Gap)
    }
}

impl From<&EditOp> for DisplayLine {
    fn from(op: &EditOp) -> Self {
        let kind = match op.tag {
            EditTag::Equal => DisplayLineKind::Context,
            EditTag::Delete => DisplayLineKind::Deleted,
            EditTag::Insert => DisplayLineKind::Added,
        };
        Self {
            kind,
            text: op.text.clone(),
            old_line: op.old_line,
            new_line: op.new_line,
        }
    }
}

/// Summary of the changes contained in an edit script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DiffStats {
    /// Number of inserted lines.
    pub added: usize,
    /// Number of deleted lines.
    pub removed: usize,
    /// `added + removed`.
    pub total: usize,
}

impl DiffStats {
    /// A stats instance with no changes.
    pub const ZERO: Self = Self {
        added: 0,
        removed: 0,
        total: 0,
    };

    /// Convenience constructor for explicit values.
    pub const fn new(added: usize, removed: usize) -> Self {
        Self {
            added,
            removed,
            total: added + removed,
        }
    }

    /// Count insertions and deletions in an edit script.
    pub fn from_ops(ops: &[EditOp]) -> Self {
        let (added, removed) = ops.iter().fold((0, 0), |(added, removed), op| match op.tag {
            EditTag::Insert => (added + 1, removed),
            EditTag::Delete => (added, removed + 1),
            EditTag::Equal => (added, removed),
        });
        Self::new(added, removed)
    }

    /// Short `+added/-removed` summary used by review surfaces.
    pub fn summary(&self) -> String {
        format!("+{}/-{}", self.added, self.removed)
    }
}

/// Coarse severity label derived from the number of changed lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    /// A handful of changed lines.
    Low,
    /// A moderate rewrite.
    Medium,
    /// A large rewrite that deserves a careful look.
    High,
}

impl Impact {
    /// Text shown in the severity badge.
    pub const fn badge(self) -> &'static str {
        match self {
            Self::Low => "low impact",
            Self::Medium => "medium impact",
            Self::High => "high impact",
        }
    }
}

/// The two alternative ways a pending proposal can be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Single interleaved stream of added, deleted, and context lines.
    #[default]
    Unified,
    /// Two aligned columns: before and after.
    SideBySide,
}

/// Windowed diff partitioned into before/after columns.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SideBySideView {
    /// Context and deleted lines, numbered by the old content.
    #[serde(default)]
    pub before: Vec<DisplayLine>,
    /// Context and added lines, numbered by the new content.
    #[serde(default)]
    pub after: Vec<DisplayLine>,
}

impl SideBySideView {
    /// Partition windowed display lines into the two columns.
    ///
    /// Gap markers are carried into both columns so each side keeps its
    /// region boundaries.
    pub fn from_lines(lines: &[DisplayLine]) -> Self {
        let mut view = Self::default();
        for line in lines {
            match line.kind {
                DisplayLineKind::Context | DisplayLineKind::Gap => {
                    view.before.push(line.clone());
                    view.after.push(line.clone());
                }
                DisplayLineKind::Deleted => view.before.push(line.clone()),
                DisplayLineKind::Added => view.after.push(line.clone()),
            }
        }
        view
    }
}
