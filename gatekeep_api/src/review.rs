use serde::{Deserialize, Serialize};

/// A candidate file rewrite awaiting human approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Identifier of the file the agent wants to rewrite. Opaque to the core.
    pub file_path: String,
    /// Current, authoritative content of the file.
    pub old_content: String,
    /// Content the agent proposes to write.
    pub new_content: String,
    /// Human-readable justification; may be empty.
    #[serde(default)]
    pub reason: String,
}

impl Proposal {
    /// Create a proposal without a stated reason.
    pub fn new(
        file_path: impl Into<String>,
        old_content: impl Into<String>,
        new_content: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            old_content: old_content.into(),
            new_content: new_content.into(),
            reason: String::new(),
        }
    }

    /// Attach a human-readable reason.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }
}

/// Normalized command every input modality (keys, buttons) is mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewCommand {
    /// Accept the proposal.
    Approve,
    /// Discard the proposal.
    Reject,
    /// Ask the agent for a different proposal.
    RequestAlternative,
}

/// Kind of a terminal review decision, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    /// The proposal was approved.
    Approved,
    /// The proposal was rejected.
    Rejected,
    /// An alternative proposal was requested.
    AlternativeRequested,
}

impl From<ReviewCommand> for DecisionKind {
    fn from(command: ReviewCommand) -> Self {
        match command {
            ReviewCommand::Approve => Self::Approved,
            ReviewCommand::Reject => Self::Rejected,
            ReviewCommand::RequestAlternative => Self::AlternativeRequested,
        }
    }
}

/// Terminal outcome of reviewing one proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum ReviewDecision {
    /// Apply `new_content` at `file_path`.
    Approved {
        /// File the approved content belongs to.
        file_path: String,
        /// Content to commit to storage.
        new_content: String,
    },
    /// Discard the proposal; the old content stays authoritative.
    Rejected {
        /// File the rejected proposal targeted.
        file_path: String,
    },
    /// Regenerate a different proposal for the same intent.
    AlternativeRequested {
        /// File the proposal targeted.
        file_path: String,
        /// Reason attached to the proposal being replaced.
        #[serde(default)]
        reason: String,
    },
}

impl ReviewDecision {
    /// Resolve `proposal` with `command`, consuming it.
    pub fn resolve(proposal: Proposal, command: ReviewCommand) -> Self {
        let Proposal {
            file_path,
            new_content,
            reason,
            ..
        } = proposal;
        match command {
            ReviewCommand::Approve => Self::Approved {
                file_path,
                new_content,
            },
            ReviewCommand::Reject => Self::Rejected { file_path },
            ReviewCommand::RequestAlternative => Self::AlternativeRequested { file_path, reason },
        }
    }

    /// File the decision applies to.
    pub fn file_path(&self) -> &str {
        match self {
            Self::Approved { file_path, .. }
            | Self::Rejected { file_path }
            | Self::AlternativeRequested { file_path, .. } => file_path,
        }
    }

    /// The decision kind without its payload.
    pub const fn kind(&self) -> DecisionKind {
        match self {
            Self::Approved { .. } => DecisionKind::Approved,
            Self::Rejected { .. } => DecisionKind::Rejected,
            Self::AlternativeRequested { .. } => DecisionKind::AlternativeRequested,
        }
    }
}
