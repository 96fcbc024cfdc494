use serde::{Deserialize, Serialize};

use gatekeep_api::DecisionKind;

/// Capabilities advertised by an agent for UI feature toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AgentCapabilities {
    /// Whether the agent commits approved content to storage.
    pub applies_edits: bool,
    /// Whether the agent can regenerate a proposal on request.
    pub regenerates_proposals: bool,
}

impl AgentCapabilities {
    /// Construct a new capabilities struct with explicit flags.
    #[must_use]
    pub const fn new(applies_edits: bool, regenerates_proposals: bool) -> Self {
        Self {
            applies_edits,
            regenerates_proposals,
        }
    }

    /// Whether a decision of `kind` can be acted upon.
    #[must_use]
    pub const fn supports(&self, kind: DecisionKind) -> bool {
        match kind {
            DecisionKind::Approved => self.applies_edits,
            DecisionKind::Rejected => true,
            DecisionKind::AlternativeRequested => self.regenerates_proposals,
        }
    }
}

/// Summary information about a registered agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSummary {
    /// Stable identifier for the agent.
    pub id: String,
    /// Human-friendly label for display.
    pub label: String,
    /// Capability flags indicating supported decisions.
    pub capabilities: AgentCapabilities,
}

/// Acknowledgement returned after an agent accepted a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DeliveryReceipt {
    /// Whether the agent started acting on the decision.
    #[serde(default)]
    pub accepted: bool,
    /// Optional informational message for the UI.
    #[serde(default)]
    pub message: Option<String>,
}

impl DeliveryReceipt {
    /// An accepted receipt carrying `message`.
    #[must_use]
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            accepted: true,
            message: Some(message.into()),
        }
    }
}

/// Errors surfaced by agent integrations.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The agent cannot act on this kind of decision.
    #[error("decision '{kind:?}' is not supported by this agent")]
    UnsupportedDecision {
        /// Kind of the refused decision.
        kind: DecisionKind,
    },
    /// Generic failure surfaced by the agent.
    #[error("{message}")]
    Failure {
        /// Human-readable error message.
        message: String,
    },
}

impl AgentError {
    /// Helper to construct a failure from any displayable message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }
}

/// Convenience result alias for agent operations.
pub type AgentResult<T> = std::result::Result<T, AgentError>;
