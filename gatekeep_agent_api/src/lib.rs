mod registry;
mod types;

pub use registry::AgentRegistry;
pub use types::{AgentCapabilities, AgentError, AgentResult, AgentSummary, DeliveryReceipt};

use gatekeep_api::ReviewDecision;

/// Trait implemented by integrations that act on review decisions.
pub trait AgentPlugin: Send + Sync {
    /// Stable identifier used for lookup and logging.
    fn id(&self) -> &'static str;

    /// Human-friendly label for UI surfaces.
    fn label(&self) -> &'static str;

    /// Capabilities advertised by the agent.
    fn capabilities(&self) -> AgentCapabilities;

    /// Hand a terminal decision to the agent.
    ///
    /// An approved decision asks the agent to commit the new content, a
    /// rejected one to discard it, and an alternative request to regenerate.
    ///
    /// # Errors
    ///
    /// Implementors should surface transport or backend failures, and
    /// [`AgentError::UnsupportedDecision`] for decisions they cannot act on.
    fn deliver(&self, decision: &ReviewDecision) -> AgentResult<DeliveryReceipt>;
}
