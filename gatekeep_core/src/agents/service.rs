use std::sync::Arc;

use tracing::{info, warn};

use super::{
    AgentCapabilities, AgentError, AgentPlugin, AgentRegistry, AgentSummary, DeliveryReceipt,
};
use crate::api::ReviewDecision;
use crate::{Error, Result};

/// High-level façade for handing decisions to agents.
#[derive(Clone)]
pub struct AgentService {
    registry: Arc<AgentRegistry>,
}

impl AgentService {
    /// Create an agent service backed by the provided registry.
    #[must_use]
    pub fn new(registry: AgentRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Access the underlying registry.
    #[must_use]
    pub fn registry(&self) -> Arc<AgentRegistry> {
        Arc::clone(&self.registry)
    }

    /// List summaries for all registered agents.
    #[must_use]
    pub fn summaries(&self) -> Vec<AgentSummary> {
        self.registry.summaries()
    }

    /// Fetch capabilities for an agent, if registered.
    #[must_use]
    pub fn capabilities(&self, agent_id: &str) -> Option<AgentCapabilities> {
        self.registry.capabilities(agent_id)
    }

    /// Hand `decision` to the agent registered as `agent_id`.
    ///
    /// Decisions the agent does not advertise support for are refused before
    /// the agent is called.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AgentNotRegistered`] when the id is unknown and
    /// [`Error::Agent`] when the agent refuses or fails.
    pub fn deliver(&self, agent_id: &str, decision: &ReviewDecision) -> Result<DeliveryReceipt> {
        let agent = self.agent(agent_id)?;
        let kind = decision.kind();
        if !agent.capabilities().supports(kind) {
            warn!(agent = agent_id, ?kind, "agent does not support decision");
            return Err(Error::Agent {
                agent: agent_id.to_string(),
                source: AgentError::UnsupportedDecision { kind },
            });
        }

        let receipt = agent.deliver(decision).map_err(|source| Error::Agent {
            agent: agent_id.to_string(),
            source,
        })?;
        info!(
            agent = agent_id,
            file_path = decision.file_path(),
            decision = ?kind,
            accepted = receipt.accepted,
            "decision delivered"
        );
        Ok(receipt)
    }

    fn agent(&self, agent_id: &str) -> Result<Arc<dyn AgentPlugin>> {
        self.registry
            .get(agent_id)
            .ok_or_else(|| Error::AgentNotRegistered {
                agent: agent_id.to_string(),
            })
    }
}

impl std::fmt::Debug for AgentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut agent_ids: Vec<String> = self
            .registry
            .ids()
            .map(std::string::ToString::to_string)
            .collect();
        agent_ids.sort();
        f.debug_struct("AgentService")
            .field("agents", &agent_ids)
            .finish()
    }
}
