//! Agent registry keeps track of available decision recipients.

use std::collections::HashMap;
use std::sync::Arc;

use super::{AgentCapabilities, AgentPlugin, AgentSummary};

/// In-memory registry for agents.
#[derive(Default)]
pub struct AgentRegistry {
    agents: HashMap<&'static str, Arc<dyn AgentPlugin>>,
}

impl AgentRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent keyed by its `AgentPlugin::id`.
    pub fn register<P>(&mut self, agent: P)
    where
        P: AgentPlugin + 'static,
    {
        self.register_arc(Arc::new(agent));
    }

    /// Register an agent that is shared with other owners.
    pub fn register_arc(&mut self, agent: Arc<dyn AgentPlugin>) {
        self.agents.insert(agent.id(), agent);
    }

    /// Retrieve an agent by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<dyn AgentPlugin>> {
        self.agents.get(id).cloned()
    }

    /// Returns the list of registered agent identifiers.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.agents.keys().copied()
    }

    /// Summaries for every registered agent, sorted by id.
    #[must_use]
    pub fn summaries(&self) -> Vec<AgentSummary> {
        let mut summaries: Vec<AgentSummary> = self
            .agents
            .values()
            .map(|agent| AgentSummary {
                id: agent.id().to_owned(),
                label: agent.label().to_owned(),
                capabilities: agent.capabilities(),
            })
            .collect();
        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        summaries
    }

    /// Capabilities for `id`, if registered.
    #[must_use]
    pub fn capabilities(&self, id: &str) -> Option<AgentCapabilities> {
        self.agents.get(id).map(|agent| agent.capabilities())
    }
}

impl std::fmt::Debug for AgentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<&str> = self.ids().collect();
        ids.sort_unstable();
        f.debug_struct("AgentRegistry").field("agents", &ids).finish()
    }
}
