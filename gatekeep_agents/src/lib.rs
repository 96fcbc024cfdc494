mod command;
mod local;

use std::sync::Arc;

pub use command::CommandAgent;
pub use local::LocalAgent;

use gatekeep_agent_api::{AgentPlugin, AgentRegistry};

/// Build an agent registry populated with gatekeep's builtin agents.
///
/// The returned [`LocalAgent`] handle shares its outbox with the registered
/// instance so the host can drain delivered decisions.
#[must_use]
pub fn default_registry() -> (AgentRegistry, Arc<LocalAgent>) {
    let local = Arc::new(LocalAgent::new());
    let mut registry = AgentRegistry::new();
    registry.register_arc(Arc::clone(&local) as Arc<dyn AgentPlugin>);
    registry.register(CommandAgent::default());
    (registry, local)
}
