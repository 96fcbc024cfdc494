//! Agent integration entry points.

mod service;

pub use gatekeep_agent_api::{
    AgentCapabilities, AgentError, AgentPlugin, AgentRegistry, AgentResult, AgentSummary,
    DeliveryReceipt,
};
pub use gatekeep_agents::{default_registry, CommandAgent, LocalAgent};

pub use service::AgentService;
