use std::sync::Mutex;

use gatekeep_agent_api::{
    AgentCapabilities, AgentError, AgentPlugin, AgentResult, DeliveryReceipt,
};
use gatekeep_api::ReviewDecision;

/// Builtin agent that keeps decisions in an in-process outbox.
///
/// The host drains the outbox and performs the write, discard, or
/// regeneration itself; no external calls are made.
#[derive(Debug, Default)]
pub struct LocalAgent {
    outbox: Mutex<Vec<ReviewDecision>>,
}

impl LocalAgent {
    /// Create an agent with an empty outbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every decision delivered so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the outbox lock was poisoned.
    pub fn drain(&self) -> AgentResult<Vec<ReviewDecision>> {
        let mut outbox = self
            .outbox
            .lock()
            .map_err(|_| AgentError::message("local outbox poisoned"))?;
        Ok(std::mem::take(&mut *outbox))
    }
}

impl AgentPlugin for LocalAgent {
    fn id(&self) -> &'static str {
        "local"
    }

    fn label(&self) -> &'static str {
        "Local Outbox"
    }

    fn capabilities(&self) -> AgentCapabilities {
        AgentCapabilities::new(true, true)
    }

    fn deliver(&self, decision: &ReviewDecision) -> AgentResult<DeliveryReceipt> {
        let mut outbox = self
            .outbox
            .lock()
            .map_err(|_| AgentError::message("local outbox poisoned"))?;
        outbox.push(decision.clone());
        Ok(DeliveryReceipt::accepted(format!(
            "queued {:?} for {}",
            decision.kind(),
            decision.file_path()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatekeep_api::DecisionKind;

    #[test]
    fn drain_returns_decisions_in_order() {
        let agent = LocalAgent::new();
        agent
            .deliver(&ReviewDecision::Rejected {
                file_path: "a.txt".into(),
            })
            .expect("deliver first");
        let receipt = agent
            .deliver(&ReviewDecision::Approved {
                file_path: "b.txt".into(),
                new_content: "b".into(),
            })
            .expect("deliver second");
        assert!(receipt.accepted);

        let drained = agent.drain().expect("drain");
        let kinds: Vec<_> = drained.iter().map(ReviewDecision::kind).collect();
        assert_eq!(kinds, vec![DecisionKind::Rejected, DecisionKind::Approved]);
        assert!(agent.drain().expect("drain again").is_empty());
    }
}
