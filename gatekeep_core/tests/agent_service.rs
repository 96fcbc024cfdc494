use std::sync::{Arc, Mutex};

use gatekeep_core::agents::{
    default_registry, AgentCapabilities, AgentError, AgentPlugin, AgentRegistry, AgentResult,
    DeliveryReceipt,
};
use gatekeep_core::{
    AgentService, DecisionKind, Error, Proposal, ReviewConfig, ReviewController, ReviewDecision,
    ShortcutHub,
};

#[derive(Default)]
struct FakeAgent {
    delivered: Arc<Mutex<Vec<ReviewDecision>>>,
}

impl AgentPlugin for FakeAgent {
    fn id(&self) -> &'static str {
        "fake"
    }

    fn label(&self) -> &'static str {
        "Fake Agent"
    }

    fn capabilities(&self) -> AgentCapabilities {
        AgentCapabilities::new(true, false)
    }

    fn deliver(&self, decision: &ReviewDecision) -> AgentResult<DeliveryReceipt> {
        self.delivered
            .lock()
            .expect("delivered lock")
            .push(decision.clone());
        Ok(DeliveryReceipt::accepted("written"))
    }
}

struct FailingAgent;

impl AgentPlugin for FailingAgent {
    fn id(&self) -> &'static str {
        "failing"
    }

    fn label(&self) -> &'static str {
        "Failing Agent"
    }

    fn capabilities(&self) -> AgentCapabilities {
        AgentCapabilities::new(true, true)
    }

    fn deliver(&self, _decision: &ReviewDecision) -> AgentResult<DeliveryReceipt> {
        Err(AgentError::message("disk full"))
    }
}

fn service() -> (AgentService, Arc<Mutex<Vec<ReviewDecision>>>) {
    let agent = FakeAgent::default();
    let delivered = Arc::clone(&agent.delivered);
    let mut registry = AgentRegistry::new();
    registry.register(agent);
    registry.register(FailingAgent);
    (AgentService::new(registry), delivered)
}

fn approved() -> ReviewDecision {
    ReviewDecision::Approved {
        file_path: "src/lib.rs".into(),
        new_content: "pub fn f() {}\n".into(),
    }
}

#[test]
fn delivers_supported_decisions() {
    let (service, delivered) = service();

    let receipt = service.deliver("fake", &approved()).expect("deliver");
    assert!(receipt.accepted);
    assert_eq!(receipt.message.as_deref(), Some("written"));
    assert_eq!(delivered.lock().expect("delivered lock").len(), 1);

    let summaries = service.summaries();
    let ids: Vec<_> = summaries.iter().map(|summary| summary.id.as_str()).collect();
    assert_eq!(ids, vec!["failing", "fake"]);
}

#[test]
fn refuses_decisions_the_agent_cannot_handle() {
    let (service, delivered) = service();
    let decision = ReviewDecision::AlternativeRequested {
        file_path: "src/lib.rs".into(),
        reason: "smaller change".into(),
    };

    let err = service.deliver("fake", &decision).expect_err("unsupported");
    match err {
        Error::Agent {
            agent,
            source: AgentError::UnsupportedDecision { kind },
        } => {
            assert_eq!(agent, "fake");
            assert_eq!(kind, DecisionKind::AlternativeRequested);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(delivered.lock().expect("delivered lock").is_empty());
}

#[test]
fn unknown_agent_is_reported() {
    let (service, _delivered) = service();
    let err = service.deliver("missing", &approved()).expect_err("unknown");
    assert!(matches!(err, Error::AgentNotRegistered { agent } if agent == "missing"));
    assert!(service.capabilities("missing").is_none());
}

#[test]
fn agent_failures_are_wrapped() {
    let (service, _delivered) = service();
    let err = service.deliver("failing", &approved()).expect_err("failure");
    assert!(matches!(err, Error::Agent { ref agent, .. } if agent == "failing"));
    assert!(err.to_string().contains("disk full"));
}

#[test]
fn local_agent_receives_controller_decisions() {
    let (registry, outbox) = default_registry();
    let service = AgentService::new(registry);
    assert!(service.capabilities("command").is_some());

    let mut controller = ReviewController::new(&ReviewConfig::default(), ShortcutHub::new());
    controller
        .present(Proposal::new("notes.md", "draft", "final"))
        .expect("present");
    let decision = controller.approve().expect("approve");

    service.deliver("local", &decision).expect("deliver");
    let drained = outbox.drain().expect("drain");
    assert_eq!(drained, vec![decision]);
}
