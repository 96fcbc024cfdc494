//! The single-proposal review state machine.
//!
//! A [`ReviewController`] is either idle or presenting exactly one proposal.
//! Every input modality funnels into [`ReviewController::dispatch`]; the
//! first command to arrive resolves the proposal and returns the controller
//! to idle, so a second trigger for the same proposal observes an error
//! instead of a second decision.

use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::api::{
    DiffStats, DisplayLine, Impact, Proposal, ReviewCommand, ReviewDecision, SideBySideView,
    ViewMode,
};
use crate::config::ReviewConfig;
use crate::diff::DiffEngine;
use crate::impact::classify;
use crate::keys::{Key, ShortcutHub, ShortcutSubscription};
use crate::window::window;
use crate::{Error, Result};

/// Identifies one presentation of one proposal.
///
/// Pointer controls keep the ticket of the proposal they were rendered for,
/// so a late click cannot resolve whatever proposal replaced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ProposalTicket(u64);

impl ProposalTicket {
    /// Raw ticket number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProposalTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Everything a review surface needs to show a pending proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Presentation {
    /// Ticket of this presentation.
    pub ticket: ProposalTicket,
    /// File the proposal targets.
    pub file_path: String,
    /// Justification supplied by the agent.
    pub reason: String,
    /// Windowed diff lines in unified order.
    pub lines: Vec<DisplayLine>,
    /// Added/removed counts over the full edit script.
    pub stats: DiffStats,
    /// Severity badge.
    pub impact: Impact,
    /// Active view strategy.
    pub view_mode: ViewMode,
}

impl Presentation {
    /// Before/after columns for the side-by-side view.
    #[must_use]
    pub fn side_by_side(&self) -> SideBySideView {
        SideBySideView::from_lines(&self.lines)
    }

    /// `+added/-removed` summary.
    #[must_use]
    pub fn summary(&self) -> String {
        self.stats.summary()
    }

    /// Whether the proposal leaves the file unchanged.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.stats.total == 0
    }
}

/// Coarse controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewPhase {
    /// No proposal.
    Idle,
    /// A proposal is shown and awaiting a decision.
    Presenting,
}

#[derive(Debug)]
struct ActiveReview {
    proposal: Proposal,
    presentation: Presentation,
    // Dropped together with the review, which deregisters the shortcuts.
    shortcuts: ShortcutSubscription,
}

/// Owns at most one pending proposal and resolves it exactly once.
#[derive(Debug)]
pub struct ReviewController {
    engine: DiffEngine,
    context_radius: usize,
    default_view: ViewMode,
    shortcuts: ShortcutHub,
    active: Option<ActiveReview>,
    next_ticket: u64,
}

impl ReviewController {
    /// Construct an idle controller.
    #[must_use]
    pub fn new(config: &ReviewConfig, shortcuts: ShortcutHub) -> Self {
        Self {
            engine: DiffEngine::with_max_cells(config.max_cells),
            context_radius: config.context_radius,
            default_view: config.default_view,
            shortcuts,
            active: None,
            next_ticket: 1,
        }
    }

    /// Current coarse state.
    #[must_use]
    pub const fn phase(&self) -> ReviewPhase {
        if self.active.is_some() {
            ReviewPhase::Presenting
        } else {
            ReviewPhase::Idle
        }
    }

    /// The pending presentation, if any.
    #[must_use]
    pub fn presentation(&self) -> Option<&Presentation> {
        self.active.as_ref().map(|active| &active.presentation)
    }

    /// Diff, window, and classify `proposal`, then show it.
    ///
    /// All computation finishes before this returns, and shortcuts are armed
    /// as soon as the presentation exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProposalOutstanding`] if another proposal is still
    /// pending, or [`Error::InputTooLarge`] if the contents exceed the diff
    /// size cap. The controller stays in its previous state on error.
    pub fn present(&mut self, proposal: Proposal) -> Result<&Presentation> {
        if let Some(active) = &self.active {
            warn!(
                pending = %active.proposal.file_path,
                rejected = %proposal.file_path,
                "present called while a decision is outstanding"
            );
            return Err(Error::ProposalOutstanding {
                file_path: active.proposal.file_path.clone(),
            });
        }

        let ops = self
            .engine
            .diff(&proposal.old_content, &proposal.new_content)?;
        let stats = DiffStats::from_ops(&ops);
        let lines = window(&ops, self.context_radius);

        let ticket = ProposalTicket(self.next_ticket);
        self.next_ticket += 1;

        let presentation = Presentation {
            ticket,
            file_path: proposal.file_path.clone(),
            reason: proposal.reason.clone(),
            lines,
            stats,
            impact: classify(stats),
            view_mode: self.default_view,
        };
        info!(
            %ticket,
            file_path = %presentation.file_path,
            added = stats.added,
            removed = stats.removed,
            impact = ?presentation.impact,
            "presenting proposal"
        );

        let shortcuts = self
            .shortcuts
            .subscribe(format!("review {ticket} {}", proposal.file_path));
        let active = self.active.insert(ActiveReview {
            proposal,
            presentation,
            shortcuts,
        });
        Ok(&active.presentation)
    }

    /// Switch between unified and side-by-side display.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPendingProposal`] when idle.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> Result<()> {
        let active = self.active.as_mut().ok_or(Error::NoPendingProposal)?;
        active.presentation.view_mode = mode;
        Ok(())
    }

    /// Approve the pending proposal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPendingProposal`] when idle.
    pub fn approve(&mut self) -> Result<ReviewDecision> {
        self.dispatch(ReviewCommand::Approve)
    }

    /// Reject the pending proposal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPendingProposal`] when idle.
    pub fn reject(&mut self) -> Result<ReviewDecision> {
        self.dispatch(ReviewCommand::Reject)
    }

    /// Ask the agent for a different proposal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPendingProposal`] when idle.
    pub fn request_alternative(&mut self) -> Result<ReviewDecision> {
        self.dispatch(ReviewCommand::RequestAlternative)
    }

    /// Resolve the pending proposal with `command`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPendingProposal`] when idle.
    pub fn dispatch(&mut self, command: ReviewCommand) -> Result<ReviewDecision> {
        let Some(active) = self.active.take() else {
            warn!(?command, "command issued with no pending proposal");
            return Err(Error::NoPendingProposal);
        };
        Ok(Self::resolve(active, command))
    }

    /// Resolve the proposal presented under `ticket` with `command`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StaleProposal`] if `ticket` is not the pending
    /// proposal's ticket, including when the controller is idle.
    pub fn dispatch_for(
        &mut self,
        ticket: ProposalTicket,
        command: ReviewCommand,
    ) -> Result<ReviewDecision> {
        match &self.active {
            Some(active) if active.presentation.ticket == ticket => self.dispatch(command),
            _ => {
                warn!(%ticket, ?command, "command bound to a stale proposal");
                Err(Error::StaleProposal { ticket: ticket.0 })
            }
        }
    }

    /// Route a key press through the pending proposal's shortcut listener.
    ///
    /// Unbound keys, keys arriving while nothing is presented, and keys
    /// arriving after the listener was deregistered are ignored.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`ReviewController::dispatch`].
    pub fn handle_key(&mut self, key: &Key) -> Result<Option<ReviewDecision>> {
        let Some(active) = &self.active else {
            return Ok(None);
        };
        match active.shortcuts.route(key) {
            Some(command) => self.dispatch(command).map(Some),
            None => Ok(None),
        }
    }

    fn resolve(active: ActiveReview, command: ReviewCommand) -> ReviewDecision {
        let ActiveReview {
            proposal,
            presentation,
            shortcuts,
        } = active;
        drop(shortcuts);

        let decision = ReviewDecision::resolve(proposal, command);
        info!(
            ticket = %presentation.ticket,
            file_path = decision.file_path(),
            decision = ?decision.kind(),
            "proposal resolved"
        );
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DecisionKind;
    use crate::keys::KeyCode;

    fn controller() -> (ReviewController, ShortcutHub) {
        let hub = ShortcutHub::new();
        (ReviewController::new(&ReviewConfig::default(), hub.clone()), hub)
    }

    #[test]
    fn tickets_increase_per_presentation() {
        let (mut controller, _hub) = controller();
        let first = controller
            .present(Proposal::new("a", "1", "2"))
            .expect("present")
            .ticket;
        controller.reject().expect("reject");
        let second = controller
            .present(Proposal::new("a", "1", "3"))
            .expect("present")
            .ticket;
        assert!(second > first);
    }

    #[test]
    fn keys_are_ignored_while_idle() {
        let (mut controller, _hub) = controller();
        let outcome = controller
            .handle_key(&Key::plain(KeyCode::Enter))
            .expect("idle keys are not errors");
        assert!(outcome.is_none());
    }

    #[test]
    fn unbound_key_keeps_proposal_pending() {
        let (mut controller, hub) = controller();
        controller
            .present(Proposal::new("a", "1", "2"))
            .expect("present");
        let outcome = controller
            .handle_key(&Key::plain(KeyCode::Char('x')))
            .expect("unbound key");
        assert!(outcome.is_none());
        assert_eq!(controller.phase(), ReviewPhase::Presenting);
        assert_eq!(hub.active_subscriptions(), 1);

        let decision = controller
            .handle_key(&Key::plain(KeyCode::Escape))
            .expect("escape")
            .expect("decision");
        assert_eq!(decision.kind(), DecisionKind::Rejected);
        assert_eq!(hub.active_subscriptions(), 0);
    }

    #[test]
    fn keys_need_a_registered_listener() {
        let (mut controller, hub) = controller();
        controller
            .present(Proposal::new("a", "1", "2"))
            .expect("present");
        hub.clear();

        let outcome = controller
            .handle_key(&Key::plain(KeyCode::Enter))
            .expect("deregistered key");
        assert!(outcome.is_none());
        assert_eq!(controller.phase(), ReviewPhase::Presenting);

        let decision = controller.approve().expect("explicit approve");
        assert_eq!(decision.kind(), DecisionKind::Approved);
    }
}
