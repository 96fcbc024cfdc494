//! Core library for gatekeep's pre-edit review workflow.
//!
//! An agent's proposed rewrite flows through three pure stages before a
//! human sees it:
//! - line-level alignment into an edit script ([`diff`])
//! - context windowing into display lines ([`window`])
//! - impact classification ([`impact`])
//!
//! [`review::ReviewController`] gates the result behind exactly one
//! decision, and [`agents::AgentService`] hands that decision to whichever
//! agent owns the follow-up.

#![warn(
    clippy::all,
    clippy::cargo,
    clippy::nursery,
    clippy::pedantic,
    missing_docs
)]
#![cfg_attr(
    not(test),
    deny(
        clippy::dbg_macro,
        clippy::expect_used,
        clippy::panic,
        clippy::print_stderr,
        clippy::print_stdout,
        clippy::todo,
        clippy::unwrap_used
    )
)]

/// Agent dispatch for resolved decisions.
pub mod agents;
/// Review settings and their file/environment sources.
pub mod config;
/// Line-level sequence alignment.
pub mod diff;
/// Severity classification of a diff.
pub mod impact;
/// Keyboard shortcuts and their scoped registration.
pub mod keys;
/// Plain-text rendering of a presented proposal.
pub mod render;
/// The single-proposal review state machine.
pub mod review;
/// Context windowing of edit scripts.
pub mod window;

pub use gatekeep_api as api;
pub use gatekeep_api::{
    DecisionKind, DiffStats, DisplayLine, DisplayLineKind, EditOp, EditTag, Impact, Proposal,
    ReviewCommand, ReviewDecision, SideBySideView, ViewMode,
};

pub use agents::AgentService;
pub use config::ReviewConfig;
pub use diff::{compute_diff, DiffEngine};
pub use impact::classify;
pub use keys::{Key, KeyCode, Modifiers, ShortcutHub, ShortcutSubscription};
pub use review::{Presentation, ProposalTicket, ReviewController, ReviewPhase};
pub use window::{window, DEFAULT_CONTEXT_RADIUS};

/// Common result type for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the core library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The alignment table for these inputs would exceed the configured cap.
    #[error(
        "diff input too large: {old_lines} x {new_lines} lines exceeds the limit of {limit} table cells"
    )]
    InputTooLarge {
        /// Number of lines in the old content.
        old_lines: usize,
        /// Number of lines in the new content.
        new_lines: usize,
        /// Configured maximum number of table cells.
        limit: usize,
    },
    /// A proposal is already awaiting a decision.
    #[error("a proposal for {file_path} is still awaiting a decision")]
    ProposalOutstanding {
        /// Path of the outstanding proposal.
        file_path: String,
    },
    /// No proposal is being presented.
    #[error("no proposal is awaiting a decision")]
    NoPendingProposal,
    /// The command was issued for a proposal that is no longer presented.
    #[error("proposal #{ticket} is no longer presented")]
    StaleProposal {
        /// Ticket the command was bound to.
        ticket: u64,
    },
    /// A configuration file could not be parsed.
    #[error("invalid configuration in {path}: {source}")]
    Config {
        /// Path of the configuration file.
        path: String,
        /// Parser error.
        #[source]
        source: toml::de::Error,
    },
    /// A configuration override carried an unusable value.
    #[error("invalid value for {key}: {value:?}")]
    InvalidSetting {
        /// Setting or environment variable name.
        key: String,
        /// Raw value that failed to parse.
        value: String,
    },
    /// Filesystem interaction failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// Filesystem path involved in the failed operation.
        path: String,
        /// Source I/O error returned by the standard library.
        #[source]
        source: std::io::Error,
    },
    /// No agent is registered under this id.
    #[error("agent is not registered: {agent}")]
    AgentNotRegistered {
        /// Requested agent id.
        agent: String,
    },
    /// The agent failed to act on a decision.
    #[error("agent {agent} failed: {source}")]
    Agent {
        /// Agent id.
        agent: String,
        /// Error reported by the agent.
        #[source]
        source: gatekeep_agent_api::AgentError,
    },
}
