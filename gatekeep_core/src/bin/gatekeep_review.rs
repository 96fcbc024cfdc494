use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use gatekeep_core::agents::default_registry;
use gatekeep_core::config::CONFIG_FILE_NAME;
use gatekeep_core::render::render;
use gatekeep_core::{
    AgentService, Key, KeyCode, Proposal, ProposalTicket, ReviewCommand, ReviewConfig,
    ReviewController, ReviewDecision, ShortcutHub, ViewMode,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Review a proposed file rewrite before it is applied.
#[derive(Debug, Parser)]
#[command(name = "gatekeep-review", version)]
struct Cli {
    /// File holding the current content.
    old: Utf8PathBuf,

    /// File holding the proposed content.
    new: Utf8PathBuf,

    /// Path reported for the proposal. Defaults to OLD.
    #[arg(long)]
    path: Option<String>,

    /// Why the rewrite is proposed.
    #[arg(long, default_value = "")]
    reason: String,

    /// Unchanged lines shown around each change.
    #[arg(long)]
    context: Option<usize>,

    /// Start in the side-by-side view.
    #[arg(long)]
    side_by_side: bool,

    /// Settings file.
    #[arg(long, default_value = CONFIG_FILE_NAME)]
    config: Utf8PathBuf,

    /// Deliver the decision to this agent (e.g. `local`, `command`).
    ///
    /// With `local`, this process applies the decision itself: an approved
    /// rewrite is written over OLD.
    #[arg(long, env = "GATEKEEP_AGENT")]
    agent: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let old_content = read_text(&cli.old)?;
    let new_content = read_text(&cli.new)?;
    let file_path = cli.path.clone().unwrap_or_else(|| cli.old.to_string());
    let proposal = Proposal::new(file_path, old_content, new_content).with_reason(cli.reason);

    let mut controller = ReviewController::new(&config, ShortcutHub::new());
    let presentation = controller
        .present(proposal)
        .context("failed to prepare the proposal for review")?;
    let ticket = presentation.ticket;
    print!("{}", render(presentation));
    println!();
    println!("[enter] approve   [esc] reject   [a] request alternative   [v] toggle view");

    let decision = prompt(&mut controller, ticket)?;
    println!("{}", serde_json::to_string_pretty(&decision)?);

    if let Some(agent_id) = cli.agent.as_deref() {
        let (registry, outbox) = default_registry();
        let receipt = AgentService::new(registry)
            .deliver(agent_id, &decision)
            .with_context(|| format!("failed to deliver decision to agent {agent_id}"))?;
        if let Some(message) = receipt.message {
            println!("{agent_id}: {message}");
        }
        for queued in outbox.drain()? {
            println!("{}", apply_local(&queued, &cli.old)?);
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<ReviewConfig> {
    let mut config = ReviewConfig::load(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config))?
        .apply_env()
        .context("invalid GATEKEEP_* environment override")?;
    if let Some(context) = cli.context {
        config.context_radius = context;
    }
    if cli.side_by_side {
        config.default_view = ViewMode::SideBySide;
    }
    debug!(?config, "resolved review settings");
    Ok(config)
}

/// Carry out a decision queued for the local agent against `target`.
fn apply_local(decision: &ReviewDecision, target: &Utf8Path) -> Result<String> {
    match decision {
        ReviewDecision::Approved { new_content, .. } => {
            std::fs::write(target, new_content)
                .with_context(|| format!("failed to write approved content to {target}"))?;
            Ok(format!("local: wrote {target}"))
        }
        ReviewDecision::Rejected { file_path } => Ok(format!("local: discarded {file_path}")),
        ReviewDecision::AlternativeRequested { file_path, reason } => Ok(format!(
            "local: alternative requested for {file_path}: {reason}"
        )),
    }
}

fn read_text(path: &Utf8Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {path} as UTF-8 text"))
}

fn prompt(
    controller: &mut ReviewController,
    ticket: ProposalTicket,
) -> Result<ReviewDecision> {
    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            // Closed input discards the proposal, like Escape.
            return Ok(controller.reject()?);
        }

        let key = match input.trim().to_ascii_lowercase().as_str() {
            "" | "y" | "yes" => Key::plain(KeyCode::Enter),
            "esc" | "n" | "no" => Key::plain(KeyCode::Escape),
            "a" | "alt" => {
                return Ok(controller.dispatch_for(ticket, ReviewCommand::RequestAlternative)?);
            }
            "v" | "view" => {
                toggle_view(controller)?;
                continue;
            }
            other => {
                println!("unrecognized input {other:?}");
                continue;
            }
        };

        if let Some(decision) = controller.handle_key(&key)? {
            return Ok(decision);
        }
    }
}

fn toggle_view(controller: &mut ReviewController) -> Result<()> {
    let next = match controller.presentation().map(|p| p.view_mode) {
        Some(ViewMode::Unified) => ViewMode::SideBySide,
        _ => ViewMode::Unified,
    };
    controller.set_view_mode(next)?;
    if let Some(presentation) = controller.presentation() {
        print!("{}", render(presentation));
    }
    Ok(())
}
