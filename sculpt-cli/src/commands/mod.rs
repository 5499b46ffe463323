//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod convert;
mod session;

pub use session::SessionCommands;

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use sculpt_core::domain::outcome::TaskOutcome;
use sculpt_core::domain::session::{SessionPhase, SessionStatus};

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Convert an image and wait for the model
    Convert {
        /// Locator of the source image
        image_url: String,

        /// Do not request PBR textures
        #[arg(long)]
        no_pbr: bool,
    },
    /// Background conversion sessions
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Convert { image_url, no_pbr } => {
            convert::handle_convert(&image_url, !no_pbr, config).await
        }
        Commands::Session { command } => session::handle_session_command(command, config).await,
    }
}

/// Colour a session phase for display
fn format_phase(phase: SessionPhase) -> ColoredString {
    let label = phase.as_str().to_uppercase();
    match phase {
        SessionPhase::Init | SessionPhase::Submitting => label.cyan(),
        SessionPhase::Polling => label.blue(),
        SessionPhase::Succeeded => label.green(),
        SessionPhase::Failed | SessionPhase::TimedOut => label.red(),
        SessionPhase::Cancelled => label.yellow(),
    }
}

/// Describe an outcome in one line
fn format_outcome(outcome: &TaskOutcome) -> String {
    match outcome {
        TaskOutcome::Completed { result_locator } => result_locator.clone(),
        TaskOutcome::Failed { reason } => format!("{} ({})", reason.message(), reason.as_str()),
        TaskOutcome::TimedOut => "Timeout waiting for 3D model".to_string(),
        TaskOutcome::Cancelled => "Cancelled".to_string(),
    }
}

/// Print a one-line session summary
fn print_session_summary(status: &SessionStatus) {
    println!(
        "  {} {} {}/{} {}",
        status.id.to_string().dimmed(),
        format_phase(status.phase),
        status.attempts,
        status.max_attempts,
        status
            .outcome
            .as_ref()
            .map(format_outcome)
            .unwrap_or_default()
    );
}

/// Print full session details
fn print_session_details(status: &SessionStatus) {
    println!("{}", "Session Details".bold());
    println!("{}", "─".repeat(60).dimmed());
    println!("  {}: {}", "ID".bold(), status.id);
    println!("  {}: {}", "Phase".bold(), format_phase(status.phase));
    println!(
        "  {}: {}/{}",
        "Attempts".bold(),
        status.attempts,
        status.max_attempts
    );
    if let Some(job_id) = &status.job_id {
        println!("  {}: {}", "Provider job".bold(), job_id);
    }
    println!("  {}: {}", "Created".bold(), status.created_at);
    println!("  {}: {}", "Updated".bold(), status.updated_at);
    if let Some(finished_at) = status.finished_at {
        println!("  {}: {}", "Finished".bold(), finished_at);
    }
    if let Some(outcome) = &status.outcome {
        println!("  {}: {}", "Outcome".bold(), format_outcome(outcome));
    }
    println!("{}", "─".repeat(60).dimmed());
}
