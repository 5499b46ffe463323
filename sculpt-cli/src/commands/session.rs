//! Session command handlers
//!
//! Start, inspect, follow and cancel background conversions.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use sculpt_client::OrchestratorClient;
use sculpt_core::dto::convert::ConvertRequest;
use std::time::Duration;
use uuid::Uuid;

use super::{format_phase, print_session_details, print_session_summary};
use crate::config::Config;

/// Session subcommands
#[derive(Subcommand)]
pub enum SessionCommands {
    /// Start a background conversion
    Submit {
        /// Locator of the source image
        image_url: String,

        /// Do not request PBR textures
        #[arg(long)]
        no_pbr: bool,
    },
    /// Show a session
    Get {
        /// Session ID
        id: Uuid,
    },
    /// List sessions
    List,
    /// Follow a session until it finishes
    Watch {
        /// Session ID
        id: Uuid,

        /// Seconds between status checks
        #[arg(short, long, default_value_t = 5)]
        interval: u64,
    },
    /// Cancel a running session
    Cancel {
        /// Session ID
        id: Uuid,
    },
}

/// Handle session commands
pub async fn handle_session_command(command: SessionCommands, config: &Config) -> Result<()> {
    let client = OrchestratorClient::new(&config.orchestrator_url);

    match command {
        SessionCommands::Submit { image_url, no_pbr } => {
            submit_session(&client, image_url, !no_pbr).await
        }
        SessionCommands::Get { id } => get_session(&client, id).await,
        SessionCommands::List => list_sessions(&client).await,
        SessionCommands::Watch { id, interval } => {
            watch_session(&client, id, Duration::from_secs(interval.max(1))).await
        }
        SessionCommands::Cancel { id } => cancel_session(&client, id).await,
    }
}

async fn submit_session(client: &OrchestratorClient, image_url: String, enable_pbr: bool) -> Result<()> {
    let req = ConvertRequest {
        image_url: Some(image_url),
        enable_pbr: Some(enable_pbr),
    };

    let id = client
        .submit_session(req)
        .await
        .context("Failed to submit session")?;

    println!("{} {}", "✓ Session started:".green().bold(), id);
    println!(
        "{}",
        format!("  Follow it with: sculpt session watch {}", id).dimmed()
    );

    Ok(())
}

async fn get_session(client: &OrchestratorClient, id: Uuid) -> Result<()> {
    let status = client.get_session(id).await?;
    print_session_details(&status);
    Ok(())
}

async fn list_sessions(client: &OrchestratorClient) -> Result<()> {
    let sessions = client.list_sessions().await?;

    if sessions.is_empty() {
        println!("{}", "No sessions found.".yellow());
    } else {
        println!("{}", format!("Found {} session(s):", sessions.len()).bold());
        println!();
        for status in &sessions {
            print_session_summary(status);
        }
    }

    Ok(())
}

async fn watch_session(client: &OrchestratorClient, id: Uuid, interval: Duration) -> Result<()> {
    let mut ticker = tokio::time::interval(interval);
    let mut last_attempts = None;

    loop {
        ticker.tick().await;

        let status = client.get_session(id).await?;

        if last_attempts != Some(status.attempts) || status.phase.is_terminal() {
            println!(
                "{} attempt {}/{}",
                format_phase(status.phase),
                status.attempts,
                status.max_attempts
            );
            last_attempts = Some(status.attempts);
        }

        if status.phase.is_terminal() {
            println!();
            print_session_details(&status);
            return Ok(());
        }
    }
}

async fn cancel_session(client: &OrchestratorClient, id: Uuid) -> Result<()> {
    client
        .cancel_session(id)
        .await
        .with_context(|| format!("Failed to cancel session {}", id))?;

    println!("{} {}", "✓ Cancellation requested for".green().bold(), id);

    Ok(())
}
