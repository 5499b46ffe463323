//! Sculpt CLI
//!
//! Command-line interface for the Sculpt orchestrator.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "sculpt")]
#[command(about = "Turn images into 3D models through the Sculpt orchestrator", long_about = None)]
struct Cli {
    /// Orchestrator URL
    #[arg(long, env = "SCULPT_URL", default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        orchestrator_url: cli.url,
    };

    handle_command(cli.command, &config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_convert() {
        let cli = Cli::try_parse_from([
            "sculpt",
            "--url",
            "http://sculpt.internal:9000",
            "convert",
            "https://example.com/img.png",
            "--no-pbr",
        ])
        .unwrap();

        assert_eq!(cli.url, "http://sculpt.internal:9000");
        match cli.command {
            Commands::Convert { image_url, no_pbr } => {
                assert_eq!(image_url, "https://example.com/img.png");
                assert!(no_pbr);
            }
            _ => panic!("expected convert command"),
        }
    }
}
