//! Convert command handler

use anyhow::Result;
use colored::*;
use sculpt_client::OrchestratorClient;
use sculpt_core::dto::convert::ConvertRequest;

use crate::config::Config;

/// Run a blocking conversion and print the model URL
pub async fn handle_convert(image_url: &str, enable_pbr: bool, config: &Config) -> Result<()> {
    let client = OrchestratorClient::new(&config.orchestrator_url);

    println!(
        "{} {}",
        "Converting".bold(),
        image_url.dimmed()
    );
    println!("{}", "This can take up to a few minutes...".dimmed());

    let req = ConvertRequest {
        image_url: Some(image_url.to_string()),
        enable_pbr: Some(enable_pbr),
    };

    match client.convert(req).await {
        Ok(converted) => {
            println!("{} {}", "✓ Model ready:".green().bold(), converted.model_url);
            Ok(())
        }
        Err(e) if e.is_timeout() => {
            println!("{}", "✗ Timed out waiting for the model".red().bold());
            Err(e.into())
        }
        Err(e) => {
            println!("{} {}", "✗ Conversion failed:".red().bold(), e);
            Err(e.into())
        }
    }
}
