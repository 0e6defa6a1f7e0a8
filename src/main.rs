#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![deny(warnings)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::{anyhow, Context};
use checkpoint_client::{
    settings::CheckpointSettings, Client, ClientConfig, IdentityEnvelope, VERSION,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from Settings.toml and environment variables
    // This also loads .env file and initializes the logger
    let settings =
        CheckpointSettings::load().map_err(|e| anyhow!("Failed to load settings: {e}"))?;

    let config = ClientConfig::from_settings(&settings.client)
        .context("Failed to create HTTP transport")?;
    let mut client = Client::new(config).context("Invalid Checkpoint client settings")?;

    // A session given on the command line replaces the configured one
    if let Some(session) = std::env::args().nth(1) {
        client = client.with_session(session);
    }

    print_startup_info(&settings, &client);

    let (identity, profile) = client
        .get_current_user()
        .await
        .context("Failed to fetch current user")?;

    if identity.is_none() && profile.is_none() {
        println!("No current identity");
        return Ok(());
    }

    let envelope = IdentityEnvelope { identity, profile };
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

fn print_startup_info(settings: &CheckpointSettings, client: &Client) {
    log::info!("checkpoint {VERSION}");
    log::info!("Checkpoint service: {}", settings.service_url());
    log::info!(
        "Session: {}",
        if client.session().is_some() {
            "provided"
        } else {
            "none"
        }
    );
}
