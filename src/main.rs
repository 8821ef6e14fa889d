//! keychime: replay scripted input through keybindings and interaction sounds

mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use keychime::config::{load_config_file, AppConfig};
use keychime::replay::{load_script, ReplaySession};
use keychime::sound::TracingBackend;

use crate::cli::CliArgs;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    keychime::tracing::init(args.log_level.as_deref());

    let mut config = match &args.config {
        Some(path) => load_config_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AppConfig::load(),
    };
    if args.mute {
        config.sounds.disabled = true;
    }

    let events = load_script(&args.script)
        .with_context(|| format!("failed to load script {}", args.script.display()))?;
    tracing::info!(events = events.len(), "replaying script");

    let session = ReplaySession::new(&config, &TracingBackend).context("invalid bindings")?;
    let report = session.run(events);

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
