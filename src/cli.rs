//! Command-line argument parsing
//!
//! Supports:
//! - Replaying an event script
//! - An explicit config file instead of the user config
//! - Muting all sounds
//! - Console log level override

use clap::Parser;
use std::path::PathBuf;

/// Replay key and pointer events through keybindings and interaction sounds
#[derive(Parser, Debug)]
#[command(name = "keychime", version, about = "Keybinding and interaction sound replay")]
pub struct CliArgs {
    /// YAML event script to replay
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Config file to use instead of ~/.config/keychime/config.yaml
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable every sound trigger
    #[arg(short, long)]
    pub mute: bool,

    /// Console log filter, e.g. "debug" or "keychime::keymap=trace"
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,
}
