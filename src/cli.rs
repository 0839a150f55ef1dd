//! CLI definitions for howler.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// howler CLI.
#[derive(Parser)]
#[command(name = "howler")]
#[command(about = "Role-aware autopilot for a browser social-deduction game")]
#[command(version)]
pub(crate) struct Cli {
    /// Engine configuration file path (defaults apply when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Attach to the game tab and run the control loop (default)
    Run {
        /// Browser remote-debugging endpoint
        #[arg(long, default_value = "http://127.0.0.1:9222")]
        endpoint: String,

        /// URL fragment selecting the game tab (empty matches the first tab)
        #[arg(long, default_value = "")]
        url_fragment: String,

        /// Operating player's display name (falls back to the stored one)
        #[arg(long)]
        name: Option<String>,

        /// Control surface port
        #[arg(long, default_value_t = 8600)]
        port: u16,
    },

    /// Query a running instance's status
    Status {
        /// Control surface port
        #[arg(long, default_value_t = 8600)]
        port: u16,
    },
}
