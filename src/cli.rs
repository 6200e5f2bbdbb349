//! Command-line interface for tictac_live.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tic Tac Toe over a shared realtime database room
#[derive(Parser, Debug)]
#[command(name = "tictac_live")]
#[command(about = "Two-player tic-tac-toe synchronized through a realtime database", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Join an online room (creates a fresh room when --room is omitted)
    Play {
        /// Room id or share URL to join
        #[arg(long)]
        room: Option<String>,

        /// Path to a TOML config file; TICTAC_* environment variables
        /// are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Play a hot-seat game in this terminal, no database required
    Local,
}
