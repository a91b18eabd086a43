//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use spider_engine::deck::Level;

#[derive(Debug, Parser)]
#[command(
    name = "spider",
    version,
    about = "Spider Solitaire in the terminal",
    long_about = "Play Spider Solitaire at one, two or four suits. The game is saved after every move and can be resumed later."
)]
pub struct SpiderCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Play interactively, one command per line
    Play {
        /// beginner (1 suit), intermediate (2) or advanced (4)
        #[arg(long, value_parser = parse_level)]
        level: Option<Level>,
        /// Seed for a reproducible deal
        #[arg(long)]
        seed: Option<u64>,
        /// Continue the saved game instead of dealing a new one
        #[arg(long, conflicts_with_all = ["level", "seed"])]
        resume: bool,
    },
    /// Print the saved game
    Show,
    /// Print a hint for the saved game
    Hint,
    /// Run auto-complete on the saved game
    Solve {
        /// Pause between steps in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Print the resolved configuration and where each value came from
    Cfg,
    /// Delete the saved game
    Clear,
}

impl Commands {
    pub const NAMES: &'static [&'static str] = &["play", "show", "hint", "solve", "cfg", "clear"];
}

fn parse_level(s: &str) -> Result<Level, String> {
    s.parse()
}
