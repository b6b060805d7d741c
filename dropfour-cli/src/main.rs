//! Dropfour CLI - Command-line interface
//!
//! Commands:
//! - play: Play an interactive game against an AI opponent
//! - match: Play a series of AI-vs-AI games
//! - stats: Show saved player statistics

mod match_cmd;
mod play;
mod stats;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dropfour")]
#[command(about = "Four-in-a-row against three AI opponents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game against the AI
    Play(play::PlayArgs),
    /// Play a series of AI-vs-AI games
    Match(match_cmd::MatchArgs),
    /// Show saved player statistics
    Stats(stats::StatsArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args),
        Commands::Match(args) => match_cmd::run(args),
        Commands::Stats(args) => stats::run(args),
    }
}
