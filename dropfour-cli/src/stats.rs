//! Player statistics: file-backed win/loss/draw records
//!
//! A single JSON document maps lowercase usernames to their aggregate
//! results. The store is loaded whole, updated once per finished game, and
//! written back pretty-printed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Outcome of a finished game from the recorded player's point of view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

/// Aggregate record for one player
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerStats {
    pub username: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub total_games: u32,
    pub last_played: Option<DateTime<Utc>>,
}

impl PlayerStats {
    fn new(username: String) -> Self {
        Self {
            username,
            wins: 0,
            losses: 0,
            draws: 0,
            total_games: 0,
            last_played: None,
        }
    }
}

/// File-backed map of player records
pub struct StatsStore {
    path: PathBuf,
    players: FxHashMap<String, PlayerStats>,
}

impl StatsStore {
    /// Open a store, starting empty if the file does not exist yet
    pub fn open(path: &Path) -> Result<Self> {
        let players = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read stats file: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Malformed stats file: {}", path.display()))?
        } else {
            FxHashMap::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            players,
        })
    }

    /// Record one finished game for `username`, creating the entry on first
    /// sight. Keys are lowercased so "Rahul" and "rahul" share a record.
    pub fn record(&mut self, username: &str, result: GameResult) {
        let key = store_key(username);
        let entry = self
            .players
            .entry(key)
            .or_insert_with(|| PlayerStats::new(format_username(username)));

        match result {
            GameResult::Win => entry.wins += 1,
            GameResult::Loss => entry.losses += 1,
            GameResult::Draw => entry.draws += 1,
        }
        entry.total_games += 1;
        entry.last_played = Some(Utc::now());
    }

    pub fn get(&self, username: &str) -> Option<&PlayerStats> {
        self.players.get(&store_key(username))
    }

    /// Top players sorted by wins, ties by name for stable output
    pub fn leaderboard(&self, limit: usize) -> Vec<&PlayerStats> {
        let mut players: Vec<&PlayerStats> = self.players.values().collect();
        players.sort_by(|a, b| b.wins.cmp(&a.wins).then_with(|| a.username.cmp(&b.username)));
        players.truncate(limit);
        players
    }

    /// Write the store back to its file
    pub fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.players)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write stats file: {}", self.path.display()))?;
        Ok(())
    }
}

/// Lookup key: trimmed and lowercased
fn store_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Display form: each word capitalised ("rahul prakash" -> "Rahul Prakash")
fn format_username(name: &str) -> String {
    name.trim()
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// STATS COMMAND
// ============================================================================

#[derive(Args)]
pub struct StatsArgs {
    /// Stats file location
    #[arg(long, value_name = "FILE", default_value = "dropfour-stats.json")]
    pub stats_file: PathBuf,

    /// Number of leaderboard entries to show
    #[arg(long, default_value = "10")]
    pub top: usize,
}

/// Print the saved leaderboard
pub fn run(args: StatsArgs) -> Result<()> {
    let store = StatsStore::open(&args.stats_file)?;
    let leaders = store.leaderboard(args.top);

    if leaders.is_empty() {
        println!("No games recorded yet in {}", args.stats_file.display());
        return Ok(());
    }

    println!("=== Leaderboard ===");
    println!("{:<20} {:>5} {:>7} {:>6} {:>6}", "Player", "Wins", "Losses", "Draws", "Games");
    for stats in leaders {
        println!(
            "{:<20} {:>5} {:>7} {:>6} {:>6}",
            stats.username, stats.wins, stats.losses, stats.draws, stats.total_games
        );
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
