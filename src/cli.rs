//! CLI surface, spec §6.2. `<program> <hero_range> <villain_range> [board] [flags]`,
//! parsed with `clap`'s derive API rather than hand-rolled `std::env::args` parsing.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Heads-up postflop GTO solver core: range parsing, CFR, and a 7-card evaluator.
#[derive(Debug, Parser)]
#[command(name = "holdem-gto-core", version, about)]
pub struct Cli {
    /// hero's range, e.g. "22+,A2s+,KTo@50%"
    pub hero_range: String,

    /// villain's range, same grammar as `hero_range`
    pub villain_range: String,

    /// fixed board as 0, 6, 8, or 10 characters (pairs of `<rank><suit>`); omit to sample
    pub board: Option<String>,

    /// CFR iterations per sampled board
    #[arg(long, default_value_t = 1000)]
    pub iterations: usize,

    /// number of random boards to sample when `board` is omitted
    #[arg(long, default_value_t = 1)]
    pub boards: usize,

    /// RNG seed for reproducible board sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// number of worker threads for board-level parallelism (defaults to the number of
    /// logical CPUs)
    #[arg(long)]
    pub workers: Option<usize>,

    /// comma-separated pot-fraction bet sizes
    #[arg(long, default_value = "0.5,1.0")]
    pub bet_sizes: String,

    /// per-street raise cap
    #[arg(long, default_value_t = 2)]
    pub max_raises: usize,

    /// evaluator table file; built fresh and written here if absent or malformed
    #[arg(long, default_value = "handranks.dat")]
    pub table: PathBuf,

    /// terminal output format for the aggregated grid
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// raise the log level to debug
    #[arg(short, long)]
    pub verbose: bool,
}
