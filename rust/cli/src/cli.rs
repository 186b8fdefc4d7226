//! Command-line argument definitions (clap derive).

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "bjtrainer",
    version,
    about = "Blackjack card-counting trainer and simulator"
)]
pub struct BjTrainerCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deal one round from a fresh shoe and show the advice for it
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=8))]
        decks: Option<u8>,
    },
    /// Play many rounds with count-adjusted strategy and a bet ramp
    Sim {
        #[arg(long)]
        rounds: u64,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=8))]
        decks: Option<u8>,
        #[arg(long)]
        penetration: Option<f64>,
        #[arg(long)]
        min_bet: Option<u32>,
        #[arg(long)]
        max_bet: Option<u32>,
        #[arg(long)]
        bankroll: Option<u32>,
        #[arg(long)]
        output: Option<String>,
    },
    /// Running-count drill on stdin
    Drill {
        #[arg(long)]
        cards: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=8))]
        decks: Option<u8>,
        #[arg(long)]
        output: Option<String>,
    },
    /// Advice for a given hand, dealer up-card and true count
    Advise {
        #[arg(long)]
        hand: String,
        #[arg(long)]
        dealer: String,
        #[arg(long, allow_negative_numbers = true)]
        tc: Option<i32>,
        #[arg(long)]
        bankroll: Option<u32>,
        #[arg(long)]
        bet: Option<u32>,
    },
    /// Aggregate round histories (JSONL, .zst, or a directory of them)
    Stats {
        #[arg(long)]
        input: String,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}
