/// Configuration options for running matches
use anyhow::{bail, Result};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::ai::{ExecutionMode, GreedyStrategy, RandomStrategy, Strategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Random,
    Greedy,
}

impl StrategyKind {
    /// Instantiate the strategy, seeded for reproducible play
    pub fn build(&self, seed: u64) -> Arc<dyn Strategy> {
        match self {
            StrategyKind::Random => Arc::new(RandomStrategy::seeded(seed)),
            StrategyKind::Greedy => Arc::new(GreedyStrategy::new()),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(StrategyKind::Random),
            "greedy" => Ok(StrategyKind::Greedy),
            _ => bail!("Unknown strategy: {}", s),
        }
    }
}

impl FromStr for ExecutionMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sync" => Ok(ExecutionMode::Synchronous),
            "background" => Ok(ExecutionMode::Background),
            _ => bail!("Unknown execution mode: {}", s),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchOptions {
    /// Declare a draw once this many turns have been played
    pub turn_limit: u32,
    /// How long the runner waits for a turn's command before abandoning
    /// the match
    pub turn_timeout: Duration,
}

impl MatchOptions {
    pub fn new(turn_limit: u32, turn_timeout: Duration) -> Self {
        Self {
            turn_limit,
            turn_timeout,
        }
    }

    pub fn set_option(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "turnlimit" => self.turn_limit = value.parse()?,
            "turntimeout" => self.turn_timeout = Duration::from_millis(value.parse()?),
            _ => bail!("Unknown option: {}", name),
        }

        Ok(())
    }
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            turn_limit: 200,
            turn_timeout: Duration::from_secs(10),
        }
    }
}
