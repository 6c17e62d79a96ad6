mod options;
mod runner;

pub use options::{MatchOptions, StrategyKind};
pub use runner::MatchRunner;
