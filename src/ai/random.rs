use std::sync::Mutex;

use anyhow::{Context, Result};
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::core::{move_gen::legal_commands, Command};
use crate::utils::{make_rng, make_seeded_rng};

use super::strategy::{Strategy, TurnContext};

/// Picks uniformly among legal commands, preferring action over passing
pub struct RandomStrategy {
    rng: Mutex<StdRng>,
}

impl RandomStrategy {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(make_rng()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(make_seeded_rng(seed)),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomStrategy {
    fn calculate_command(&self, ctx: &TurnContext) -> Result<Command> {
        let commands = legal_commands(ctx.state());
        let mut rng = self.rng.lock().unwrap_or_else(|err| err.into_inner());

        let busy: Vec<_> = commands.iter().filter(|c| !c.is_end_turn()).collect();
        if let Some(command) = busy.choose(&mut *rng) {
            return Ok(**command);
        }

        // nothing to do but pass
        commands.last().copied().context("no legal command at all")
    }
}
