use anyhow::{bail, Context, Result};

use crate::core::{
    move_gen::legal_commands,
    side::Side,
    state::GameState,
    Command,
};

use super::strategy::{Strategy, TurnContext};

/// Material balance from `side`'s point of view. Damaged pieces count for
/// proportionally less, so wounding a bruiser registers.
pub fn material(state: &GameState, side: Side) -> i32 {
    let balance: i32 = state.pieces.values()
        .map(|piece| {
            let stats = piece.kind.stats();
            stats.worth * piece.remaining() / stats.toughness * piece.side.sign()
        })
        .sum();
    balance * side.sign()
}

/// Sum of each friendly piece's distance to its nearest enemy
fn standoff(state: &GameState, side: Side) -> i32 {
    state.pieces_of(side).iter()
        .map(|piece| {
            state.pieces_of(!side).iter()
                .map(|enemy| piece.loc.dist(&enemy.loc))
                .min()
                .unwrap_or(0)
        })
        .sum()
}

/// One-ply lookahead: sandbox every legal command and keep the best
/// material outcome, closing distance on ties.
#[derive(Debug, Default)]
pub struct GreedyStrategy;

impl GreedyStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for GreedyStrategy {
    fn calculate_command(&self, ctx: &TurnContext) -> Result<Command> {
        let side = ctx.side();
        let sandbox = ctx.sandbox();
        let mut best: Option<(i32, i32, Command)> = None;

        for command in legal_commands(ctx.state()) {
            if ctx.cancelled() {
                bail!("cancelled while searching");
            }

            let outcome = sandbox.try_move_on_new_state(&command);
            let gain = material(&outcome, side);
            let press = -standoff(&outcome, side);

            let better = match &best {
                Some((g, p, _)) => (gain, press) > (*g, *p),
                None => true,
            };
            if better {
                best = Some((gain, press, command));
            }
        }

        best.map(|(_, _, command)| command)
            .context("no legal command to choose")
    }
}
