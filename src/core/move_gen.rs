//! Exhaustive command enumeration for the side to move.

use super::{command::Command, loc::DIRECTIONS, state::GameState};

/// Every command the side to move could legally submit, ending with the
/// always-available end turn. Enumeration order is deterministic: pieces by
/// id, moves in breadth-first order, strikes in direction order.
pub fn legal_commands(state: &GameState) -> Vec<Command> {
    let mut commands = Vec::new();
    if state.winner.is_some() {
        return commands;
    }

    let player = state.side_to_move;
    for piece in state.pieces_of(player) {
        for to in state.reachable(piece.loc, piece.kind.stats().speed) {
            commands.push(Command::Move { player, from: piece.loc, to });
        }

        for dir in &DIRECTIONS {
            let target = &piece.loc + dir;
            if !target.in_bounds() {
                continue;
            }
            if let Some(victim) = state.piece_at(target) {
                if victim.side != player {
                    commands.push(Command::Strike { player, from: piece.loc, target });
                }
            }
        }
    }

    commands.push(Command::end_turn(player));
    commands
}
