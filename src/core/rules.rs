//! Legality rules and event derivation, shared by the authoritative
//! controller and the advisory oracle so the two can never disagree.

use anyhow::{ensure, Context, Result};

use super::{
    command::Command,
    event::GameEvent,
    state::GameState,
};

/// Check a command against the rules. The error chain carries the specific
/// violation; the top-level context names the command.
pub fn validate(state: &GameState, command: &Command) -> Result<()> {
    check(state, command).with_context(|| format!("illegal command: {}", command))
}

fn check(state: &GameState, command: &Command) -> Result<()> {
    ensure!(state.winner.is_none(), "the game is over");

    let player = command.player();
    ensure!(player == state.side_to_move, "it is not {}'s turn", player.name());

    match command {
        Command::Move { from, to, .. } => {
            let piece = state.piece_at(*from)
                .with_context(|| format!("no piece at {}", from))?;
            ensure!(piece.side == player, "the piece at {} belongs to {}", from, piece.side.name());
            ensure!(to.in_bounds(), "{} is off the board", to);
            ensure!(state.piece_at(*to).is_none(), "destination {} is occupied", to);

            let speed = piece.kind.stats().speed;
            ensure!(
                state.reachable(*from, speed).contains(to),
                "no open path from {} to {} within speed {}",
                from, to, speed
            );
        }
        Command::Strike { from, target, .. } => {
            let striker = state.piece_at(*from)
                .with_context(|| format!("no piece at {}", from))?;
            ensure!(striker.side == player, "the piece at {} belongs to {}", from, striker.side.name());

            let victim = state.piece_at(*target)
                .with_context(|| format!("nothing to strike at {}", target))?;
            ensure!(victim.side != player, "the piece at {} is friendly", target);
            ensure!(from.dist(target) == 1, "{} is out of striking range from {}", target, from);
        }
        Command::EndTurn { .. } => {}
    }

    Ok(())
}

/// Derive the events a validated command produces, in application order.
/// The state is not touched; callers apply the events themselves.
pub fn command_events(state: &GameState, command: &Command) -> Result<Vec<GameEvent>> {
    let player = command.player();
    let mut events = Vec::new();
    let mut winner = None;

    match command {
        Command::Move { from, to, .. } => {
            let piece = state.piece_at(*from)
                .with_context(|| format!("no piece at {}", from))?;
            events.push(GameEvent::PieceMoved { piece: piece.id, from: *from, to: *to });
        }
        Command::Strike { from, target, .. } => {
            let striker = state.piece_at(*from)
                .with_context(|| format!("no piece at {}", from))?;
            let victim = state.piece_at(*target)
                .with_context(|| format!("nothing to strike at {}", target))?;

            let damage = striker.kind.stats().power;
            events.push(GameEvent::PieceStruck { attacker: striker.id, target: victim.id, damage });

            if victim.damage + damage >= victim.kind.stats().toughness {
                events.push(GameEvent::PieceRemoved { piece: victim.id });
                if state.alive(victim.side) == 1 {
                    winner = Some(player);
                }
            }
        }
        Command::EndTurn { .. } => {}
    }

    match winner {
        Some(winner) => events.push(GameEvent::GameFinished { winner }),
        None => events.push(GameEvent::TurnEnded { next: !player }),
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::core::loc::Loc;
    use crate::core::piece::{Piece, PieceId, PieceKind};
    use crate::core::side::Side;

    fn duel() -> GameState {
        let mut state = GameState::empty();
        state.add_piece(Piece::new(PieceId(0), PieceKind::Scrapper, Side::Red, Loc::new(2, 2)));
        state.add_piece(Piece::new(PieceId(1), PieceKind::Bruiser, Side::Red, Loc::new(0, 0)));
        state.add_piece(Piece::new(PieceId(2), PieceKind::Scrapper, Side::Blue, Loc::new(3, 3)));
        state.add_piece(Piece::new(PieceId(3), PieceKind::Bruiser, Side::Blue, Loc::new(7, 7)));
        state
    }

    #[test]
    fn test_legal_move_passes() {
        let state = duel();
        let command = Command::Move { player: Side::Red, from: Loc::new(2, 2), to: Loc::new(2, 4) };
        assert!(validate(&state, &command).is_ok());
    }

    #[test]
    fn test_legal_strike_passes() {
        let state = duel();
        let command = Command::Strike { player: Side::Red, from: Loc::new(2, 2), target: Loc::new(3, 3) };
        assert!(validate(&state, &command).is_ok());
    }

    #[test_case(Command::Move { player: Side::Blue, from: Loc::new(3, 3), to: Loc::new(3, 4) }, "turn" ; "out of turn")]
    #[test_case(Command::Move { player: Side::Red, from: Loc::new(5, 5), to: Loc::new(5, 6) }, "no piece" ; "empty origin")]
    #[test_case(Command::Move { player: Side::Red, from: Loc::new(3, 3), to: Loc::new(3, 4) }, "belongs to" ; "enemy piece")]
    #[test_case(Command::Move { player: Side::Red, from: Loc::new(2, 2), to: Loc::new(3, 3) }, "occupied" ; "occupied destination")]
    #[test_case(Command::Move { player: Side::Red, from: Loc::new(0, 0), to: Loc::new(0, -1) }, "off the board" ; "out of bounds")]
    #[test_case(Command::Move { player: Side::Red, from: Loc::new(0, 0), to: Loc::new(0, 2) }, "speed" ; "beyond speed")]
    #[test_case(Command::Strike { player: Side::Red, from: Loc::new(0, 0), target: Loc::new(3, 3) }, "range" ; "strike out of range")]
    #[test_case(Command::Strike { player: Side::Red, from: Loc::new(2, 2), target: Loc::new(4, 4) }, "nothing to strike" ; "strike empty square")]
    fn test_illegal_commands(command: Command, needle: &str) {
        let state = duel();
        let err = validate(&state, &command).unwrap_err();
        let chain = format!("{:#}", err);
        assert!(chain.contains(needle), "expected '{}' in '{}'", needle, chain);
        assert!(chain.contains("illegal command"));
    }

    #[test]
    fn test_friendly_fire_rejected() {
        let mut state = duel();
        state.add_piece(Piece::new(PieceId(4), PieceKind::Scrapper, Side::Red, Loc::new(1, 1)));
        let command = Command::Strike { player: Side::Red, from: Loc::new(2, 2), target: Loc::new(1, 1) };
        let err = validate(&state, &command).unwrap_err();
        assert!(format!("{:#}", err).contains("friendly"));
    }

    #[test]
    fn test_nothing_legal_after_win() {
        let mut state = duel();
        state.winner = Some(Side::Red);
        let command = Command::end_turn(Side::Red);
        assert!(validate(&state, &command).is_err());
    }

    #[test]
    fn test_move_events() {
        let state = duel();
        let command = Command::Move { player: Side::Red, from: Loc::new(2, 2), to: Loc::new(2, 4) };
        let events = command_events(&state, &command).unwrap();
        assert_eq!(events, vec![
            GameEvent::PieceMoved { piece: PieceId(0), from: Loc::new(2, 2), to: Loc::new(2, 4) },
            GameEvent::TurnEnded { next: Side::Blue },
        ]);
    }

    #[test]
    fn test_lethal_strike_events() {
        let state = duel();
        let command = Command::Strike { player: Side::Red, from: Loc::new(2, 2), target: Loc::new(3, 3) };
        let events = command_events(&state, &command).unwrap();
        assert_eq!(events, vec![
            GameEvent::PieceStruck { attacker: PieceId(0), target: PieceId(2), damage: 1 },
            GameEvent::PieceRemoved { piece: PieceId(2) },
            GameEvent::TurnEnded { next: Side::Blue },
        ]);
    }

    #[test]
    fn test_wounding_strike_keeps_target() {
        let mut state = duel();
        // scrapper adjacent to the blue bruiser
        state.add_piece(Piece::new(PieceId(4), PieceKind::Scrapper, Side::Red, Loc::new(6, 6)));
        let command = Command::Strike { player: Side::Red, from: Loc::new(6, 6), target: Loc::new(7, 7) };
        let events = command_events(&state, &command).unwrap();
        assert_eq!(events, vec![
            GameEvent::PieceStruck { attacker: PieceId(4), target: PieceId(3), damage: 1 },
            GameEvent::TurnEnded { next: Side::Blue },
        ]);
    }

    #[test]
    fn test_removing_last_piece_finishes_game() {
        let mut state = GameState::empty();
        state.add_piece(Piece::new(PieceId(0), PieceKind::Bruiser, Side::Red, Loc::new(4, 4)));
        state.add_piece(Piece::new(PieceId(1), PieceKind::Scrapper, Side::Blue, Loc::new(4, 5)));

        let command = Command::Strike { player: Side::Red, from: Loc::new(4, 4), target: Loc::new(4, 5) };
        let events = command_events(&state, &command).unwrap();
        assert_eq!(events.last(), Some(&GameEvent::GameFinished { winner: Side::Red }));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::TurnEnded { .. })));
    }

    #[test]
    fn test_end_turn_always_legal_in_turn() {
        let state = duel();
        assert!(validate(&state, &Command::end_turn(Side::Red)).is_ok());
        assert!(validate(&state, &Command::end_turn(Side::Blue)).is_err());
    }
}
