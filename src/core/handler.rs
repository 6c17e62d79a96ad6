use anyhow::{ensure, Context, Result};

use super::{event::GameEvent, state::GameState};

/// Applies events to a state it is handed, owning none itself.
///
/// Every holder of a [`GameState`] replica (the controller, each player)
/// keeps its own handler and feeds it events in arrival order. The handler
/// cross-checks each event against the state so a desynchronized replica
/// fails loudly instead of drifting.
#[derive(Debug, Default)]
pub struct StateHandler;

impl StateHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn apply_event(&self, state: &mut GameState, event: &GameEvent) -> Result<()> {
        self.apply(state, event)
            .with_context(|| format!("applying event: {}", event))
    }

    pub fn apply_all(&self, state: &mut GameState, events: &[GameEvent]) -> Result<()> {
        for event in events {
            self.apply_event(state, event)?;
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, event: &GameEvent) -> Result<()> {
        match *event {
            GameEvent::PieceMoved { piece, from, to } => {
                ensure!(state.piece_at(to).is_none(), "{} is occupied", to);
                let piece = state.piece_mut(piece)?;
                ensure!(piece.loc == from, "{} is at {}, not {}", piece.id, piece.loc, from);
                piece.loc = to;
            }
            GameEvent::PieceStruck { attacker, target, damage } => {
                state.piece(attacker)?;
                let victim = state.piece_mut(target)?;
                victim.damage += damage;
            }
            GameEvent::PieceRemoved { piece } => {
                let removed = state.remove_piece(piece)
                    .with_context(|| format!("{} is not on the board", piece))?;
                state.fallen[removed.side].insert(removed.kind);
            }
            GameEvent::TurnEnded { next } => {
                state.side_to_move = next;
                state.turn += 1;
            }
            GameEvent::GameFinished { winner } => {
                state.winner = Some(winner);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loc::Loc;
    use crate::core::piece::{Piece, PieceId, PieceKind};
    use crate::core::side::Side;

    fn small_state() -> GameState {
        let mut state = GameState::empty();
        state.add_piece(Piece::new(PieceId(0), PieceKind::Scrapper, Side::Red, Loc::new(1, 1)));
        state.add_piece(Piece::new(PieceId(1), PieceKind::Bruiser, Side::Blue, Loc::new(2, 2)));
        state
    }

    #[test]
    fn test_move_then_strike_by_id() {
        let handler = StateHandler::new();
        let mut state = small_state();

        handler.apply_event(&mut state, &GameEvent::PieceMoved {
            piece: PieceId(0), from: Loc::new(1, 1), to: Loc::new(1, 2),
        }).unwrap();
        handler.apply_event(&mut state, &GameEvent::PieceStruck {
            attacker: PieceId(1), target: PieceId(0), damage: 2,
        }).unwrap();

        // id still resolves after the move
        let scrapper = state.piece(PieceId(0)).unwrap();
        assert_eq!(scrapper.loc, Loc::new(1, 2));
        assert_eq!(scrapper.damage, 2);
    }

    #[test]
    fn test_removed_piece_joins_census() {
        let handler = StateHandler::new();
        let mut state = small_state();

        handler.apply_event(&mut state, &GameEvent::PieceRemoved { piece: PieceId(1) }).unwrap();

        assert!(state.piece(PieceId(1)).is_err());
        assert_eq!(state.fallen[Side::Blue].contains(&PieceKind::Bruiser), 1);
        assert_eq!(state.fallen[Side::Red].len(), 0);
    }

    #[test]
    fn test_turn_ended_advances_counter() {
        let handler = StateHandler::new();
        let mut state = small_state();

        handler.apply_event(&mut state, &GameEvent::TurnEnded { next: Side::Blue }).unwrap();
        assert_eq!(state.side_to_move, Side::Blue);
        assert_eq!(state.turn, 1);

        handler.apply_event(&mut state, &GameEvent::GameFinished { winner: Side::Blue }).unwrap();
        assert_eq!(state.winner, Some(Side::Blue));
    }

    #[test]
    fn test_stale_move_is_rejected() {
        let handler = StateHandler::new();
        let mut state = small_state();

        // claims the piece is somewhere it is not
        let err = handler.apply_event(&mut state, &GameEvent::PieceMoved {
            piece: PieceId(0), from: Loc::new(4, 4), to: Loc::new(4, 5),
        }).unwrap_err();
        assert!(format!("{:#}", err).contains("applying event"));

        let err = handler.apply_event(&mut state, &GameEvent::PieceRemoved {
            piece: PieceId(9),
        }).unwrap_err();
        assert!(format!("{:#}", err).contains("not on the board"));
    }

    #[test]
    fn test_application_order_matters() {
        let handler = StateHandler::new();
        let moved = GameEvent::PieceMoved { piece: PieceId(0), from: Loc::new(1, 1), to: Loc::new(1, 2) };
        let removed = GameEvent::PieceRemoved { piece: PieceId(0) };

        let mut forward = small_state();
        handler.apply_all(&mut forward, &[moved, removed]).unwrap();
        assert!(forward.piece(PieceId(0)).is_err());

        // removing first leaves nothing for the move to act on
        let mut backward = small_state();
        let err = handler.apply_all(&mut backward, &[removed, moved]).unwrap_err();
        assert!(format!("{:#}", err).contains("no piece"));
    }

    #[test]
    fn test_replicas_converge() {
        let handler = StateHandler::new();
        let events = [
            GameEvent::PieceMoved { piece: PieceId(0), from: Loc::new(1, 1), to: Loc::new(2, 1) },
            GameEvent::PieceStruck { attacker: PieceId(0), target: PieceId(1), damage: 1 },
            GameEvent::TurnEnded { next: Side::Blue },
        ];

        let mut first = small_state();
        let mut second = small_state();
        handler.apply_all(&mut first, &events).unwrap();
        handler.apply_all(&mut second, &events).unwrap();

        assert_eq!(first.pieces, second.pieces);
        assert_eq!(first.side_to_move, second.side_to_move);
        assert_eq!(first.turn, second.turn);
    }
}
