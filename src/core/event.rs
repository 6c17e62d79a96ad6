use std::fmt;

use super::{loc::Loc, piece::PieceId, side::Side};

/// One observable consequence of an accepted command.
///
/// Events name pieces by [`PieceId`] and carry absolute squares, so applying
/// them to any replica of the state needs no rebinding. Application order is
/// significant: a strike that removes a piece is `PieceStruck` followed by
/// `PieceRemoved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PieceMoved { piece: PieceId, from: Loc, to: Loc },
    PieceStruck { attacker: PieceId, target: PieceId, damage: i32 },
    PieceRemoved { piece: PieceId },
    TurnEnded { next: Side },
    GameFinished { winner: Side },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::PieceMoved { piece, from, to } =>
                write!(f, "{} moved {} to {}", piece, from, to),
            GameEvent::PieceStruck { attacker, target, damage } =>
                write!(f, "{} struck {} for {}", attacker, target, damage),
            GameEvent::PieceRemoved { piece } =>
                write!(f, "{} removed", piece),
            GameEvent::TurnEnded { next } =>
                write!(f, "turn passed to {}", next),
            GameEvent::GameFinished { winner } =>
                write!(f, "game finished, {} wins", winner),
        }
    }
}
