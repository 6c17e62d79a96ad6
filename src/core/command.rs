use std::fmt;

use super::{loc::Loc, side::Side};

/// A player's order for one turn. Any accepted command ends the turn,
/// including moves and strikes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move { player: Side, from: Loc, to: Loc },
    Strike { player: Side, from: Loc, target: Loc },
    EndTurn { player: Side },
}

impl Command {
    pub fn player(&self) -> Side {
        match self {
            Command::Move { player, .. } => *player,
            Command::Strike { player, .. } => *player,
            Command::EndTurn { player } => *player,
        }
    }

    /// The fallback command every participant can always offer
    pub fn end_turn(player: Side) -> Self {
        Command::EndTurn { player }
    }

    pub fn is_end_turn(&self) -> bool {
        matches!(self, Command::EndTurn { .. })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Move { player, from, to } =>
                write!(f, "{} move {} {}", player, from, to),
            Command::Strike { player, from, target } =>
                write!(f, "{} strike {} {}", player, from, target),
            Command::EndTurn { player } =>
                write!(f, "{} endturn", player),
        }
    }
}
