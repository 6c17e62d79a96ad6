use std::fmt;

use super::{event::GameEvent, side::Side, state::GameState};

/// Final outcome of a match. `winner` is `None` for a draw or an abandoned
/// game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    pub winner: Option<Side>,
    pub turns: u32,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner {
            Some(winner) => write!(f, "winner {} in {} turns", winner, self.turns),
            None => write!(f, "draw after {} turns", self.turns),
        }
    }
}

/// One seat at the table.
///
/// The match runner drives every participant through the same lifecycle:
/// `set_initial_state` once, then any number of `update_state` calls as
/// turns resolve, `allow_command` whenever it is this player's turn to
/// submit, and finally `finish_game`.
///
/// `update_state` delivers each accepted command's events exactly once and
/// in order. `allow_command` must not block on the command being accepted;
/// a player is free to answer asynchronously through its
/// [`CommandSink`](super::controller::CommandSink).
pub trait PlayerController: Send {
    fn side(&self) -> Side;

    /// Hand the player its own replica of the starting state
    fn set_initial_state(&mut self, state: GameState);

    /// Fold one turn's events into the player's replica
    fn update_state(&mut self, events: &[GameEvent]);

    /// The player may now submit exactly one command
    fn allow_command(&mut self);

    /// The match is over; release any in-flight turn work
    fn finish_game(&mut self, result: &GameResult);
}

/// Optional attachment for surfacing state to an observer, such as a UI or
/// a transcript writer. Purely passive.
pub trait Presenter: Send {
    fn set_player_state(&mut self, state: &GameState);

    /// Show one turn's events from `viewer`'s perspective
    fn visualize_events(&mut self, events: &[GameEvent], viewer: Side);
}
