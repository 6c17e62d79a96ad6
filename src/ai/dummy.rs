use crate::core::{
    event::GameEvent,
    player::{GameResult, PlayerController},
    side::Side,
    state::GameState,
};

/// Placeholder participant that never submits anything. Sandboxed what-if
/// games seat two of these so the private controller has a full table.
#[derive(Debug, Clone, Copy)]
pub struct DummyPlayer {
    side: Side,
}

impl DummyPlayer {
    pub fn new(side: Side) -> Self {
        Self { side }
    }
}

impl PlayerController for DummyPlayer {
    fn side(&self) -> Side {
        self.side
    }

    fn set_initial_state(&mut self, _state: GameState) {}

    fn update_state(&mut self, _events: &[GameEvent]) {}

    fn allow_command(&mut self) {}

    fn finish_game(&mut self, _result: &GameResult) {}
}
