use crate::core::{
    command::Command,
    controller::GameController,
    player::PlayerController,
    side::{Side, SideArray},
    state::GameState,
};
use crate::engine::{MatchOptions, MatchRunner};

use super::dummy::DummyPlayer;

/// What-if executor: plays a single command on a throwaway copy of a state
/// behind a private controller, leaving the original untouched.
pub struct Sandbox<'a> {
    state: &'a GameState,
}

impl<'a> Sandbox<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self { state }
    }

    /// Play `command` on a fresh deep copy with placeholder participants
    /// seated at both sides. Returns the resulting state. If the private
    /// controller rejects the command, the copy comes back unchanged and a
    /// warning is logged.
    pub fn try_move_on_new_state(&self, command: &Command) -> GameState {
        let (controller, feed) = GameController::new(self.state.clone());
        let placeholders = SideArray::new(
            Box::new(DummyPlayer::new(Side::Red)) as Box<dyn PlayerController>,
            Box::new(DummyPlayer::new(Side::Blue)) as Box<dyn PlayerController>,
        );
        let mut probe = MatchRunner::new(controller, feed, placeholders, MatchOptions::default());

        if !probe.submit(command) {
            log::warn!("sandbox rejected {}", command);
        }

        probe.state()
    }
}
