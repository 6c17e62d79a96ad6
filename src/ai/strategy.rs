use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;

use crate::core::{
    loc::{LocDelta, DIRECTIONS},
    oracle::StateOracle,
    side::Side,
    state::GameState,
    Command,
};

use super::sandbox::Sandbox;

/// Cooperative cancellation flag shared between an AI controller and its
/// turn worker. Cancelling never interrupts a computation; the worker is
/// expected to poll at safe points and to check once more before any
/// submission.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Everything a strategy gets to see while computing one turn: a private
/// state snapshot, an oracle over it, a sandbox for what-if probes, and the
/// cancellation flag.
pub struct TurnContext {
    state: GameState,
    side: Side,
    oracle: StateOracle,
    cancel: CancelToken,
}

impl TurnContext {
    pub fn new(state: GameState, side: Side, cancel: CancelToken) -> Self {
        Self {
            state,
            side,
            oracle: StateOracle::new(),
            cancel,
        }
    }

    /// The snapshot this turn is being computed from. Private to the
    /// computation; mutating the live game is impossible from here.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn oracle(&self) -> &StateOracle {
        &self.oracle
    }

    /// What-if executor over this turn's snapshot
    pub fn sandbox(&self) -> Sandbox<'_> {
        Sandbox::new(&self.state)
    }

    /// The eight movement directions. Always the same instance.
    pub fn directions(&self) -> &'static [LocDelta; 8] {
        &DIRECTIONS
    }

    pub fn cancelled(&self) -> bool {
        self.cancel.cancelled()
    }
}

/// A full decision procedure for one turn.
///
/// Implementations must be pure with respect to the live game: they see
/// only the [`TurnContext`]. Long computations should poll
/// [`TurnContext::cancelled`] at safe points and give up with an error.
pub trait Strategy: Send + Sync {
    fn calculate_command(&self, ctx: &TurnContext) -> Result<Command>;
}
