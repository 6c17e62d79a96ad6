use std::sync::{Arc, Mutex, MutexGuard};
use crossbeam_channel::{unbounded, Receiver, Sender};

use super::{
    command::Command,
    event::GameEvent,
    handler::StateHandler,
    oracle::StateOracle,
    rules,
    side::Side,
    state::GameState,
};

/// A validated command together with the events it produced, in the order
/// they were applied.
#[derive(Debug, Clone)]
pub struct TurnRecord {
    pub command: Command,
    pub events: Vec<GameEvent>,
}

/// Where players deliver commands. Both entry points are thread-safe and
/// report acceptance; the async variant exists for callers off the match
/// thread, such as AI turn workers.
pub trait CommandSink: Send + Sync {
    fn accept_command(&self, command: &Command) -> bool;
    fn accept_command_async(&self, command: &Command) -> bool;
}

struct Authoritative {
    state: GameState,
    handler: StateHandler,
    oracle: StateOracle,
}

/// Owner of the authoritative state.
///
/// A command is validated, turned into events, applied to the local state,
/// and published as a [`TurnRecord`], all under one lock. Records therefore
/// leave in application order, and no caller ever mutates the state except
/// through this path.
pub struct GameController {
    shared: Mutex<Authoritative>,
    records: Sender<TurnRecord>,
}

impl GameController {
    /// Build a controller over `state` and the receiving end of its record
    /// feed. The feed carries every accepted command's record exactly once.
    pub fn new(state: GameState) -> (Arc<Self>, Receiver<TurnRecord>) {
        let (records, feed) = unbounded();
        let controller = Arc::new(Self {
            shared: Mutex::new(Authoritative {
                state,
                handler: StateHandler::new(),
                oracle: StateOracle::new(),
            }),
            records,
        });
        (controller, feed)
    }

    fn lock(&self) -> MutexGuard<'_, Authoritative> {
        // a poisoned lock still holds consistent state: mutation only
        // happens under it through whole event lists
        self.shared.lock().unwrap_or_else(|err| err.into_inner())
    }

    /// Deep copy of the authoritative state
    pub fn snapshot(&self) -> GameState {
        self.lock().state.clone()
    }

    pub fn side_to_move(&self) -> Side {
        self.lock().state.side_to_move
    }

    pub fn turn(&self) -> u32 {
        self.lock().state.turn
    }

    pub fn winner(&self) -> Option<Side> {
        self.lock().state.winner
    }

    fn submit(&self, command: &Command) -> bool {
        let mut guard = self.lock();
        let shared = &mut *guard;

        let verdict = shared.oracle.check_command_detailed(&shared.state, command, false);
        if !verdict.is_legal() {
            log::debug!("controller rejected: {}", verdict.reason());
            return false;
        }

        let events = match rules::command_events(&shared.state, command) {
            Ok(events) => events,
            Err(err) => {
                log::error!("could not derive events for {}: {:#}", command, err);
                return false;
            }
        };

        for event in &events {
            if let Err(err) = shared.handler.apply_event(&mut shared.state, event) {
                log::error!("authoritative state rejected {}: {:#}", event, err);
                return false;
            }
        }

        // nobody listening (sandbox probes) is fine
        let _ = self.records.send(TurnRecord {
            command: *command,
            events,
        });

        true
    }
}

impl CommandSink for GameController {
    fn accept_command(&self, command: &Command) -> bool {
        self.submit(command)
    }

    fn accept_command_async(&self, command: &Command) -> bool {
        self.submit(command)
    }
}
