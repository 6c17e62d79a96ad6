use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::core::{
    command::Command,
    controller::CommandSink,
    event::GameEvent,
    handler::StateHandler,
    oracle::StateOracle,
    player::{GameResult, PlayerController, Presenter},
    side::Side,
    state::GameState,
};

use super::strategy::{CancelToken, Strategy, TurnContext};

/// Wait before the single resubmission attempt in background mode
pub const RETRY_DELAY: Duration = Duration::from_millis(500);

/// How a granted turn is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Compute and submit inside `allow_command`. No retry: a rejection
    /// goes straight to the end-turn fallback, and strategy panics
    /// propagate to the caller.
    Synchronous,
    /// Compute on a named worker thread and submit through the async sink
    /// entry point. One rejected submission is retried after
    /// [`RETRY_DELAY`]; strategy panics are contained to the worker.
    Background,
}

struct LocalState {
    state: GameState,
    handler: StateHandler,
    oracle: StateOracle,
}

struct Worker {
    handle: JoinHandle<()>,
    cancel: CancelToken,
}

/// An AI seat: maintains its own state replica from the event feed and
/// answers `allow_command` by running its [`Strategy`].
///
/// The strategy only ever sees snapshots. Whatever it returns is submitted
/// to the command sink; if nothing can be submitted or everything is
/// rejected, the controller falls back to ending the turn so the match
/// never stalls on this seat.
pub struct AiPlayerController {
    side: Side,
    mode: ExecutionMode,
    strategy: Arc<dyn Strategy>,
    sink: Arc<dyn CommandSink>,
    local: Option<LocalState>,
    presenter: Option<Box<dyn Presenter>>,
    worker: Option<Worker>,
    retry_delay: Duration,
}

impl AiPlayerController {
    pub fn new(
        side: Side,
        strategy: Arc<dyn Strategy>,
        mode: ExecutionMode,
        sink: Arc<dyn CommandSink>,
    ) -> Self {
        Self {
            side,
            mode,
            strategy,
            sink,
            local: None,
            presenter: None,
            worker: None,
            retry_delay: RETRY_DELAY,
        }
    }

    pub fn set_presenter(&mut self, presenter: Box<dyn Presenter>) {
        self.presenter = Some(presenter);
    }

    /// Shorten or stretch the background retry wait. Tests use this to keep
    /// the rejection protocol fast.
    pub fn set_retry_delay(&mut self, delay: Duration) {
        self.retry_delay = delay;
    }

    /// This seat's replica, if it has been seated
    pub fn state(&self) -> Option<&GameState> {
        self.local.as_ref().map(|local| &local.state)
    }

    fn take_turn_inline(&mut self) {
        let Some(local) = &self.local else {
            log::error!("{} was granted a turn before set_initial_state", self.side);
            return;
        };

        let ctx = TurnContext::new(local.state.clone(), self.side, CancelToken::new());
        let command = match self.strategy.calculate_command(&ctx) {
            Ok(command) => Some(command),
            Err(err) => {
                log::error!("{} strategy produced no command: {:#}", self.side, err);
                None
            }
        };

        let mut accepted = false;
        if let Some(command) = &command {
            accepted = self.sink.accept_command(command);
            if !accepted {
                log::error!("{} falling back to end turn, command was rejected: {}", self.side, command);
                explain_rejection(self.side, &local.state, command);
            }
        }

        if !accepted && !self.sink.accept_command(&Command::end_turn(self.side)) {
            log::error!("{} forced end turn was rejected, giving up the turn", self.side);
        }
    }

    fn spawn_worker(&mut self) {
        let Some(local) = &self.local else {
            log::error!("{} was granted a turn before set_initial_state", self.side);
            return;
        };

        if let Some(previous) = self.worker.take() {
            if previous.handle.is_finished() {
                let _ = previous.handle.join();
            } else {
                // the runner grants one turn at a time; a live worker here
                // means the previous turn never resolved
                log::warn!("{} still has a turn worker running, cancelling it", self.side);
                previous.cancel.cancel();
            }
        }

        let cancel = CancelToken::new();
        let task = TurnTask {
            snapshot: local.state.clone(),
            side: self.side,
            strategy: Arc::clone(&self.strategy),
            sink: Arc::clone(&self.sink),
            cancel: cancel.clone(),
            retry_delay: self.retry_delay,
        };

        let spawned = thread::Builder::new()
            .name(format!("turn-{}", self.side.name().to_lowercase()))
            .spawn(move || task.run());

        match spawned {
            Ok(handle) => self.worker = Some(Worker { handle, cancel }),
            Err(err) => {
                log::error!("{} could not spawn a turn worker: {}", self.side, err);
                if !self.sink.accept_command(&Command::end_turn(self.side)) {
                    log::error!("{} forced end turn was rejected, giving up the turn", self.side);
                }
            }
        }
    }
}

impl PlayerController for AiPlayerController {
    fn side(&self) -> Side {
        self.side
    }

    fn set_initial_state(&mut self, state: GameState) {
        if let Some(presenter) = &mut self.presenter {
            presenter.set_player_state(&state);
        }
        self.local = Some(LocalState {
            state,
            handler: StateHandler::new(),
            oracle: StateOracle::new(),
        });
    }

    fn update_state(&mut self, events: &[GameEvent]) {
        let Some(local) = &mut self.local else {
            log::error!("{} received events before set_initial_state", self.side);
            return;
        };

        if let Err(err) = local.handler.apply_all(&mut local.state, events) {
            log::error!("{} replica desynchronized: {:#}", self.side, err);
        }

        if let Some(presenter) = &mut self.presenter {
            presenter.visualize_events(events, self.side);
        }
    }

    fn allow_command(&mut self) {
        match self.mode {
            ExecutionMode::Synchronous => self.take_turn_inline(),
            ExecutionMode::Background => self.spawn_worker(),
        }
    }

    fn finish_game(&mut self, result: &GameResult) {
        log::info!("{} finished: {}", self.side, result);
        if let Some(worker) = self.worker.take() {
            // never interrupt the thread; the token keeps it from
            // submitting into a dead game
            worker.cancel.cancel();
            if worker.handle.is_finished() {
                let _ = worker.handle.join();
            }
        }
    }
}

/// One granted turn, run to completion on a worker thread
struct TurnTask {
    snapshot: GameState,
    side: Side,
    strategy: Arc<dyn Strategy>,
    sink: Arc<dyn CommandSink>,
    cancel: CancelToken,
    retry_delay: Duration,
}

impl TurnTask {
    fn run(self) {
        let ctx = TurnContext::new(self.snapshot.clone(), self.side, self.cancel.clone());

        let computed = catch_unwind(AssertUnwindSafe(|| self.strategy.calculate_command(&ctx)));
        let command = match computed {
            Ok(Ok(command)) => Some(command),
            Ok(Err(err)) => {
                log::error!("{} strategy produced no command: {:#}", self.side, err);
                None
            }
            Err(_) => {
                log::error!("{} strategy panicked while computing a command", self.side);
                None
            }
        };

        let mut accepted = false;
        if let Some(command) = &command {
            if self.cancel.cancelled() {
                return;
            }
            accepted = self.sink.accept_command_async(command);

            if !accepted {
                // the match may still be resolving the previous turn;
                // wait once and resubmit
                thread::sleep(self.retry_delay);
                if self.cancel.cancelled() {
                    return;
                }
                accepted = self.sink.accept_command_async(command);
            }
        }

        if accepted {
            return;
        }

        if let Some(command) = &command {
            log::error!("{} falling back to end turn, command was rejected twice: {}", self.side, command);
            explain_rejection(self.side, &self.snapshot, command);
        }

        if self.cancel.cancelled() {
            return;
        }
        if !self.sink.accept_command_async(&Command::end_turn(self.side)) {
            log::error!("{} forced end turn was rejected, giving up the turn", self.side);
        }
    }
}

/// Ask the oracle why a command was refused and log the full chain. The
/// verdict comes from this seat's snapshot, which can lag the live game.
fn explain_rejection(side: Side, state: &GameState, command: &Command) {
    let verdict = StateOracle::new().check_command_detailed(state, command, true);
    if verdict.is_legal() {
        log::error!("{} snapshot still considers {} legal, the turn was likely lost", side, command);
    } else {
        log::error!("{} rejection reason: {}", side, verdict.reason());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use anyhow::bail;

    use super::*;
    use crate::core::loc::Loc;
    use crate::core::piece::PieceId;

    /// Sink double that scripts rejections and records every submission
    struct ScriptedSink {
        reject_first: usize,
        submissions: Mutex<Vec<Command>>,
    }

    impl ScriptedSink {
        fn new(reject_first: usize) -> Self {
            Self {
                reject_first,
                submissions: Mutex::new(Vec::new()),
            }
        }

        fn submissions(&self) -> Vec<Command> {
            self.submissions.lock().unwrap().clone()
        }

        fn record(&self, command: &Command) -> bool {
            let mut submissions = self.submissions.lock().unwrap();
            submissions.push(*command);
            submissions.len() > self.reject_first
        }
    }

    impl CommandSink for ScriptedSink {
        fn accept_command(&self, command: &Command) -> bool {
            self.record(command)
        }

        fn accept_command_async(&self, command: &Command) -> bool {
            self.record(command)
        }
    }

    struct FixedStrategy(Command);

    impl Strategy for FixedStrategy {
        fn calculate_command(&self, _ctx: &TurnContext) -> anyhow::Result<Command> {
            Ok(self.0)
        }
    }

    struct FailingStrategy;

    impl Strategy for FailingStrategy {
        fn calculate_command(&self, _ctx: &TurnContext) -> anyhow::Result<Command> {
            bail!("deliberately out of ideas")
        }
    }

    fn move_command() -> Command {
        Command::Move {
            player: Side::Red,
            from: Loc::new(1, 0),
            to: Loc::new(1, 1),
        }
    }

    #[test]
    fn test_sync_accepted_first_try() {
        let sink = Arc::new(ScriptedSink::new(0));
        let mut player = AiPlayerController::new(
            Side::Red,
            Arc::new(FixedStrategy(move_command())),
            ExecutionMode::Synchronous,
            Arc::clone(&sink) as Arc<dyn CommandSink>,
        );

        player.set_initial_state(GameState::initial());
        player.allow_command();

        assert_eq!(sink.submissions(), vec![move_command()]);
    }

    #[test]
    fn test_sync_rejection_skips_retry() {
        let sink = Arc::new(ScriptedSink::new(usize::MAX));
        let mut player = AiPlayerController::new(
            Side::Red,
            Arc::new(FixedStrategy(move_command())),
            ExecutionMode::Synchronous,
            Arc::clone(&sink) as Arc<dyn CommandSink>,
        );

        player.set_initial_state(GameState::initial());
        player.allow_command();

        // one attempt, then straight to the fallback
        assert_eq!(
            sink.submissions(),
            vec![move_command(), Command::end_turn(Side::Red)]
        );
    }

    #[test]
    fn test_sync_strategy_failure_falls_back() {
        let sink = Arc::new(ScriptedSink::new(0));
        let mut player = AiPlayerController::new(
            Side::Red,
            Arc::new(FailingStrategy),
            ExecutionMode::Synchronous,
            Arc::clone(&sink) as Arc<dyn CommandSink>,
        );

        player.set_initial_state(GameState::initial());
        player.allow_command();

        assert_eq!(sink.submissions(), vec![Command::end_turn(Side::Red)]);
    }

    #[test]
    fn test_replica_follows_events() {
        let sink = Arc::new(ScriptedSink::new(0));
        let mut player = AiPlayerController::new(
            Side::Blue,
            Arc::new(FixedStrategy(Command::end_turn(Side::Blue))),
            ExecutionMode::Synchronous,
            Arc::clone(&sink) as Arc<dyn CommandSink>,
        );

        player.set_initial_state(GameState::initial());
        player.update_state(&[
            GameEvent::PieceMoved { piece: PieceId(0), from: Loc::new(1, 0), to: Loc::new(1, 3) },
            GameEvent::TurnEnded { next: Side::Blue },
        ]);

        let replica = player.state().unwrap();
        assert_eq!(replica.piece(PieceId(0)).unwrap().loc, Loc::new(1, 3));
        assert_eq!(replica.side_to_move, Side::Blue);
    }

    #[test]
    fn test_events_before_seating_are_dropped() {
        let sink = Arc::new(ScriptedSink::new(0));
        let mut player = AiPlayerController::new(
            Side::Red,
            Arc::new(FailingStrategy),
            ExecutionMode::Synchronous,
            Arc::clone(&sink) as Arc<dyn CommandSink>,
        );

        // must not panic, only log
        player.update_state(&[GameEvent::TurnEnded { next: Side::Blue }]);
        assert!(player.state().is_none());
    }

    /// Presenter double that notes call order
    struct RecordingPresenter {
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Presenter for RecordingPresenter {
        fn set_player_state(&mut self, state: &GameState) {
            self.log.lock().unwrap().push(format!("state turn {}", state.turn));
        }

        fn visualize_events(&mut self, events: &[GameEvent], viewer: Side) {
            self.log.lock().unwrap().push(format!("{} events for {}", events.len(), viewer.name()));
        }
    }

    #[test]
    fn test_presenter_sees_state_then_events() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::new(ScriptedSink::new(0));
        let mut player = AiPlayerController::new(
            Side::Red,
            Arc::new(FixedStrategy(move_command())),
            ExecutionMode::Synchronous,
            Arc::clone(&sink) as Arc<dyn CommandSink>,
        );
        player.set_presenter(Box::new(RecordingPresenter { log: Arc::clone(&log) }));

        player.set_initial_state(GameState::initial());
        player.update_state(&[GameEvent::TurnEnded { next: Side::Blue }]);

        assert_eq!(*log.lock().unwrap(), vec!["state turn 0", "1 events for Red"]);
    }
}
