//! Drives a match from start to finish.

use std::sync::Arc;

use crossbeam_channel::{Receiver, RecvTimeoutError};

use crate::core::{
    command::Command,
    controller::{CommandSink, GameController, TurnRecord},
    player::{GameResult, PlayerController},
    side::SideArray,
    state::GameState,
};

use super::options::MatchOptions;

/// Owns the two seats and the record feed, and pumps the turn cycle:
/// grant the side to move an `allow_command`, wait for the controller to
/// publish the resulting record, hand the events to both players, repeat.
///
/// Players never see each other and never see the runner; their only ways
/// back in are the command sink they were built with and the event
/// deliveries they receive here.
pub struct MatchRunner {
    controller: Arc<GameController>,
    records: Receiver<TurnRecord>,
    players: SideArray<Box<dyn PlayerController>>,
    options: MatchOptions,
}

impl MatchRunner {
    /// Seat `players` over `controller`'s game. Each seat is handed its own
    /// deep copy of the starting state.
    pub fn new(
        controller: Arc<GameController>,
        records: Receiver<TurnRecord>,
        mut players: SideArray<Box<dyn PlayerController>>,
        options: MatchOptions,
    ) -> Self {
        let snapshot = controller.snapshot();
        for player in players.iter_mut() {
            player.set_initial_state(snapshot.clone());
        }

        Self {
            controller,
            records,
            players,
            options,
        }
    }

    pub fn controller(&self) -> &Arc<GameController> {
        &self.controller
    }

    /// Deep copy of the authoritative state
    pub fn state(&self) -> GameState {
        self.controller.snapshot()
    }

    /// Submit one command directly and distribute whatever it produced.
    /// Scripted drivers and sandbox probes use this instead of [`run`].
    ///
    /// [`run`]: MatchRunner::run
    pub fn submit(&mut self, command: &Command) -> bool {
        let accepted = self.controller.accept_command(command);
        self.distribute_pending();
        accepted
    }

    fn distribute_pending(&mut self) {
        while let Ok(record) = self.records.try_recv() {
            for player in self.players.iter_mut() {
                player.update_state(&record.events);
            }
        }
    }

    /// Play until someone wins, the turn limit declares a draw, or a turn
    /// times out. Every seat is notified of the result.
    pub fn run(&mut self) -> GameResult {
        loop {
            let snapshot = self.controller.snapshot();
            if let Some(winner) = snapshot.winner {
                log::info!("game over, {} wins", winner);
                break;
            }
            if snapshot.turn >= self.options.turn_limit {
                log::info!("turn limit of {} reached, drawing", self.options.turn_limit);
                break;
            }

            self.players[snapshot.side_to_move].allow_command();

            match self.records.recv_timeout(self.options.turn_timeout) {
                Ok(record) => {
                    log::debug!("turn {}: {}", snapshot.turn, record.command);
                    for player in self.players.iter_mut() {
                        player.update_state(&record.events);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    log::error!(
                        "no command accepted for {} within {:?}, abandoning the match",
                        snapshot.side_to_move,
                        self.options.turn_timeout
                    );
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => {
                    log::error!("record feed closed, abandoning the match");
                    break;
                }
            }
        }

        let result = GameResult {
            winner: self.controller.winner(),
            turns: self.controller.turn(),
        };
        for player in self.players.iter_mut() {
            player.finish_game(&result);
        }

        result
    }
}
