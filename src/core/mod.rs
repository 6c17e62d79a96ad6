//! Core game representations and rules

pub mod command;
pub mod controller;
pub mod display;
pub mod event;
pub mod fen;
pub mod handler;
pub mod loc;
pub mod move_gen;
pub mod oracle;
pub mod piece;
pub mod player;
pub mod rules;
pub mod side;
pub mod state;

pub use command::Command;
pub use controller::{CommandSink, GameController, TurnRecord};
pub use event::GameEvent;
pub use handler::StateHandler;
pub use loc::{Loc, LocDelta, DIRECTIONS, GRID_LEN, GRID_SIZE};
pub use move_gen::legal_commands;
pub use oracle::{LegalityVerdict, StateOracle};
pub use piece::{KindStats, Piece, PieceId, PieceKind};
pub use player::{GameResult, PlayerController, Presenter};
pub use side::{FromIndex, Side, SideArray, ToIndex};
pub use state::GameState;
