//! AI participants: turn strategies and the player controller that runs them

pub mod controller;
pub mod dummy;
pub mod greedy;
pub mod random;
pub mod sandbox;
pub mod strategy;

pub use controller::{AiPlayerController, ExecutionMode, RETRY_DELAY};
pub use dummy::DummyPlayer;
pub use greedy::GreedyStrategy;
pub use random::RandomStrategy;
pub use sandbox::Sandbox;
pub use strategy::{CancelToken, Strategy, TurnContext};
