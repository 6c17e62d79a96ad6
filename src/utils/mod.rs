mod rng;

pub use rng::{make_rng, make_seeded_rng};
