use rand::{prelude::*, rngs::StdRng, rngs::SysRng};

/// Deterministic in debug builds so failures replay
#[cfg(debug_assertions)]
pub fn make_rng() -> StdRng {
    const SEED: u64 = 29;
    StdRng::seed_from_u64(SEED)
}

#[cfg(not(debug_assertions))]
pub fn make_rng() -> StdRng {
    use rand::TryRng;
    let seed = SysRng::try_next_u64(&mut SysRng).unwrap();

    StdRng::seed_from_u64(seed)
}

/// Explicitly seeded generator for reproducible matches
pub fn make_seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
