//! Deterministic per-mob and simulation-level RNG wrappers.
//!
//! Each mob gets its own `SmallRng` seeded by
//!
//!   seed = global_seed XOR (mob_id * MIXING_CONSTANT)
//!
//! so mobs never share RNG state and goal chance rolls replay identically
//! for the same seed, regardless of which thread ticks the mob.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::MobId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── MobRng ────────────────────────────────────────────────────────────────────

/// Per-mob deterministic RNG, usually stored inside the mob's state so its
/// goals can roll chances.
pub struct MobRng(SmallRng);

impl MobRng {
    /// Seed deterministically from the run's global seed and a mob ID.
    pub fn new(global_seed: u64, mob: MobId) -> Self {
        let seed = global_seed ^ (mob.0 as u64).wrapping_mul(MIXING_CONSTANT);
        MobRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// `true` with probability `1 / n`; `n == 0` is treated as `1`.
    #[inline]
    pub fn one_in(&mut self, n: u32) -> bool {
        self.0.gen_range(0..n.max(1)) == 0
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for population-wide draws (spawn placement, world
/// events).  Single-threaded use only.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
