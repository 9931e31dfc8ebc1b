//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter.  Mobs are stepped once
//! per tick; the default rate is 20 ticks per simulated second.  `TickClock`
//! converts between ticks and seconds so goals can be configured in seconds
//! and still count whole ticks internally.

use std::fmt;

use crate::{CoreError, CoreResult};

/// Default simulation rate.
pub const DEFAULT_TICKS_PER_SECOND: u32 = 20;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// `true` every `n`th tick.  `n == 0` never matches.
    #[inline]
    pub fn is_every(self, n: u64) -> bool {
        n != 0 && self.0.is_multiple_of(n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TickClock ─────────────────────────────────────────────────────────────────

/// Tracks the current tick and maps tick counts to simulated seconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickClock {
    /// Ticks per simulated second.  Never zero.
    ticks_per_second: u32,
    /// The current tick, advanced by `TickClock::advance()`.
    pub current_tick: Tick,
}

impl TickClock {
    /// Create a clock at tick zero running at `ticks_per_second`.
    pub fn new(ticks_per_second: u32) -> CoreResult<Self> {
        if ticks_per_second == 0 {
            return Err(CoreError::ZeroTickRate);
        }
        Ok(Self { ticks_per_second, current_tick: Tick::ZERO })
    }

    #[inline]
    pub fn ticks_per_second(&self) -> u32 {
        self.ticks_per_second
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 / self.ticks_per_second as f64
    }

    /// How many ticks span `secs` seconds (rounds up).
    #[inline]
    pub fn ticks_for_secs(&self, secs: f64) -> u64 {
        (secs.max(0.0) * self.ticks_per_second as f64).ceil() as u64
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self { ticks_per_second: DEFAULT_TICKS_PER_SECOND, current_tick: Tick::ZERO }
    }
}

impl fmt::Display for TickClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}s)", self.current_tick, self.elapsed_secs())
    }
}
