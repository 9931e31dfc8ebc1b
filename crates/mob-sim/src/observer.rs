//! Simulation observer trait for progress reporting and data collection.

use mob_core::Tick;

use crate::Mob;

/// Population summary produced by every [`Sim::step`][crate::Sim::step].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    pub tick:          Tick,
    pub mobs:          usize,
    /// Mobs on the full-rate path.
    pub active:        usize,
    /// Running goals across both selectors of every mob.
    pub running_goals: usize,
}

/// Callbacks invoked by the [`Sim`][crate::Sim] tick loop.
///
/// All methods have no-op defaults.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl<S> SimObserver<S> for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
///         if tick.is_every(100) {
///             println!("{tick}: {} goals running", stats.running_goals);
///         }
///     }
/// }
/// ```
pub trait SimObserver<S> {
    /// Called before any mob is ticked.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after every mob has been ticked.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &TickStats) {}

    /// Called every `config.output_interval_ticks` ticks with read-only
    /// access to all mobs.
    fn on_snapshot(&mut self, _tick: Tick, _mobs: &[Mob<S>]) {}

    /// Called once by [`Sim::run`][crate::Sim::run] after the final tick.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl<S> SimObserver<S> for NoopObserver {}
