//! Population-level configuration.

use mob_core::time::DEFAULT_TICKS_PER_SECOND;
use mob_goal::SelectorConfig;

use crate::{SimError, SimResult};

/// Default number of ticks between control-flag refreshes.
pub const DEFAULT_CONTROL_UPDATE_INTERVAL: u32 = 5;

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON file by the application crate.  With the
/// `serde` feature every field is optional in the input and falls back to
/// [`SimConfig::default`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Ticks per simulated second.  Default: 20.
    pub ticks_per_second: u32,

    /// Ticks simulated by [`Sim::run`][crate::Sim::run].
    pub total_ticks: u64,

    /// Master RNG seed.
    pub seed: u64,

    /// Call `SimObserver::on_snapshot` every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,

    /// Refresh each mob's control flags from its state every N ticks.
    /// 0 disables the refresh.
    pub control_update_interval: u32,

    /// Settings applied to both selectors of every spawned mob unless the
    /// mob's builder overrides them.
    pub selector: SelectorConfig,
}

impl SimConfig {
    pub fn validate(&self) -> SimResult<()> {
        if self.ticks_per_second == 0 {
            return Err(SimError::Config("ticks_per_second must be non-zero".into()));
        }
        self.selector.validate()?;
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ticks_per_second:        DEFAULT_TICKS_PER_SECOND,
            total_ticks:             DEFAULT_TICKS_PER_SECOND as u64 * 60,
            seed:                    0,
            output_interval_ticks:   0,
            control_update_interval: DEFAULT_CONTROL_UPDATE_INTERVAL,
            selector:                SelectorConfig::default(),
        }
    }
}
