//! `mob-sim` — mob brains and the population tick loop for the `mob_ai`
//! framework.
//!
//! A [`Mob`] owns a state value and two [`GoalSelector`][mob_goal::GoalSelector]s
//! driven with it: one for movement/look/jump goals and one for target
//! goals.  A [`Sim`] owns a population of mobs and steps them together.
//!
//! # Per-mob tick
//!
//! ```text
//! tick_count += 1
//! if !aware:                       nothing
//! elif active:
//!   if (tick_count + id) is odd and tick_count > 1:
//!     target_selector.tick_running_goals(false)
//!     goal_selector.tick_running_goals(false)
//!   else:
//!     target_selector.tick()
//!     goal_selector.tick()
//! else (inactive):
//!   goal_selector.tick()   when goal_selector.inactive_tick()
//!   target_selector.tick() when target_selector.inactive_tick()
//! every control_update_interval ticks:
//!   MOVE, LOOK ← controls.steer;  JUMP ← controls.steer && controls.jump
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Ticks mobs on Rayon's thread pool.                     |
//! | `serde`    | `Serialize`/`Deserialize` on `SimConfig`.              |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use mob_sim::{MobBuilder, NoopObserver, Sim, SimConfig};
//!
//! let mut sim = Sim::new(SimConfig::default())?;
//! sim.spawn(|id| MobBuilder::new(Sheep::new(id)).goal(5, RandomStroll::new(1.0)))?;
//! sim.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod mob;
pub mod observer;
pub mod sim;


pub use builder::MobBuilder;
pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use mob::{ControlPermissions, Mob, MobState};
pub use observer::{NoopObserver, SimObserver, TickStats};
pub use sim::Sim;
