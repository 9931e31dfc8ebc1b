//! `mob-goal` — goal arbitration for mobs.
//!
//! A mob owns a [`GoalSelector`] holding a pool of [`Goal`]s, each registered
//! with a priority.  Once per tick the selector decides which goals run,
//! giving every running goal exclusive use of the control [`Flag`]s it
//! declares (move, look, jump, target).  A goal with a strictly lower
//! priority value preempts an interruptable holder; equal priorities never
//! preempt.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`flag`]     | `Flag`, `FlagSet` (bitset), `FlagIter`                       |
//! | [`goal`]     | `Goal<C>` trait, `reduced_tick_delay`                        |
//! | [`wrapped`]  | `WrappedGoal<C>` — priority + running state + preemption rule |
//! | [`selector`] | `GoalSelector<C>` — lock table and the per-tick passes       |
//! | [`config`]   | `SelectorConfig`                                             |
//! | [`error`]    | `GoalError`, `GoalResult<T>`                                 |
//!
//! # Quick-start
//!
//! ```rust
//! use mob_goal::{Flag, FlagSet, Goal, GoalSelector};
//!
//! struct Graze;
//!
//! impl Goal<u32> for Graze {
//!     fn flags(&self) -> FlagSet { Flag::Move | Flag::Look }
//!     fn can_use(&mut self, hunger: &u32) -> bool { *hunger > 5 }
//!     fn tick(&mut self, hunger: &mut u32) { *hunger -= 1; }
//! }
//!
//! let mut hunger = 8;
//! let mut selector = GoalSelector::new();
//! let graze = selector.add_goal(3, Graze);
//! selector.tick(&mut hunger);
//! assert_eq!(selector.holder_of(Flag::Move), Some(graze));
//! assert_eq!(hunger, 7);
//! ```

pub mod config;
pub mod error;
pub mod flag;
pub mod goal;
pub mod selector;
pub mod wrapped;

#[cfg(test)]
mod tests;

pub use config::SelectorConfig;
pub use error::{GoalError, GoalResult};
pub use flag::{Flag, FlagIter, FlagSet};
pub use goal::{Goal, reduced_tick_delay};
pub use selector::GoalSelector;
pub use wrapped::WrappedGoal;
