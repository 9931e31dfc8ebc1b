//! `mob-core` — foundational types for the `mob_ai` framework.
//!
//! Every other `mob-*` crate depends on this one.  It has no `mob-*`
//! dependencies and only `rand` and `thiserror` externally, plus optional
//! `serde`.
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `MobId`, `GoalId`                                     |
//! | [`time`]        | `Tick`, `TickClock`                                   |
//! | [`rng`]         | `MobRng` (per-mob), `SimRng` (global)                 |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{GoalId, MobId};
pub use rng::{MobRng, SimRng};
pub use time::{Tick, TickClock};
