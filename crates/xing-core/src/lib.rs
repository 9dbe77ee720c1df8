//! `xing-core`: foundational types for the `xing` intersection simulator.
//!
//! This crate is a dependency of every other `xing-*` crate.  It intentionally
//! has no `xing-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `VehicleId`, `LaneId`                                 |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`rng`]         | `VehicleRng` (per-vehicle), `SimRng` (global)         |
//! | [`config`]      | `SimConfig`, `PhaseDurations`, run-mode enums         |
//! | [`error`]       | `XingError`, `XingResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, time and config.     |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{CrossingMode, PhaseDurations, RunBudget, SignalTiming, SimConfig, TeamPolicy};
pub use error::{XingError, XingResult};
pub use ids::{LaneId, VehicleId};
pub use rng::{SimRng, VehicleRng};
pub use time::{SimClock, Tick};
