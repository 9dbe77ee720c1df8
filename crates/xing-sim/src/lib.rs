//! `xing-sim`: tick loop orchestrator for the xing intersection simulator.
//!
//! # Four-phase tick loop
//!
//! ```text
//! until stop_reason():
//!   ① Lights       advance every light by dt            (driver thread)
//!   ② Reset        clear crossed-this-tick markers      (team)
//!   ③ Motion       motion model for every vehicle,      (team)
//!                  per-chunk crossing counts summed
//!   ④ Aggregate    cumulative count, clock, observer    (driver thread)
//! ```
//!
//! Before ② the team is resized with [`choose_team_size`] from the number of
//! vehicles still active and the number of green lights.  The pool itself is
//! created once and lives for the whole run.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs ② and ③ on a Rayon thread pool (default).         |
//! | `serde`    | Derives `Serialize`/`Deserialize` on stats types.      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use xing_core::SimConfig;
//! use xing_sim::{NoopObserver, SimBuilder};
//!
//! let config = SimConfig { vehicle_count: 500, seed: 7, ..SimConfig::default() };
//! let mut sim = SimBuilder::new(config).build()?;
//! let stats = sim.run(&mut NoopObserver);
//! assert_eq!(stats.vehicles_crossed, 500);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod stats;
pub mod team;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Sim, run_simulation};
pub use stats::{RunStats, StopReason, TickReport};
pub use team::{Team, choose_team_size};
