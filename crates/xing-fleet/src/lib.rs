//! `xing-fleet`: vehicles approaching the intersection and how they move.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`vehicle`]   | `Vehicle`, per-vehicle kinematic and waiting state          |
//! | [`store`]     | `Fleet` (vehicles + crossed-this-tick markers), `VehicleRngs`|
//! | [`builder`]   | `FleetBuilder` (seeded random population)                    |
//! | [`motion`]    | the per-tick stop-line rule, one-shot and respawning         |
//!
//! # Motion model
//!
//! Each vehicle sits at a signed distance from its lane's stop line and
//! closes it at constant speed.  Reaching the line under GREEN or YELLOW is a
//! crossing; reaching it under RED parks the vehicle at the intersection's
//! stop offset until the light permits passage.  Vehicles never interact
//! with each other, so every vehicle can be advanced independently.

pub mod builder;
pub mod motion;
pub mod store;
pub mod vehicle;

#[cfg(test)]
mod tests;

pub use builder::FleetBuilder;
pub use store::{Fleet, VehicleRngs};
pub use vehicle::Vehicle;
