//! `xing-signal`: traffic lights and the intersection that owns them.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                 |
//! |------------------|----------------------------------------------------------|
//! | [`light`]        | `LightPhase`, `TrafficLight` (cyclic timer state machine)|
//! | [`intersection`] | `Intersection`: one light per lane plus the stop offset |
//! | [`error`]        | `SignalError`, `SignalResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod intersection;
pub mod light;

#[cfg(test)]
mod tests;

pub use error::{SignalError, SignalResult};
pub use intersection::Intersection;
pub use light::{LightPhase, TrafficLight};
