//! Per-vehicle state.

use xing_core::{LaneId, VehicleId};

/// The state of a single vehicle.
///
/// A vehicle is either **approaching** (`!finished`), possibly parked at the
/// stop offset (`stopped`), or **finished** after its one crossing.  Once
/// finished, `distance_m`, `waited_secs` and `stopped` never change again.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    pub id: VehicleId,

    /// Approach this vehicle is on.  Selects the light it obeys.
    pub lane: LaneId,

    /// Signed distance to the stop line in metres.  Positive while
    /// approaching; `<= 0` means at or past the line.
    pub distance_m: f64,

    /// Constant speed in m/s, fixed at creation.
    pub speed_mps: f64,

    /// Parked at the stop offset waiting for the light.
    pub stopped: bool,

    /// Cumulative seconds spent stopped.  Never decreases.
    pub waited_secs: f64,

    /// Completed crossings: 0 or 1 in one-shot runs, unbounded when
    /// respawning.
    pub crossings: u32,

    /// Terminal flag for one-shot runs.
    pub finished: bool,
}

impl Vehicle {
    /// A fresh vehicle approaching `lane` from `distance_m` at `speed_mps`.
    pub fn new(id: VehicleId, lane: LaneId, distance_m: f64, speed_mps: f64) -> Self {
        Self {
            id,
            lane,
            distance_m,
            speed_mps,
            stopped:     false,
            waited_secs: 0.0,
            crossings:   0,
            finished:    false,
        }
    }

    /// `true` while the vehicle still takes part in the simulation.
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.finished
    }
}
