//! Fluent builder for constructing `Fleet` + `VehicleRngs` in one step.
//!
//! # Usage
//!
//! ```rust
//! use xing_fleet::FleetBuilder;
//!
//! let (fleet, rngs) = FleetBuilder::new(200, /*seed=*/ 42)
//!     .lanes(4)
//!     .spawn_distance(20.0..=200.0)
//!     .speed(6.0..=14.0)
//!     .build();
//!
//! assert_eq!(fleet.len(), 200);
//! assert_eq!(rngs.len(),  200);
//! ```

use std::ops::RangeInclusive;

use xing_core::{LaneId, SimConfig, VehicleId};

use crate::{Fleet, Vehicle, VehicleRngs};

/// Fluent builder for a seeded random [`Fleet`].
///
/// Lanes are assigned round-robin (`i % lanes`).  Each vehicle draws its
/// initial distance and then its speed from its own [`VehicleRng`], so a
/// vehicle's starting state depends only on the seed and its ID.
///
/// [`VehicleRng`]: xing_core::VehicleRng
pub struct FleetBuilder {
    count:    usize,
    seed:     u64,
    lanes:    usize,
    distance: RangeInclusive<f64>,
    speed:    RangeInclusive<f64>,
}

impl FleetBuilder {
    /// Create a builder for `count` vehicles using `seed` as the global RNG
    /// seed.  Defaults: 4 lanes, 20–200 m, 6–14 m/s.
    pub fn new(count: usize, seed: u64) -> Self {
        Self {
            count,
            seed,
            lanes:    4,
            distance: 20.0..=200.0,
            speed:    6.0..=14.0,
        }
    }

    /// Builder pre-filled from a run configuration.
    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.vehicle_count, config.seed)
            .lanes(config.lane_count)
            .spawn_distance(config.spawn_distance_m.clone())
            .speed(config.speed_mps.clone())
    }

    pub fn lanes(mut self, lanes: usize) -> Self {
        self.lanes = lanes.max(1);
        self
    }

    pub fn spawn_distance(mut self, range: RangeInclusive<f64>) -> Self {
        self.distance = range;
        self
    }

    pub fn speed(mut self, range: RangeInclusive<f64>) -> Self {
        self.speed = range;
        self
    }

    /// Construct `Fleet` and `VehicleRngs`.
    pub fn build(self) -> (Fleet, VehicleRngs) {
        let mut rngs = VehicleRngs::new(self.count, self.seed);

        let vehicles = (0..self.count)
            .map(|i| {
                let id = VehicleId(i as u32);
                let lane = LaneId((i % self.lanes) as u16);
                let rng = rngs.get_mut(id);
                let distance = rng.uniform(&self.distance);
                let speed = rng.uniform(&self.speed);
                Vehicle::new(id, lane, distance, speed)
            })
            .collect();

        (Fleet::from_vehicles(vehicles), rngs)
    }
}
