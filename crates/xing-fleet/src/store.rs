//! Fleet storage: `Fleet` (vehicle data) and `VehicleRngs` (per-vehicle RNG).
//!
//! # Why two structs?
//!
//! The parallel motion phase needs `&mut` vehicles, `&mut` RNGs and a shared
//! `&Intersection` at the same time, partitioned into per-worker chunks.
//! Keeping the RNGs in their own struct lets the tick loop borrow
//! `fleet.vehicles`, `fleet.crossed_now` and `rngs.inner` as three disjoint
//! slices and chunk them in lockstep:
//!
//! ```ignore
//! fleet.vehicles.par_chunks_mut(n)
//!     .zip(fleet.crossed_now.par_chunks_mut(n))
//!     .zip(rngs.inner.par_chunks_mut(n))
//! ```

use xing_core::{VehicleId, VehicleRng};

use crate::Vehicle;

// ── VehicleRngs ───────────────────────────────────────────────────────────────

/// Per-vehicle deterministic RNG state, indexed by `VehicleId`.
pub struct VehicleRngs {
    pub inner: Vec<VehicleRng>,
}

impl VehicleRngs {
    /// Allocate and seed `count` per-vehicle RNGs from `global_seed`.
    ///
    /// `count` must fit a `VehicleId`; `SimConfig::validate` enforces this
    /// for configured runs.
    pub fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| VehicleRng::new(global_seed, VehicleId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one vehicle's RNG.
    #[inline]
    pub fn get_mut(&mut self, vehicle: VehicleId) -> &mut VehicleRng {
        &mut self.inner[vehicle.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── Fleet ─────────────────────────────────────────────────────────────────────

/// Every vehicle of the run plus the per-tick "crossed this tick" markers.
///
/// Both `Vec`s have the same length and are indexed by `VehicleId`.
/// Vehicles are never removed; finished vehicles stay in place so indices
/// remain stable for the whole run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fleet {
    pub vehicles: Vec<Vehicle>,

    /// `crossed_now[i]` is set when vehicle `i` crossed during the current
    /// tick.  Cleared at the start of every tick.
    pub crossed_now: Vec<bool>,
}

impl Fleet {
    /// Wrap hand-built vehicles.  Vehicle `i` should carry `VehicleId(i)`.
    pub fn from_vehicles(vehicles: Vec<Vehicle>) -> Self {
        debug_assert!(
            vehicles.iter().enumerate().all(|(i, v)| v.id.index() == i),
            "vehicle ids must match their position"
        );
        let crossed_now = vec![false; vehicles.len()];
        Self { vehicles, crossed_now }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    #[inline]
    pub fn get(&self, vehicle: VehicleId) -> &Vehicle {
        &self.vehicles[vehicle.index()]
    }

    /// Vehicles that have not finished.
    pub fn active_count(&self) -> usize {
        self.vehicles.iter().filter(|v| v.is_active()).count()
    }

    pub fn finished_count(&self) -> usize {
        self.vehicles.iter().filter(|v| v.finished).count()
    }

    /// Sum of every vehicle's crossing counter.
    pub fn total_crossings(&self) -> u64 {
        self.vehicles.iter().map(|v| v.crossings as u64).sum()
    }

    /// Mean cumulative waiting time over all vehicles, finished or not.
    pub fn average_wait_secs(&self) -> f64 {
        if self.vehicles.is_empty() {
            return 0.0;
        }
        let total: f64 = self.vehicles.iter().map(|v| v.waited_secs).sum();
        total / self.vehicles.len() as f64
    }

    /// IDs of the vehicles that crossed during the last tick.
    pub fn crossed_this_tick(&self) -> impl Iterator<Item = VehicleId> + '_ {
        self.crossed_now
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c)
            .map(|(i, _)| VehicleId(i as u32))
    }

    /// Highest lane index any vehicle uses, or `None` for an empty fleet.
    pub fn max_lane_index(&self) -> Option<usize> {
        self.vehicles.iter().map(|v| v.lane.index()).max()
    }
}
