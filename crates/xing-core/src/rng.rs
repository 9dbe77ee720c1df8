//! Deterministic per-vehicle and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each vehicle gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (vehicle_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive vehicle IDs uniformly across the seed space.
//! This means:
//!
//! - Vehicles never share RNG state, so a respawn draw made on any worker
//!   thread yields the same value it would on any other.
//! - Results are identical for every team size, including a team of one.
//! - All RNG calls are local to the owning thread; no synchronisation needed.

use std::ops::RangeInclusive;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::VehicleId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── VehicleRng ────────────────────────────────────────────────────────────────

/// Per-vehicle deterministic RNG.
///
/// Created once per vehicle at fleet construction and stored in a parallel
/// `Vec<VehicleRng>` alongside the vehicles.  Each worker only ever touches
/// the RNGs of the chunk it owns.
#[derive(Clone, Debug)]
pub struct VehicleRng(SmallRng);

impl VehicleRng {
    /// Seed deterministically from the run's global seed and a vehicle ID.
    pub fn new(global_seed: u64, vehicle: VehicleId) -> Self {
        let seed = global_seed ^ (vehicle.0 as u64).wrapping_mul(MIXING_CONSTANT);
        VehicleRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform draw from a closed interval.  A degenerate `a..=a` range
    /// always returns `a`.
    #[inline]
    pub fn uniform(&mut self, range: &RangeInclusive<f64>) -> f64 {
        self.0.gen_range(range.clone())
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for setup work such as drawing randomized light
/// durations.
///
/// Used only in single-threaded contexts.
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn uniform(&mut self, range: &RangeInclusive<f64>) -> f64 {
        self.0.gen_range(range.clone())
    }
}
