//! The per-tick stop-line rule.
//!
//! Evaluated for one vehicle against its own lane's light, in this order:
//!
//! 1. A vehicle parked at the stop offset is released when the light is
//!    GREEN or YELLOW.
//! 2. A vehicle that is not parked closes `speed * dt` metres.
//! 3. At or past the line (`distance <= 0`) it crosses if the light permits;
//!    under RED it is put back at the stop offset and parked.
//! 4. A parked vehicle accrues `dt` seconds of waiting.
//!
//! The rule only reads the intersection and only writes the one vehicle it
//! is given, so any number of vehicles can be advanced concurrently.

use std::ops::RangeInclusive;

use xing_core::VehicleRng;
use xing_signal::Intersection;

use crate::Vehicle;

/// Result of running steps 1–4 on an approaching vehicle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Approach {
    /// Reached the line while the light permits passage.
    Crossing,
    /// Still short of the line (moving or parked).
    Short,
}

fn approach(vehicle: &mut Vehicle, intersection: &Intersection, dt: f64) -> Approach {
    let may_pass = intersection.light(vehicle.lane).permits_passage();

    if vehicle.stopped && may_pass {
        vehicle.stopped = false;
    }

    if !vehicle.stopped {
        vehicle.distance_m -= vehicle.speed_mps * dt;
    }

    if vehicle.distance_m <= 0.0 {
        if may_pass {
            return Approach::Crossing;
        }
        vehicle.distance_m = intersection.stop_offset_m();
        vehicle.stopped = true;
    }

    if vehicle.stopped {
        vehicle.waited_secs += dt;
    }
    Approach::Short
}

/// Advance one vehicle by `dt` in a one-shot run.
///
/// Returns `true` if the vehicle crossed during this call.  A crossing is
/// final: the vehicle is marked finished with its distance pinned to 0, and
/// every later call is a no-op returning `false`.
pub fn advance(vehicle: &mut Vehicle, intersection: &Intersection, dt: f64) -> bool {
    if vehicle.finished {
        return false;
    }
    match approach(vehicle, intersection, dt) {
        Approach::Crossing => {
            vehicle.distance_m = 0.0;
            vehicle.crossings = 1;
            vehicle.finished = true;
            true
        }
        Approach::Short => false,
    }
}

/// Advance one vehicle by `dt` in a continuous-flow run.
///
/// Like [`advance`], but a crossing puts the vehicle back on its lane at a
/// fresh distance drawn from `respawn_distance_m` using the vehicle's own
/// RNG.  Lane, speed and accumulated waiting time are kept; the vehicle never
/// finishes.
pub fn advance_respawning(
    vehicle:            &mut Vehicle,
    intersection:       &Intersection,
    dt:                 f64,
    respawn_distance_m: &RangeInclusive<f64>,
    rng:                &mut VehicleRng,
) -> bool {
    if vehicle.finished {
        return false;
    }
    match approach(vehicle, intersection, dt) {
        Approach::Crossing => {
            vehicle.crossings += 1;
            vehicle.distance_m = rng.uniform(respawn_distance_m);
            true
        }
        Approach::Short => false,
    }
}
