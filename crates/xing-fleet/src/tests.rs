//! Unit tests for xing-fleet.

use xing_core::{LaneId, PhaseDurations, VehicleId, VehicleRng};
use xing_signal::{Intersection, LightPhase};

use crate::{Fleet, FleetBuilder, Vehicle, motion};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Four lanes with 12 / 3 / 15 s timings and a 2 m stop offset.
/// Lanes 0 and 2 start GREEN, lanes 1 and 3 start RED.
fn four_way() -> Intersection {
    Intersection::new(2.0, vec![PhaseDurations::default(); 4]).unwrap()
}

fn vehicle(lane: u16, distance: f64, speed: f64) -> Vehicle {
    Vehicle::new(VehicleId(0), LaneId(lane), distance, speed)
}

/// One tick in the engine's order: lights first, then the vehicle.
fn tick(x: &mut Intersection, v: &mut Vehicle) -> bool {
    x.advance_all(1.0);
    motion::advance(v, x, 1.0)
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn round_robin_lanes_and_ranges() {
        let (fleet, rngs) = FleetBuilder::new(10, 3).build();
        assert_eq!(fleet.len(), 10);
        assert_eq!(rngs.len(), 10);
        assert_eq!(fleet.crossed_now.len(), 10);
        for (i, v) in fleet.vehicles.iter().enumerate() {
            assert_eq!(v.id, VehicleId(i as u32));
            assert_eq!(v.lane, LaneId((i % 4) as u16));
            assert!((20.0..=200.0).contains(&v.distance_m));
            assert!((6.0..=14.0).contains(&v.speed_mps));
            assert!(!v.stopped && !v.finished);
            assert_eq!(v.waited_secs, 0.0);
        }
    }

    #[test]
    fn same_seed_same_fleet() {
        let (a, _) = FleetBuilder::new(50, 99).build();
        let (b, _) = FleetBuilder::new(50, 99).build();
        assert_eq!(a, b);
        let (c, _) = FleetBuilder::new(50, 100).build();
        assert_ne!(a, c);
    }

    #[test]
    fn growing_the_fleet_keeps_existing_vehicles() {
        let (small, _) = FleetBuilder::new(5, 1).build();
        let (large, _) = FleetBuilder::new(8, 1).build();
        assert_eq!(small.vehicles[..], large.vehicles[..5]);
    }

    #[test]
    fn custom_lanes() {
        let (fleet, _) = FleetBuilder::new(6, 0).lanes(2).build();
        assert_eq!(fleet.max_lane_index(), Some(1));
    }
}

// ── Fleet aggregates ──────────────────────────────────────────────────────────

#[cfg(test)]
mod store {
    use super::*;

    #[test]
    fn aggregates() {
        let mut a = Vehicle::new(VehicleId(0), LaneId(0), 10.0, 5.0);
        let mut b = Vehicle::new(VehicleId(1), LaneId(1), 10.0, 5.0);
        a.waited_secs = 4.0;
        a.finished = true;
        a.crossings = 1;
        b.waited_secs = 2.0;
        let mut fleet = Fleet::from_vehicles(vec![a, b]);
        fleet.crossed_now[0] = true;

        assert_eq!(fleet.finished_count(), 1);
        assert_eq!(fleet.active_count(), 1);
        assert_eq!(fleet.total_crossings(), 1);
        assert_eq!(fleet.average_wait_secs(), 3.0);
        assert_eq!(fleet.crossed_this_tick().collect::<Vec<_>>(), vec![VehicleId(0)]);
        assert_eq!(fleet.get(VehicleId(1)).lane, LaneId(1));
    }

    #[test]
    fn empty_fleet_average_is_zero() {
        let fleet = Fleet::from_vehicles(vec![]);
        assert!(fleet.is_empty());
        assert_eq!(fleet.average_wait_secs(), 0.0);
        assert_eq!(fleet.max_lane_index(), None);
    }
}

// ── Motion model ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod one_shot {
    use super::*;

    #[test]
    fn crosses_on_green_in_one_tick() {
        let mut x = four_way();
        let mut v = vehicle(0, 5.0, 5.0);
        assert!(tick(&mut x, &mut v));
        assert!(v.finished);
        assert_eq!(v.crossings, 1);
        assert_eq!(v.distance_m, 0.0);
        assert_eq!(v.waited_secs, 0.0);
    }

    #[test]
    fn moves_linearly_while_short_of_line() {
        let x = four_way();
        let mut v = vehicle(0, 50.0, 8.0);
        assert!(!motion::advance(&mut v, &x, 1.0));
        assert_eq!(v.distance_m, 42.0);
        assert!(!motion::advance(&mut v, &x, 0.5));
        assert_eq!(v.distance_m, 38.0);
    }

    #[test]
    fn red_parks_at_stop_offset_then_crosses_on_green() {
        let mut x = four_way();
        let mut v = vehicle(1, 3.0, 3.0);

        assert!(!tick(&mut x, &mut v));
        assert!(v.stopped);
        assert_eq!(v.distance_m, 2.0);
        assert_eq!(v.waited_secs, 1.0);

        // Lane 1 stays RED through tick 14.
        for t in 2..15 {
            assert!(!tick(&mut x, &mut v), "tick {t}");
            assert!(v.stopped);
            assert_eq!(v.distance_m, 2.0);
        }
        assert_eq!(v.waited_secs, 14.0);

        // Tick 15: light turns GREEN, vehicle is released and crosses.
        assert!(tick(&mut x, &mut v));
        assert_eq!(x.light(LaneId(1)).phase, LightPhase::Green);
        assert!(v.finished && !v.stopped);
        assert_eq!(v.waited_secs, 14.0);
    }

    #[test]
    fn released_vehicle_may_need_several_ticks() {
        let mut x = Intersection::new(5.0, vec![PhaseDurations::new(30.0, 3.0, 2.0); 2]).unwrap();
        let mut v = vehicle(1, 1.0, 1.0);
        assert!(!tick(&mut x, &mut v)); // red: parked at 5 m
        assert_eq!(v.distance_m, 5.0);
        assert!(!tick(&mut x, &mut v)); // turns green: released, 5 → 4
        assert!(!v.stopped);
        assert_eq!(v.distance_m, 4.0);
        assert_eq!(v.waited_secs, 1.0);
    }

    #[test]
    fn yellow_permits_crossing() {
        let mut x = Intersection::new(2.0, vec![PhaseDurations::new(1.0, 5.0, 5.0)]).unwrap();
        x.advance_all(1.0);
        assert_eq!(x.light(LaneId(0)).phase, LightPhase::Yellow);
        let mut v = vehicle(0, 1.0, 2.0);
        assert!(motion::advance(&mut v, &x, 1.0));
    }

    #[test]
    fn starting_past_the_line_is_handled_on_first_tick() {
        let x = four_way();
        let mut green = vehicle(0, -3.0, 5.0);
        assert!(motion::advance(&mut green, &x, 1.0));

        let mut red = vehicle(1, 0.0, 5.0);
        assert!(!motion::advance(&mut red, &x, 1.0));
        assert!(red.stopped);
        assert_eq!(red.distance_m, 2.0);
    }

    #[test]
    fn finished_vehicle_is_frozen() {
        let mut x = four_way();
        let mut v = vehicle(0, 5.0, 5.0);
        assert!(tick(&mut x, &mut v));
        let frozen = v.clone();
        for _ in 0..100 {
            assert!(!tick(&mut x, &mut v));
            assert_eq!(v, frozen);
        }
    }

    #[test]
    fn waiting_never_decreases_and_short_vehicles_stay_positive() {
        let mut x = four_way();
        let (mut fleet, _) = FleetBuilder::new(40, 5).spawn_distance(1.0..=60.0).build();
        let mut last_wait = vec![0.0; fleet.len()];
        for _ in 0..120 {
            x.advance_all(1.0);
            for (v, last) in fleet.vehicles.iter_mut().zip(last_wait.iter_mut()) {
                let crossed = motion::advance(v, &x, 1.0);
                assert!(v.waited_secs >= *last);
                *last = v.waited_secs;
                if !v.finished && !crossed {
                    assert!(v.distance_m > 0.0);
                }
                assert!(v.crossings <= 1);
            }
        }
    }
}

#[cfg(test)]
mod respawn {
    use super::*;

    #[test]
    fn crossing_respawns_in_range_and_keeps_going() {
        let x = four_way();
        let mut rng = VehicleRng::new(1, VehicleId(0));
        let mut v = vehicle(0, 5.0, 5.0);
        v.waited_secs = 3.0;

        assert!(motion::advance_respawning(&mut v, &x, 1.0, &(60.0..=200.0), &mut rng));
        assert!(!v.finished);
        assert_eq!(v.crossings, 1);
        assert!((60.0..=200.0).contains(&v.distance_m));
        assert_eq!(v.speed_mps, 5.0);
        assert_eq!(v.waited_secs, 3.0);
    }

    #[test]
    fn crossings_accumulate() {
        let x = four_way();
        let mut rng = VehicleRng::new(1, VehicleId(0));
        let mut v = vehicle(0, 1.0, 10.0);
        let mut crossed = 0;
        for _ in 0..10 {
            if motion::advance_respawning(&mut v, &x, 1.0, &(5.0..=10.0), &mut rng) {
                crossed += 1;
            }
        }
        assert!(crossed >= 5);
        assert_eq!(v.crossings, crossed);
    }

    #[test]
    fn red_still_parks() {
        let x = four_way();
        let mut rng = VehicleRng::new(1, VehicleId(0));
        let mut v = vehicle(1, 1.0, 5.0);
        assert!(!motion::advance_respawning(&mut v, &x, 1.0, &(60.0..=200.0), &mut rng));
        assert!(v.stopped);
        assert_eq!(v.distance_m, 2.0);
    }
}
