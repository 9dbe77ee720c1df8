//! Unit tests for xing-signal.

use xing_core::{LaneId, PhaseDurations};

use crate::{Intersection, LightPhase, TrafficLight};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn light(phase: LightPhase) -> TrafficLight {
    TrafficLight::new(LaneId(0), phase, PhaseDurations::new(12.0, 3.0, 15.0))
}

fn four_way() -> Intersection {
    Intersection::new(2.0, vec![PhaseDurations::default(); 4]).unwrap()
}

// ── LightPhase ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod phase {
    use super::*;

    #[test]
    fn cycle_order() {
        assert_eq!(LightPhase::Green.next(), LightPhase::Yellow);
        assert_eq!(LightPhase::Yellow.next(), LightPhase::Red);
        assert_eq!(LightPhase::Red.next(), LightPhase::Green);
    }

    #[test]
    fn passage() {
        assert!(LightPhase::Green.permits_passage());
        assert!(LightPhase::Yellow.permits_passage());
        assert!(!LightPhase::Red.permits_passage());
    }

    #[test]
    fn symbols_and_display() {
        assert_eq!(LightPhase::Red.symbol(), 'R');
        assert_eq!(LightPhase::Yellow.to_string(), "yellow");
    }
}

// ── TrafficLight ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod traffic_light {
    use super::*;

    #[test]
    fn accumulates_below_threshold() {
        let mut l = light(LightPhase::Green);
        for _ in 0..11 {
            assert!(!l.advance(1.0));
        }
        assert_eq!(l.phase, LightPhase::Green);
        assert_eq!(l.time_in_phase, 11.0);
    }

    #[test]
    fn switches_on_reaching_threshold() {
        let mut l = light(LightPhase::Green);
        for _ in 0..11 {
            l.advance(1.0);
        }
        assert!(l.advance(1.0));
        assert_eq!(l.phase, LightPhase::Yellow);
        assert_eq!(l.time_in_phase, 0.0);
    }

    #[test]
    fn red_turns_green_on_fifteenth_tick() {
        let mut l = light(LightPhase::Red);
        for tick in 1..=15 {
            l.advance(1.0);
            if tick < 15 {
                assert_eq!(l.phase, LightPhase::Red, "tick {tick}");
            }
        }
        assert_eq!(l.phase, LightPhase::Green);
    }

    #[test]
    fn overshoot_is_discarded() {
        let mut l = TrafficLight::new(LaneId(0), LightPhase::Green, PhaseDurations::new(2.5, 1.0, 1.0));
        l.advance(2.0);
        l.advance(2.0); // 4.0 >= 2.5 → yellow, remainder 1.5 dropped
        assert_eq!(l.phase, LightPhase::Yellow);
        assert_eq!(l.time_in_phase, 0.0);
        l.advance(0.5);
        assert_eq!(l.phase, LightPhase::Yellow);
    }

    #[test]
    fn one_transition_per_step_even_with_huge_dt() {
        let mut l = light(LightPhase::Green);
        l.advance(1_000.0);
        assert_eq!(l.phase, LightPhase::Yellow);
    }

    #[test]
    fn elapsed_stays_below_duration_after_every_step() {
        let mut l = light(LightPhase::Green);
        for _ in 0..500 {
            l.advance(1.0);
            assert!(l.time_in_phase < l.duration_of(l.phase));
        }
    }

    #[test]
    fn time_between_entries_matches_duration() {
        // Count ticks spent in each phase between consecutive entries.
        let mut l = light(LightPhase::Green);
        let mut runs: Vec<(LightPhase, u32)> = vec![(LightPhase::Green, 0)];
        for _ in 0..300 {
            let before = l.phase;
            l.advance(1.0);
            let last = runs.last_mut().unwrap();
            last.1 += 1;
            if l.phase != before {
                runs.push((l.phase, 0));
            }
        }
        // Drop the trailing, incomplete run.
        runs.pop();
        for (phase, ticks) in runs {
            let expected = l.duration_of(phase);
            assert!(
                (ticks as f64 - expected).abs() <= 1.0,
                "{phase}: {ticks} ticks vs {expected}s"
            );
        }
    }
}

// ── Intersection ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod intersection {
    use super::*;
    use crate::SignalError;
    use xing_core::{SignalTiming, SimConfig, SimRng};

    #[test]
    fn alternating_initial_phases() {
        let x = four_way();
        let phases: Vec<_> = x.lights().iter().map(|l| l.phase).collect();
        assert_eq!(
            phases,
            vec![LightPhase::Green, LightPhase::Red, LightPhase::Green, LightPhase::Red]
        );
        assert_eq!(x.green_count(), 2);
        assert_eq!(x.light(LaneId(3)).id, LaneId(3));
    }

    #[test]
    fn rejects_empty_lane_set() {
        assert_eq!(Intersection::new(2.0, vec![]), Err(SignalError::NoLanes));
    }

    #[test]
    fn rejects_bad_stop_offset() {
        let r = Intersection::new(0.0, vec![PhaseDurations::default()]);
        assert_eq!(r, Err(SignalError::InvalidStopOffset(0.0)));
        let r = Intersection::new(-1.5, vec![PhaseDurations::default()]);
        assert_eq!(r, Err(SignalError::InvalidStopOffset(-1.5)));
        let r = Intersection::new(f64::NAN, vec![PhaseDurations::default()]);
        assert!(matches!(r, Err(SignalError::InvalidStopOffset(_))));
    }

    #[test]
    fn rejects_zero_red() {
        let r = Intersection::new(
            2.0,
            vec![PhaseDurations::default(), PhaseDurations::new(12.0, 3.0, 0.0)],
        );
        assert!(matches!(r, Err(SignalError::InvalidTiming { lane: LaneId(1), .. })));
    }

    #[test]
    fn advance_all_counts_changes() {
        let mut x = Intersection::new(
            2.0,
            vec![PhaseDurations::new(1.0, 1.0, 1.0), PhaseDurations::new(5.0, 5.0, 5.0)],
        )
        .unwrap();
        assert_eq!(x.advance_all(1.0), 1);
        assert_eq!(x.light(LaneId(0)).phase, LightPhase::Yellow);
        assert_eq!(x.light(LaneId(1)).phase, LightPhase::Red);
        assert_eq!(x.phases()[1], (LightPhase::Red, 1.0));
    }

    #[test]
    fn from_config_fixed() {
        let cfg = SimConfig { lane_count: 3, ..SimConfig::default() };
        let x = Intersection::from_config(&cfg, &mut SimRng::new(1)).unwrap();
        assert_eq!(x.lane_count(), 3);
        assert!(x.lights().iter().all(|l| l.durations == PhaseDurations::default()));
        assert_eq!(x.stop_offset_m(), 2.0);
    }

    #[test]
    fn from_config_randomized_is_seeded() {
        let cfg = SimConfig { signals: SignalTiming::randomized_short(), ..SimConfig::default() };
        let a = Intersection::from_config(&cfg, &mut SimRng::new(7)).unwrap();
        let b = Intersection::from_config(&cfg, &mut SimRng::new(7)).unwrap();
        assert_eq!(a, b);
        for l in a.lights() {
            assert!((5.0..=9.0).contains(&l.durations.green_secs));
            assert!((2.0..=4.0).contains(&l.durations.yellow_secs));
            assert!((5.0..=9.0).contains(&l.durations.red_secs));
        }
    }
}
