//! Fluent builder for constructing a [`Sim`].

use xing_core::{SimClock, SimConfig, SimRng};
use xing_fleet::{Fleet, FleetBuilder, Vehicle, VehicleRngs};
use xing_signal::Intersection;

use crate::{Sim, SimError, SimResult, Team};

/// Fluent builder for [`Sim`].
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                                       |
/// |------------------------|-----------------------------------------------|
/// | `.fleet(f, rngs)`      | seeded random fleet from [`FleetBuilder`]     |
/// | `.intersection(x)`     | `Intersection::from_config` with `config.seed`|
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config).build()?;
/// let stats = sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder {
    config:       SimConfig,
    fleet:        Option<(Fleet, VehicleRngs)>,
    intersection: Option<Intersection>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            fleet:        None,
            intersection: None,
        }
    }

    /// Supply hand-built vehicles instead of a random population.
    ///
    /// Both must have `config.vehicle_count` entries, and every vehicle must
    /// be fresh: finite distance, finite positive speed, not stopped, no
    /// waiting time, no crossings, not finished.
    pub fn fleet(mut self, fleet: Fleet, rngs: VehicleRngs) -> Self {
        self.fleet = Some((fleet, rngs));
        self
    }

    /// Supply a hand-built intersection instead of one derived from
    /// `config.signals`.
    ///
    /// Its lights and stop offset replace `config.signals` and
    /// `config.stop_offset_m`.  Its lane count must equal `config.lane_count`.
    pub fn intersection(mut self, intersection: Intersection) -> Self {
        self.intersection = Some(intersection);
        self
    }

    /// Validate inputs, start the worker pool, and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        let vehicle_count = self.config.vehicle_count;

        // ── Intersection ──────────────────────────────────────────────────
        let intersection = match self.intersection {
            Some(x) => {
                if x.lane_count() != self.config.lane_count {
                    return Err(SimError::LaneCountMismatch {
                        config:       self.config.lane_count,
                        intersection: x.lane_count(),
                    });
                }
                x
            }
            None => Intersection::from_config(&self.config, &mut SimRng::new(self.config.seed))?,
        };

        // ── Fleet ─────────────────────────────────────────────────────────
        let (fleet, rngs) = match self.fleet {
            Some((fleet, rngs)) => {
                if fleet.len() != vehicle_count {
                    return Err(SimError::VehicleCountMismatch {
                        expected: vehicle_count,
                        got:      fleet.len(),
                        what:     "fleet",
                    });
                }
                if rngs.len() != vehicle_count {
                    return Err(SimError::VehicleCountMismatch {
                        expected: vehicle_count,
                        got:      rngs.len(),
                        what:     "vehicle RNGs",
                    });
                }
                (fleet, rngs)
            }
            None => FleetBuilder::from_config(&self.config).build(),
        };

        let lanes = intersection.lane_count();
        for v in &fleet.vehicles {
            if v.lane.index() >= lanes {
                return Err(SimError::LaneOutOfRange { vehicle: v.id, lane: v.lane, lanes });
            }
            if let Some(reason) = unfit_reason(v) {
                return Err(SimError::InvalidVehicle { vehicle: v.id, reason });
            }
        }

        // ── Worker team ───────────────────────────────────────────────────
        let team = Team::new(self.config.team, self.config.num_threads)?;

        log::info!(
            "simulation ready: {} vehicles, {} lanes, dt={}s, seed={}, pool of {} workers",
            vehicle_count,
            lanes,
            self.config.dt_secs,
            self.config.seed,
            team.max_workers(),
        );

        Ok(Sim {
            clock: SimClock::new(self.config.dt_secs),
            config: self.config,
            intersection,
            fleet,
            rngs,
            crossed_total: 0,
            team,
        })
    }
}

/// Why `vehicle` cannot start a run, or `None` if it is a fresh approaching
/// vehicle.
fn unfit_reason(vehicle: &Vehicle) -> Option<&'static str> {
    if !vehicle.distance_m.is_finite() {
        Some("distance must be finite")
    } else if !(vehicle.speed_mps.is_finite() && vehicle.speed_mps > 0.0) {
        Some("speed must be finite and positive")
    } else if vehicle.finished {
        Some("already finished")
    } else if vehicle.crossings != 0 {
        Some("already has crossings")
    } else if vehicle.stopped {
        Some("already stopped")
    } else if vehicle.waited_secs != 0.0 {
        Some("already has waiting time")
    } else {
        None
    }
}
