//! The `Sim` struct and its tick loop.

use std::time::{Duration, Instant};

use xing_core::{CrossingMode, RunBudget, SimClock, SimConfig, VehicleRng};
use xing_fleet::{Fleet, Vehicle, VehicleRngs, motion};
use xing_signal::Intersection;

use crate::{RunStats, SimBuilder, SimObserver, SimResult, StopReason, Team, TickReport};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim` owns the intersection, the fleet and the run counters, and drives
/// the four-phase tick loop:
///
/// 1. **Light phase** (driver thread): advance every light by `dt`.
/// 2. **Reset phase** (team): clear every vehicle's crossed-this-tick marker.
/// 3. **Motion phase** (team): run the motion model on every vehicle against
///    its lane's freshly updated light; each chunk counts its own crossings
///    and the counts are summed.
/// 4. **Aggregation** (driver thread): add the tick's crossings to the
///    cumulative count, advance the clock, notify the observer.
///
/// Phases 2 and 3 return only after every chunk has finished, so the
/// single-writer aggregation and the next termination check never overlap
/// with worker activity.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub config: SimConfig,

    /// Tick counter and simulated time.
    pub clock: SimClock,

    pub intersection: Intersection,

    pub fleet: Fleet,

    /// Per-vehicle RNGs, separated for the split-borrow pattern.
    pub rngs: VehicleRngs,

    /// Cumulative crossings.  Written only by the aggregation step.
    pub crossed_total: u64,

    pub(crate) team: Team,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until the configured stop condition holds and return the final
    /// statistics.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> RunStats {
        observer.on_run_start(&self.intersection, &self.fleet);

        let started = Instant::now();
        let reason = loop {
            if let Some(reason) = self.stop_reason() {
                break reason;
            }
            self.step(observer);
        };
        let stats = self.stats(started.elapsed(), reason);

        if reason == StopReason::TickCeiling {
            log::warn!(
                "stopped at the {} tick ceiling with {}/{} vehicles crossed",
                stats.ticks,
                stats.vehicles_crossed,
                stats.vehicle_count,
            );
        }
        log::info!(
            "run finished after {} ticks ({}): {} crossings, avg wait {:.3}s, {:.6}s wall",
            stats.ticks,
            reason,
            stats.crossings_counted,
            stats.average_wait_secs,
            stats.wall_clock.as_secs_f64(),
        );

        observer.on_sim_end(&stats);
        stats
    }

    /// Run exactly `n` ticks, ignoring the stop condition.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step(observer);
        }
    }

    /// Why the run should stop now, or `None` to keep going.
    pub fn stop_reason(&self) -> Option<StopReason> {
        let tick = self.clock.current_tick.0;

        if self.config.is_one_shot()
            && self.config.budget == RunBudget::UntilAllCrossed
            && self.crossed_total >= self.fleet.len() as u64
        {
            return Some(StopReason::AllCrossed);
        }
        if let RunBudget::Ticks(budget) = self.config.budget {
            if tick >= budget {
                return Some(StopReason::Budget);
            }
        }
        match self.config.max_ticks {
            Some(max) if tick >= max => Some(StopReason::TickCeiling),
            _ => None,
        }
    }

    /// Execute one full tick and return its report.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> TickReport {
        let dt = self.clock.dt_secs;

        // ── Phase 1: lights (sequential) ──────────────────────────────────
        self.intersection.advance_all(dt);
        let lights_green = self.intersection.green_count();

        let team_size = self.team.retarget(self.active_vehicles(), lights_green);

        // ── Phases 2 + 3: reset markers, move vehicles ────────────────────
        let crossed = self.vehicle_phases(dt);

        // ── Phase 4: aggregation (single writer) ──────────────────────────
        self.crossed_total += crossed as u64;
        self.clock.advance();

        let report = TickReport {
            tick: self.clock.current_tick,
            crossed,
            crossed_total: self.crossed_total,
            team_size,
            lights_green,
        };
        log::debug!(
            "{}: crossed={} total={} team={} green={}",
            report.tick,
            crossed,
            self.crossed_total,
            team_size,
            lights_green,
        );

        observer.on_tick_end(&report);
        if report.tick.is_multiple_of(self.config.output_interval_ticks) {
            observer.on_snapshot(
                report.tick,
                self.clock.elapsed_secs(),
                &self.fleet,
                &self.intersection,
            );
        }
        report
    }

    /// Statistics for the current state.
    pub fn stats(&self, wall_clock: Duration, stop_reason: StopReason) -> RunStats {
        RunStats {
            vehicle_count:     self.fleet.len(),
            ticks:             self.clock.current_tick.0,
            vehicles_crossed:  self.fleet.vehicles.iter().filter(|v| v.crossings > 0).count(),
            crossings_counted: self.crossed_total,
            total_crossings:   self.fleet.total_crossings(),
            average_wait_secs: self.fleet.average_wait_secs(),
            simulated_secs:    self.clock.elapsed_secs(),
            wall_clock,
            stop_reason,
        }
    }

    /// The worker team (pool size and last active size).
    #[inline]
    pub fn team(&self) -> &Team {
        &self.team
    }

    // ── Core tick processing ──────────────────────────────────────────────

    /// Load for the sizing heuristic: vehicles that still need updating.
    fn active_vehicles(&self) -> usize {
        if self.config.is_one_shot() {
            // Every counted crossing finished exactly one vehicle.
            self.fleet.len().saturating_sub(self.crossed_total as usize)
        } else {
            self.fleet.len()
        }
    }

    /// Reset and motion phases over the whole fleet.  Returns the number of
    /// crossings this tick.
    fn vehicle_phases(&mut self, dt: f64) -> usize {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let intersection = &self.intersection;
        let crossing     = &self.config.crossing;
        let vehicles     = self.fleet.vehicles.as_mut_slice();
        let marks        = self.fleet.crossed_now.as_mut_slice();
        let rngs         = self.rngs.inner.as_mut_slice();

        #[cfg(feature = "parallel")]
        {
            if self.team.is_parallel() {
                use rayon::prelude::*;

                let chunk = self.team.chunk_len(vehicles.len());
                return self.team.install(|| {
                    marks.par_chunks_mut(chunk).for_each(|m| m.fill(false));

                    vehicles
                        .par_chunks_mut(chunk)
                        .zip(marks.par_chunks_mut(chunk))
                        .zip(rngs.par_chunks_mut(chunk))
                        .map(|((vs, ms), rs)| move_chunk(vs, ms, rs, intersection, dt, crossing))
                        .sum::<usize>()
                });
            }
        }

        marks.fill(false);
        move_chunk(vehicles, marks, rngs, intersection, dt, crossing)
    }
}

/// Run the motion model over one contiguous chunk of the fleet.
///
/// The three slices are aligned: element `i` of each belongs to the same
/// vehicle.
fn move_chunk(
    vehicles:     &mut [Vehicle],
    marks:        &mut [bool],
    rngs:         &mut [VehicleRng],
    intersection: &Intersection,
    dt:           f64,
    crossing:     &CrossingMode,
) -> usize {
    let mut crossed = 0;
    for ((vehicle, mark), rng) in vehicles.iter_mut().zip(marks.iter_mut()).zip(rngs.iter_mut()) {
        let did_cross = match crossing {
            CrossingMode::OneShot => motion::advance(vehicle, intersection, dt),
            CrossingMode::Respawn { distance_m } => {
                motion::advance_respawning(vehicle, intersection, dt, distance_m, rng)
            }
        };
        if did_cross {
            *mark = true;
            crossed += 1;
        }
    }
    crossed
}

/// Build a simulation from `config` and run it to completion.
pub fn run_simulation<O: SimObserver>(config: SimConfig, observer: &mut O) -> SimResult<RunStats> {
    let mut sim = SimBuilder::new(config).build()?;
    Ok(sim.run(observer))
}
