//! intersection: command-line driver for the xing simulator.
//!
//! Simulates a four-way signalised intersection: every vehicle approaches the
//! stop line of its lane, parks under RED and crosses under GREEN or YELLOW.
//! Prints the starting configuration, a snapshot every `print_every` ticks
//! and the final statistics.
//!
//! ```text
//! intersection [VEHICLES] [PRINT_EVERY] [SEED] [--threads N] [--team K]
//!              [--respawn] [--ticks N] [--max-ticks N] [--random-signals] [--json]
//! ```
//!
//! Set `RUST_LOG=debug` to see the per-tick team size.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use xing_core::{CrossingMode, RunBudget, SignalTiming, SimConfig, TeamPolicy, Tick};
use xing_fleet::Fleet;
use xing_signal::{Intersection, LightPhase};
use xing_sim::{RunStats, SimBuilder, SimObserver};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "intersection")]
#[command(about = "Traffic simulation of a signalised four-way intersection")]
struct Cli {
    /// Number of vehicles
    #[arg(default_value_t = 200)]
    vehicles: usize,

    /// Print a snapshot every N ticks (0 disables snapshots)
    #[arg(default_value_t = 5)]
    print_every: u64,

    /// RNG seed; defaults to the current Unix time
    seed: Option<u64>,

    /// Worker pool size (defaults to all logical cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Use a fixed team size instead of resizing every tick
    #[arg(long)]
    team: Option<usize>,

    /// Put crossed vehicles back 60-200 m out instead of retiring them
    #[arg(long)]
    respawn: bool,

    /// Run exactly this many ticks
    #[arg(long)]
    ticks: Option<u64>,

    /// Stop after this many ticks even if vehicles are still waiting
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Draw short per-light cycles (5-9 s green, 2-4 s yellow, 5-9 s red)
    #[arg(long)]
    random_signals: bool,

    /// Print the final statistics as JSON instead of text
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn into_config(self) -> SimConfig {
        let seed = self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });

        SimConfig {
            vehicle_count:         self.vehicles,
            seed,
            num_threads:           self.threads,
            team:                  self.team.map_or(TeamPolicy::Adaptive, TeamPolicy::Fixed),
            output_interval_ticks: self.print_every,
            signals:               if self.random_signals {
                SignalTiming::randomized_short()
            } else {
                SignalTiming::default()
            },
            crossing:              if self.respawn {
                CrossingMode::Respawn { distance_m: 60.0..=200.0 }
            } else {
                CrossingMode::OneShot
            },
            budget:                self.ticks.map_or(RunBudget::UntilAllCrossed, RunBudget::Ticks),
            max_ticks:             self.max_ticks,
            ..SimConfig::default()
        }
    }
}

// ── Console observer ──────────────────────────────────────────────────────────

struct ConsoleObserver {
    /// Only the final JSON goes to stdout.
    quiet: bool,
}

impl ConsoleObserver {
    fn phase_counts(intersection: &Intersection) -> (usize, usize, usize) {
        intersection.lights().iter().fold((0, 0, 0), |(g, y, r), l| match l.phase {
            LightPhase::Green  => (g + 1, y, r),
            LightPhase::Yellow => (g, y + 1, r),
            LightPhase::Red    => (g, y, r + 1),
        })
    }
}

impl SimObserver for ConsoleObserver {
    fn on_run_start(&mut self, intersection: &Intersection, fleet: &Fleet) {
        if self.quiet {
            return;
        }
        println!("Configuration:");
        for v in &fleet.vehicles {
            println!(
                "  vehicle {} - lane {}, speed {:.2} m/s, start {:.2} m",
                v.id.0, v.lane.0, v.speed_mps, v.distance_m
            );
        }
        for light in intersection.lights() {
            let d = &light.durations;
            println!(
                "  light {} - starts {}, green {:.1}s yellow {:.1}s red {:.1}s (cycle {:.1}s)",
                light.id.0,
                light.phase,
                d.green_secs,
                d.yellow_secs,
                d.red_secs,
                d.cycle_secs()
            );
        }
        println!();
    }

    fn on_snapshot(&mut self, tick: Tick, sim_secs: f64, fleet: &Fleet, intersection: &Intersection) {
        if self.quiet {
            return;
        }
        let crossed = fleet.crossed_this_tick().count();
        let (g, y, r) = Self::phase_counts(intersection);
        let board: String = intersection.lights().iter().map(|l| l.phase.symbol()).collect();
        println!(
            "Tick {} (t={sim_secs:.1}s): {crossed} crossed | lights {board} (G:{g} Y:{y} R:{r})",
            tick.0
        );

        for (v, &now) in fleet.vehicles.iter().zip(&fleet.crossed_now) {
            let state = if now {
                "crossed this tick".to_string()
            } else if v.finished {
                "already crossed".to_string()
            } else if v.stopped {
                format!("{:.2} m (stopped)", v.distance_m)
            } else {
                format!("{:.2} m", v.distance_m)
            };
            println!("  vehicle {} - lane {}: {state}", v.id.0, v.lane.0);
        }
        for light in intersection.lights() {
            println!(
                "  light {} - {} for {:.1}s",
                light.id.0, light.phase, light.time_in_phase
            );
        }
        println!();
    }

    fn on_sim_end(&mut self, stats: &RunStats) {
        if self.quiet {
            return;
        }
        println!("--- Summary ---");
        println!("Vehicles: {}, ticks run: {}", stats.vehicle_count, stats.ticks);
        println!("Stopped because: {}", stats.stop_reason);
        println!("Vehicles crossed: {}/{}", stats.vehicles_crossed, stats.vehicle_count);
        println!("Crossings counted per tick: {}", stats.crossings_counted);
        println!("Crossings summed per vehicle: {}", stats.total_crossings);
        println!("Average wait per vehicle: {:.3} s", stats.average_wait_secs);
        println!("Simulated time: {:.1} s", stats.simulated_secs);
        println!("Wall clock: {:.6} s", stats.wall_clock.as_secs_f64());
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let json = cli.json;
    let config = cli.into_config();
    log::info!("seed {}", config.seed);

    let mut sim = SimBuilder::new(config)
        .build()
        .context("invalid simulation setup")?;
    if !json {
        println!("Worker pool: {} threads", sim.team().max_workers());
    }

    let stats = sim.run(&mut ConsoleObserver { quiet: json });

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    }
    Ok(())
}
