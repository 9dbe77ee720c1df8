//! Run configuration.
//!
//! `SimConfig` is a plain struct: the application fills it in (the demo maps
//! CLI arguments onto it) and [`SimConfig::validate`] rejects anything that
//! could make a run ill-defined before the first tick.

use std::ops::RangeInclusive;

use crate::{XingError, XingResult};

// ── Signal timing ─────────────────────────────────────────────────────────────

/// Green / yellow / red durations of one traffic light, in simulated seconds.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseDurations {
    pub green_secs:  f64,
    pub yellow_secs: f64,
    pub red_secs:    f64,
}

impl PhaseDurations {
    pub const fn new(green_secs: f64, yellow_secs: f64, red_secs: f64) -> Self {
        Self { green_secs, yellow_secs, red_secs }
    }

    /// Length of one full green → yellow → red cycle.
    #[inline]
    pub fn cycle_secs(&self) -> f64 {
        self.green_secs + self.yellow_secs + self.red_secs
    }

    /// All three durations must be finite and strictly positive, otherwise a
    /// light can stay red forever and a one-shot run never terminates.
    pub fn validate(&self) -> XingResult<()> {
        for (name, secs) in [
            ("green", self.green_secs),
            ("yellow", self.yellow_secs),
            ("red", self.red_secs),
        ] {
            if !(secs.is_finite() && secs > 0.0) {
                return Err(XingError::Config(format!(
                    "{name} duration must be a positive number of seconds, got {secs}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for PhaseDurations {
    /// 12 s green, 3 s yellow, 15 s red.
    fn default() -> Self {
        Self::new(12.0, 3.0, 15.0)
    }
}

/// How light durations are chosen at intersection setup.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignalTiming {
    /// Every light gets the same durations.
    Fixed(PhaseDurations),
    /// Each light draws its own durations from these ranges.
    Randomized {
        green_secs:  RangeInclusive<f64>,
        yellow_secs: RangeInclusive<f64>,
        red_secs:    RangeInclusive<f64>,
    },
}

impl SignalTiming {
    /// Short, frequently changing cycles: 5–9 s green, 2–4 s yellow, 5–9 s red.
    pub fn randomized_short() -> Self {
        SignalTiming::Randomized {
            green_secs:  5.0..=9.0,
            yellow_secs: 2.0..=4.0,
            red_secs:    5.0..=9.0,
        }
    }
}

impl Default for SignalTiming {
    fn default() -> Self {
        SignalTiming::Fixed(PhaseDurations::default())
    }
}

// ── Run modes ─────────────────────────────────────────────────────────────────

/// What happens to a vehicle once it crosses the stop line.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrossingMode {
    /// The vehicle is done for the rest of the run.
    #[default]
    OneShot,
    /// The vehicle reappears at a fresh distance drawn from `distance_m` and
    /// keeps approaching, simulating continuous flow.
    Respawn { distance_m: RangeInclusive<f64> },
}

/// When the run stops.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunBudget {
    /// Stop once the cumulative crossed count reaches the vehicle count.
    #[default]
    UntilAllCrossed,
    /// Run exactly this many ticks regardless of crossings.
    Ticks(u64),
}

/// How many workers take part in each tick's parallel phases.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TeamPolicy {
    /// Resize every tick from the current load.
    #[default]
    Adaptive,
    /// Always use this many workers (clamped to the pool size).
    Fixed(usize),
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Number of vehicles created at start.
    pub vehicle_count: usize,

    /// Number of approaches; one light per lane.  Default 4 (N, E, S, W).
    pub lane_count: usize,

    /// Simulated seconds per tick.
    pub dt_secs: f64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Size of the persistent worker pool.  `None` uses all logical cores.
    pub num_threads: Option<usize>,

    /// How the active team is sized each tick.
    pub team: TeamPolicy,

    /// Emit a snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,

    /// Distance before the line at which a vehicle blocked by red parks.
    pub stop_offset_m: f64,

    /// Initial distance-to-line range.
    pub spawn_distance_m: RangeInclusive<f64>,

    /// Constant per-vehicle speed range.
    pub speed_mps: RangeInclusive<f64>,

    pub signals: SignalTiming,

    pub crossing: CrossingMode,

    pub budget: RunBudget,

    /// Hard tick ceiling applied on top of `budget`.
    pub max_ticks: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            vehicle_count:         200,
            lane_count:            4,
            dt_secs:               1.0,
            seed:                  0,
            num_threads:           None,
            team:                  TeamPolicy::Adaptive,
            output_interval_ticks: 5,
            stop_offset_m:         2.0,
            spawn_distance_m:      20.0..=200.0,
            speed_mps:             6.0..=14.0,
            signals:               SignalTiming::default(),
            crossing:              CrossingMode::OneShot,
            budget:                RunBudget::UntilAllCrossed,
            max_ticks:             None,
        }
    }
}

impl SimConfig {
    /// Reject configurations that are meaningless or could never terminate.
    pub fn validate(&self) -> XingResult<()> {
        if self.vehicle_count == 0 {
            return config_err("vehicle_count must be at least 1");
        }
        if self.vehicle_count > u32::MAX as usize {
            return config_err(format!(
                "vehicle_count {} exceeds {}",
                self.vehicle_count,
                u32::MAX
            ));
        }
        if self.lane_count == 0 {
            return config_err("lane_count must be at least 1");
        }
        if self.lane_count > u16::MAX as usize {
            return config_err(format!("lane_count {} exceeds {}", self.lane_count, u16::MAX));
        }
        if !(self.dt_secs.is_finite() && self.dt_secs > 0.0) {
            return config_err(format!("dt_secs must be positive, got {}", self.dt_secs));
        }
        if !(self.stop_offset_m.is_finite() && self.stop_offset_m > 0.0) {
            return config_err(format!(
                "stop_offset_m must be positive, got {}",
                self.stop_offset_m
            ));
        }
        if self.num_threads == Some(0) {
            return config_err("num_threads must be at least 1");
        }
        if self.team == TeamPolicy::Fixed(0) {
            return config_err("a fixed team needs at least 1 worker");
        }

        check_range("spawn_distance_m", &self.spawn_distance_m, false)?;
        check_range("speed_mps", &self.speed_mps, true)?;

        match &self.signals {
            SignalTiming::Fixed(d) => d.validate()?,
            SignalTiming::Randomized { green_secs, yellow_secs, red_secs } => {
                check_range("green_secs", green_secs, true)?;
                check_range("yellow_secs", yellow_secs, true)?;
                check_range("red_secs", red_secs, true)?;
            }
        }

        if let CrossingMode::Respawn { distance_m } = &self.crossing {
            check_range("respawn distance_m", distance_m, true)?;
            if self.budget == RunBudget::UntilAllCrossed && self.max_ticks.is_none() {
                return config_err(
                    "respawn mode never finishes on its own; set a tick budget or max_ticks",
                );
            }
        }
        Ok(())
    }

    /// `true` when vehicles disappear after their single crossing.
    #[inline]
    pub fn is_one_shot(&self) -> bool {
        matches!(self.crossing, CrossingMode::OneShot)
    }
}

fn config_err(msg: impl Into<String>) -> XingResult<()> {
    Err(XingError::Config(msg.into()))
}

/// Ranges must be finite and ordered; `positive` additionally demands a
/// strictly positive lower bound.
fn check_range(name: &str, range: &RangeInclusive<f64>, positive: bool) -> XingResult<()> {
    let (lo, hi) = (*range.start(), *range.end());
    if !(lo.is_finite() && hi.is_finite()) || lo > hi {
        return config_err(format!("{name} must be an ordered finite range, got {lo}..={hi}"));
    }
    if positive && lo <= 0.0 {
        return config_err(format!("{name} must be strictly positive, got {lo}..={hi}"));
    }
    Ok(())
}
