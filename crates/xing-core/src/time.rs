//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter of
//! completed steps.  The mapping to simulated seconds is held in `SimClock`:
//!
//!   sim_time = tick * dt_secs
//!
//! Simulated time is always derived by multiplication from the integer tick,
//! so a long run never accumulates floating-point drift from repeatedly
//! adding `dt`.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// A count of completed simulation ticks.
///
/// `Tick(0)` is the state before the first step; after the first step the
/// clock reads `Tick(1)`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// `true` when this tick lands on a multiple of `interval`.
    ///
    /// An interval of 0 never matches, which is how "never" is spelled for
    /// snapshot output.
    #[inline]
    pub fn is_multiple_of(self, interval: u64) -> bool {
        interval > 0 && self.0 % interval == 0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tick counter plus the fixed step length `dt`.
///
/// Owned by the simulation driver and only advanced from the single-writer
/// aggregation step.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Simulated seconds per tick.  Constant for the whole run.
    pub dt_secs: f64,
    /// Number of ticks completed so far.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(dt_secs: f64) -> Self {
        Self {
            dt_secs,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.dt_secs
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (t={:.1}s)", self.current_tick, self.elapsed_secs())
    }
}
