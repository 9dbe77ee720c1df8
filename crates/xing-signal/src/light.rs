//! Single traffic light: a cyclic green → yellow → red timer.

use std::fmt;

use xing_core::{LaneId, PhaseDurations};

// ── LightPhase ────────────────────────────────────────────────────────────────

/// The three signal phases.  There is no terminal phase; the cycle repeats
/// for the whole run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LightPhase {
    Red,
    Green,
    Yellow,
}

impl LightPhase {
    /// GREEN and YELLOW both let a vehicle at the line cross.
    #[inline]
    pub fn permits_passage(self) -> bool {
        matches!(self, LightPhase::Green | LightPhase::Yellow)
    }

    /// Successor in the cycle.
    #[inline]
    pub fn next(self) -> LightPhase {
        match self {
            LightPhase::Green  => LightPhase::Yellow,
            LightPhase::Yellow => LightPhase::Red,
            LightPhase::Red    => LightPhase::Green,
        }
    }

    /// One-letter code for compact console tables.
    pub fn symbol(self) -> char {
        match self {
            LightPhase::Green  => 'G',
            LightPhase::Yellow => 'Y',
            LightPhase::Red    => 'R',
        }
    }
}

impl fmt::Display for LightPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LightPhase::Green  => "green",
            LightPhase::Yellow => "yellow",
            LightPhase::Red    => "red",
        })
    }
}

// ── TrafficLight ──────────────────────────────────────────────────────────────

/// The light controlling one lane.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrafficLight {
    /// The lane this light controls (also its index in the intersection).
    pub id: LaneId,

    pub phase: LightPhase,

    /// Seconds accumulated in `phase`.  Always below the phase's duration
    /// right after [`advance`](Self::advance) returns.
    pub time_in_phase: f64,

    pub durations: PhaseDurations,
}

impl TrafficLight {
    /// A light at the start of `phase` with zero elapsed time.
    pub fn new(id: LaneId, phase: LightPhase, durations: PhaseDurations) -> Self {
        Self { id, phase, time_in_phase: 0.0, durations }
    }

    /// Configured duration of `phase` for this light.
    #[inline]
    pub fn duration_of(&self, phase: LightPhase) -> f64 {
        match phase {
            LightPhase::Green  => self.durations.green_secs,
            LightPhase::Yellow => self.durations.yellow_secs,
            LightPhase::Red    => self.durations.red_secs,
        }
    }

    /// Step the timer forward by `dt` seconds.
    ///
    /// The elapsed time is accumulated first and then compared against the
    /// current phase's duration.  On a switch the timer restarts at exactly 0:
    /// any overshoot past the threshold is dropped rather than carried into
    /// the next phase.  At most one transition happens per call.
    ///
    /// Returns `true` if the phase changed.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.time_in_phase += dt;
        if self.time_in_phase >= self.duration_of(self.phase) {
            self.phase = self.phase.next();
            self.time_in_phase = 0.0;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn permits_passage(&self) -> bool {
        self.phase.permits_passage()
    }
}
