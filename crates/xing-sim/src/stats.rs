//! Per-tick reports and end-of-run statistics.

use std::fmt;
use std::time::Duration;

use xing_core::Tick;

/// What happened during one tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    /// The tick just completed (1-based).
    pub tick: Tick,

    /// Crossings during this tick.
    pub crossed: usize,

    /// Cumulative crossings since the run started.
    pub crossed_total: u64,

    /// Workers that shared this tick's vehicle updates.
    pub team_size: usize,

    /// Lights showing GREEN after this tick's light phase.
    pub lights_green: usize,
}

/// Why a run stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// Every vehicle crossed.
    AllCrossed,
    /// The configured tick budget was used up.
    Budget,
    /// The `max_ticks` ceiling fired first.
    TickCeiling,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StopReason::AllCrossed  => "all vehicles crossed",
            StopReason::Budget      => "tick budget reached",
            StopReason::TickCeiling => "tick ceiling reached",
        })
    }
}

/// Final statistics of a run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunStats {
    pub vehicle_count: usize,

    /// Ticks executed.
    pub ticks: u64,

    /// Vehicles that crossed at least once.  Equals `vehicle_count` when a
    /// one-shot run ends with [`StopReason::AllCrossed`].
    pub vehicles_crossed: usize,

    /// Cumulative crossed count kept by the aggregation step.
    pub crossings_counted: u64,

    /// Sum of the vehicles' own crossing counters.  Always equal to
    /// `crossings_counted`; both are reported as a cross-check.
    pub total_crossings: u64,

    /// Mean waiting time over every vehicle, in seconds.
    pub average_wait_secs: f64,

    pub simulated_secs: f64,

    /// Wall-clock duration of the tick loop.
    pub wall_clock: Duration,

    pub stop_reason: StopReason,
}

impl RunStats {
    /// Compare everything except wall-clock time.
    pub fn same_outcome(&self, other: &RunStats) -> bool {
        RunStats { wall_clock: Duration::ZERO, ..self.clone() }
            == RunStats { wall_clock: Duration::ZERO, ..other.clone() }
    }
}
