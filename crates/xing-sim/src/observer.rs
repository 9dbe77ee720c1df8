//! Simulation observer trait for progress reporting.

use xing_core::Tick;
use xing_fleet::Fleet;
use xing_signal::Intersection;

use crate::{RunStats, TickReport};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All hooks run on the driver thread, after the tick's parallel phases have
/// joined, so they always see a fully updated state.  Every method has a
/// default no-op implementation.
///
/// # Example: crossing counter
///
/// ```rust,ignore
/// struct Crossings(u64);
///
/// impl SimObserver for Crossings {
///     fn on_tick_end(&mut self, report: &TickReport) {
///         self.0 += report.crossed as u64;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once before the first tick with the initial state.
    fn on_run_start(&mut self, _intersection: &Intersection, _fleet: &Fleet) {}

    /// Called after every tick's aggregation step.
    fn on_tick_end(&mut self, _report: &TickReport) {}

    /// Called every `config.output_interval_ticks` ticks.
    ///
    /// `fleet.crossed_now` tells which vehicles crossed during `tick`.
    fn on_snapshot(
        &mut self,
        _tick:         Tick,
        _sim_secs:     f64,
        _fleet:        &Fleet,
        _intersection: &Intersection,
    ) {}

    /// Called once after the final tick.
    fn on_sim_end(&mut self, _stats: &RunStats) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
