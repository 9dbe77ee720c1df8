//! The intersection: a fixed set of lights (one per lane) and the stop offset.

use xing_core::{LaneId, PhaseDurations, SignalTiming, SimConfig, SimRng};

use crate::{LightPhase, SignalError, SignalResult, TrafficLight};

/// One light per lane plus the parking distance for vehicles blocked by red.
///
/// The number of lights is fixed at construction; only the lights' timers
/// change afterwards.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Intersection {
    /// Indexed by `LaneId`.
    lights: Vec<TrafficLight>,

    /// Distance before the line at which a stopped vehicle parks.  Always
    /// finite and positive.
    stop_offset_m: f64,
}

impl Intersection {
    /// Build one light per entry of `durations`.
    ///
    /// Lights alternate their initial phase so that crossing approaches start
    /// out of step: even lanes start GREEN, odd lanes start RED.
    pub fn new(stop_offset_m: f64, durations: Vec<PhaseDurations>) -> SignalResult<Self> {
        if durations.is_empty() {
            return Err(SignalError::NoLanes);
        }
        if !(stop_offset_m.is_finite() && stop_offset_m > 0.0) {
            return Err(SignalError::InvalidStopOffset(stop_offset_m));
        }

        let mut lights = Vec::with_capacity(durations.len());
        for (i, d) in durations.into_iter().enumerate() {
            let lane = LaneId::try_from(i).map_err(|_| SignalError::TooManyLanes(i + 1))?;
            d.validate()
                .map_err(|source| SignalError::InvalidTiming { lane, source })?;
            let phase = if i % 2 == 0 { LightPhase::Green } else { LightPhase::Red };
            lights.push(TrafficLight::new(lane, phase, d));
        }

        Ok(Self { lights, stop_offset_m })
    }

    /// Build the intersection described by `config`.
    ///
    /// Randomized timings draw green, yellow, then red for each lane in order
    /// from `rng`, so the same seed always yields the same lights.
    pub fn from_config(config: &SimConfig, rng: &mut SimRng) -> SignalResult<Self> {
        let durations = match &config.signals {
            SignalTiming::Fixed(d) => vec![*d; config.lane_count],
            SignalTiming::Randomized { green_secs, yellow_secs, red_secs } => (0..config.lane_count)
                .map(|_| {
                    let green = rng.uniform(green_secs);
                    let yellow = rng.uniform(yellow_secs);
                    let red = rng.uniform(red_secs);
                    PhaseDurations::new(green, yellow, red)
                })
                .collect(),
        };
        Self::new(config.stop_offset_m, durations)
    }

    #[inline]
    pub fn lane_count(&self) -> usize {
        self.lights.len()
    }

    /// The light for `lane`.
    ///
    /// # Panics
    /// Panics if `lane` is out of range; fleets are validated against the
    /// lane count before a run starts.
    #[inline]
    pub fn light(&self, lane: LaneId) -> &TrafficLight {
        &self.lights[lane.index()]
    }

    /// Distance before the line at which a vehicle blocked by RED parks.
    #[inline]
    pub fn stop_offset_m(&self) -> f64 {
        self.stop_offset_m
    }

    #[inline]
    pub fn lights(&self) -> &[TrafficLight] {
        &self.lights
    }

    /// Number of lights currently showing GREEN.
    pub fn green_count(&self) -> usize {
        self.lights.iter().filter(|l| l.phase == LightPhase::Green).count()
    }

    /// Advance every light by `dt`.  Returns how many lights changed phase.
    pub fn advance_all(&mut self, dt: f64) -> usize {
        self.lights.iter_mut().map(|l| l.advance(dt)).filter(|&changed| changed).count()
    }

    /// Current `(phase, time_in_phase)` of every light, in lane order.
    pub fn phases(&self) -> Vec<(LightPhase, f64)> {
        self.lights.iter().map(|l| (l.phase, l.time_in_phase)).collect()
    }
}
