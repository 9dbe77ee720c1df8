use thiserror::Error;

use xing_core::{LaneId, VehicleId, XingError};
use xing_signal::SignalError;

/// Everything that can stop a run from starting.  Once `Sim::run` begins,
/// the tick loop itself cannot fail.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] XingError),

    #[error("intersection setup failed: {0}")]
    Signal(#[from] SignalError),

    #[error("{what} length {got} does not match vehicle count {expected}")]
    VehicleCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("{vehicle} uses {lane} but the intersection only has {lanes} lanes")]
    LaneOutOfRange {
        vehicle: VehicleId,
        lane:    LaneId,
        lanes:   usize,
    },

    #[error("config asks for {config} lanes but the intersection has {intersection}")]
    LaneCountMismatch {
        config:       usize,
        intersection: usize,
    },

    #[error("{vehicle} is not a fresh approaching vehicle: {reason}")]
    InvalidVehicle {
        vehicle: VehicleId,
        reason:  &'static str,
    },

    #[cfg(feature = "parallel")]
    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type SimResult<T> = Result<T, SimError>;
