//! Signal-subsystem error type.

use thiserror::Error;

use xing_core::{LaneId, XingError};

/// Errors produced while setting up an [`Intersection`][crate::Intersection].
#[derive(Debug, Error, PartialEq)]
pub enum SignalError {
    #[error("an intersection needs at least one lane")]
    NoLanes,

    #[error("too many lanes: {0}")]
    TooManyLanes(usize),

    #[error("stop offset must be a positive distance, got {0} m")]
    InvalidStopOffset(f64),

    #[error("light for {lane}: {source}")]
    InvalidTiming {
        lane:   LaneId,
        #[source]
        source: XingError,
    },

    #[error(transparent)]
    Config(#[from] XingError),
}

pub type SignalResult<T> = Result<T, SignalError>;
