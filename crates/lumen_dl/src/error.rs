//! Display-list construction errors
//!
//! Construction is the only place display lists can fail; dispatch never
//! returns errors, it absorbs problems locally and logs them.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DlError {
    #[error("gradient needs at least 2 stops, got {0}")]
    TooFewStops(usize),

    #[error("gradient has {colors} colors but {stops} stops")]
    StopCountMismatch { colors: usize, stops: usize },

    #[error("gradient stop {index} is {value}, outside [0, 1] or decreasing")]
    InvalidStop { index: usize, value: f32 },
}
