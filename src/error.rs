use thiserror::Error;

/// Session configuration problems, surfaced once at construction.
///
/// Per-tick indeterminacy is never reported through this type; it shows up as
/// a NaN velocity and an `Unknown` movement type on the affected eye.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("screen {axis} must be a positive number of pixels, got {value}")]
    InvalidScreenDimension { axis: &'static str, value: f64 },

    #[error("display {axis} must be a positive number of millimeters, got {value}")]
    InvalidDisplayDimension { axis: &'static str, value: f64 },

    #[error("not-a-saccade duration threshold must be >= 0 ms, got {0}")]
    NegativeDurationThreshold(i32),

    #[error("unknown velocity mode discriminant {0}")]
    UnknownVelocityMode(i32),
}
