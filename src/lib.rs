//! Gaze motion classification for binocular eye-tracker streams.
//!
//! Raw samples go in one tick at a time; each tick after the first yields a
//! per-eye angular velocity, an on-screen pixel position and a movement type
//! (saccade, not-a-saccade, fixation, or unknown).
//!
//! The crate is usable as a Rust library through [`GazeProcessor`] and as a
//! static library through the C ABI in [`ffi`].

pub mod classifier;
pub mod constants;
pub mod display;
pub mod error;
pub mod ffi;
pub mod geometry;
pub mod processor;
pub mod types;
pub mod velocity;

pub use classifier::{classify, ClassifierConfig, PerEyeState};
pub use display::{millimeters_from_pixels, pixel_pitch, pixels_from_millimeters, DisplayGeometry};
pub use error::ConfigError;
pub use geometry::Vector3;
pub use processor::{process_tick, GazeProcessor, GazeSession};
pub use types::{
    ClassifiedGazeEvent, Eye, EyeEvent, MovementType, NormalizedPoint, PixelPoint,
    ProcessorConfig, RawBinocularSample, RawGazeSample, VelocityMode,
};
pub use velocity::estimate_angular_velocity;
