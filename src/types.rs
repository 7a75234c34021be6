use crate::constants::{
    DEFAULT_DISPLAY_HEIGHT_MM, DEFAULT_DISPLAY_WIDTH_MM,
    DEFAULT_NOT_A_SACCADE_DURATION_THRESHOLD_MS, DEFAULT_SCREEN_HEIGHT_PX,
    DEFAULT_SCREEN_WIDTH_PX, DEFAULT_VELOCITY_THRESHOLD_DEG_PER_SEC,
};
use crate::error::ConfigError;
use crate::geometry::Vector3;

/// Gaze position on the display area, (0,0) top-left to (1,1) bottom-right.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Gaze position on the configured screen, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

/// One eye's raw sample as delivered by the acquisition layer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RawGazeSample {
    pub gaze_point_normalized: NormalizedPoint,
    /// Gaze point on the display, in user coordinates (mm).
    pub gaze_point_ucs: Vector3,
    /// Eye position (approx. cornea center), in user coordinates (mm).
    pub gaze_origin_ucs: Vector3,
    pub validity: bool,
}

/// Both eyes for one device tick. Timestamps are in microseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RawBinocularSample {
    pub device_timestamp_us: i64,
    pub system_timestamp_us: i64,
    pub left: RawGazeSample,
    pub right: RawGazeSample,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Eye {
    Left,
    Right,
}

/// Geometric method used to turn two consecutive samples into an angle.
#[repr(i32)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VelocityMode {
    /// Angle between the origin→point gaze vectors of both samples.
    #[default]
    GazeVectorAngle = 0,
    /// On-screen displacement in mm seen from the current eye distance.
    PixelPitchDistance = 1,
}

impl VelocityMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GazeVectorAngle => "gaze-vector-angle",
            Self::PixelPitchDistance => "pixel-pitch-distance",
        }
    }
}

impl TryFrom<i32> for VelocityMode {
    type Error = ConfigError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::GazeVectorAngle),
            1 => Ok(Self::PixelPitchDistance),
            other => Err(ConfigError::UnknownVelocityMode(other)),
        }
    }
}

/// Ocular motion state for one eye on one tick.
///
/// `NotASaccade` and `Fixation` are both below the velocity threshold; they
/// differ only in how long the below-threshold run has lasted.
#[repr(i32)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MovementType {
    #[default]
    Unknown = 0,
    Saccade = 1,
    NotASaccade = 2,
    Fixation = 3,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Saccade => "saccade",
            Self::NotASaccade => "not-a-saccade",
            Self::Fixation => "fixation",
        }
    }
}

/// Per-eye part of a classified event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EyeEvent {
    pub position_px: PixelPoint,
    /// Raw validity AND a determinate velocity.
    pub valid: bool,
    /// Degrees per second; NaN when the velocity could not be determined.
    pub angular_velocity_deg_per_sec: f64,
    pub movement: MovementType,
}

impl EyeEvent {
    /// Angular velocity, or `None` on an indeterminate tick.
    pub fn velocity(&self) -> Option<f64> {
        if self.angular_velocity_deg_per_sec.is_nan() {
            None
        } else {
            Some(self.angular_velocity_deg_per_sec)
        }
    }
}

/// Output for every tick after the bootstrap tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassifiedGazeEvent {
    pub device_timestamp_us: i64,
    pub system_timestamp_us: i64,
    /// Time since the previous tick, never negative.
    pub interval_us: i64,
    pub left: EyeEvent,
    pub right: EyeEvent,
}

impl ClassifiedGazeEvent {
    pub fn eye(&self, eye: Eye) -> &EyeEvent {
        match eye {
            Eye::Left => &self.left,
            Eye::Right => &self.right,
        }
    }
}

/// Session configuration, fixed for the life of a processor.
///
/// # Classification
/// - `velocity_threshold_deg_per_sec <= 0` disables classification: every
///   eye is reported as `Unknown`.
/// - `not_a_saccade_duration_threshold_ms` is how long a below-threshold run
///   must last before it is reported as a fixation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProcessorConfig {
    pub screen_width_px: f64,
    pub screen_height_px: f64,
    /// Physical display size as reported by the device.
    pub display_width_mm: f64,
    pub display_height_mm: f64,
    pub velocity_mode: VelocityMode,
    pub velocity_threshold_deg_per_sec: f64,
    pub not_a_saccade_duration_threshold_ms: i32,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            screen_width_px: DEFAULT_SCREEN_WIDTH_PX,
            screen_height_px: DEFAULT_SCREEN_HEIGHT_PX,
            display_width_mm: DEFAULT_DISPLAY_WIDTH_MM,
            display_height_mm: DEFAULT_DISPLAY_HEIGHT_MM,
            velocity_mode: VelocityMode::GazeVectorAngle,
            velocity_threshold_deg_per_sec: DEFAULT_VELOCITY_THRESHOLD_DEG_PER_SEC,
            not_a_saccade_duration_threshold_ms: DEFAULT_NOT_A_SACCADE_DURATION_THRESHOLD_MS,
        }
    }
}
