//! Documented defaults for gaze processing sessions.
//!
//! These values describe a typical desktop setup: a 24" Full HD monitor with
//! a screen-mounted tracker sampling somewhere between 60 and 1200 Hz.

// ============================================================================
// Display Defaults
// ============================================================================

/// Default configured screen width in pixels.
pub const DEFAULT_SCREEN_WIDTH_PX: f64 = 1920.0;

/// Default configured screen height in pixels.
pub const DEFAULT_SCREEN_HEIGHT_PX: f64 = 1080.0;

/// Default physical display width in millimeters.
///
/// **Rationale**: A 24" 16:9 panel has an active area of roughly
/// 530 × 300 mm, which gives a pixel pitch of ~0.276 mm at 1920 px.
/// The real value is reported by the device at session start.
pub const DEFAULT_DISPLAY_WIDTH_MM: f64 = 530.0;

/// Default physical display height in millimeters.
pub const DEFAULT_DISPLAY_HEIGHT_MM: f64 = 300.0;

// ============================================================================
// Classification Defaults
// ============================================================================

/// Default angular velocity threshold separating saccades from everything else.
///
/// **Rationale**: 30 deg/s is the customary I-VT threshold. Fixational drift
/// and microsaccade noise stay well below it, while even small saccades
/// peak far above it.
pub const DEFAULT_VELOCITY_THRESHOLD_DEG_PER_SEC: f64 = 30.0;

/// Default time a below-threshold run must last before it counts as a fixation.
///
/// **Rationale**: Fixations shorter than ~100-200 ms are rarely meaningful
/// for reading or visual search. 150 ms sits in the middle of that range.
pub const DEFAULT_NOT_A_SACCADE_DURATION_THRESHOLD_MS: i32 = 150;

// ============================================================================
// Unit Conversion
// ============================================================================

/// Microseconds per second, used to turn per-interval angles into deg/s.
pub const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Microseconds per millisecond, used for classifier duration accounting.
pub const MICROS_PER_MILLI: i64 = 1_000;
