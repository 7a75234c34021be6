use crate::constants::MICROS_PER_SECOND;
use crate::display::DisplayGeometry;
use crate::geometry::{angle_between, euclidean_distance, rad_to_deg, vector_between};
use crate::types::{RawGazeSample, VelocityMode};

/// Angular velocity of one eye between two consecutive samples, in deg/s.
///
/// Returns `None` when the velocity is indeterminate: a non-positive interval
/// (duplicate or out-of-order timestamps), degenerate vectors, or non-finite
/// input coordinates.
pub fn estimate_angular_velocity(
    interval_us: i64,
    current: &RawGazeSample,
    previous: &RawGazeSample,
    mode: VelocityMode,
    display: &DisplayGeometry,
) -> Option<f64> {
    if interval_us <= 0 {
        return None;
    }

    let theta_rad = match mode {
        VelocityMode::GazeVectorAngle => gaze_vector_angle(current, previous),
        VelocityMode::PixelPitchDistance => pixel_pitch_angle(current, previous, display),
    };
    if theta_rad.is_nan() {
        return None;
    }

    Some(rad_to_deg(theta_rad) * MICROS_PER_SECOND / interval_us as f64)
}

fn gaze_vector_angle(current: &RawGazeSample, previous: &RawGazeSample) -> f64 {
    let previous_gaze = vector_between(&previous.gaze_origin_ucs, &previous.gaze_point_ucs);
    let current_gaze = vector_between(&current.gaze_origin_ucs, &current.gaze_point_ucs);
    angle_between(&previous_gaze, &current_gaze)
}

// The eye distance is taken from the current sample only.
fn pixel_pitch_angle(
    current: &RawGazeSample,
    previous: &RawGazeSample,
    display: &DisplayGeometry,
) -> f64 {
    let eye_distance_mm = euclidean_distance(&current.gaze_origin_ucs, &current.gaze_point_ucs);

    let (cur_x_mm, cur_y_mm) =
        display.pixels_to_millimeters(display.to_pixels(current.gaze_point_normalized));
    let (prev_x_mm, prev_y_mm) =
        display.pixels_to_millimeters(display.to_pixels(previous.gaze_point_normalized));
    let displacement_mm = (cur_x_mm - prev_x_mm).hypot(cur_y_mm - prev_y_mm);

    displacement_mm.atan2(eye_distance_mm)
}
