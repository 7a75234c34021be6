//! Mapping between normalized display coordinates, pixels and millimeters.

use crate::error::ConfigError;
use crate::types::{NormalizedPoint, PixelPoint, ProcessorConfig};

/// Physical size of one pixel along an axis, in mm/px.
///
/// Callers guarantee `screen_px > 0`; `DisplayGeometry::new` validates this.
pub fn pixel_pitch(display_mm: f64, screen_px: f64) -> f64 {
    display_mm / screen_px
}

pub fn millimeters_from_pixels(px: f64, pitch: f64) -> f64 {
    px * pitch
}

pub fn pixels_from_millimeters(mm: f64, pitch: f64) -> f64 {
    mm / pitch
}

/// Screen resolution and physical size of the display for one session.
///
/// Pixel pitches are derived once here and never recomputed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayGeometry {
    screen_width_px: f64,
    screen_height_px: f64,
    display_width_mm: f64,
    display_height_mm: f64,
    pixel_pitch_h: f64,
    pixel_pitch_v: f64,
}

impl DisplayGeometry {
    pub fn new(
        screen_width_px: f64,
        screen_height_px: f64,
        display_width_mm: f64,
        display_height_mm: f64,
    ) -> Result<Self, ConfigError> {
        require_positive(screen_width_px, "width", |axis, value| {
            ConfigError::InvalidScreenDimension { axis, value }
        })?;
        require_positive(screen_height_px, "height", |axis, value| {
            ConfigError::InvalidScreenDimension { axis, value }
        })?;
        require_positive(display_width_mm, "width", |axis, value| {
            ConfigError::InvalidDisplayDimension { axis, value }
        })?;
        require_positive(display_height_mm, "height", |axis, value| {
            ConfigError::InvalidDisplayDimension { axis, value }
        })?;

        Ok(Self {
            screen_width_px,
            screen_height_px,
            display_width_mm,
            display_height_mm,
            pixel_pitch_h: pixel_pitch(display_width_mm, screen_width_px),
            pixel_pitch_v: pixel_pitch(display_height_mm, screen_height_px),
        })
    }

    pub fn from_config(config: &ProcessorConfig) -> Result<Self, ConfigError> {
        Self::new(
            config.screen_width_px,
            config.screen_height_px,
            config.display_width_mm,
            config.display_height_mm,
        )
    }

    pub fn screen_width_px(&self) -> f64 {
        self.screen_width_px
    }

    pub fn screen_height_px(&self) -> f64 {
        self.screen_height_px
    }

    pub fn display_width_mm(&self) -> f64 {
        self.display_width_mm
    }

    pub fn display_height_mm(&self) -> f64 {
        self.display_height_mm
    }

    /// Horizontal pixel pitch in mm/px.
    pub fn pixel_pitch_horizontal(&self) -> f64 {
        self.pixel_pitch_h
    }

    /// Vertical pixel pitch in mm/px.
    pub fn pixel_pitch_vertical(&self) -> f64 {
        self.pixel_pitch_v
    }

    pub fn to_pixels(&self, point: NormalizedPoint) -> PixelPoint {
        PixelPoint {
            x: point.x * self.screen_width_px,
            y: point.y * self.screen_height_px,
        }
    }

    /// Pixel position converted to millimeters on the display plane.
    pub fn pixels_to_millimeters(&self, point: PixelPoint) -> (f64, f64) {
        (
            millimeters_from_pixels(point.x, self.pixel_pitch_h),
            millimeters_from_pixels(point.y, self.pixel_pitch_v),
        )
    }

    /// Millimeters on the display plane converted back to pixels.
    pub fn millimeters_to_pixels(&self, x_mm: f64, y_mm: f64) -> PixelPoint {
        PixelPoint {
            x: pixels_from_millimeters(x_mm, self.pixel_pitch_h),
            y: pixels_from_millimeters(y_mm, self.pixel_pitch_v),
        }
    }
}

fn require_positive(
    value: f64,
    axis: &'static str,
    make_error: impl Fn(&'static str, f64) -> ConfigError,
) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(make_error(axis, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn full_hd_24_inch() -> DisplayGeometry {
        DisplayGeometry::new(1920.0, 1080.0, 530.0, 300.0).unwrap()
    }

    #[test]
    fn pixel_pitch_for_full_hd_24_inch_panel() {
        let display = full_hd_24_inch();
        assert!((display.pixel_pitch_horizontal() - 530.0 / 1920.0).abs() < EPSILON);
        assert!((display.pixel_pitch_vertical() - 300.0 / 1080.0).abs() < EPSILON);
        assert!((display.pixel_pitch_horizontal() - 0.276).abs() < 1e-3);
        assert!((display.pixel_pitch_vertical() - 0.278).abs() < 1e-3);
    }

    #[test]
    fn millimeter_pixel_round_trip() {
        let pitch = 530.0 / 1920.0;
        for x in [0.0, 1.0, 17.25, 960.0, 1919.5, -42.0] {
            let back = pixels_from_millimeters(millimeters_from_pixels(x, pitch), pitch);
            assert!((back - x).abs() < EPSILON, "round trip failed for {}", x);
        }
    }

    #[test]
    fn normalized_points_scale_to_screen() {
        let display = full_hd_24_inch();
        let px = display.to_pixels(NormalizedPoint::new(0.5, 0.25));
        assert_eq!(px, PixelPoint { x: 960.0, y: 270.0 });

        let (x_mm, y_mm) = display.pixels_to_millimeters(PixelPoint { x: 1920.0, y: 1080.0 });
        assert!((x_mm - 530.0).abs() < EPSILON);
        assert!((y_mm - 300.0).abs() < EPSILON);

        let back = display.millimeters_to_pixels(x_mm, y_mm);
        assert!((back.x - 1920.0).abs() < EPSILON);
        assert!((back.y - 1080.0).abs() < EPSILON);
    }

    #[test]
    fn rejects_non_positive_screen_dimensions() {
        assert_eq!(
            DisplayGeometry::new(0.0, 1080.0, 530.0, 300.0),
            Err(ConfigError::InvalidScreenDimension {
                axis: "width",
                value: 0.0
            })
        );
        assert_eq!(
            DisplayGeometry::new(1920.0, -1.0, 530.0, 300.0),
            Err(ConfigError::InvalidScreenDimension {
                axis: "height",
                value: -1.0
            })
        );
        assert!(DisplayGeometry::new(f64::NAN, 1080.0, 530.0, 300.0).is_err());
    }

    #[test]
    fn rejects_non_positive_display_dimensions() {
        assert_eq!(
            DisplayGeometry::new(1920.0, 1080.0, 0.0, 300.0),
            Err(ConfigError::InvalidDisplayDimension {
                axis: "width",
                value: 0.0
            })
        );
        assert!(DisplayGeometry::new(1920.0, 1080.0, 530.0, f64::INFINITY).is_err());
    }
}
