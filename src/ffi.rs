//! C ABI for host applications that own the acquisition thread.
//!
//! The handle serializes calls with a mutex, so the host may call in from
//! whichever thread delivers samples.

#![allow(clippy::not_unsafe_ptr_arg_deref)]

use std::sync::Mutex;

use crate::geometry::Vector3;
use crate::processor::GazeProcessor;
use crate::types::{
    ClassifiedGazeEvent, EyeEvent, NormalizedPoint, ProcessorConfig, RawBinocularSample,
    RawGazeSample, VelocityMode,
};

#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct CVector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct CGazeSample {
    pub gaze_point_x: f64,
    pub gaze_point_y: f64,
    pub gaze_point_ucs: CVector3,
    pub gaze_origin_ucs: CVector3,
    pub validity: bool,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct CBinocularSample {
    pub device_timestamp_us: i64,
    pub system_timestamp_us: i64,
    pub left: CGazeSample,
    pub right: CGazeSample,
}

/// Session configuration passed from the host.
///
/// `velocity_mode`: 0 = gaze vector angle, 1 = pixel pitch distance.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct CProcessorConfig {
    pub screen_width_px: f64,
    pub screen_height_px: f64,
    pub display_width_mm: f64,
    pub display_height_mm: f64,
    pub velocity_mode: i32,
    pub velocity_threshold_deg_per_sec: f64,
    pub not_a_saccade_duration_threshold_ms: i32,
}

/// Per-eye result. `movement`: 0 unknown, 1 saccade, 2 not a saccade, 3 fixation.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct CEyeResult {
    pub pixel_x: f64,
    pub pixel_y: f64,
    pub valid: bool,
    pub angular_velocity_deg_per_sec: f64,
    pub movement: i32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct CGazeEvent {
    pub device_timestamp_us: i64,
    pub system_timestamp_us: i64,
    pub interval_us: i64,
    pub left: CEyeResult,
    pub right: CEyeResult,
}

/// Opaque session handle owned by the host.
pub struct GazeProcessorHandle {
    inner: Mutex<GazeProcessor>,
}

impl GazeProcessorHandle {
    fn with_processor<R>(&self, f: impl FnOnce(&mut GazeProcessor) -> R) -> R {
        // Session state is consistent between ticks, so a poisoned lock is safe to reuse.
        let mut guard = self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

impl From<CVector3> for Vector3 {
    fn from(v: CVector3) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl From<CGazeSample> for RawGazeSample {
    fn from(s: CGazeSample) -> Self {
        RawGazeSample {
            gaze_point_normalized: NormalizedPoint::new(s.gaze_point_x, s.gaze_point_y),
            gaze_point_ucs: s.gaze_point_ucs.into(),
            gaze_origin_ucs: s.gaze_origin_ucs.into(),
            validity: s.validity,
        }
    }
}

impl From<CBinocularSample> for RawBinocularSample {
    fn from(s: CBinocularSample) -> Self {
        RawBinocularSample {
            device_timestamp_us: s.device_timestamp_us,
            system_timestamp_us: s.system_timestamp_us,
            left: s.left.into(),
            right: s.right.into(),
        }
    }
}

impl From<EyeEvent> for CEyeResult {
    fn from(e: EyeEvent) -> Self {
        CEyeResult {
            pixel_x: e.position_px.x,
            pixel_y: e.position_px.y,
            valid: e.valid,
            angular_velocity_deg_per_sec: e.angular_velocity_deg_per_sec,
            movement: e.movement as i32,
        }
    }
}

impl From<ClassifiedGazeEvent> for CGazeEvent {
    fn from(e: ClassifiedGazeEvent) -> Self {
        CGazeEvent {
            device_timestamp_us: e.device_timestamp_us,
            system_timestamp_us: e.system_timestamp_us,
            interval_us: e.interval_us,
            left: e.left.into(),
            right: e.right.into(),
        }
    }
}

impl From<ProcessorConfig> for CProcessorConfig {
    fn from(c: ProcessorConfig) -> Self {
        CProcessorConfig {
            screen_width_px: c.screen_width_px,
            screen_height_px: c.screen_height_px,
            display_width_mm: c.display_width_mm,
            display_height_mm: c.display_height_mm,
            velocity_mode: c.velocity_mode as i32,
            velocity_threshold_deg_per_sec: c.velocity_threshold_deg_per_sec,
            not_a_saccade_duration_threshold_ms: c.not_a_saccade_duration_threshold_ms,
        }
    }
}

impl TryFrom<CProcessorConfig> for ProcessorConfig {
    type Error = crate::error::ConfigError;

    fn try_from(c: CProcessorConfig) -> Result<Self, Self::Error> {
        Ok(ProcessorConfig {
            screen_width_px: c.screen_width_px,
            screen_height_px: c.screen_height_px,
            display_width_mm: c.display_width_mm,
            display_height_mm: c.display_height_mm,
            velocity_mode: VelocityMode::try_from(c.velocity_mode)?,
            velocity_threshold_deg_per_sec: c.velocity_threshold_deg_per_sec,
            not_a_saccade_duration_threshold_ms: c.not_a_saccade_duration_threshold_ms,
        })
    }
}

/// Maps a host log verbosity (0=off, 1=error, 2=warn, 3=info, 4=debug,
/// 5=trace) to a `log` filter. Out-of-range values saturate.
pub fn level_filter(log_level: i32) -> log::LevelFilter {
    match log_level {
        i32::MIN..=0 => log::LevelFilter::Off,
        1 => log::LevelFilter::Error,
        2 => log::LevelFilter::Warn,
        3 => log::LevelFilter::Info,
        4 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

/// Sets the maximum log level for the whole process, not per session.
/// The last call wins. Rust callers use `log::set_max_level` directly.
#[no_mangle]
pub extern "C" fn gaze_set_log_level(log_level: i32) {
    log::set_max_level(level_filter(log_level));
}

#[no_mangle]
pub extern "C" fn gaze_processor_default_config() -> CProcessorConfig {
    ProcessorConfig::default().into()
}

/// Creates a session. Returns null if the configuration is rejected.
#[no_mangle]
pub extern "C" fn gaze_processor_create(config: CProcessorConfig) -> *mut GazeProcessorHandle {
    let config = match ProcessorConfig::try_from(config) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Rejected gaze processor config: {}", e);
            return std::ptr::null_mut();
        }
    };
    match GazeProcessor::new(config) {
        Ok(processor) => Box::into_raw(Box::new(GazeProcessorHandle {
            inner: Mutex::new(processor),
        })),
        Err(e) => {
            log::error!("Rejected gaze processor config: {}", e);
            std::ptr::null_mut()
        }
    }
}

/// Processes one sample.
///
/// Returns 1 when an event was written to `out`, 0 on the bootstrap tick
/// (`out` untouched) and -1 when any pointer is null.
#[no_mangle]
pub extern "C" fn gaze_processor_process(
    handle: *mut GazeProcessorHandle,
    sample: *const CBinocularSample,
    out: *mut CGazeEvent,
) -> i32 {
    if handle.is_null() || sample.is_null() || out.is_null() {
        log::warn!("gaze_processor_process called with a null pointer");
        return -1;
    }

    // Pointers are non-null and, per the API contract, valid for the call.
    let (handle, sample) = unsafe { (&*handle, RawBinocularSample::from(*sample)) };

    match handle.with_processor(|processor| processor.process_sample(&sample)) {
        Some(event) => {
            unsafe {
                *out = event.into();
            }
            1
        }
        None => 0,
    }
}

/// Drops all history; the next sample bootstraps again.
#[no_mangle]
pub extern "C" fn gaze_processor_reset(handle: *mut GazeProcessorHandle) {
    if handle.is_null() {
        log::warn!("gaze_processor_reset called with a null handle");
        return;
    }
    let handle = unsafe { &*handle };
    handle.with_processor(|processor| processor.reset());
}

/// Writes the horizontal and vertical pixel pitch (mm/px).
///
/// Returns 1 when both values were written and -1 when any pointer is null.
#[no_mangle]
pub extern "C" fn gaze_processor_pixel_pitch(
    handle: *const GazeProcessorHandle,
    out_horizontal: *mut f64,
    out_vertical: *mut f64,
) -> i32 {
    if handle.is_null() || out_horizontal.is_null() || out_vertical.is_null() {
        log::warn!("gaze_processor_pixel_pitch called with a null pointer");
        return -1;
    }
    let handle = unsafe { &*handle };
    let (h, v) = handle.with_processor(|processor| {
        let display = processor.display();
        (display.pixel_pitch_horizontal(), display.pixel_pitch_vertical())
    });
    unsafe {
        *out_horizontal = h;
        *out_vertical = v;
    }
    1
}

#[no_mangle]
pub extern "C" fn gaze_processor_free(handle: *mut GazeProcessorHandle) {
    // The host must call this exactly once per handle returned by create.
    if !handle.is_null() {
        unsafe {
            drop(Box::from_raw(handle));
        }
    }
}
