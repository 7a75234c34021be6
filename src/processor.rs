use crate::classifier::{classify, ClassifierConfig, PerEyeState};
use crate::display::DisplayGeometry;
use crate::error::ConfigError;
use crate::types::{
    ClassifiedGazeEvent, Eye, EyeEvent, ProcessorConfig, RawBinocularSample, RawGazeSample,
    VelocityMode,
};
use crate::velocity::estimate_angular_velocity;

/// Mutable state of one gaze session: both eyes plus the last timestamp.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GazeSession {
    left: PerEyeState,
    right: PerEyeState,
    previous_system_timestamp_us: Option<i64>,
}

impl GazeSession {
    pub fn eye(&self, eye: Eye) -> &PerEyeState {
        match eye {
            Eye::Left => &self.left,
            Eye::Right => &self.right,
        }
    }

    pub fn previous_system_timestamp_us(&self) -> Option<i64> {
        self.previous_system_timestamp_us
    }

    pub fn is_bootstrapped(&self) -> bool {
        self.previous_system_timestamp_us.is_some()
    }
}

/// Turns a stream of raw binocular samples into classified gaze events.
///
/// One instance per session. Samples must be fed one at a time, in arrival
/// order; every output depends on the previous tick.
#[derive(Clone, Debug)]
pub struct GazeProcessor {
    display: DisplayGeometry,
    classifier: ClassifierConfig,
    velocity_mode: VelocityMode,
    session: GazeSession,
}

impl GazeProcessor {
    pub fn new(config: ProcessorConfig) -> Result<Self, ConfigError> {
        let display = DisplayGeometry::from_config(&config)?;
        if config.not_a_saccade_duration_threshold_ms < 0 {
            return Err(ConfigError::NegativeDurationThreshold(
                config.not_a_saccade_duration_threshold_ms,
            ));
        }
        let classifier = ClassifierConfig::from_config(&config);

        log::info!(
            "Gaze session: screen {}x{} px, display {}x{} mm, pitch {:.4}x{:.4} mm/px",
            display.screen_width_px(),
            display.screen_height_px(),
            display.display_width_mm(),
            display.display_height_mm(),
            display.pixel_pitch_horizontal(),
            display.pixel_pitch_vertical(),
        );
        if classifier.is_enabled() {
            log::info!(
                "Classification: mode={}, saccade above {} deg/s, fixation after {} ms",
                config.velocity_mode.as_str(),
                classifier.velocity_threshold_deg_per_sec,
                classifier.not_a_saccade_duration_threshold_ms
            );
        } else {
            log::info!(
                "Classification disabled (threshold {} deg/s), mode={}",
                classifier.velocity_threshold_deg_per_sec,
                config.velocity_mode.as_str()
            );
        }

        Ok(Self {
            display,
            classifier,
            velocity_mode: config.velocity_mode,
            session: GazeSession::default(),
        })
    }

    pub fn display(&self) -> &DisplayGeometry {
        &self.display
    }

    pub fn velocity_mode(&self) -> VelocityMode {
        self.velocity_mode
    }

    pub fn session(&self) -> &GazeSession {
        &self.session
    }

    pub fn eye_state(&self, eye: Eye) -> &PerEyeState {
        self.session.eye(eye)
    }

    pub fn is_bootstrapped(&self) -> bool {
        self.session.is_bootstrapped()
    }

    /// Forgets all history; the next sample bootstraps a new session.
    pub fn reset(&mut self) {
        log::info!("Gaze session reset");
        self.session = GazeSession::default();
    }

    /// Processes one tick. Returns `None` only for the bootstrap tick.
    pub fn process_sample(&mut self, sample: &RawBinocularSample) -> Option<ClassifiedGazeEvent> {
        process_tick(
            &mut self.session,
            &self.display,
            &self.classifier,
            self.velocity_mode,
            sample,
        )
    }

    /// Feeds `samples` in order and collects the emitted events.
    pub fn process_batch(&mut self, samples: &[RawBinocularSample]) -> Vec<ClassifiedGazeEvent> {
        samples
            .iter()
            .filter_map(|sample| self.process_sample(sample))
            .collect()
    }
}

/// One step of the session state machine.
///
/// Both eyes' samples and the timestamp always become the new baseline,
/// whether or not they were valid.
pub fn process_tick(
    session: &mut GazeSession,
    display: &DisplayGeometry,
    classifier: &ClassifierConfig,
    mode: VelocityMode,
    sample: &RawBinocularSample,
) -> Option<ClassifiedGazeEvent> {
    let Some(previous_ts) = session.previous_system_timestamp_us else {
        log::debug!(
            "Bootstrap tick at {} us, no event emitted",
            sample.system_timestamp_us
        );
        store_baseline(session, sample);
        return None;
    };

    let raw_interval = sample.system_timestamp_us.saturating_sub(previous_ts);
    if raw_interval < 0 {
        log::debug!(
            "Timestamp went backwards by {} us, clamping interval to 0",
            raw_interval.unsigned_abs()
        );
    }
    let interval_us = raw_interval.max(0);

    let left = process_eye(
        &mut session.left,
        &sample.left,
        interval_us,
        display,
        classifier,
        mode,
    );
    let right = process_eye(
        &mut session.right,
        &sample.right,
        interval_us,
        display,
        classifier,
        mode,
    );

    log::trace!(
        "dt={}us left={:.2}deg/s {} right={:.2}deg/s {}",
        interval_us,
        left.angular_velocity_deg_per_sec,
        left.movement.as_str(),
        right.angular_velocity_deg_per_sec,
        right.movement.as_str()
    );

    store_baseline(session, sample);

    Some(ClassifiedGazeEvent {
        device_timestamp_us: sample.device_timestamp_us,
        system_timestamp_us: sample.system_timestamp_us,
        interval_us,
        left,
        right,
    })
}

fn process_eye(
    state: &mut PerEyeState,
    current: &RawGazeSample,
    interval_us: i64,
    display: &DisplayGeometry,
    classifier: &ClassifierConfig,
    mode: VelocityMode,
) -> EyeEvent {
    let velocity = state
        .previous_sample
        .as_ref()
        .and_then(|previous| {
            estimate_angular_velocity(interval_us, current, previous, mode, display)
        });
    let movement = classify(state, velocity, interval_us, classifier);

    EyeEvent {
        position_px: display.to_pixels(current.gaze_point_normalized),
        valid: current.validity && velocity.is_some(),
        angular_velocity_deg_per_sec: velocity.unwrap_or(f64::NAN),
        movement,
    }
}

fn store_baseline(session: &mut GazeSession, sample: &RawBinocularSample) {
    session.left.previous_sample = Some(sample.left);
    session.right.previous_sample = Some(sample.right);
    session.previous_system_timestamp_us = Some(sample.system_timestamp_us);
}
