//! Per-eye velocity-threshold classifier with a duration hysteresis.
//!
//! A below-threshold run starts out as `NotASaccade` and is promoted to
//! `Fixation` once it has lasted `not_a_saccade_duration_threshold_ms`.
//! A saccade ends the run. Indeterminate ticks are gaps: they neither extend
//! nor end the run.

use crate::constants::MICROS_PER_MILLI;
use crate::types::{MovementType, ProcessorConfig, RawGazeSample};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassifierConfig {
    /// `<= 0` disables classification.
    pub velocity_threshold_deg_per_sec: f64,
    pub not_a_saccade_duration_threshold_ms: i32,
}

impl ClassifierConfig {
    pub fn from_config(config: &ProcessorConfig) -> Self {
        Self {
            velocity_threshold_deg_per_sec: config.velocity_threshold_deg_per_sec,
            not_a_saccade_duration_threshold_ms: config.not_a_saccade_duration_threshold_ms,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.velocity_threshold_deg_per_sec > 0.0
    }
}

/// Everything the processor remembers about one eye between ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PerEyeState {
    pub(crate) previous_sample: Option<RawGazeSample>,
    /// Length of the current below-threshold run, kept in microseconds so
    /// sub-millisecond intervals from fast trackers are not truncated away.
    pub(crate) accumulated_not_a_saccade_us: i64,
}

impl PerEyeState {
    pub fn previous_sample(&self) -> Option<&RawGazeSample> {
        self.previous_sample.as_ref()
    }

    pub fn accumulated_not_a_saccade_us(&self) -> i64 {
        self.accumulated_not_a_saccade_us
    }

    /// Whole milliseconds of the current below-threshold run.
    pub fn accumulated_not_a_saccade_ms(&self) -> i64 {
        self.accumulated_not_a_saccade_us / MICROS_PER_MILLI
    }
}

/// Classifies one tick for one eye and updates its run length.
///
/// `velocity` is `None` when the estimator could not determine it.
pub fn classify(
    state: &mut PerEyeState,
    velocity: Option<f64>,
    interval_us: i64,
    config: &ClassifierConfig,
) -> MovementType {
    if !config.is_enabled() {
        return MovementType::Unknown;
    }

    let Some(velocity) = velocity else {
        return MovementType::Unknown;
    };

    if velocity > config.velocity_threshold_deg_per_sec {
        state.accumulated_not_a_saccade_us = 0;
        return MovementType::Saccade;
    }

    state.accumulated_not_a_saccade_us = state
        .accumulated_not_a_saccade_us
        .saturating_add(interval_us.max(0));

    let threshold_us = i64::from(config.not_a_saccade_duration_threshold_ms) * MICROS_PER_MILLI;
    if state.accumulated_not_a_saccade_us >= threshold_us {
        MovementType::Fixation
    } else {
        MovementType::NotASaccade
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEN_MS: i64 = 10_000;

    fn config(threshold: f64, duration_ms: i32) -> ClassifierConfig {
        ClassifierConfig {
            velocity_threshold_deg_per_sec: threshold,
            not_a_saccade_duration_threshold_ms: duration_ms,
        }
    }

    #[test]
    fn fast_movement_is_a_saccade_and_resets_the_run() {
        let mut state = PerEyeState {
            accumulated_not_a_saccade_us: 90_000,
            ..Default::default()
        };
        let movement = classify(&mut state, Some(100.0), TEN_MS, &config(30.0, 150));
        assert_eq!(movement, MovementType::Saccade);
        assert_eq!(state.accumulated_not_a_saccade_ms(), 0);
    }

    #[test]
    fn velocity_equal_to_threshold_is_not_a_saccade() {
        let mut state = PerEyeState::default();
        let movement = classify(&mut state, Some(30.0), TEN_MS, &config(30.0, 150));
        assert_eq!(movement, MovementType::NotASaccade);
        assert_eq!(state.accumulated_not_a_saccade_ms(), 10);
    }

    #[test]
    fn fixation_is_reported_exactly_when_the_run_reaches_the_threshold() {
        let mut state = PerEyeState::default();
        let cfg = config(30.0, 150);

        for tick in 1..=15 {
            let movement = classify(&mut state, Some(5.0), TEN_MS, &cfg);
            if tick < 15 {
                assert_eq!(movement, MovementType::NotASaccade, "tick {}", tick);
            } else {
                assert_eq!(movement, MovementType::Fixation, "tick {}", tick);
            }
        }
        assert_eq!(state.accumulated_not_a_saccade_ms(), 150);

        assert_eq!(classify(&mut state, Some(5.0), TEN_MS, &cfg), MovementType::Fixation);
    }

    #[test]
    fn zero_duration_threshold_fixates_immediately() {
        let mut state = PerEyeState::default();
        assert_eq!(
            classify(&mut state, Some(1.0), TEN_MS, &config(30.0, 0)),
            MovementType::Fixation
        );
    }

    #[test]
    fn disabled_classification_reports_unknown_and_leaves_run_alone() {
        let mut state = PerEyeState {
            accumulated_not_a_saccade_us: 40_000,
            ..Default::default()
        };
        for threshold in [0.0, -5.0] {
            for velocity in [Some(0.0), Some(1_000.0), None] {
                let movement = classify(&mut state, velocity, TEN_MS, &config(threshold, 150));
                assert_eq!(movement, MovementType::Unknown);
            }
        }
        assert_eq!(state.accumulated_not_a_saccade_us(), 40_000);
    }

    #[test]
    fn indeterminate_velocity_is_a_gap_in_the_run() {
        let mut state = PerEyeState {
            accumulated_not_a_saccade_us: 70_000,
            ..Default::default()
        };
        let movement = classify(&mut state, None, TEN_MS, &config(30.0, 150));
        assert_eq!(movement, MovementType::Unknown);
        assert_eq!(state.accumulated_not_a_saccade_us(), 70_000);
    }

    #[test]
    fn sub_millisecond_intervals_still_accumulate() {
        // 1200 Hz tracker.
        let mut state = PerEyeState::default();
        let cfg = config(30.0, 1);
        assert_eq!(classify(&mut state, Some(2.0), 833, &cfg), MovementType::NotASaccade);
        assert_eq!(classify(&mut state, Some(2.0), 833, &cfg), MovementType::Fixation);
        assert_eq!(state.accumulated_not_a_saccade_us(), 1_666);
    }
}
