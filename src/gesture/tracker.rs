use serde::{Deserialize, Serialize};

pub const DEFAULT_FLICK_DISTANCE_PX: f32 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub start_y: f32,
    pub current_y: f32,
    pub start_time_ms: u64,
    pub current_time_ms: u64,
}

impl GestureSample {
    pub fn new(start_y: f32, current_y: f32, start_time_ms: u64, current_time_ms: u64) -> Self {
        Self {
            start_y,
            current_y,
            start_time_ms,
            current_time_ms,
        }
    }

    /// A sample for the first touch point, where start and current coincide.
    pub fn at(y: f32, time_ms: u64) -> Self {
        Self::new(y, y, time_ms, time_ms)
    }

    pub fn moved_to(&self, y: f32, time_ms: u64) -> Self {
        Self::new(self.start_y, y, self.start_time_ms, time_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    SnapOpen,
    Dismiss,
    None,
}

/// Which displacement the release decision is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseMetric {
    #[default]
    Final,
    Peak,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSettings {
    pub flick_distance_px: f32,
    pub timing_tick_ms: u64,
    pub release_metric: ReleaseMetric,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            flick_distance_px: DEFAULT_FLICK_DISTANCE_PX,
            timing_tick_ms: 1,
            release_metric: ReleaseMetric::Final,
        }
    }
}

impl GestureSettings {
    pub fn elapsed_ticks(&self, sample: &GestureSample) -> u64 {
        let tick = self.timing_tick_ms.max(1);
        (sample.current_time_ms / tick).saturating_sub(sample.start_time_ms / tick)
    }
}

/// Downward travel of the sample, clamped so upward drags never move the panel.
pub fn displacement(sample: &GestureSample) -> f32 {
    let delta = sample.current_y - sample.start_y;
    if delta.is_nan() { 0.0 } else { delta.max(0.0) }
}

pub fn decide(
    travelled: f32,
    elapsed_ticks: u64,
    panel_height: f32,
    settings: &GestureSettings,
) -> Decision {
    if travelled == 0.0 {
        return Decision::None;
    }

    if elapsed_ticks == 0 && travelled < settings.flick_distance_px {
        return Decision::Dismiss;
    }

    let threshold = panel_height.max(0.0) / 3.0;
    if travelled < threshold {
        Decision::SnapOpen
    } else {
        Decision::Dismiss
    }
}

#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    settings: GestureSettings,
    start: Option<(f32, u64)>,
    peak: f32,
}

impl GestureTracker {
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            settings,
            start: None,
            peak: 0.0,
        }
    }

    pub fn settings(&self) -> &GestureSettings {
        &self.settings
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }

    pub fn on_start(&mut self, sample: GestureSample) {
        self.start = Some((sample.start_y, sample.start_time_ms));
        self.peak = 0.0;
    }

    pub fn on_move(&mut self, sample: GestureSample) -> f32 {
        let travelled = displacement(&self.anchored(sample));
        self.peak = self.peak.max(travelled);
        tracing::trace!(travelled, "gesture move");
        travelled
    }

    pub fn on_end(&mut self, sample: GestureSample, panel_height: f32) -> Decision {
        let sample = self.anchored(sample);
        let final_travel = displacement(&sample);
        let travelled = match self.settings.release_metric {
            ReleaseMetric::Final => final_travel,
            ReleaseMetric::Peak => self.peak.max(final_travel),
        };
        let ticks = self.settings.elapsed_ticks(&sample);
        self.start = None;
        self.peak = 0.0;

        let decision = decide(travelled, ticks, panel_height, &self.settings);
        tracing::debug!(travelled, ticks, panel_height, ?decision, "gesture released");
        decision
    }

    fn anchored(&self, sample: GestureSample) -> GestureSample {
        match self.start {
            Some((start_y, start_time_ms)) => GestureSample {
                start_y,
                start_time_ms,
                ..sample
            },
            None => sample,
        }
    }
}
