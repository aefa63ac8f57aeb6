//! Frame pacing and performance monitoring.
//!
//! The host calls the pacer once per rendered frame. Frames that arrive
//! sooner than the target interval are skipped entirely; the rest produce a
//! clamped tick delta. The performance monitor watches frame times and
//! lowers the quality tier when frames run long.

use std::collections::VecDeque;

use starfall_core::config::CombatConfig;
use starfall_core::constants::{PERF_DEGRADE_FRAME_TIME, PERF_RECOVER_FRAME_TIME, PERF_SAMPLE_WINDOW};
use starfall_core::enums::QualityLevel;
use starfall_core::types::clamp_dt;

/// Frame-skip policy.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: f64,
    max_dt: f32,
    last_tick_at: Option<f64>,
}

impl FramePacer {
    pub fn new(interval: f32, max_dt: f32) -> Self {
        Self {
            interval: f64::from(interval.max(0.0)),
            max_dt,
            last_tick_at: None,
        }
    }

    pub fn from_config(config: &CombatConfig) -> Self {
        Self::new(config.target_frame_interval, config.max_tick_dt)
    }

    /// Offer a frame at `now` seconds. Returns the tick delta, or `None` if
    /// this frame should not tick.
    ///
    /// The first frame only starts the clock.
    pub fn frame(&mut self, now: f64) -> Option<f32> {
        let Some(last) = self.last_tick_at else {
            self.last_tick_at = Some(now);
            return None;
        };
        let elapsed = now - last;
        if elapsed < self.interval {
            return None;
        }
        self.last_tick_at = Some(now);
        Some(clamp_dt(elapsed as f32, self.max_dt))
    }

    /// Forget the last tick, e.g. after a pause.
    pub fn reset(&mut self) {
        self.last_tick_at = None;
    }
}

/// Rolling frame-time average with a degrade/recover band.
#[derive(Debug, Clone)]
pub struct PerformanceMonitor {
    samples: VecDeque<f32>,
    quality: QualityLevel,
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self {
            samples: VecDeque::with_capacity(PERF_SAMPLE_WINDOW),
            quality: QualityLevel::Normal,
        }
    }
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame time (seconds) and return the resulting quality.
    /// Quality only changes once the sample window is full.
    pub fn record(&mut self, frame_time: f32) -> QualityLevel {
        if !frame_time.is_finite() || frame_time < 0.0 {
            return self.quality;
        }
        if self.samples.len() == PERF_SAMPLE_WINDOW {
            self.samples.pop_front();
        }
        self.samples.push_back(frame_time);
        if self.samples.len() < PERF_SAMPLE_WINDOW {
            return self.quality;
        }

        let average = self.average();
        let next = match self.quality {
            QualityLevel::Normal if average > PERF_DEGRADE_FRAME_TIME => QualityLevel::Degraded,
            QualityLevel::Degraded if average < PERF_RECOVER_FRAME_TIME => QualityLevel::Normal,
            current => current,
        };
        if next != self.quality {
            log::info!("Quality {:?} -> {:?} (avg frame {:.4}s)", self.quality, next, average);
            self.quality = next;
        }
        self.quality
    }

    pub fn average(&self) -> f32 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.samples.iter().sum::<f32>() / self.samples.len() as f32
        }
    }

    pub fn quality(&self) -> QualityLevel {
        self.quality
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_starts_clock() {
        let mut pacer = FramePacer::new(1.0 / 60.0, 0.1);
        assert_eq!(pacer.frame(5.0), None);
        let dt = pacer.frame(5.02).unwrap();
        assert!((dt - 0.02).abs() < 1e-4);
    }

    #[test]
    fn test_early_frames_are_skipped() {
        let mut pacer = FramePacer::new(1.0 / 60.0, 0.1);
        pacer.frame(0.0);
        assert_eq!(pacer.frame(0.005), None);
        assert_eq!(pacer.frame(0.010), None);
        // Skipped frames do not reset the clock.
        let dt = pacer.frame(0.020).unwrap();
        assert!((dt - 0.020).abs() < 1e-4);
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut pacer = FramePacer::new(1.0 / 60.0, 0.1);
        pacer.frame(0.0);
        assert_eq!(pacer.frame(3.0), Some(0.1));
        pacer.reset();
        assert_eq!(pacer.frame(10.0), None);
    }

    #[test]
    fn test_quality_degrades_and_recovers() {
        let mut monitor = PerformanceMonitor::new();
        for _ in 0..PERF_SAMPLE_WINDOW {
            monitor.record(0.033);
        }
        assert_eq!(monitor.quality(), QualityLevel::Degraded);

        // Inside the band: stays degraded.
        for _ in 0..PERF_SAMPLE_WINDOW {
            monitor.record(0.022);
        }
        assert_eq!(monitor.quality(), QualityLevel::Degraded);

        for _ in 0..PERF_SAMPLE_WINDOW {
            monitor.record(0.016);
        }
        assert_eq!(monitor.quality(), QualityLevel::Normal);
    }

    #[test]
    fn test_partial_window_keeps_quality() {
        let mut monitor = PerformanceMonitor::new();
        for _ in 0..PERF_SAMPLE_WINDOW - 1 {
            assert_eq!(monitor.record(0.5), QualityLevel::Normal);
        }
        assert_eq!(monitor.record(f32::NAN), QualityLevel::Normal);
    }
}
