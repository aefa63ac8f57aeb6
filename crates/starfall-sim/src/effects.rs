//! Effect timeline.
//!
//! Visual effects are plain data with a start tick and a duration. The
//! timeline keeps the ones still running and reports how far along each is,
//! so the renderer can animate them without any timer callbacks.

use starfall_core::events::EffectRequest;

/// An effect that is still running.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveEffect {
    pub request: EffectRequest,
    /// 0.0 at the start tick, approaching 1.0 on the last tick.
    pub progress: f32,
}

#[derive(Debug, Default)]
pub struct EffectTimeline {
    running: Vec<EffectRequest>,
}

impl EffectTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingest(&mut self, requests: impl IntoIterator<Item = EffectRequest>) {
        self.running.extend(requests);
    }

    /// Drop effects that have finished by `tick`.
    pub fn expire(&mut self, tick: u64) {
        self.running
            .retain(|e| tick < e.start_tick + u64::from(e.duration_ticks));
    }

    /// Drop finished effects and return the rest with their progress at `tick`.
    pub fn poll(&mut self, tick: u64) -> Vec<ActiveEffect> {
        self.expire(tick);
        self.running
            .iter()
            .map(|e| ActiveEffect {
                request: *e,
                progress: tick.saturating_sub(e.start_tick) as f32 / e.duration_ticks as f32,
            })
            .collect()
    }

    /// Requests still running, oldest first.
    pub fn requests(&self) -> &[EffectRequest] {
        &self.running
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    pub fn clear(&mut self) {
        self.running.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfall_core::enums::EffectKind;
    use starfall_core::Vec3;

    fn request(start_tick: u64, duration_ticks: u32) -> EffectRequest {
        EffectRequest {
            kind: EffectKind::Explosion,
            position: Vec3::ZERO,
            start_tick,
            duration_ticks,
        }
    }

    #[test]
    fn test_progress_and_expiry() {
        let mut timeline = EffectTimeline::new();
        timeline.ingest([request(10, 4)]);

        let active = timeline.poll(10);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].progress, 0.0);

        let active = timeline.poll(12);
        assert_eq!(active[0].progress, 0.5);

        assert!(timeline.poll(14).is_empty());
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_expire_without_poll() {
        let mut timeline = EffectTimeline::new();
        timeline.ingest([request(0, 3), request(2, 3)]);
        timeline.expire(3);
        assert_eq!(timeline.requests(), &[request(2, 3)]);
        timeline.expire(5);
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_zero_duration_never_runs() {
        let mut timeline = EffectTimeline::new();
        timeline.ingest([request(5, 0)]);
        assert!(timeline.poll(5).is_empty());
    }

    #[test]
    fn test_effects_expire_independently() {
        let mut timeline = EffectTimeline::new();
        timeline.ingest([request(0, 2), request(0, 10)]);
        assert_eq!(timeline.poll(1).len(), 2);
        assert_eq!(timeline.poll(5).len(), 1);
        timeline.clear();
        assert_eq!(timeline.len(), 0);
    }
}
