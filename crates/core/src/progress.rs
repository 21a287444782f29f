//! Progress interpolation for one announce+play cycle.
//!
//! Progress is a linear walk across two weighted phases: the announcement
//! (a fixed per-mode estimate) and the audio clip (actual length when the
//! player knows it, else a fallback). Estimates saturate just below full;
//! only explicit cycle completion reads exactly 100.

use std::time::Duration;

/// Highest value an estimate may report before the cycle completes.
pub const ESTIMATE_CEILING: f32 = 99.0;

//
// ─── PLAYBACK POSITION ─────────────────────────────────────────────────────────
//

/// Where playback currently is inside a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackPosition {
    pub position: Duration,
    pub duration: Duration,
}

impl PlaybackPosition {
    /// Fraction played, clamped to [0, 1].
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.position.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

//
// ─── CYCLE TIMELINE ────────────────────────────────────────────────────────────
//

/// The two weighted phases of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleTimeline {
    announce: Duration,
    audio: Duration,
}

impl CycleTimeline {
    #[must_use]
    pub fn new(announce: Duration, audio: Duration) -> Self {
        Self { announce, audio }
    }

    /// Audio-only variant: the whole bar belongs to the clip.
    #[must_use]
    pub fn audio_only(audio: Duration) -> Self {
        Self {
            announce: Duration::ZERO,
            audio,
        }
    }

    #[must_use]
    pub fn announce(&self) -> Duration {
        self.announce
    }

    #[must_use]
    pub fn audio(&self) -> Duration {
        self.audio
    }

    #[must_use]
    pub fn total(&self) -> Duration {
        self.announce + self.audio
    }

    /// Fraction of the bar owned by the announcement phase.
    #[must_use]
    pub fn split_point(&self) -> f32 {
        let total = self.total();
        if total.is_zero() {
            return 0.0;
        }
        self.announce.as_secs_f32() / total.as_secs_f32()
    }

    /// Timer-polled estimate: percent for a given elapsed time since cycle
    /// start, linear within each phase.
    #[must_use]
    pub fn percent_at(&self, elapsed: Duration) -> f32 {
        let total = self.total();
        if total.is_zero() {
            return 100.0;
        }

        let split = self.split_point();
        if elapsed < self.announce {
            let frac = elapsed.as_secs_f32() / self.announce.as_secs_f32();
            return frac * split * 100.0;
        }

        if self.audio.is_zero() {
            return 100.0;
        }
        let into_audio = elapsed - self.announce;
        let frac = (into_audio.as_secs_f32() / self.audio.as_secs_f32()).clamp(0.0, 1.0);
        (split + frac * (1.0 - split)) * 100.0
    }

    /// Event-driven estimate: percent for a playback position inside the
    /// audio phase (the announcement phase is fully behind us).
    #[must_use]
    pub fn percent_at_position(&self, position: PlaybackPosition) -> f32 {
        let split = self.split_point();
        (split + position.fraction() * (1.0 - split)) * 100.0
    }
}

//
// ─── PROGRESS METER ────────────────────────────────────────────────────────────
//

/// Monotonic per-cycle progress value.
///
/// Observations never move the needle backwards, estimates are held below
/// `ESTIMATE_CEILING`, and only `complete()` reads exactly 100.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProgressMeter {
    high_water: f32,
    completed: bool,
}

impl ProgressMeter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to zero at the start of a new cycle.
    pub fn reset(&mut self) {
        self.high_water = 0.0;
        self.completed = false;
    }

    /// Feed an estimate; ignored if lower than what was already shown.
    pub fn observe(&mut self, percent: f32) {
        if self.completed {
            return;
        }
        let clamped = percent.clamp(0.0, ESTIMATE_CEILING);
        if clamped > self.high_water {
            self.high_water = clamped;
        }
    }

    /// The cycle finished; from here the meter reads exactly 100.
    pub fn complete(&mut self) {
        self.completed = true;
        self.high_water = 100.0;
    }

    #[must_use]
    pub fn percent(&self) -> f32 {
        self.high_water
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline() -> CycleTimeline {
        CycleTimeline::new(Duration::from_millis(1_500), Duration::from_millis(2_000))
    }

    #[test]
    fn split_point_weighs_announce_against_total() {
        let t = timeline();
        let expected = 1.5 / 3.5;
        assert!((t.split_point() - expected).abs() < 1e-6);
    }

    #[test]
    fn percent_is_linear_within_each_phase() {
        let t = timeline();
        assert_eq!(t.percent_at(Duration::ZERO), 0.0);

        // Halfway through the announcement: half the announce share.
        let mid_announce = t.percent_at(Duration::from_millis(750));
        assert!((mid_announce - t.split_point() * 50.0).abs() < 1e-3);

        // Announcement done: exactly the split point.
        let at_split = t.percent_at(Duration::from_millis(1_500));
        assert!((at_split - t.split_point() * 100.0).abs() < 1e-3);

        // Fully elapsed: 100.
        assert!((t.percent_at(Duration::from_millis(3_500)) - 100.0).abs() < 1e-3);
    }

    #[test]
    fn percent_never_decreases_across_samples() {
        let t = timeline();
        let mut last = -1.0_f32;
        for ms in (0..4_000).step_by(100) {
            let p = t.percent_at(Duration::from_millis(ms as u64));
            assert!(p >= last, "progress regressed at {ms}ms: {p} < {last}");
            last = p;
        }
    }

    #[test]
    fn position_estimate_starts_at_split_and_ends_at_100() {
        let t = timeline();
        let start = t.percent_at_position(PlaybackPosition {
            position: Duration::ZERO,
            duration: Duration::from_millis(2_000),
        });
        assert!((start - t.split_point() * 100.0).abs() < 1e-3);

        let end = t.percent_at_position(PlaybackPosition {
            position: Duration::from_millis(2_000),
            duration: Duration::from_millis(2_000),
        });
        assert!((end - 100.0).abs() < 1e-3);
    }

    #[test]
    fn audio_only_timeline_has_zero_split() {
        let t = CycleTimeline::audio_only(Duration::from_secs(2));
        assert_eq!(t.split_point(), 0.0);
        let half = t.percent_at_position(PlaybackPosition {
            position: Duration::from_secs(1),
            duration: Duration::from_secs(2),
        });
        assert!((half - 50.0).abs() < 1e-3);
    }

    #[test]
    fn meter_is_monotonic_and_caps_estimates() {
        let mut meter = ProgressMeter::new();
        meter.observe(40.0);
        meter.observe(25.0);
        assert_eq!(meter.percent(), 40.0);

        meter.observe(250.0);
        assert_eq!(meter.percent(), ESTIMATE_CEILING);
        assert!(!meter.is_complete());

        meter.complete();
        assert_eq!(meter.percent(), 100.0);

        meter.reset();
        assert_eq!(meter.percent(), 0.0);
        assert!(!meter.is_complete());
    }
}
