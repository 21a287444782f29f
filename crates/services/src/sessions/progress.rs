use std::time::Duration;

use zoo_core::progress::{CycleTimeline, PlaybackPosition};

//
// ─── SAMPLE ────────────────────────────────────────────────────────────────────
//

/// What the controller knows at the moment progress is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressSample {
    Announcing {
        elapsed: Duration,
    },
    PlayingAudio {
        /// Elapsed since cycle start, announcement included.
        elapsed: Duration,
        /// Playback position when the player tracks one.
        position: Option<PlaybackPosition>,
    },
}

//
// ─── ESTIMATORS ────────────────────────────────────────────────────────────────
//

/// Maps a sample onto the cycle's progress bar.
///
/// Two strategies exist because the modes disagree: practice and exam poll a
/// timer, the slideshow follows the player's own position for smoother
/// accuracy. The mode driver picks one at session start.
pub trait ProgressEstimator: Send + Sync {
    fn percent(&self, timeline: &CycleTimeline, sample: &ProgressSample) -> f32;
}

/// Linear in elapsed wall time across both phases.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElapsedTimeEstimator;

impl ProgressEstimator for ElapsedTimeEstimator {
    fn percent(&self, timeline: &CycleTimeline, sample: &ProgressSample) -> f32 {
        match sample {
            ProgressSample::Announcing { elapsed }
            | ProgressSample::PlayingAudio { elapsed, .. } => timeline.percent_at(*elapsed),
        }
    }
}

/// Follows the clip's playback position inside the audio phase, falling
/// back to elapsed time while announcing or when the player reports nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaybackPositionEstimator;

impl ProgressEstimator for PlaybackPositionEstimator {
    fn percent(&self, timeline: &CycleTimeline, sample: &ProgressSample) -> f32 {
        match sample {
            ProgressSample::Announcing { elapsed } => timeline.percent_at(*elapsed),
            ProgressSample::PlayingAudio { elapsed, position } => position
                .map_or_else(|| timeline.percent_at(*elapsed), |p| {
                    timeline.percent_at_position(p)
                }),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline() -> CycleTimeline {
        CycleTimeline::new(Duration::from_millis(1_500), Duration::from_secs(2))
    }

    #[test]
    fn elapsed_estimator_is_linear_over_the_whole_cycle() {
        let estimator = ElapsedTimeEstimator;
        let t = timeline();

        let announcing = estimator.percent(
            &t,
            &ProgressSample::Announcing {
                elapsed: Duration::from_millis(750),
            },
        );
        assert!((announcing - t.split_point() * 50.0).abs() < 1e-3);

        let done = estimator.percent(
            &t,
            &ProgressSample::PlayingAudio {
                elapsed: Duration::from_millis(3_500),
                position: None,
            },
        );
        assert!((done - 100.0).abs() < 1e-3);
    }

    #[test]
    fn position_estimator_prefers_playback_position() {
        let estimator = PlaybackPositionEstimator;
        let t = timeline();

        let sample = ProgressSample::PlayingAudio {
            // Deliberately inconsistent elapsed value: position must win.
            elapsed: Duration::ZERO,
            position: Some(PlaybackPosition {
                position: Duration::from_secs(2),
                duration: Duration::from_secs(2),
            }),
        };
        assert!((estimator.percent(&t, &sample) - 100.0).abs() < 1e-3);
    }

    #[test]
    fn position_estimator_falls_back_to_elapsed() {
        let estimator = PlaybackPositionEstimator;
        let t = timeline();

        let sample = ProgressSample::PlayingAudio {
            elapsed: Duration::from_millis(3_500),
            position: None,
        };
        assert!((estimator.percent(&t, &sample) - 100.0).abs() < 1e-3);
    }
}
