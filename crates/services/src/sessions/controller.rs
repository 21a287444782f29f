use std::fmt;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use speech::{ClipPlayer, RecognizerConfig, SpeechStack};
use zoo_core::Clock;
use zoo_core::matching::evaluate_attempt;
use zoo_core::model::{
    Animal, AttemptEvaluation, AttemptOutcome, Roster, SessionPhase, SessionSettings,
    SessionToken,
};
use zoo_core::progress::{CycleTimeline, ProgressMeter};

use crate::error::SessionError;
use super::exam::ExamSession;
use super::ownership::{SessionGuard, SessionRegistry};
use super::practice::PracticeSession;
use super::progress::{
    ElapsedTimeEstimator, PlaybackPositionEstimator, ProgressEstimator, ProgressSample,
};
use super::prompts::Prompts;
use super::slideshow::SlideshowSession;

//
// ─── CYCLE STATE ───────────────────────────────────────────────────────────────
//

/// Mutable per-cycle state, shared with monitors so a UI timer can sample
/// progress while the controller is awaiting a capability.
struct CycleState {
    phase: SessionPhase,
    attempt_count: u32,
    last_result: Option<AttemptOutcome>,
    meter: ProgressMeter,
    timeline: CycleTimeline,
    cycle_started_at: Option<DateTime<Utc>>,
}

impl CycleState {
    fn new(timeline: CycleTimeline) -> Self {
        Self {
            phase: SessionPhase::Idle,
            attempt_count: 0,
            last_result: None,
            meter: ProgressMeter::new(),
            timeline,
            cycle_started_at: None,
        }
    }
}

fn sample_shared_progress(
    state: &Mutex<CycleState>,
    player: &Arc<dyn ClipPlayer>,
    estimator: &Arc<dyn ProgressEstimator>,
    clock: Clock,
    guard: &SessionGuard,
) -> f32 {
    // A stale timer sampling a superseded session reads the frozen value.
    let mut state = state.lock().expect("cycle state lock");
    if !guard.is_current() {
        return state.meter.percent();
    }
    let Some(started_at) = state.cycle_started_at else {
        return state.meter.percent();
    };
    let sample = match state.phase {
        SessionPhase::Announcing => ProgressSample::Announcing {
            elapsed: clock.elapsed_since(started_at),
        },
        SessionPhase::PlayingAudio => ProgressSample::PlayingAudio {
            elapsed: clock.elapsed_since(started_at),
            position: player.playback_position(),
        },
        _ => return state.meter.percent(),
    };
    let percent = estimator.percent(&state.timeline, &sample);
    state.meter.observe(percent);
    state.meter.percent()
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Drives one learning cycle: announce, play the clip, optionally listen,
/// evaluate. The only component with real state-machine behavior; the mode
/// drivers are thin parameterizations over it.
///
/// Every suspension point re-checks the ownership guard. A superseded
/// controller returns `SessionError::Superseded` without touching its state
/// again, which is how stale timers and late recognizer results are ignored.
pub struct SessionController {
    stack: SpeechStack,
    settings: SessionSettings,
    prompts: Prompts,
    estimator: Arc<dyn ProgressEstimator>,
    clock: Clock,
    guard: SessionGuard,
    audio_only_progress: bool,
    state: Arc<Mutex<CycleState>>,
}

impl SessionController {
    pub(crate) fn new(
        stack: SpeechStack,
        settings: SessionSettings,
        prompts: Prompts,
        estimator: Arc<dyn ProgressEstimator>,
        clock: Clock,
        guard: SessionGuard,
    ) -> Self {
        let timeline =
            CycleTimeline::new(settings.announce_estimate(), settings.audio_fallback());
        Self {
            stack,
            settings,
            prompts,
            estimator,
            clock,
            guard,
            audio_only_progress: false,
            state: Arc::new(Mutex::new(CycleState::new(timeline))),
        }
    }

    /// Weigh the progress bar by the clip alone (slideshow variant).
    #[must_use]
    pub(crate) fn with_audio_only_progress(mut self) -> Self {
        self.audio_only_progress = true;
        self
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.state.lock().expect("cycle state lock").phase
    }

    #[must_use]
    pub fn attempt_count(&self) -> u32 {
        self.state.lock().expect("cycle state lock").attempt_count
    }

    #[must_use]
    pub fn last_result(&self) -> Option<AttemptOutcome> {
        self.state.lock().expect("cycle state lock").last_result
    }

    #[must_use]
    pub fn token(&self) -> SessionToken {
        self.guard.token()
    }

    #[must_use]
    pub fn guard(&self) -> &SessionGuard {
        &self.guard
    }

    #[must_use]
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// True while a capability is in flight; the UI disables controls then.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.phase().is_busy()
    }

    /// A clonable handle for timers that need phase/progress while this
    /// controller is awaiting a capability.
    #[must_use]
    pub fn monitor(&self) -> SessionMonitor {
        SessionMonitor {
            state: Arc::clone(&self.state),
            player: Arc::clone(&self.stack.player),
            estimator: Arc::clone(&self.estimator),
            clock: self.clock,
            guard: self.guard.clone(),
        }
    }

    /// Speak the instructional text for a fresh cycle.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Superseded` once a newer session owns the
    /// channel. Synthesis failures are absorbed, not returned.
    pub async fn announce(&mut self, animal: &Animal) -> Result<(), SessionError> {
        self.guard.ensure_current()?;
        self.begin_cycle(animal);

        let text = self.prompts.instruction(animal);
        let rate = self.settings.announce_rate();
        let result = self.stack.announcer.speak(&text, rate).await;
        self.guard.ensure_current()?;
        if let Err(err) = result {
            warn!(animal = animal.name(), "announcement absorbed: {err}");
        }
        Ok(())
    }

    /// Play the animal's clip to its end.
    ///
    /// Completes the announce+play portion of the cycle: the meter reads
    /// exactly 100 from here. Without recognition the cycle is Evaluated.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Superseded` once a newer session owns the
    /// channel. Playback failures are absorbed, not returned.
    pub async fn play(&mut self, animal: &Animal) -> Result<(), SessionError> {
        self.guard.ensure_current()?;
        self.set_phase(SessionPhase::PlayingAudio);
        debug!(animal = animal.name(), "phase -> PlayingAudio");

        let result = self.stack.player.play(animal.clip()).await;
        self.guard.ensure_current()?;
        if let Err(err) = result {
            warn!(animal = animal.name(), "playback absorbed: {err}");
        }

        let mut state = self.state.lock().expect("cycle state lock");
        state.meter.complete();
        if !self.settings.recognition_enabled() {
            state.phase = SessionPhase::Evaluated;
        }
        Ok(())
    }

    /// Listen once and evaluate the transcript against the animal name.
    ///
    /// Increments the attempt count, speaks the listening prompt, and maps
    /// every recognizer error to `Retry` with a mode-specific spoken
    /// message. `skip_enabled` arms the spoken escape word.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Superseded` once a newer session owns the
    /// channel; recognition errors never propagate.
    pub async fn request_attempt(
        &mut self,
        animal: &Animal,
        skip_enabled: bool,
    ) -> Result<AttemptEvaluation, SessionError> {
        self.guard.ensure_current()?;
        let attempt = {
            let mut state = self.state.lock().expect("cycle state lock");
            state.phase = SessionPhase::AwaitingRecognition;
            state.attempt_count += 1;
            state.attempt_count
        };
        debug!(animal = animal.name(), attempt, "phase -> AwaitingRecognition");

        let listening = self.prompts.listening(animal);
        if !listening.is_empty() {
            let rate = self.settings.announce_rate();
            if let Err(err) = self.stack.announcer.speak(&listening, rate).await {
                warn!("listening prompt absorbed: {err}");
            }
        }
        self.guard.ensure_current()?;

        let config = RecognizerConfig::from_settings(&self.settings);
        let listened = self.stack.recognizer.listen(&config).await;
        self.guard.ensure_current()?;

        let (evaluation, feedback) = match listened {
            Ok(transcript) => {
                let evaluation = evaluate_attempt(&transcript, animal.name(), skip_enabled);
                debug!(
                    animal = animal.name(),
                    %transcript,
                    ?evaluation,
                    "attempt evaluated"
                );
                let feedback = match evaluation {
                    AttemptEvaluation::Success => self.prompts.success(animal),
                    AttemptEvaluation::Retry => self.prompts.retry(),
                    AttemptEvaluation::Skip => self.prompts.skip(animal),
                };
                (evaluation, feedback)
            }
            Err(err) => {
                warn!(animal = animal.name(), "recognition absorbed: {err}");
                (AttemptEvaluation::Retry, self.prompts.recognition_error(&err))
            }
        };

        {
            let mut state = self.state.lock().expect("cycle state lock");
            state.phase = SessionPhase::Evaluated;
            state.last_result = Some(evaluation.to_outcome());
        }

        if !feedback.is_empty() {
            let rate = self.settings.announce_rate();
            if let Err(err) = self.stack.announcer.speak(&feedback, rate).await {
                warn!("feedback absorbed: {err}");
            }
        }

        Ok(evaluation)
    }

    /// Current progress percent; monotonic within the running cycle.
    pub fn sample_progress(&self) -> f32 {
        sample_shared_progress(
            &self.state,
            &self.stack.player,
            &self.estimator,
            self.clock,
            &self.guard,
        )
    }

    /// Back to Idle with zero attempts; used when a session moves to the
    /// next animal or restarts.
    pub fn reset_cycle(&mut self) {
        let mut state = self.state.lock().expect("cycle state lock");
        state.phase = SessionPhase::Idle;
        state.attempt_count = 0;
        state.last_result = None;
        state.meter.reset();
        state.cycle_started_at = None;
    }

    /// Synchronously halt the capabilities and retire the guard.
    ///
    /// Pending completions of this session resolve as `Superseded` and
    /// mutate nothing. A controller that was already superseded does not
    /// touch the capabilities: they belong to someone else now.
    pub fn halt(&self) {
        if !self.guard.is_current() {
            return;
        }
        self.guard.retire();
        self.stack.player.stop();
        self.stack.recognizer.cancel();
    }

    fn set_phase(&self, phase: SessionPhase) {
        self.state.lock().expect("cycle state lock").phase = phase;
    }

    fn begin_cycle(&mut self, animal: &Animal) {
        let audio = self
            .stack
            .player
            .clip_duration(animal.clip())
            .unwrap_or_else(|| self.settings.audio_fallback());
        let timeline = if self.audio_only_progress {
            CycleTimeline::audio_only(audio)
        } else {
            CycleTimeline::new(self.settings.announce_estimate(), audio)
        };

        let mut state = self.state.lock().expect("cycle state lock");
        state.timeline = timeline;
        state.meter.reset();
        state.last_result = None;
        state.cycle_started_at = Some(self.clock.now());
        state.phase = SessionPhase::Announcing;
        debug!(animal = animal.name(), "phase -> Announcing");
    }
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("token", &self.guard.token())
            .field("phase", &self.phase())
            .field("attempt_count", &self.attempt_count())
            .field("last_result", &self.last_result())
            .finish_non_exhaustive()
    }
}

//
// ─── MONITOR ───────────────────────────────────────────────────────────────────
//

/// Read-side handle onto a controller's cycle, safe to poll from a UI timer
/// while the controller itself is parked on an await.
#[derive(Clone)]
pub struct SessionMonitor {
    state: Arc<Mutex<CycleState>>,
    player: Arc<dyn ClipPlayer>,
    estimator: Arc<dyn ProgressEstimator>,
    clock: Clock,
    guard: SessionGuard,
}

impl SessionMonitor {
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.state.lock().expect("cycle state lock").phase
    }

    #[must_use]
    pub fn attempt_count(&self) -> u32 {
        self.state.lock().expect("cycle state lock").attempt_count
    }

    #[must_use]
    pub fn last_result(&self) -> Option<AttemptOutcome> {
        self.state.lock().expect("cycle state lock").last_result
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.phase().is_busy()
    }

    #[must_use]
    pub fn is_current(&self) -> bool {
        self.guard.is_current()
    }

    /// Sample and return the monotonic cycle progress.
    #[must_use]
    pub fn progress(&self) -> f32 {
        sample_shared_progress(
            &self.state,
            &self.player,
            &self.estimator,
            self.clock,
            &self.guard,
        )
    }
}

//
// ─── FACTORY ───────────────────────────────────────────────────────────────────
//

/// Builds mode sessions over one shared capability stack.
///
/// Starting any session takes ownership of the audio/mic channel and
/// invalidates whatever ran before it.
#[derive(Clone)]
pub struct SessionFactory {
    stack: SpeechStack,
    clock: Clock,
    registry: SessionRegistry,
    locale: Option<String>,
    announce_rate: Option<f32>,
}

impl SessionFactory {
    #[must_use]
    pub fn new(stack: SpeechStack, clock: Clock) -> Self {
        Self {
            stack,
            clock,
            registry: SessionRegistry::new(),
            locale: None,
            announce_rate: None,
        }
    }

    /// Override the recognizer locale for every session built here.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Override the announcement rate for every session built here.
    #[must_use]
    pub fn with_announce_rate(mut self, rate: f32) -> Self {
        self.announce_rate = Some(rate);
        self
    }

    #[must_use]
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Free practice for a single animal.
    #[must_use]
    pub fn practice(&self, animal: Animal) -> PracticeSession {
        let controller = self.controller(
            SessionSettings::default_for_practice(),
            Prompts::practice(),
            Arc::new(ElapsedTimeEstimator),
        );
        PracticeSession::new(controller, animal)
    }

    /// Guided slideshow across the roster.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` for an empty roster.
    pub fn slideshow(&self, roster: &Roster) -> Result<SlideshowSession, SessionError> {
        if roster.is_empty() {
            return Err(SessionError::Empty);
        }
        let controller = self
            .controller(
                SessionSettings::default_for_slideshow(),
                Prompts::slideshow(),
                Arc::new(PlaybackPositionEstimator),
            )
            .with_audio_only_progress();
        Ok(SlideshowSession::new(controller, roster.animals().to_vec()))
    }

    /// Scored oral exam across the roster.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` for an empty roster.
    pub fn exam(&self, roster: &Roster) -> Result<ExamSession, SessionError> {
        if roster.is_empty() {
            return Err(SessionError::Empty);
        }
        let controller = self.controller(
            SessionSettings::default_for_exam(),
            Prompts::exam(),
            Arc::new(ElapsedTimeEstimator),
        );
        Ok(ExamSession::new(controller, roster.animals().to_vec()))
    }

    /// Halt whatever session currently owns the channel.
    pub fn stop_all(&self) {
        self.registry.invalidate_all();
        self.stack.player.stop();
        self.stack.recognizer.cancel();
    }

    fn controller(
        &self,
        settings: SessionSettings,
        prompts: Prompts,
        estimator: Arc<dyn ProgressEstimator>,
    ) -> SessionController {
        let mut settings = settings;
        if let Some(locale) = &self.locale {
            settings = settings.with_locale(locale.clone());
        }
        if let Some(rate) = self.announce_rate {
            settings = settings.with_announce_rate(rate);
        }
        SessionController::new(
            self.stack.clone(),
            settings,
            prompts,
            estimator,
            self.clock,
            self.registry.begin(),
        )
    }
}

impl fmt::Debug for SessionFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionFactory")
            .field("stack", &self.stack)
            .field("locale", &self.locale)
            .field("announce_rate", &self.announce_rate)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use speech::scripted::scripted_stack;
    use zoo_core::model::ClipRef;
    use zoo_core::time::fixed_clock;

    fn cow() -> Animal {
        let clip = ClipRef::from_file("cow.mp3").unwrap();
        Animal::new("Cow", "moo", "🐄", clip).unwrap()
    }

    #[tokio::test]
    async fn practice_cycle_walks_the_phases() {
        let (stack, handles) = scripted_stack();
        let factory = SessionFactory::new(stack, fixed_clock());
        let mut practice = factory.practice(cow());

        assert_eq!(practice.phase(), SessionPhase::Idle);
        practice.play().await.unwrap();
        // Recognition is enabled, so the cycle parks after playback.
        assert_eq!(practice.phase(), SessionPhase::PlayingAudio);
        assert!((practice.sample_progress() - 100.0).abs() < f32::EPSILON);

        handles.recognizer.push_transcript("a cow");
        let evaluation = practice.listen().await.unwrap();
        assert_eq!(evaluation, AttemptEvaluation::Success);
        assert_eq!(practice.phase(), SessionPhase::Evaluated);
        assert_eq!(practice.last_result(), Some(AttemptOutcome::Success));
        assert_eq!(practice.attempt_count(), 1);
    }

    #[tokio::test]
    async fn attempts_accumulate_until_reset() {
        let (stack, handles) = scripted_stack();
        let factory = SessionFactory::new(stack, fixed_clock());
        let mut practice = factory.practice(cow());

        handles.recognizer.push_transcript("a pig");
        handles.recognizer.push_transcript("a horse");
        practice.listen().await.unwrap();
        practice.listen().await.unwrap();
        assert_eq!(practice.attempt_count(), 2);
        assert_eq!(practice.last_result(), Some(AttemptOutcome::Retry));
    }

    #[tokio::test]
    async fn progress_is_zero_at_cycle_start_under_a_fixed_clock() {
        let (stack, _handles) = scripted_stack();
        let factory = SessionFactory::new(stack, fixed_clock());
        let practice = factory.practice(cow());

        assert_eq!(practice.sample_progress(), 0.0);
    }

    #[tokio::test]
    async fn practice_never_arms_the_skip_word() {
        let (stack, handles) = scripted_stack();
        let factory = SessionFactory::new(stack, fixed_clock());
        let mut practice = factory.practice(cow());

        handles.recognizer.push_transcript("next");
        let evaluation = practice.listen().await.unwrap();
        assert_eq!(evaluation, AttemptEvaluation::Retry);
    }

    #[tokio::test]
    async fn monitor_reads_state_while_detached_from_the_controller() {
        let (stack, handles) = scripted_stack();
        let factory = SessionFactory::new(stack, fixed_clock());
        let mut practice = factory.practice(cow());
        let monitor = practice.monitor();

        practice.play().await.unwrap();
        assert_eq!(monitor.phase(), SessionPhase::PlayingAudio);
        assert!((monitor.progress() - 100.0).abs() < f32::EPSILON);

        handles.recognizer.push_transcript("cow");
        practice.listen().await.unwrap();
        assert_eq!(monitor.attempt_count(), 1);
        assert_eq!(monitor.last_result(), Some(AttemptOutcome::Success));
        assert!(monitor.is_current());
    }
}
