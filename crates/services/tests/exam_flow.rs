use services::{SessionError, SessionFactory};
use speech::RecognitionError;
use speech::scripted::{ScriptedHandles, scripted_stack};
use zoo_core::model::{Animal, AttemptOutcome, ClipRef, Roster};
use zoo_core::time::fixed_clock;

fn animal(name: &str, sound: &str) -> Animal {
    let clip = ClipRef::from_file(format!("{}.mp3", name.to_lowercase())).unwrap();
    Animal::new(name, sound, "🐾", clip).unwrap()
}

fn small_roster() -> Roster {
    Roster::new(vec![
        animal("Lion", "roar"),
        animal("Cow", "moo"),
        animal("Dog", "bark"),
    ])
}

fn factory() -> (SessionFactory, ScriptedHandles) {
    let (stack, handles) = scripted_stack();
    (SessionFactory::new(stack, fixed_clock()), handles)
}

#[tokio::test(start_paused = true)]
async fn perfect_run_scores_every_question() {
    let (factory, handles) = factory();
    handles.recognizer.push_transcript("that is a lion");
    handles.recognizer.push_transcript("a cow!");
    handles.recognizer.push_transcript("dog");

    let mut exam = factory.exam(&small_roster()).unwrap();
    exam.run().await.unwrap();

    assert!(exam.is_finished());
    assert_eq!(exam.score(), 3);
    assert_eq!(exam.results().len(), 3);
    assert!(
        exam.results()
            .records()
            .iter()
            .all(|record| record.outcome == AttemptOutcome::Success)
    );
}

#[tokio::test(start_paused = true)]
async fn wrong_answers_retry_up_to_the_cap() {
    let (factory, handles) = factory();
    for _ in 0..3 {
        handles.recognizer.push_transcript("a pig");
    }

    let roster = Roster::new(vec![animal("Cow", "moo")]);
    let mut exam = factory.exam(&roster).unwrap();
    let outcome = exam.run_question().await.unwrap();

    assert_eq!(outcome, AttemptOutcome::Retry);
    assert_eq!(exam.attempt_count(), 3);
    assert_eq!(handles.recognizer.listen_count(), 3);
    assert_eq!(exam.results().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn saying_next_early_does_not_skip() {
    let (factory, handles) = factory();
    handles.recognizer.push_transcript("next");
    handles.recognizer.push_transcript("next");
    handles.recognizer.push_transcript("it's a cow");

    let roster = Roster::new(vec![animal("Cow", "moo")]);
    let mut exam = factory.exam(&roster).unwrap();
    let outcome = exam.run_question().await.unwrap();

    // The first two "next"s fail the match test instead of skipping, so the
    // third attempt still happens and succeeds.
    assert_eq!(outcome, AttemptOutcome::Success);
    assert_eq!(handles.recognizer.listen_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn saying_next_on_the_third_attempt_skips() {
    let (factory, handles) = factory();
    handles.recognizer.push_transcript("a pig");
    handles.recognizer.push_transcript("a horse");
    handles.recognizer.push_transcript("next please");

    let roster = Roster::new(vec![animal("Cow", "moo")]);
    let mut exam = factory.exam(&roster).unwrap();
    let outcome = exam.run_question().await.unwrap();

    assert_eq!(outcome, AttemptOutcome::Retry);
    assert_eq!(handles.recognizer.listen_count(), 3);
    let spoken = handles.announcer.spoken_lines();
    assert!(
        spoken.iter().any(|line| line.contains("moving on")),
        "skip feedback missing from {spoken:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn recognition_errors_are_absorbed_as_retries() {
    let (factory, handles) = factory();
    handles
        .recognizer
        .push_error(RecognitionError::PermissionDenied);
    handles.recognizer.push_error(RecognitionError::NoSpeech);
    handles.recognizer.push_error(RecognitionError::Unsupported);

    let roster = Roster::new(vec![animal("Cow", "moo")]);
    let mut exam = factory.exam(&roster).unwrap();
    let outcome = exam.run_question().await.unwrap();

    assert_eq!(outcome, AttemptOutcome::Retry);
    assert_eq!(exam.attempt_count(), 3);

    let spoken = handles.announcer.spoken_lines();
    assert!(spoken.iter().any(|line| line.contains("microphone")));
    assert!(spoken.iter().any(|line| line.contains("didn't hear")));
}

#[tokio::test(start_paused = true)]
async fn stop_freezes_score_current_and_results() {
    let (factory, handles) = factory();
    handles.recognizer.push_transcript("lion");

    let mut exam = factory.exam(&small_roster()).unwrap();
    exam.run_question().await.unwrap();
    let score = exam.score();
    let index = exam.current_index();

    exam.stop();

    assert_eq!(exam.advance().await.unwrap_err(), SessionError::Superseded);
    assert_eq!(
        exam.run_question().await.unwrap_err(),
        SessionError::Superseded
    );
    assert_eq!(exam.score(), score);
    assert_eq!(exam.current_index(), index);
    assert_eq!(exam.results().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn a_new_session_supersedes_the_running_exam() {
    let (factory, handles) = factory();
    handles.recognizer.push_transcript("lion");

    let mut exam = factory.exam(&small_roster()).unwrap();
    exam.run_question().await.unwrap();

    // Opening a practice card takes over the audio/mic channel.
    let _practice = factory.practice(animal("Cat", "meow"));

    assert_eq!(exam.advance().await.unwrap_err(), SessionError::Superseded);
}

#[tokio::test(start_paused = true)]
async fn restart_resets_everything() {
    let (factory, handles) = factory();
    handles.recognizer.push_transcript("lion");
    handles.recognizer.push_transcript("cow");
    handles.recognizer.push_transcript("nope");
    handles.recognizer.push_transcript("nope");
    handles.recognizer.push_transcript("still wrong");

    let mut exam = factory.exam(&small_roster()).unwrap();
    exam.run().await.unwrap();
    assert!(exam.is_finished());
    assert_eq!(exam.score(), 2);

    exam.restart();

    assert_eq!(exam.score(), 0);
    assert!(exam.results().is_empty());
    assert_eq!(exam.current_index(), 0);
    assert_eq!(exam.attempt_count(), 0);
    assert!(!exam.is_finished());
}
