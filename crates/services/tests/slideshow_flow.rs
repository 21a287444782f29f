use services::{SessionError, SessionFactory};
use speech::scripted::{ScriptedHandles, scripted_stack};
use zoo_core::model::{Animal, ClipRef, Roster, SessionPhase};
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
async fn traversal_plays_every_clip_once_with_no_recognition() {
    let (factory, handles) = factory();
    let mut slideshow = factory.slideshow(&small_roster()).unwrap();

    slideshow.run().await.unwrap();

    assert!(slideshow.is_finished());
    assert_eq!(handles.player.played_clips().len(), 3);
    assert_eq!(handles.recognizer.listen_count(), 0);

    let spoken = handles.announcer.spoken_lines();
    assert!(spoken.contains(&"The Lion says roar!".to_owned()));
    assert!(spoken.contains(&"The Dog says bark!".to_owned()));
}

#[tokio::test(start_paused = true)]
async fn replay_is_gated_until_playback_finishes() {
    let (factory, handles) = factory();
    let mut slideshow = factory.slideshow(&small_roster()).unwrap();

    // Nothing has played yet: the affordance is locked.
    assert!(!slideshow.can_replay());
    assert_eq!(
        slideshow.replay().await.unwrap_err(),
        SessionError::ReplayNotReady
    );

    slideshow.play_current().await.unwrap();
    assert_eq!(slideshow.phase(), SessionPhase::Evaluated);
    assert!(slideshow.can_replay());

    slideshow.replay().await.unwrap();
    assert_eq!(handles.player.played_clips().len(), 2);
    assert_eq!(slideshow.current_index(), 0);
}

#[tokio::test(start_paused = true)]
async fn advance_moves_through_the_list_then_finishes() {
    let (factory, _handles) = factory();
    let mut slideshow = factory.slideshow(&small_roster()).unwrap();

    slideshow.play_current().await.unwrap();
    assert_eq!(slideshow.advance().await.unwrap(), Some(1));
    slideshow.play_current().await.unwrap();
    assert_eq!(slideshow.advance().await.unwrap(), Some(2));
    slideshow.play_current().await.unwrap();
    assert_eq!(slideshow.advance().await.unwrap(), None);

    assert!(slideshow.is_finished());
    assert!(slideshow.current_animal().is_none());
}

#[tokio::test(start_paused = true)]
async fn stop_halts_the_traversal_without_further_mutation() {
    let (factory, handles) = factory();
    let mut slideshow = factory.slideshow(&small_roster()).unwrap();

    slideshow.play_current().await.unwrap();
    let index = slideshow.current_index();
    let progress = slideshow.sample_progress();

    slideshow.stop();

    assert_eq!(
        slideshow.advance().await.unwrap_err(),
        SessionError::Superseded
    );
    assert_eq!(
        slideshow.play_current().await.unwrap_err(),
        SessionError::Superseded
    );
    assert_eq!(slideshow.current_index(), index);
    assert_eq!(slideshow.sample_progress(), progress);
    assert_eq!(handles.player.played_clips().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn empty_roster_is_refused() {
    let (factory, _handles) = factory();
    let err = factory.slideshow(&Roster::new(Vec::new())).unwrap_err();
    assert_eq!(err, SessionError::Empty);
}
