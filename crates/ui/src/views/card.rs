use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;

use services::SessionMonitor;
use zoo_core::model::Animal;

use crate::context::AppContext;
use crate::vm::{CardVm, progress_width_style};

/// Which capability the card is currently driving.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CardAction {
    Playing,
    Listening,
}

/// How often the progress bar refreshes while a cycle runs.
const PROGRESS_TICK: Duration = Duration::from_millis(100);

/// One free-practice animal card: play the sound, then say the name.
#[component]
pub fn AnimalCard(animal: Animal) -> Element {
    let ctx = use_context::<AppContext>();
    let sessions = ctx.sessions();

    let name = animal.name().to_owned();
    let emoji = animal.emoji().to_owned();

    let vm = use_signal({
        let animal = animal.clone();
        let sessions = Arc::clone(&sessions);
        move || Some(CardVm::new(sessions, animal))
    });
    let action = use_signal(|| None::<CardAction>);
    let monitor = use_signal(|| None::<SessionMonitor>);
    let progress = use_signal(|| 0.0_f32);
    let feedback = use_signal(|| None::<String>);

    let start_ticker = use_callback(move |()| {
        let action = action;
        let monitor = monitor;
        let mut progress = progress;
        spawn(async move {
            while action.read().is_some() {
                if let Some(monitor) = monitor.read().clone() {
                    progress.set(monitor.progress());
                }
                tokio::time::sleep(PROGRESS_TICK).await;
            }
            if let Some(monitor) = monitor.read().clone() {
                progress.set(monitor.progress());
            }
        });
    });

    let on_play = use_callback(move |()| {
        let mut vm = vm;
        let mut action = action;
        let mut monitor = monitor;
        let mut feedback = feedback;
        let mut progress = progress;
        if action.read().is_some() {
            return;
        }
        let taken = vm.write().take();
        let Some(mut card) = taken else {
            return;
        };
        // Grab the monitor first so the ticker can follow the cycle while
        // the play future holds the card.
        monitor.set(Some(card.prepare()));
        action.set(Some(CardAction::Playing));
        feedback.set(None);
        progress.set(0.0);
        start_ticker.call(());
        spawn(async move {
            card.play().await;
            let text = card.feedback_text();
            *vm.write() = Some(card);
            feedback.set(text);
            action.set(None);
        });
    });

    let on_listen = use_callback(move |()| {
        let mut vm = vm;
        let mut action = action;
        let mut monitor = monitor;
        let mut feedback = feedback;
        if action.read().is_some() {
            return;
        }
        let taken = vm.write().take();
        let Some(mut card) = taken else {
            return;
        };
        monitor.set(Some(card.prepare()));
        action.set(Some(CardAction::Listening));
        feedback.set(None);
        spawn(async move {
            card.listen().await;
            let text = card.feedback_text();
            *vm.write() = Some(card);
            feedback.set(text);
            action.set(None);
        });
    });

    let current_action = *action.read();
    let is_playing = current_action == Some(CardAction::Playing);
    let is_listening = current_action == Some(CardAction::Listening);
    let busy = current_action.is_some();
    let play_label = if is_playing { "Playing..." } else { "🔊 Play Sound" };
    let listen_label = if is_listening { "Listening..." } else { "🎤 Speak Now" };
    let bar_style = progress_width_style(progress());
    let feedback_text = feedback.read().clone();

    // Card teardown must not leave a clip or a listen running.
    use_drop(move || {
        if let Some(card) = vm.read().as_ref() {
            card.stop();
        }
    });

    rsx! {
        div { class: "glass-card animal-card",
            div { class: "animal-card__emoji", aria_hidden: "true", "{emoji}" }
            h3 { class: "animal-card__name", "{name}" }
            p { class: "animal-card__hint", "Listen to the sound and say the animal name!" }

            div { class: "animal-card__controls",
                button {
                    class: "btn btn-playful",
                    r#type: "button",
                    disabled: busy,
                    aria_label: "Play the {name} sound",
                    onclick: move |_| on_play.call(()),
                    "{play_label}"
                }
                button {
                    class: "btn btn-glass",
                    r#type: "button",
                    disabled: busy,
                    aria_label: "Say the animal name",
                    onclick: move |_| on_listen.call(()),
                    "{listen_label}"
                }
            }

            div { class: "progress", role: "progressbar", aria_label: "Sound progress",
                div { class: "progress__fill", style: "{bar_style}" }
            }

            if is_listening {
                p { class: "animal-card__listening", "🎤 Say \"{name}\" into your microphone!" }
            }
            if let Some(text) = feedback_text {
                p { class: "animal-card__feedback", "{text}" }
            }
        }
    }
}
