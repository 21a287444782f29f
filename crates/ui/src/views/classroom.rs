use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::Link;

use services::SessionMonitor;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{AnimalCard, ViewError};
use crate::vm::{SlideshowVm, SlideshowViewState, progress_width_style};

const PROGRESS_TICK: Duration = Duration::from_millis(100);

/// Training room: a guided tour through every animal plus the free-practice
/// card grid.
#[component]
pub fn ClassroomView() -> Element {
    let ctx = use_context::<AppContext>();
    let animals = ctx.roster().animals().to_vec();

    rsx! {
        div { class: "page classroom-page",
            header { class: "view-header",
                Link { class: "btn btn-outline", to: Route::Home {}, "< Back" }
                h2 { class: "view-title", "Animal Classroom" }
            }

            TourPanel {}

            div { class: "card-grid",
                for animal in animals {
                    div { key: "{animal.name()}",
                        AnimalCard { animal }
                    }
                }
            }
        }
    }
}

/// Guided slideshow controls: start, stop, replay (once a clip finished).
#[component]
fn TourPanel() -> Element {
    let ctx = use_context::<AppContext>();
    let sessions = ctx.sessions();
    let roster = ctx.roster().clone();

    let vm = use_signal(|| None::<SlideshowVm>);
    let state = use_signal(|| None::<SlideshowViewState>);
    let monitor = use_signal(|| None::<SessionMonitor>);
    let progress = use_signal(|| 0.0_f32);
    let running = use_signal(|| false);
    let error = use_signal(|| None::<ViewError>);

    let on_start = use_callback({
        let sessions = sessions.clone();
        let roster = roster.clone();
        move |()| {
            let mut vm = vm;
            let mut state = state;
            let mut monitor = monitor;
            let mut progress = progress;
            let mut running = running;
            let mut error = error;
            if running() {
                return;
            }
            match SlideshowVm::start(&sessions, &roster) {
                Err(err) => error.set(Some(err)),
                Ok(tour) => {
                    error.set(None);
                    monitor.set(Some(tour.monitor()));
                    state.set(Some(tour.view_state()));
                    vm.set(Some(tour));
                    running.set(true);

                    spawn(async move {
                        while running() {
                            if let Some(monitor) = monitor.read().clone() {
                                progress.set(monitor.progress());
                            }
                            tokio::time::sleep(PROGRESS_TICK).await;
                        }
                    });
                    spawn(async move {
                        loop {
                            let taken = vm.write().take();
                            let Some(mut tour) = taken else { break };
                            let step = tour.step().await;
                            state.set(Some(tour.view_state()));
                            *vm.write() = Some(tour);
                            match step {
                                Ok(true) => {}
                                Ok(false) | Err(_) => break,
                            }
                        }
                        running.set(false);
                    });
                }
            }
        }
    });

    let on_stop = use_callback({
        let sessions = sessions.clone();
        move |()| {
            let mut running = running;
            sessions.stop_all();
            running.set(false);
        }
    });

    let on_replay = use_callback(move |()| {
        let mut vm = vm;
        let mut state = state;
        let taken = vm.write().take();
        let Some(mut tour) = taken else { return };
        spawn(async move {
            let _ = tour.replay().await;
            state.set(Some(tour.view_state()));
            *vm.write() = Some(tour);
        });
    });

    let is_running = running();
    let panel_state = state.read().clone();
    let bar_style = progress_width_style(progress());
    let can_replay = !is_running
        && panel_state
            .as_ref()
            .is_some_and(|panel| panel.can_replay);
    let error_text = error.read().map(|err| err.message());

    rsx! {
        section { class: "glass-card tour-panel", aria_label: "Guided sound tour",
            div { class: "tour-panel__header",
                h3 { "Guided Tour" }
                if is_running {
                    button {
                        class: "btn btn-danger",
                        r#type: "button",
                        aria_label: "Stop the guided tour",
                        onclick: move |_| on_stop.call(()),
                        "⏹ Stop Tour"
                    }
                } else {
                    button {
                        class: "btn btn-hero",
                        r#type: "button",
                        aria_label: "Start the guided tour",
                        onclick: move |_| on_start.call(()),
                        "▶ Start Tour"
                    }
                }
                button {
                    class: "btn btn-outline",
                    r#type: "button",
                    disabled: !can_replay,
                    aria_label: "Replay this animal",
                    onclick: move |_| on_replay.call(()),
                    "🔁 Replay"
                }
            }

            if let Some(err) = error_text {
                p { class: "tour-panel__error", "{err}" }
            }

            if let Some(panel) = panel_state {
                if let Some(slide) = panel.current {
                    div { class: "tour-panel__slide",
                        div { class: "tour-panel__emoji", aria_hidden: "true", "{slide.emoji}" }
                        p { class: "tour-panel__caption", "The {slide.name} says {slide.sound}!" }
                        p { class: "tour-panel__counter", "Animal {slide.index + 1} of {slide.total}" }
                        div { class: "progress", role: "progressbar", aria_label: "Sound progress",
                            div { class: "progress__fill", style: "{bar_style}" }
                        }
                    }
                } else if panel.finished {
                    p { class: "tour-panel__done", "🎉 Tour complete! Start again any time." }
                }
            } else {
                p { class: "tour-panel__intro",
                    "Sit back and listen: the tour walks through every animal sound with a spoken introduction."
                }
            }
        }
    }
}
