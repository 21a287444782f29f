use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::Link;

use services::SessionMonitor;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{AnimalCard, ViewError};
use crate::vm::{ExamStage, ExamViewState, ExamVm, progress_width_style};

const PROGRESS_TICK: Duration = Duration::from_millis(100);

/// Exam room: free-practice grid until a run starts, then the scored oral
/// exam with a results summary at the end.
#[component]
pub fn ExamRoomView() -> Element {
    let ctx = use_context::<AppContext>();
    let sessions = ctx.sessions();
    let roster = ctx.roster().clone();
    let animals = roster.animals().to_vec();

    let vm = use_signal(|| None::<ExamVm>);
    let state = use_signal(|| None::<ExamViewState>);
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
            match ExamVm::start(&sessions, &roster) {
                Err(err) => error.set(Some(err)),
                Ok(exam) => {
                    error.set(None);
                    monitor.set(Some(exam.monitor()));
                    state.set(Some(exam.view_state()));
                    vm.set(Some(exam));
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
                            let Some(mut exam) = taken else { break };
                            let step = exam.step().await;
                            state.set(Some(exam.view_state()));
                            *vm.write() = Some(exam);
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

    // Stop abandons the run and returns to the practice grid.
    let on_stop = use_callback({
        let sessions = sessions.clone();
        move |()| {
            let mut vm = vm;
            let mut state = state;
            let mut running = running;
            sessions.stop_all();
            running.set(false);
            state.set(None);
            vm.set(None);
        }
    });

    let exam_state = state.read().clone();
    let bar_style = progress_width_style(progress());
    let error_text = error.read().map(|err| err.message());

    rsx! {
        div { class: "page exam-page",
            header { class: "view-header",
                Link { class: "btn btn-outline", to: Route::Home {}, "< Back" }
                h2 { class: "view-title", "Animal Exam Room" }
                match &exam_state {
                    None => rsx! {
                        button {
                            class: "btn btn-hero exam-start",
                            r#type: "button",
                            aria_label: "Start oral animal exam",
                            onclick: move |_| on_start.call(()),
                            "▶ Start Exam"
                        }
                    },
                    Some(state) if state.stage != ExamStage::Finished => rsx! {
                        button {
                            class: "btn btn-danger",
                            r#type: "button",
                            aria_label: "Stop exam",
                            onclick: move |_| on_stop.call(()),
                            "⏹ Stop"
                        }
                    },
                    Some(_) => rsx! {},
                }
            }

            if let Some(err) = error_text {
                p { class: "exam-error", "{err}" }
            }

            match exam_state {
                None => rsx! {
                    div { class: "card-grid",
                        for animal in animals {
                            div { key: "{animal.name()}",
                                AnimalCard { animal }
                            }
                        }
                    }
                },
                Some(state) => match state.stage {
                    ExamStage::Finished => rsx! {
                        ExamResultsPanel { state, on_restart: on_stop }
                    },
                    _ => rsx! {
                        div { class: "exam-question",
                            if let Some(question) = state.question {
                                div { class: "glass-card exam-question__card",
                                    div { class: "animal-card__emoji", aria_hidden: "true", "{question.emoji}" }
                                    h3 { class: "animal-card__name", "{question.name}" }
                                    div { class: "progress", role: "progressbar", aria_label: "Sound progress",
                                        div { class: "progress__fill", style: "{bar_style}" }
                                    }
                                    if state.stage == ExamStage::Waiting {
                                        p { class: "exam-question__status", "Answer recorded. Get ready for the next one!" }
                                    } else {
                                        p { class: "exam-question__status", "🎤 Listen, then say the animal's name. Say \"next\" to skip after three tries." }
                                    }
                                }
                                p { class: "exam-question__counter",
                                    "Question {question.index + 1} of {question.total}"
                                }
                                p { class: "exam-question__score", "Score: {state.score}" }
                            }
                        }
                    },
                },
            }
        }
    }
}

#[component]
fn ExamResultsPanel(state: ExamViewState, on_restart: EventHandler<()>) -> Element {
    rsx! {
        div { class: "exam-results",
            div { class: "exam-results__emoji", aria_hidden: "true", "🎉" }
            h3 { class: "exam-results__title", "Exam Complete!" }
            p { class: "exam-results__score", "Your Score: {state.score} / {state.total}" }
            div { class: "exam-results__rows",
                for row in state.rows {
                    span {
                        key: "{row.name}",
                        class: if row.passed { "result-chip result-chip--pass" } else { "result-chip result-chip--fail" },
                        if row.passed { "{row.name}: ✔️" } else { "{row.name}: ❌" }
                    }
                }
            }
            button {
                class: "btn btn-hero",
                r#type: "button",
                onclick: move |_| on_restart.call(()),
                "Restart Exam"
            }
        }
    }
}
