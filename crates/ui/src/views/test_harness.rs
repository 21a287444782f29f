use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};

use services::SessionFactory;
use speech::scripted::{ScriptedHandles, scripted_stack};
use zoo_core::model::Roster;
use zoo_core::time::fixed_clock;

use crate::context::{UiApp, build_app_context};
use crate::views::{AccessibilityControls, ClassroomView, ExamRoomView, HomeView};

#[derive(Clone)]
struct TestApp {
    roster: Roster,
    sessions: Arc<SessionFactory>,
}

impl UiApp for TestApp {
    fn roster(&self) -> Roster {
        self.roster.clone()
    }

    fn sessions(&self) -> Arc<SessionFactory> {
        Arc::clone(&self.sessions)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Classroom,
    Exam,
    Accessibility,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Classroom => rsx! { ClassroomView {} },
        ViewKind::Exam => rsx! { ExamRoomView {} },
        ViewKind::Accessibility => rsx! { AccessibilityControls {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub handles: ScriptedHandles,
    pub sessions: Arc<SessionFactory>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let (stack, handles) = scripted_stack();
    let sessions = Arc::new(SessionFactory::new(stack, fixed_clock()));
    let app = Arc::new(TestApp {
        roster: Roster::builtin(),
        sessions: Arc::clone(&sessions),
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness {
        dom,
        handles,
        sessions,
    }
}
