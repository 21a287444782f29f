use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::{AccessibilityControls, ClassroomView, ExamRoomView, HomeView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/classroom", ClassroomView)] Classroom {},
        #[route("/exam", ExamRoomView)] Exam {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            a { class: "skip-link", href: "#main-content", "Skip to main content" }
            AccessibilityControls {}
            main { class: "content", id: "main-content",
                Outlet::<Route> {}
            }
        }
    }
}
