use dioxus::document::eval;
use dioxus::prelude::*;

use crate::context::AppContext;

/// Floating accessibility toggles: contrast, text size, and sound.
///
/// Contrast and text size work by toggling classes on the document root so
/// the stylesheet can restyle everything at once; turning sound off halts
/// whatever session currently owns the audio channel.
#[component]
pub fn AccessibilityControls() -> Element {
    let ctx = use_context::<AppContext>();
    let mut high_contrast = use_signal(|| false);
    let mut large_text = use_signal(|| false);
    let mut sound_enabled = use_signal(|| true);

    let toggle_root_class = |class: &'static str, enable: bool| {
        let method = if enable { "add" } else { "remove" };
        let js = format!("document.documentElement.classList.{method}({class:?});");
        let _ = eval(&js);
    };

    let on_contrast = use_callback(move |()| {
        let enable = !high_contrast();
        high_contrast.set(enable);
        toggle_root_class("high-contrast", enable);
    });

    let on_text = use_callback(move |()| {
        let enable = !large_text();
        large_text.set(enable);
        toggle_root_class("large-text", enable);
    });

    let on_sound = use_callback({
        let sessions = ctx.sessions();
        move |()| {
            let enable = !sound_enabled();
            sound_enabled.set(enable);
            if !enable {
                sessions.stop_all();
            }
        }
    });

    let contrast_label = if high_contrast() { "Normal Contrast" } else { "High Contrast" };
    let text_label = if large_text() { "Normal Text" } else { "Large Text" };
    let sound_label = if sound_enabled() { "🔊 Sound On" } else { "🔇 Sound Off" };

    rsx! {
        div { class: "glass-card a11y-panel", aria_label: "Accessibility Options",
            h3 { class: "a11y-panel__title", "Accessibility Options" }
            button {
                class: "btn btn-outline a11y-panel__toggle",
                r#type: "button",
                aria_label: if high_contrast() { "Disable high contrast mode" } else { "Enable high contrast mode" },
                onclick: move |_| on_contrast.call(()),
                "◐ {contrast_label}"
            }
            button {
                class: "btn btn-outline a11y-panel__toggle",
                r#type: "button",
                aria_label: if large_text() { "Disable large text mode" } else { "Enable large text mode" },
                onclick: move |_| on_text.call(()),
                "🔤 {text_label}"
            }
            button {
                class: "btn btn-outline a11y-panel__toggle",
                r#type: "button",
                aria_label: if sound_enabled() { "Disable audio feedback" } else { "Enable audio feedback" },
                onclick: move |_| on_sound.call(()),
                "{sound_label}"
            }
            p { class: "a11y-panel__hint",
                kbd { "Tab" }
                " to navigate • "
                kbd { "Space" }
                " to activate"
            }
        }
    }
}
