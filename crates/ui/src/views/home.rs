use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::routes::Route;

struct Feature {
    icon: &'static str,
    title: &'static str,
    description: &'static str,
}

const FEATURES: [Feature; 4] = [
    Feature {
        icon: "👁️",
        title: "Visual Accessibility",
        description: "High contrast mode, large text options, and screen reader support for visually impaired children.",
    },
    Feature {
        icon: "👂",
        title: "Audio-First Design",
        description: "Rich audio cues and sound descriptions so every activity works by ear alone.",
    },
    Feature {
        icon: "🧠",
        title: "Cognitive Support",
        description: "Simple instructions, predictable patterns, and repetition-friendly activities.",
    },
    Feature {
        icon: "✋",
        title: "Motor Accessibility",
        description: "Large touch targets, keyboard navigation, and voice control throughout.",
    },
];

#[component]
pub fn HomeView() -> Element {
    let navigator = use_navigator();

    rsx! {
        div { class: "page home-page",
            section { class: "hero",
                h1 { class: "hero__title", "Vocal " span { class: "hero__accent", "Zoo" } }
                p { class: "hero__subtitle",
                    "An inclusive audio adventure designed for ALL children to learn and play together!"
                }
                p { class: "hero__tags", "🌟 Accessible • Voice-First • Screen Reader Friendly • Fun for Everyone! 🌟" }
            }

            section { class: "rooms", aria_label: "Animal Learning Activities",
                h2 { class: "section-title", "Interactive Animal Learning" }
                p { class: "section-subtitle",
                    "Each animal card helps children learn through listening and speaking."
                }
                div { class: "rooms__grid",
                    div {
                        class: "glass-card room-card",
                        role: "button",
                        tabindex: "0",
                        aria_label: "Go to Training Room",
                        onclick: move |_| {
                            navigator.push(Route::Classroom {});
                        },
                        div { class: "room-card__icon", aria_hidden: "true", "🎓" }
                        h3 { "Training Room" }
                        p { "Learn animal sounds with guided listening. Accessible for blind students." }
                        button { class: "btn btn-hero", r#type: "button", "Enter Training Room" }
                    }
                    div {
                        class: "glass-card room-card",
                        role: "button",
                        tabindex: "0",
                        aria_label: "Go to Exam Room",
                        onclick: move |_| {
                            navigator.push(Route::Exam {});
                        },
                        div { class: "room-card__icon", aria_hidden: "true", "📋" }
                        h3 { "Exam Room" }
                        p { "Test your knowledge by guessing animal sounds. Accessible for blind students." }
                        button { class: "btn btn-hero", r#type: "button", "Enter Exam Room" }
                    }
                }
            }

            section { class: "features",
                h2 { class: "section-title", "Inclusive Learning for Every Child" }
                div { class: "features__grid",
                    for feature in FEATURES {
                        div { key: "{feature.title}", class: "glass-card feature-card",
                            div { class: "feature-card__icon", aria_hidden: "true", "{feature.icon}" }
                            h3 { "{feature.title}" }
                            p { "{feature.description}" }
                        }
                    }
                }
            }

            section { class: "cta",
                div { class: "glass-card cta__card",
                    div { class: "cta__emoji", aria_hidden: "true", "🎮" }
                    h2 { "Ready for an Audio Adventure?" }
                    p { "🎧 Use headphones for the best experience • 🎤 Speak clearly into your microphone" }
                }
            }
        }
    }
}
