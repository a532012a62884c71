use dioxus::prelude::*;

use super::{reveal_class, PageSection};
use crate::components::{open_external, Icon, SectionNavigator};
use crate::scroll::SectionId;
use crate::site::site;

#[component]
pub fn HeroSection() -> Element {
    let navigator = use_context::<SectionNavigator>();
    let content = site();
    let revealed = navigator.is_revealed(SectionId::Hero);

    rsx! {
        PageSection {
            section: SectionId::Hero,
            class: "min-h-screen flex items-center justify-center relative overflow-hidden".to_string(),
            div { class: "absolute inset-0 bg-gradient-to-br from-slate-900 via-slate-900 to-black" }

            div { class: "relative z-10 text-center px-6",
                div { class: reveal_class(revealed, "opacity-0 translate-y-10", "opacity-100 translate-y-0"),
                    h1 { class: "text-7xl md:text-9xl font-light mb-8 tracking-wider",
                        span { class: "font-thin", "{content.first_name}" }
                        br {}
                        span { class: "font-light text-amber-400", "{content.last_name}" }
                    }
                    p { class: "text-3xl md:text-4xl text-slate-300 mb-10 font-light tracking-wide",
                        "{content.tagline}"
                    }
                    p { class: "text-3xl text-slate-400 max-w-2xl mx-auto mb-16 leading-relaxed",
                        "{content.hero_blurb}"
                    }

                    div { class: "flex flex-col sm:flex-row gap-6 justify-center items-center",
                        button {
                            r#type: "button",
                            class: "flex items-center bg-amber-600 hover:bg-amber-700 hover:scale-105 transition-all duration-500 text-xl px-10 py-6 rounded-lg",
                            onclick: move |_| open_external(&site().artist_link),
                            Icon { name: "spotify".to_string(), class: "w-6 h-6 mr-3".to_string() }
                            span { "Listen Now" }
                        }
                        button {
                            r#type: "button",
                            class: "flex items-center border border-slate-600 hover:bg-slate-700 bg-transparent text-xl px-10 py-6 rounded-lg transition-colors",
                            onclick: move |_| navigator.scroll_to(SectionId::Music),
                            Icon { name: "music".to_string(), class: "w-6 h-6 mr-3".to_string() }
                            span { "Explore Music" }
                        }
                    }
                }
            }

            button {
                r#type: "button",
                class: "absolute bottom-8 left-1/2 -translate-x-1/2 animate-bounce",
                aria_label: "Scroll to music",
                onclick: move |_| navigator.scroll_to(SectionId::Music),
                Icon { name: "chevron-down".to_string(), class: "w-10 h-10 text-amber-400".to_string() }
            }
        }
    }
}
