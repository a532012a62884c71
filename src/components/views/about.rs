use dioxus::prelude::*;

use super::{reveal_class, PageSection};
use crate::components::SectionNavigator;
use crate::scroll::SectionId;
use crate::site::site;

#[component]
pub fn AboutSection() -> Element {
    let navigator = use_context::<SectionNavigator>();
    let content = site();
    let body = reveal_class(
        navigator.is_revealed(SectionId::About),
        "opacity-0 -translate-x-10",
        "opacity-100 translate-x-0",
    );

    rsx! {
        PageSection { section: SectionId::About, class: "py-24 px-6 bg-slate-800/30".to_string(),
            div { class: "max-w-4xl mx-auto",
                div { class: body,
                    h2 { class: "text-6xl md:text-7xl font-light mb-10 tracking-wide", "About" }
                    div { class: "space-y-8 text-3xl text-slate-300 leading-relaxed",
                        p { "{content.about}" }
                        if !content.genres.is_empty() {
                            div { class: "pt-6",
                                h3 { class: "text-3xl font-semibold mb-4 text-amber-400", "Musical Influences" }
                                div { class: "flex flex-wrap gap-3",
                                    for genre in content.genres.iter() {
                                        span {
                                            key: "{genre}",
                                            class: "border border-slate-600 text-slate-300 text-xl px-4 py-2 rounded-full",
                                            "{genre}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
