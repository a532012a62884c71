use dioxus::prelude::*;

use super::{reveal_class, PageSection};
use crate::components::{open_external, AudioPreview, SectionNavigator};
use crate::scroll::SectionId;
use crate::site::{site, Release};

#[component]
pub fn MusicSection() -> Element {
    let navigator = use_context::<SectionNavigator>();
    let content = site();
    let revealed = navigator.is_revealed(SectionId::Music);
    let heading = reveal_class(revealed, "opacity-0 translate-y-10", "opacity-100 translate-y-0");

    rsx! {
        PageSection { section: SectionId::Music, class: "py-24 px-6".to_string(),
            div { class: "max-w-6xl mx-auto",
                div { class: "text-center mb-20 {heading}",
                    h2 { class: "text-6xl md:text-7xl font-light mb-8 tracking-wide", "Music" }
                    p { class: "text-4xl text-slate-400 max-w-2xl mx-auto", "{content.music_blurb}" }
                }

                div { class: "flex justify-center items-center",
                    div { class: "bg-slate-800/30 border border-slate-700 rounded-2xl p-8 shadow-2xl backdrop-blur-sm space-y-12",
                        for (index, release) in content.releases.iter().enumerate() {
                            ReleaseCard {
                                key: "{release.title}-{index}",
                                release: release.clone(),
                                artist: content.artist.clone(),
                                revealed,
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ReleaseCard(release: Release, artist: String, revealed: bool) -> Element {
    let badge = if release.released {
        "bg-amber-600/20 text-amber-400"
    } else {
        "bg-slate-600/20 text-slate-400"
    };
    let source = release.preview_source().map(|source| source.to_string());
    let link = release.external_link.clone();
    let tracks = match release.tracks {
        1 => "1 track".to_string(),
        count => format!("{count} tracks"),
    };
    let card = reveal_class(revealed, "opacity-0 translate-y-10", "opacity-100 translate-y-0");

    rsx! {
        div { class: "flex flex-col items-center max-w-sm {card}",
            div { class: "relative overflow-hidden rounded-lg mb-6 group",
                img {
                    class: "w-full aspect-square object-cover group-hover:scale-105 transition-transform duration-300",
                    src: "{release.cover}",
                    alt: "{release.title}",
                    width: "300",
                    height: "300",
                }
                div { class: "absolute inset-0 bg-black/20 group-hover:bg-black/10 transition-colors duration-300" }
            }

            div { class: "text-center mb-6",
                h3 { class: "text-3xl font-bold text-white mb-2", "{release.title}" }
                div { class: "flex items-center justify-center gap-4 mb-2",
                    span { class: "{badge} text-xl px-4 py-2 rounded-full", "{release.kind}" }
                    span { class: "text-slate-400 text-2xl", "{release.year}" }
                    span { class: "text-slate-500 text-xl", "{tracks}" }
                }
            }

            if release.released {
                div { class: "w-full mb-6",
                    AudioPreview {
                        source,
                        title: release.title.clone(),
                        artist,
                        external_link: release.external_link.clone(),
                    }
                }
                button {
                    r#type: "button",
                    class: "w-full bg-amber-600 hover:bg-amber-700 hover:scale-105 transition-all duration-500 text-xl py-4 rounded-full",
                    onclick: move |_| open_external(&link),
                    "LISTEN NOW"
                }
            } else {
                button {
                    r#type: "button",
                    disabled: true,
                    class: "w-full text-xl py-4 bg-slate-700 text-slate-400 cursor-not-allowed rounded-full",
                    "COMING SOON"
                }
            }
        }
    }
}
