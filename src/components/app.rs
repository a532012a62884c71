use std::collections::{HashMap, HashSet};

use dioxus::prelude::*;
use tracing::warn;

use crate::auth::AuthMode;
use crate::components::views::{
    AboutSection, ContactSection, Footer, HeroSection, MusicSection, NewsletterSection,
};
use crate::components::{AuthModal, NavBar, SectionNavigator};
use crate::db::{load_preferences, Preferences};
use crate::scroll::SectionId;

#[component]
pub fn SiteShell() -> Element {
    let mut preferences = use_signal(Preferences::default);
    let mut preferences_loaded = use_signal(|| false);
    let active_section = use_signal(|| SectionId::Hero);
    let revealed = use_signal(HashSet::<SectionId>::new);
    let sections = use_signal(HashMap::new);
    let viewport = use_signal(|| None);
    let navigator = SectionNavigator::new(active_section, revealed, sections, viewport);
    let mut auth_mode = use_signal(|| None::<AuthMode>);

    // Provide state via context
    use_context_provider(|| preferences);
    use_context_provider(|| navigator);

    // Load saved preferences on mount; playback units are created afterwards
    // so they start at the stored volume.
    use_effect(move || {
        spawn(async move {
            match load_preferences().await {
                Ok(saved) => preferences.set(saved),
                Err(err) => warn!(%err, "could not load preferences, using defaults"),
            }
            preferences_loaded.set(true);
        });
    });

    rsx! {
        div { class: "h-screen bg-slate-900 text-white font-handwritten",
            NavBar { on_auth: move |mode| auth_mode.set(Some(mode)) }

            main {
                class: "h-full overflow-y-auto main-scroll",
                onmounted: move |evt| navigator.set_viewport(evt.data()),
                onscroll: move |_| {
                    spawn(navigator.refresh());
                },
                if preferences_loaded() {
                    HeroSection {}
                    MusicSection {}
                    AboutSection {}
                    NewsletterSection {}
                    ContactSection {}
                    Footer {}
                }
            }

            AuthModal { mode: auth_mode }
        }
    }
}
