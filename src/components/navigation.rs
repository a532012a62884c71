use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use dioxus::prelude::*;
use tracing::{debug, warn};

use crate::auth::AuthMode;
use crate::components::Icon;
use crate::db::{save_preferences, Preferences};
use crate::scroll::{active_section, reveal_reached, SectionGeometry, SectionId, NAV_OFFSET};
use crate::site::site;

const EASTER_EGG_CLICKS: u32 = 5;

/// Open `url` in a new browsing context through the host webview.
pub fn open_external(url: &str) {
    let target = serde_json::to_string(url).unwrap_or_else(|_| "\"about:blank\"".to_string());
    let _ = document::eval(&format!("window.open({target}, \"_blank\");"));
}

/// Section registry shared through context: mounted section elements, the
/// scroll-spy result and the sections that have been revealed.
#[derive(Clone, Copy)]
pub struct SectionNavigator {
    active: Signal<SectionId>,
    revealed: Signal<HashSet<SectionId>>,
    sections: Signal<HashMap<SectionId, Rc<MountedData>>>,
    viewport: Signal<Option<Rc<MountedData>>>,
}

impl SectionNavigator {
    pub fn new(
        active: Signal<SectionId>,
        revealed: Signal<HashSet<SectionId>>,
        sections: Signal<HashMap<SectionId, Rc<MountedData>>>,
        viewport: Signal<Option<Rc<MountedData>>>,
    ) -> Self {
        Self {
            active,
            revealed,
            sections,
            viewport,
        }
    }

    pub fn active(&self) -> SectionId {
        (self.active)()
    }

    pub fn is_revealed(&self, section: SectionId) -> bool {
        self.revealed.read().contains(&section)
    }

    pub fn set_viewport(&self, element: Rc<MountedData>) {
        let mut viewport = self.viewport;
        viewport.set(Some(element));
    }

    pub fn register(&self, section: SectionId, element: Rc<MountedData>) {
        let mut sections = self.sections;
        sections.write().insert(section, element);
    }

    pub fn scroll_to(&self, section: SectionId) {
        let Some(element) = self.sections.peek().get(&section).cloned() else {
            debug!(section = section.anchor(), "scroll target not mounted yet");
            return;
        };
        spawn(async move {
            let _ = element.scroll_to(ScrollBehavior::Smooth).await;
        });
    }

    /// Re-measure every mounted section against the scroll viewport and
    /// update the active section and the reveal latch.
    pub async fn refresh(self) {
        let Some(viewport) = self.viewport.peek().clone() else {
            return;
        };
        let Ok(frame) = viewport.get_client_rect().await else {
            return;
        };

        let mounted: Vec<(SectionId, Rc<MountedData>)> = SectionId::ALL
            .iter()
            .filter_map(|section| {
                self.sections
                    .peek()
                    .get(section)
                    .cloned()
                    .map(|element| (*section, element))
            })
            .collect();

        let mut geometry = Vec::with_capacity(mounted.len());
        for (section, element) in mounted {
            if let Ok(rect) = element.get_client_rect().await {
                geometry.push(SectionGeometry {
                    section,
                    top: rect.min_y() - frame.min_y(),
                    height: rect.height(),
                });
            }
        }

        let mut active = self.active;
        if let Some(current) = active_section(&geometry, NAV_OFFSET) {
            if *active.peek() != current {
                active.set(current);
            }
        }

        let newly_revealed: Vec<SectionId> = geometry
            .iter()
            .filter(|g| reveal_reached(g, frame.height()))
            .map(|g| g.section)
            .filter(|section| !self.revealed.peek().contains(section))
            .collect();
        if !newly_revealed.is_empty() {
            let mut revealed = self.revealed;
            revealed.write().extend(newly_revealed);
        }
    }
}

/// Counts clicks on the artist name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EasterEgg {
    clicks: u32,
}

impl EasterEgg {
    /// Register a click; true once the click count reaches the trigger.
    pub fn click(&mut self) -> bool {
        self.clicks = self.clicks.saturating_add(1);
        self.clicks >= EASTER_EGG_CLICKS
    }
}

#[component]
pub fn NavBar(on_auth: EventHandler<AuthMode>) -> Element {
    let navigator = use_context::<SectionNavigator>();
    let mut preferences = use_context::<Signal<Preferences>>();
    let mut easter_egg = use_signal(EasterEgg::default);
    let content = site();
    let active = navigator.active();
    let user = preferences.read().user.clone();
    let first_name = user
        .as_ref()
        .map(|user| user.first_name().to_string())
        .unwrap_or_default();

    let on_logo = move |_| {
        if easter_egg.write().click() {
            open_external(&site().easter_egg_path);
        }
    };

    let sign_out = move |_| {
        preferences.write().user = None;
        let snapshot = preferences.peek().clone();
        spawn(async move {
            if let Err(err) = save_preferences(snapshot).await {
                warn!(%err, "could not clear stored user");
            }
        });
    };

    rsx! {
        nav { class: "fixed top-0 w-full z-50 bg-slate-900/80 backdrop-blur-md border-b border-slate-800",
            div { class: "max-w-6xl mx-auto px-6 py-4",
                div { class: "flex justify-between items-center",
                    div {
                        class: "text-2xl font-bold tracking-wide cursor-pointer select-none",
                        onclick: on_logo,
                        span { class: "text-amber-400", "{content.first_name}" }
                        span { class: "text-slate-300", "{content.last_name}" }
                    }

                    div { class: "hidden md:flex space-x-8",
                        {SectionId::ALL.iter().map(|section| {
                            let section = *section;
                            let label = section.nav_label();
                            let class = if active == section {
                                "capitalize transition-colors text-amber-400"
                            } else {
                                "capitalize transition-colors text-slate-300 hover:text-amber-400"
                            };
                            rsx! {
                                button {
                                    key: "{label}",
                                    r#type: "button",
                                    class,
                                    onclick: move |_| navigator.scroll_to(section),
                                    "{label}"
                                }
                            }
                        })}
                    }

                    div { class: "flex items-center space-x-3",
                        if let Some(user) = user {
                            if let Some(avatar) = user.avatar.clone() {
                                img {
                                    class: "w-8 h-8 rounded-full border border-slate-700",
                                    src: "{avatar}",
                                    alt: "{user.name}",
                                }
                            } else {
                                Icon { name: "user".to_string(), class: "w-5 h-5 text-slate-300".to_string() }
                            }
                            span { class: "text-slate-300 text-sm", "{first_name}" }
                            button {
                                r#type: "button",
                                class: "flex items-center space-x-1 text-slate-400 hover:text-amber-400 text-sm transition-colors",
                                onclick: sign_out,
                                Icon { name: "log-out".to_string(), class: "w-4 h-4".to_string() }
                                span { "Sign Out" }
                            }
                        } else {
                            button {
                                r#type: "button",
                                class: "flex items-center space-x-1 text-slate-300 hover:text-amber-400 text-sm transition-colors",
                                onclick: move |_| on_auth.call(AuthMode::Login),
                                Icon { name: "log-in".to_string(), class: "w-4 h-4".to_string() }
                                span { "Sign In" }
                            }
                            button {
                                r#type: "button",
                                class: "bg-amber-600 hover:bg-amber-700 text-white text-sm px-4 py-1.5 rounded-full transition-colors",
                                onclick: move |_| on_auth.call(AuthMode::Signup),
                                "Join"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easter_egg_fires_from_the_fifth_click_on() {
        let mut egg = EasterEgg::default();
        for _ in 0..4 {
            assert!(!egg.click());
        }
        assert!(egg.click());
        assert!(egg.click());
    }
}
