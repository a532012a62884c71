//! Page sections, top to bottom.

use dioxus::prelude::*;

use crate::components::SectionNavigator;
use crate::scroll::SectionId;

mod about;
mod contact;
mod footer;
mod hero;
mod music;
mod newsletter;

pub use about::AboutSection;
pub use contact::ContactSection;
pub use footer::Footer;
pub use hero::HeroSection;
pub use music::MusicSection;
pub use newsletter::NewsletterSection;

/// Transition classes for content that fades in once its section is revealed.
pub(crate) fn reveal_class(revealed: bool, hidden: &'static str, shown: &'static str) -> String {
    let state = if revealed { shown } else { hidden };
    format!("transition-all duration-1000 {state}")
}

/// A `<section>` registered with the navigator so scroll-spy, smooth scrolling
/// and the reveal latch can find it.
#[component]
pub fn PageSection(section: SectionId, class: String, children: Element) -> Element {
    let navigator = use_context::<SectionNavigator>();
    let anchor = section.anchor();

    rsx! {
        section {
            id: "{anchor}",
            class: "{class}",
            onmounted: move |evt| {
                navigator.register(section, evt.data());
                spawn(navigator.refresh());
            },
            {children}
        }
    }
}
