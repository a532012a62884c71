use dioxus::prelude::*;

use super::{reveal_class, PageSection};
use crate::components::{open_external, Icon, SectionNavigator};
use crate::scroll::SectionId;
use crate::site::site;

#[component]
pub fn ContactSection() -> Element {
    let navigator = use_context::<SectionNavigator>();
    let content = site();
    let revealed = navigator.is_revealed(SectionId::Contact);
    let heading = reveal_class(revealed, "opacity-0 translate-y-10", "opacity-100 translate-y-0");
    let card = reveal_class(revealed, "opacity-0 -translate-x-10", "opacity-100 translate-x-0");
    let mailto = format!("mailto:{}", content.contact_email);

    rsx! {
        PageSection { section: SectionId::Contact, class: "py-24 px-6".to_string(),
            div { class: "max-w-4xl mx-auto text-center",
                div { class: "{heading}",
                    h2 { class: "text-6xl md:text-7xl font-light mb-10 tracking-wide", "Get In Touch" }
                    p { class: "text-4xl text-slate-400 mb-16 max-w-2xl mx-auto",
                        "Ready to collaborate, book a show, or just want to say hello? I'd love to hear from you."
                    }
                }

                div { class: "flex justify-center mb-16",
                    div { class: "bg-slate-800/50 border border-slate-700 rounded-xl p-10 delay-200 {card}",
                        h3 { class: "text-4xl font-semibold mb-6 text-white", "Say Hello" }
                        p { class: "text-slate-400 mb-8 text-2xl",
                            "For show bookings, collaborations, and business inquiries"
                        }
                        button {
                            r#type: "button",
                            class: "inline-flex items-center bg-white hover:bg-gray-100 text-black text-2xl px-10 py-6 rounded-lg",
                            onclick: move |_| open_external(&mailto),
                            Icon { name: "mail".to_string(), class: "w-5 h-5 mr-3".to_string() }
                            span { "{content.contact_email}" }
                        }
                    }
                }

                div { class: "flex justify-center space-x-8 mb-12 delay-600 {heading}",
                    for social in content.socials.iter() {
                        SocialButton {
                            key: "{social.url}",
                            icon: social.kind.icon(),
                            label: social.kind.label(),
                            url: social.url.clone(),
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SocialButton(icon: &'static str, label: &'static str, url: String) -> Element {
    rsx! {
        button {
            r#type: "button",
            class: "p-4 rounded-lg hover:text-amber-400 transition-colors",
            aria_label: label,
            title: label,
            onclick: move |_| open_external(&url),
            Icon { name: icon.to_string(), class: "w-8 h-8".to_string() }
        }
    }
}
