use dioxus::prelude::*;
use tracing::warn;

use super::{reveal_class, PageSection};
use crate::components::{Icon, SectionNavigator};
use crate::newsletter::subscribe;
use crate::scroll::SectionId;

#[component]
pub fn NewsletterSection() -> Element {
    let navigator = use_context::<SectionNavigator>();
    let mut email = use_signal(String::new);
    let mut submitted = use_signal(|| false);
    let mut sending = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);

    let body = reveal_class(
        navigator.is_revealed(SectionId::Newsletter),
        "opacity-0 scale-95",
        "opacity-100 scale-100",
    );

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if sending() {
            return;
        }
        let address = email.peek().clone();
        sending.set(true);
        spawn(async move {
            match subscribe(&address).await {
                Ok(()) => {
                    email.set(String::new());
                    error.set(None);
                    submitted.set(true);
                }
                Err(err) => {
                    warn!(%err, "newsletter signup rejected");
                    error.set(Some(err.to_string()));
                }
            }
            sending.set(false);
        });
    };

    rsx! {
        PageSection { section: SectionId::Newsletter, class: "py-24 px-6 bg-slate-800/30".to_string(),
            div { class: "max-w-4xl mx-auto text-center",
                div { class: body,
                    h2 { class: "text-6xl md:text-7xl font-light mb-8 tracking-wide", "Stay Connected" }
                    p { class: "text-4xl text-slate-400 mb-12 max-w-2xl mx-auto",
                        "Get the latest updates, exclusive content, and early access to new releases"
                    }

                    if submitted() {
                        div { class: "max-w-lg mx-auto",
                            div { class: "bg-green-900/20 border border-green-700 rounded-lg p-8",
                                h3 { class: "text-3xl font-semibold text-green-400 mb-3", "Thank you!" }
                                p { class: "text-slate-300 mb-6 text-2xl",
                                    "Welcome to the community. Check your email for your free download link!"
                                }
                                button {
                                    r#type: "button",
                                    class: "border border-green-600 text-green-400 hover:bg-green-900/30 bg-transparent text-xl px-6 py-2 rounded-lg",
                                    onclick: move |_| submitted.set(false),
                                    "Subscribe Another Email"
                                }
                            }
                        }
                    } else {
                        form { class: "max-w-lg mx-auto", onsubmit: on_submit,
                            div { class: "flex gap-4",
                                input {
                                    r#type: "email",
                                    required: true,
                                    placeholder: "Enter your email",
                                    value: "{email}",
                                    class: "flex-1 bg-slate-800 border border-slate-700 rounded-lg px-4 text-white placeholder-slate-400 text-2xl h-16",
                                    oninput: move |evt| email.set(evt.value()),
                                }
                                button {
                                    r#type: "submit",
                                    disabled: sending(),
                                    class: "flex items-center bg-amber-600 hover:bg-amber-700 px-12 text-2xl h-16 rounded-lg",
                                    if sending() {
                                        Icon { name: "loader".to_string(), class: "w-5 h-5 mr-2".to_string() }
                                    } else {
                                        Icon { name: "send".to_string(), class: "w-5 h-5 mr-2".to_string() }
                                    }
                                    span { "Join" }
                                }
                            }
                            if let Some(message) = error() {
                                p { class: "text-red-400 text-xl mt-4", "{message}" }
                            }
                            p { class: "text-2xl text-slate-500 mt-6",
                                "Want to hear my new music first? Sign up and never miss a release!"
                            }
                        }
                    }
                }
            }
        }
    }
}
