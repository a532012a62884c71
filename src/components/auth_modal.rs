use dioxus::prelude::*;
use tracing::{info, warn};

use crate::auth::{authenticate, AuthForm, AuthMode, MIN_PASSWORD_LEN};
use crate::components::Icon;
use crate::db::{save_preferences, Preferences};

const INPUT_CLASS: &str = "w-full px-4 py-3 bg-slate-700/50 border border-slate-600 rounded-lg text-white placeholder-slate-400 focus:outline-none focus:border-amber-400";

/// Sign in / sign up dialog. `mode` is `None` while the dialog is closed.
#[component]
pub fn AuthModal(mut mode: Signal<Option<AuthMode>>) -> Element {
    let mut preferences = use_context::<Signal<Preferences>>();
    let mut form = use_signal(AuthForm::default);
    let mut error = use_signal(|| None::<String>);

    let Some(current) = mode() else {
        return rsx! {};
    };

    let mut close = move || {
        form.set(AuthForm::default());
        error.set(None);
        mode.set(None);
    };

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        match authenticate(current, &form.peek()) {
            Ok(user) => {
                info!(user = %user.id, "local account session started");
                preferences.write().user = Some(user);
                let snapshot = preferences.peek().clone();
                spawn(async move {
                    if let Err(err) = save_preferences(snapshot).await {
                        warn!(%err, "could not persist signed-in user");
                    }
                });
                close();
            }
            Err(err) => error.set(Some(err.to_string())),
        }
    };

    let switch_mode = move |_| {
        error.set(None);
        mode.set(Some(current.toggled()));
    };

    let is_signup = current == AuthMode::Signup;
    let title = current.title();
    let submit_label = current.submit_label();
    let values = form.read().clone();
    let password_hint = format!("Password (min. {MIN_PASSWORD_LEN} characters)");

    rsx! {
        div {
            class: "fixed inset-0 z-[60] flex items-center justify-center bg-black/60 backdrop-blur-sm px-4",
            onclick: move |_| close(),
            div {
                class: "relative w-full max-w-md bg-slate-800 border border-slate-700 rounded-2xl p-8",
                onclick: move |evt| evt.stop_propagation(),
                button {
                    r#type: "button",
                    class: "absolute top-4 right-4 text-slate-400 hover:text-white",
                    aria_label: "Close",
                    onclick: move |_| close(),
                    Icon { name: "x".to_string(), class: "w-5 h-5".to_string() }
                }

                h2 { class: "text-2xl font-bold text-white mb-6 text-center", "{title}" }

                form { class: "space-y-4", onsubmit: on_submit,
                    if is_signup {
                        input {
                            r#type: "text",
                            class: INPUT_CLASS,
                            placeholder: "Your name",
                            value: "{values.name}",
                            oninput: move |evt| form.write().name = evt.value(),
                        }
                    }
                    input {
                        r#type: "email",
                        class: INPUT_CLASS,
                        placeholder: "Email address",
                        value: "{values.email}",
                        oninput: move |evt| form.write().email = evt.value(),
                    }
                    input {
                        r#type: "password",
                        class: INPUT_CLASS,
                        placeholder: "{password_hint}",
                        value: "{values.password}",
                        oninput: move |evt| form.write().password = evt.value(),
                    }
                    if is_signup {
                        input {
                            r#type: "password",
                            class: INPUT_CLASS,
                            placeholder: "Confirm password",
                            value: "{values.confirm_password}",
                            oninput: move |evt| form.write().confirm_password = evt.value(),
                        }
                    }

                    if let Some(message) = error() {
                        p { class: "text-red-400 text-sm", "{message}" }
                    }

                    button {
                        r#type: "submit",
                        class: "w-full bg-amber-600 hover:bg-amber-700 text-white py-3 rounded-lg font-medium transition-colors",
                        "{submit_label}"
                    }
                }

                p { class: "mt-6 text-center text-slate-400 text-sm",
                    if is_signup { "Already have an account? " } else { "New here? " }
                    button {
                        r#type: "button",
                        class: "text-amber-400 hover:text-amber-300",
                        onclick: switch_mode,
                        if is_signup { "Sign in" } else { "Create an account" }
                    }
                }
            }
        }
    }
}
