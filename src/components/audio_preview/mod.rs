//! Audio preview display unit - one playback controller per release card.
//! The controller is built when its signal is created; media notifications
//! reach it through a coroutine so listener callbacks never borrow it
//! re-entrantly.

use std::rc::Rc;

use dioxus::prelude::*;
use futures_util::StreamExt;
use tracing::warn;

use crate::components::{open_external, Icon};
use crate::db::{save_preferences, Preferences};
use crate::playback::{
    format_elapsed, MediaNotification, MediaTag, NotificationSink, PlaybackController,
    PlaybackSession, PlaybackState, SourceRef,
};

#[cfg(not(target_arch = "wasm32"))]
mod native_backend;
#[cfg(target_arch = "wasm32")]
mod web_backend;

#[cfg(not(target_arch = "wasm32"))]
use native_backend::PlatformAudio;
#[cfg(target_arch = "wasm32")]
use web_backend::PlatformAudio;

type Controller = PlaybackController<PlatformAudio>;

enum PreviewMessage {
    /// Hands the coroutine the controller it dispatches to.
    Attach(Signal<Controller>),
    Media(MediaTag, MediaNotification),
}

fn state_label(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::NoMedia => "no-media",
        PlaybackState::Idle => "idle",
        PlaybackState::Playing => "playing",
        PlaybackState::Faulted => "faulted",
    }
}

#[component]
pub fn AudioPreview(
    #[props(!optional)] source: Option<String>,
    title: String,
    artist: String,
    external_link: String,
) -> Element {
    let mut preferences = use_context::<Signal<Preferences>>();

    let media_events = use_coroutine(move |mut rx: UnboundedReceiver<PreviewMessage>| async move {
        let mut target = None::<Signal<Controller>>;
        while let Some(message) = rx.next().await {
            let (tag, notification) = match message {
                PreviewMessage::Attach(controller) => {
                    target = Some(controller);
                    continue;
                }
                PreviewMessage::Media(tag, notification) => (tag, notification),
            };
            let Some(mut unit) = target else {
                continue;
            };
            let mut controller = unit.write();
            match notification {
                MediaNotification::MetadataLoaded { duration, position } => {
                    controller.on_metadata_loaded(tag, duration, position)
                }
                MediaNotification::PositionAdvanced { position } => {
                    controller.on_position_advanced(tag, position)
                }
                MediaNotification::Ended => controller.on_track_ended(tag),
                MediaNotification::Fault(cause) => controller.on_playback_fault(tag, cause),
            }
        }
    });

    let mut controller = use_signal(move || {
        let tx = media_events.tx();
        let sink: NotificationSink = Rc::new(move |tag, notification| {
            let _ = tx.unbounded_send(PreviewMessage::Media(tag, notification));
        });
        PlaybackController::new(PlatformAudio::new(), preferences.peek().volume, sink)
    });
    use_hook(move || media_events.send(PreviewMessage::Attach(controller)));

    // Re-point the controller whenever the source prop changes.
    use_effect(use_reactive((&source,), move |(source,)| {
        controller
            .write()
            .set_source(source.and_then(SourceRef::parse));
    }));

    let on_toggle = move |_: MouseEvent| {
        let pending = controller.write().toggle_playback();
        if let Some(pending) = pending {
            spawn(async move {
                let outcome = pending.outcome.await;
                controller.write().on_play_settled(pending.ticket, outcome);
            });
        }
    };

    let on_seek = move |e: Event<FormData>| {
        if let Ok(percent) = e.value().parse::<f64>() {
            controller.write().seek(percent);
        }
    };

    let on_volume = move |e: Event<FormData>| {
        if let Ok(percent) = e.value().parse::<f64>() {
            controller.write().set_volume(percent);
        }
    };

    // Persist once the slider is released rather than on every step.
    let on_volume_commit = move |_: Event<FormData>| {
        let volume = controller.read().session().volume();
        if (preferences.peek().volume - volume).abs() <= f64::EPSILON {
            return;
        }
        preferences.write().volume = volume;
        let snapshot = preferences.peek().clone();
        spawn(async move {
            if let Err(err) = save_preferences(snapshot).await {
                warn!(%err, "could not persist preview volume");
            }
        });
    };

    let (session, fault_hint) = {
        let controller = controller.read();
        (
            controller.session().clone(),
            controller.last_failure().map(|err| err.describe()),
        )
    };
    let state = state_label(session.state());

    rsx! {
        div {
            class: "bg-slate-800/50 rounded-lg p-4 border border-slate-700",
            "data-state": state,
            if session.accepts_controls() {
                PreviewControls {
                    session,
                    on_toggle,
                    on_seek,
                    on_volume,
                    on_volume_commit,
                }
                div { class: "mt-2 text-center",
                    p { class: "text-white font-medium text-base", "{title}" }
                    p { class: "text-slate-400 text-sm", "{artist}" }
                    if !external_link.is_empty() {
                        button {
                            r#type: "button",
                            class: "mt-1 text-xs text-amber-400/80 hover:text-amber-300 transition-colors",
                            onclick: move |_| open_external(&external_link),
                            "Full track"
                        }
                    }
                }
            } else {
                div { class: "text-center py-4",
                    p {
                        class: "text-slate-400 text-base",
                        title: fault_hint,
                        "Audio preview coming soon"
                    }
                }
            }
        }
    }
}

#[component]
fn PreviewControls(
    session: PlaybackSession,
    on_toggle: EventHandler<MouseEvent>,
    on_seek: EventHandler<FormEvent>,
    on_volume: EventHandler<FormEvent>,
    on_volume_commit: EventHandler<FormEvent>,
) -> Element {
    let playing = session.is_playing();
    let elapsed = format_elapsed(session.position());
    let total = format_elapsed(session.duration().unwrap_or(f64::NAN));
    let progress = session.progress_percent();
    let volume_percent = (session.volume() * 100.0).round();

    rsx! {
        div { class: "flex items-center space-x-4",
            button {
                id: "preview-play-pause",
                r#type: "button",
                class: "bg-amber-600 hover:bg-amber-700 rounded-full w-12 h-12 flex-shrink-0 flex items-center justify-center text-white",
                aria_label: if playing { "Pause preview" } else { "Play preview" },
                onclick: move |e| on_toggle.call(e),
                if playing {
                    Icon { name: "pause".to_string(), class: "w-5 h-5".to_string() }
                } else {
                    Icon { name: "play".to_string(), class: "w-5 h-5 ml-0.5".to_string() }
                }
            }

            div { class: "flex-1 min-w-0",
                div { class: "flex justify-between text-sm text-slate-400 mb-1",
                    span { "{elapsed}" }
                    span { "{total}" }
                }
                input {
                    r#type: "range",
                    min: "0",
                    max: "100",
                    step: "0.1",
                    value: "{progress}",
                    aria_label: "Seek",
                    class: "w-full h-2 bg-slate-700 rounded-lg appearance-none cursor-pointer slider",
                    oninput: move |e| on_seek.call(e),
                }
            }

            div { class: "flex items-center space-x-2 flex-shrink-0",
                Icon { name: "volume".to_string(), class: "w-4 h-4 text-slate-400".to_string() }
                input {
                    r#type: "range",
                    min: "0",
                    max: "100",
                    value: "{volume_percent}",
                    aria_label: "Volume",
                    class: "w-16 h-2 bg-slate-700 rounded-lg appearance-none cursor-pointer slider",
                    oninput: move |e| on_volume.call(e),
                    onchange: move |e| on_volume_commit.call(e),
                }
            }
        }
    }
}
