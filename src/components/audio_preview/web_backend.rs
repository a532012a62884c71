// Browser backend: drives a detached `HtmlAudioElement` through web-sys.
use std::cell::Cell;
use std::rc::Rc;

use futures_util::future::{ready, FutureExt, LocalBoxFuture};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

use crate::playback::{
    AudioPrimitive, MediaNotification, MediaTag, NotificationSink, PlaybackUnavailable, SourceRef,
    Subscription,
};

pub struct PlatformAudio {
    audio: Option<HtmlAudioElement>,
    stamp: Rc<Cell<MediaTag>>,
}

impl PlatformAudio {
    pub fn new() -> Self {
        let audio = HtmlAudioElement::new().ok();
        match audio.as_ref() {
            Some(audio) => audio.set_preload("metadata"),
            None => tracing::warn!("could not create an audio element"),
        }
        Self {
            audio,
            stamp: Rc::new(Cell::new(MediaTag::default())),
        }
    }
}

fn js_error_name(err: &JsValue) -> String {
    js_sys::Reflect::get(err, &"name".into())
        .ok()
        .and_then(|value| value.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| "unknown error".to_string())
}

impl AudioPrimitive for PlatformAudio {
    fn load(&mut self, source: Option<&SourceRef>) {
        let Some(audio) = self.audio.as_ref() else {
            return;
        };
        match source {
            Some(source) => audio.set_src(source.as_str()),
            None => {
                let _ = audio.pause();
                let _ = audio.remove_attribute("src");
                audio.load();
            }
        }
    }

    fn subscribe(&mut self, tag: MediaTag, sink: NotificationSink) -> Subscription {
        self.stamp.set(tag);
        let Some(audio) = self.audio.clone() else {
            return Subscription::detached();
        };

        let listener = |read: fn(&HtmlAudioElement) -> MediaNotification| {
            let audio = audio.clone();
            let sink = sink.clone();
            let stamp = self.stamp.clone();
            Closure::wrap(Box::new(move || sink(stamp.get(), read(&audio))) as Box<dyn FnMut()>)
        };

        let listeners: Vec<(&'static str, Closure<dyn FnMut()>)> = vec![
            (
                "loadedmetadata",
                listener(|audio| MediaNotification::MetadataLoaded {
                    duration: audio.duration(),
                    position: audio.current_time(),
                }),
            ),
            (
                "loadeddata",
                listener(|audio| MediaNotification::MetadataLoaded {
                    duration: audio.duration(),
                    position: audio.current_time(),
                }),
            ),
            (
                "timeupdate",
                listener(|audio| MediaNotification::PositionAdvanced {
                    position: audio.current_time(),
                }),
            ),
            ("ended", listener(|_| MediaNotification::Ended)),
            (
                "error",
                listener(|audio| {
                    MediaNotification::Fault(PlaybackUnavailable::MediaFault {
                        code: audio.error().map(|err| err.code()),
                    })
                }),
            ),
        ];

        for (event, callback) in &listeners {
            let _ = audio.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
        }

        Subscription::new(move || {
            for (event, callback) in &listeners {
                let _ = audio
                    .remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
            }
        })
    }

    fn play(&mut self) -> LocalBoxFuture<'static, Result<(), PlaybackUnavailable>> {
        let Some(audio) = self.audio.as_ref() else {
            return ready(Err(PlaybackUnavailable::NoSource)).boxed_local();
        };
        match audio.play() {
            Ok(promise) => async move {
                JsFuture::from(promise)
                    .await
                    .map(|_| ())
                    .map_err(|err| PlaybackUnavailable::PlayRejected(js_error_name(&err)))
            }
            .boxed_local(),
            Err(err) => ready(Err(PlaybackUnavailable::PlayRejected(js_error_name(&err)))).boxed_local(),
        }
    }

    fn pause(&mut self) {
        if let Some(audio) = self.audio.as_ref() {
            let _ = audio.pause();
        }
    }

    fn set_position(&mut self, seconds: f64, tag: MediaTag) {
        self.stamp.set(tag);
        if let Some(audio) = self.audio.as_ref() {
            audio.set_current_time(seconds);
        }
    }

    fn set_volume(&mut self, volume: f64) {
        if let Some(audio) = self.audio.as_ref() {
            audio.set_volume(volume);
        }
    }
}
