// Desktop backend: the webview owns the media element, Rust talks to it
// through `document::eval`.
use dioxus::prelude::*;
use futures_util::future::{FutureExt, LocalBoxFuture};
use serde::Deserialize;
use uuid::Uuid;

use crate::playback::{
    AudioPrimitive, MediaNotification, MediaTag, NotificationSink, PlaybackUnavailable, SourceRef,
    Subscription,
};

const NATIVE_AUDIO_BRIDGE_JS: &str = r#"
(() => {
  if (window.__mauroAudioBridge) {
    return true;
  }

  const units = new Map();
  const finite = (value) => (Number.isFinite(value) ? value : null);

  const unit = (id) => {
    let entry = units.get(id);
    if (!entry) {
      const audio = document.createElement("audio");
      audio.preload = "metadata";
      entry = { audio, tag: { generation: 0, seek_epoch: 0 }, detach: null };
      units.set(id, entry);
    }
    return entry;
  };

  window.__mauroAudioBridge = {
    unit,
    apply(id, cmd) {
      if (!cmd || !cmd.type) return false;
      const entry = unit(id);
      const audio = entry.audio;

      switch (cmd.type) {
        case "load":
          if (cmd.src) {
            audio.src = cmd.src;
          } else {
            audio.pause();
            audio.removeAttribute("src");
            audio.load();
          }
          break;
        case "pause":
          audio.pause();
          break;
        case "seek":
          entry.tag = cmd.tag;
          try {
            audio.currentTime = Math.max(0, cmd.position);
          } catch (_err) {}
          break;
        case "volume":
          audio.volume = Math.max(0, Math.min(1, cmd.volume));
          break;
        case "detach":
          if (entry.detach) {
            entry.detach();
            entry.detach = null;
          }
          break;
        case "dispose":
          if (entry.detach) entry.detach();
          audio.pause();
          units.delete(id);
          break;
      }
      return true;
    },
    attach(id, tag, send) {
      const entry = unit(id);
      if (entry.detach) entry.detach();
      entry.tag = tag;

      const audio = entry.audio;
      const emit = (kind, extra) => send(Object.assign({ kind, tag: entry.tag }, extra || {}));
      const metadata = () =>
        emit("metadata", { duration: finite(audio.duration), position: finite(audio.currentTime) });
      const handlers = {
        loadedmetadata: metadata,
        loadeddata: metadata,
        timeupdate: () => emit("position", { position: finite(audio.currentTime) }),
        ended: () => emit("ended"),
        error: () => emit("fault", { code: audio.error ? audio.error.code : null }),
      };

      for (const [name, handler] of Object.entries(handlers)) {
        audio.addEventListener(name, handler);
      }
      entry.detach = () => {
        for (const [name, handler] of Object.entries(handlers)) {
          audio.removeEventListener(name, handler);
        }
      };
      return true;
    },
  };

  return true;
})();
"#;

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum BridgeMessage {
    Metadata {
        tag: MediaTag,
        duration: Option<f64>,
        position: Option<f64>,
    },
    Position {
        tag: MediaTag,
        position: Option<f64>,
    },
    Ended {
        tag: MediaTag,
    },
    Fault {
        tag: MediaTag,
        code: Option<u16>,
    },
}

impl BridgeMessage {
    fn into_notification(self) -> (MediaTag, MediaNotification) {
        match self {
            BridgeMessage::Metadata {
                tag,
                duration,
                position,
            } => (
                tag,
                MediaNotification::MetadataLoaded {
                    duration: duration.unwrap_or(f64::NAN),
                    position: position.unwrap_or(0.0),
                },
            ),
            BridgeMessage::Position { tag, position } => (
                tag,
                MediaNotification::PositionAdvanced {
                    position: position.unwrap_or(f64::NAN),
                },
            ),
            BridgeMessage::Ended { tag } => (tag, MediaNotification::Ended),
            BridgeMessage::Fault { tag, code } => (
                tag,
                MediaNotification::Fault(PlaybackUnavailable::MediaFault { code }),
            ),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PlayOutcome {
    ok: bool,
    #[serde(default)]
    reason: Option<String>,
}

pub struct PlatformAudio {
    unit: String,
}

fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

fn bridge_command(unit: &str, value: serde_json::Value) {
    let payload = serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string());
    let script = format!(
        "{NATIVE_AUDIO_BRIDGE_JS}\nwindow.__mauroAudioBridge.apply({}, {payload});",
        js_string(unit)
    );
    let _ = document::eval(&script);
}

impl PlatformAudio {
    pub fn new() -> Self {
        Self {
            unit: Uuid::new_v4().to_string(),
        }
    }

    fn command(&self, value: serde_json::Value) {
        bridge_command(&self.unit, value);
    }
}

impl AudioPrimitive for PlatformAudio {
    fn load(&mut self, source: Option<&SourceRef>) {
        self.command(serde_json::json!({
            "type": "load",
            "src": source.map(SourceRef::as_str),
        }));
    }

    fn subscribe(&mut self, tag: MediaTag, sink: NotificationSink) -> Subscription {
        let tag_literal = serde_json::to_string(&tag).unwrap_or_else(|_| "{}".to_string());
        let script = format!(
            r#"{NATIVE_AUDIO_BRIDGE_JS}
window.__mauroAudioBridge.attach({}, {tag_literal}, (message) => dioxus.send(message));
return new Promise(() => {{}});"#,
            js_string(&self.unit)
        );
        let mut eval = document::eval(&script);
        let task = spawn(async move {
            while let Ok(message) = eval.recv::<BridgeMessage>().await {
                let (tag, notification) = message.into_notification();
                sink(tag, notification);
            }
        });

        let unit = self.unit.clone();
        Subscription::new(move || {
            task.cancel();
            bridge_command(&unit, serde_json::json!({ "type": "detach" }));
        })
    }

    fn play(&mut self) -> LocalBoxFuture<'static, Result<(), PlaybackUnavailable>> {
        let script = format!(
            r#"{NATIVE_AUDIO_BRIDGE_JS}
return (async function () {{
    const entry = window.__mauroAudioBridge.unit({});
    try {{
        await entry.audio.play();
        return {{ ok: true }};
    }} catch (err) {{
        return {{ ok: false, reason: String((err && err.name) || err) }};
    }}
}})();"#,
            js_string(&self.unit)
        );
        let eval = document::eval(&script);
        async move {
            match eval.join::<PlayOutcome>().await {
                Ok(outcome) if outcome.ok => Ok(()),
                Ok(outcome) => Err(PlaybackUnavailable::PlayRejected(
                    outcome.reason.unwrap_or_else(|| "unknown error".to_string()),
                )),
                Err(err) => Err(PlaybackUnavailable::PlayRejected(format!("{err:?}"))),
            }
        }
        .boxed_local()
    }

    fn pause(&mut self) {
        self.command(serde_json::json!({ "type": "pause" }));
    }

    fn set_position(&mut self, seconds: f64, tag: MediaTag) {
        self.command(serde_json::json!({
            "type": "seek",
            "position": seconds.max(0.0),
            "tag": tag,
        }));
    }

    fn set_volume(&mut self, volume: f64) {
        self.command(serde_json::json!({
            "type": "volume",
            "volume": volume,
        }));
    }
}

impl Drop for PlatformAudio {
    fn drop(&mut self) {
        self.command(serde_json::json!({ "type": "dispose" }));
    }
}
