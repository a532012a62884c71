//! Contract of the host audio capability the controller drives.
//!
//! The controller never decodes anything itself. It hands a source to an
//! [`AudioPrimitive`], issues transport requests, and listens to the
//! notifications the primitive emits through a [`NotificationSink`].

use std::fmt;
use std::rc::Rc;

use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};

use super::error::PlaybackUnavailable;

/// Opaque reference to an audio resource (usually a URL).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRef(String);

impl SourceRef {
    /// Returns `None` for blank references so an empty string never counts as media.
    pub fn parse(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw.trim().to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stamp carried by every notification.
///
/// `generation` changes with every source change, `seek_epoch` with every
/// seek inside one generation. Notifications whose stamp is older than the
/// session's are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaTag {
    pub generation: u64,
    pub seek_epoch: u32,
}

/// Notifications emitted by the primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaNotification {
    MetadataLoaded { duration: f64, position: f64 },
    PositionAdvanced { position: f64 },
    Ended,
    Fault(PlaybackUnavailable),
}

pub type NotificationSink = Rc<dyn Fn(MediaTag, MediaNotification)>;

/// Scoped listener registration. Dropping it detaches the listeners.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to release.
    pub fn detached() -> Self {
        Self { release: None }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

pub trait AudioPrimitive {
    /// Attach `source` (or detach everything for `None`) with a `metadata` preload hint.
    fn load(&mut self, source: Option<&SourceRef>);

    /// Start forwarding notifications, stamped with `tag`, to `sink`.
    fn subscribe(&mut self, tag: MediaTag, sink: NotificationSink) -> Subscription;

    /// Request playback. Resolves once the host confirms or rejects it.
    fn play(&mut self) -> LocalBoxFuture<'static, Result<(), PlaybackUnavailable>>;

    fn pause(&mut self);

    /// Move the play head. Later notifications are stamped with `tag`.
    fn set_position(&mut self, seconds: f64, tag: MediaTag);

    /// `volume` is already clamped to `[0, 1]`.
    fn set_volume(&mut self, volume: f64);
}
