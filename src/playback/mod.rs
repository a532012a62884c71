//! Audio preview playback: a single-source state machine layered over the
//! host's media element.

mod controller;
mod error;
mod format;
mod primitive;
mod session;

pub use controller::PlaybackController;
pub use error::PlaybackUnavailable;
pub use format::format_elapsed;
pub use primitive::{
    AudioPrimitive, MediaNotification, MediaTag, NotificationSink, SourceRef, Subscription,
};
pub use session::{PlaybackSession, PlaybackState, DEFAULT_VOLUME};
