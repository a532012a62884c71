use thiserror::Error;

/// The only way a preview can fail. Raised by the audio primitive, absorbed by
/// the controller and turned into the sticky `Faulted` state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackUnavailable {
    /// The play request was rejected (autoplay policy, unsupported source, ...).
    #[error("play request rejected: {0}")]
    PlayRejected(String),

    /// The media element reported a decode or network error.
    #[error("media fault (code {})", .code.map_or_else(|| "unknown".to_string(), |c| c.to_string()))]
    MediaFault { code: Option<u16> },

    /// The primitive has no media attached.
    #[error("no audio source attached")]
    NoSource,
}

impl PlaybackUnavailable {
    /// Human-readable cause, mirroring the HTML media error codes.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::PlayRejected(_) => "Playback was blocked by the browser.",
            Self::MediaFault { code: Some(1) } => "Playback was aborted before the stream loaded.",
            Self::MediaFault { code: Some(2) } => "Network error while loading this track.",
            Self::MediaFault { code: Some(3) } => "Audio playback failed due to a decode error.",
            Self::MediaFault { code: Some(4) } => "No supported audio source was found.",
            Self::MediaFault { .. } => "Unable to load this audio source.",
            Self::NoSource => "No audio source attached.",
        }
    }
}
