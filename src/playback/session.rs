//! Playback session state and its reducer.
//!
//! All mutation goes through [`PlaybackSession::apply`], which returns the
//! transport commands the controller has to forward to the audio primitive.

use super::primitive::{MediaNotification, MediaTag, SourceRef};

pub const DEFAULT_VOLUME: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    NoMedia,
    Idle,
    Playing,
    Faulted,
}

/// Identifies one play request so a late outcome can be matched (or ignored).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    SourceChanged(Option<SourceRef>),
    TogglePlayback,
    Seek { percent: f64 },
    SetVolume { percent: f64 },
    PlaySettled { ticket: PlayTicket, succeeded: bool },
    Media { tag: MediaTag, notification: MediaNotification },
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransportCommand {
    /// Drop the listener registration of the previous source.
    Release,
    Load(Option<SourceRef>),
    Subscribe(MediaTag),
    Play(PlayTicket),
    Pause,
    SetPosition { seconds: f64, tag: MediaTag },
    SetVolume(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSession {
    source: Option<SourceRef>,
    state: PlaybackState,
    position: f64,
    duration: Option<f64>,
    volume: f64,
    tag: MediaTag,
    pending_play: Option<PlayTicket>,
    next_ticket: u64,
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}

impl PlaybackSession {
    pub fn new(volume: f64) -> Self {
        let volume = if volume.is_finite() {
            volume.clamp(0.0, 1.0)
        } else {
            DEFAULT_VOLUME
        };
        Self {
            source: None,
            state: PlaybackState::NoMedia,
            position: 0.0,
            duration: None,
            volume,
            tag: MediaTag::default(),
            pending_play: None,
            next_ticket: 0,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn source(&self) -> Option<&SourceRef> {
        self.source.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn has_error(&self) -> bool {
        self.state == PlaybackState::Faulted
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn tag(&self) -> MediaTag {
        self.tag
    }

    /// Whether the transport controls should be offered at all.
    pub fn accepts_controls(&self) -> bool {
        matches!(self.state, PlaybackState::Idle | PlaybackState::Playing)
    }

    /// Seek bar value in percent. Zero while the duration is unknown or empty.
    pub fn progress_percent(&self) -> f64 {
        match self.duration {
            Some(duration) if duration > 0.0 => (self.position / duration * 100.0).clamp(0.0, 100.0),
            _ => 0.0,
        }
    }

    pub fn apply(&mut self, event: PlaybackEvent) -> Vec<TransportCommand> {
        match event {
            PlaybackEvent::SourceChanged(source) => self.change_source(source),
            PlaybackEvent::TogglePlayback => self.toggle(),
            PlaybackEvent::Seek { percent } => self.seek(percent),
            PlaybackEvent::SetVolume { percent } => self.set_volume(percent),
            PlaybackEvent::PlaySettled { ticket, succeeded } => {
                self.settle_play(ticket, succeeded);
                Vec::new()
            }
            PlaybackEvent::Media { tag, notification } => {
                self.observe(tag, notification);
                Vec::new()
            }
        }
    }

    fn change_source(&mut self, source: Option<SourceRef>) -> Vec<TransportCommand> {
        if source == self.source {
            return Vec::new();
        }

        let mut commands = Vec::new();
        if self.state == PlaybackState::Playing {
            commands.push(TransportCommand::Pause);
        }
        commands.push(TransportCommand::Release);

        self.tag = MediaTag {
            generation: self.tag.generation + 1,
            seek_epoch: 0,
        };
        self.position = 0.0;
        self.duration = None;
        self.pending_play = None;
        self.state = if source.is_some() {
            PlaybackState::Idle
        } else {
            PlaybackState::NoMedia
        };
        self.source = source.clone();

        let attached = source.is_some();
        commands.push(TransportCommand::Load(source));
        if attached {
            commands.push(TransportCommand::SetVolume(self.volume));
            commands.push(TransportCommand::Subscribe(self.tag));
        }
        commands
    }

    fn toggle(&mut self) -> Vec<TransportCommand> {
        match self.state {
            PlaybackState::Playing => {
                self.state = PlaybackState::Idle;
                self.pending_play = None;
                vec![TransportCommand::Pause]
            }
            PlaybackState::Idle => {
                let ticket = PlayTicket(self.next_ticket);
                self.next_ticket += 1;
                self.state = PlaybackState::Playing;
                self.pending_play = Some(ticket);
                vec![TransportCommand::Play(ticket)]
            }
            PlaybackState::NoMedia | PlaybackState::Faulted => Vec::new(),
        }
    }

    fn seek(&mut self, percent: f64) -> Vec<TransportCommand> {
        if !self.accepts_controls() || percent.is_nan() {
            return Vec::new();
        }
        let Some(duration) = self.duration else {
            return Vec::new();
        };

        let target = percent.clamp(0.0, 100.0) / 100.0 * duration;
        self.tag.seek_epoch = self.tag.seek_epoch.wrapping_add(1);
        self.position = target;
        vec![TransportCommand::SetPosition {
            seconds: target,
            tag: self.tag,
        }]
    }

    fn set_volume(&mut self, percent: f64) -> Vec<TransportCommand> {
        if !self.accepts_controls() || percent.is_nan() {
            return Vec::new();
        }
        self.volume = percent.clamp(0.0, 100.0) / 100.0;
        vec![TransportCommand::SetVolume(self.volume)]
    }

    fn settle_play(&mut self, ticket: PlayTicket, succeeded: bool) {
        // A later toggle or source change supersedes the request.
        if self.pending_play != Some(ticket) {
            return;
        }
        self.pending_play = None;
        if !succeeded && self.state == PlaybackState::Playing {
            self.state = PlaybackState::Faulted;
        }
    }

    fn observe(&mut self, tag: MediaTag, notification: MediaNotification) {
        if self.state == PlaybackState::NoMedia || tag.generation != self.tag.generation {
            return;
        }

        match notification {
            MediaNotification::MetadataLoaded { duration, position } => {
                self.duration = (duration.is_finite() && duration >= 0.0).then_some(duration);
                // A seek issued since the element reported supersedes its position.
                if tag.seek_epoch == self.tag.seek_epoch && position.is_finite() {
                    self.position = self.clamp_position(position);
                }
            }
            MediaNotification::PositionAdvanced { position } => {
                if tag.seek_epoch != self.tag.seek_epoch || !position.is_finite() {
                    return;
                }
                self.position = self.clamp_position(position);
            }
            MediaNotification::Ended => {
                if tag.seek_epoch != self.tag.seek_epoch {
                    return;
                }
                if self.state == PlaybackState::Playing {
                    self.state = PlaybackState::Idle;
                    self.pending_play = None;
                }
                if let Some(duration) = self.duration {
                    self.position = duration;
                }
            }
            MediaNotification::Fault(_) => {
                self.state = PlaybackState::Faulted;
                self.pending_play = None;
            }
        }
    }

    fn clamp_position(&self, position: f64) -> f64 {
        match self.duration {
            Some(duration) => position.clamp(0.0, duration),
            None => position.max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::error::PlaybackUnavailable;

    fn source(raw: &str) -> Option<SourceRef> {
        SourceRef::parse(raw)
    }

    fn loaded_session(duration: f64) -> PlaybackSession {
        let mut session = PlaybackSession::default();
        session.apply(PlaybackEvent::SourceChanged(source("/audio/field.mp3")));
        let tag = session.tag();
        session.apply(PlaybackEvent::Media {
            tag,
            notification: MediaNotification::MetadataLoaded {
                duration,
                position: 0.0,
            },
        });
        session
    }

    fn play_ticket(commands: &[TransportCommand]) -> PlayTicket {
        commands
            .iter()
            .find_map(|cmd| match cmd {
                TransportCommand::Play(ticket) => Some(*ticket),
                _ => None,
            })
            .expect("toggle should request play")
    }

    #[test]
    fn no_media_ignores_every_control() {
        let mut session = PlaybackSession::default();
        let before = session.clone();

        assert!(session.apply(PlaybackEvent::TogglePlayback).is_empty());
        assert!(session.apply(PlaybackEvent::Seek { percent: 50.0 }).is_empty());
        assert!(session.apply(PlaybackEvent::SetVolume { percent: 10.0 }).is_empty());
        assert_eq!(session, before);
        assert_eq!(session.state(), PlaybackState::NoMedia);
    }

    #[test]
    fn supplying_a_source_moves_to_idle_and_subscribes() {
        let mut session = PlaybackSession::default();
        let commands = session.apply(PlaybackEvent::SourceChanged(source("/a.mp3")));

        assert_eq!(session.state(), PlaybackState::Idle);
        assert_eq!(session.tag().generation, 1);
        assert_eq!(
            commands,
            vec![
                TransportCommand::Release,
                TransportCommand::Load(source("/a.mp3")),
                TransportCommand::SetVolume(DEFAULT_VOLUME),
                TransportCommand::Subscribe(session.tag()),
            ]
        );
    }

    #[test]
    fn same_source_is_not_a_change() {
        let mut session = loaded_session(120.0);
        let generation = session.tag().generation;
        assert!(session
            .apply(PlaybackEvent::SourceChanged(source("/audio/field.mp3")))
            .is_empty());
        assert_eq!(session.tag().generation, generation);
        assert_eq!(session.duration(), Some(120.0));
    }

    #[test]
    fn play_then_pause() {
        let mut session = loaded_session(120.0);
        let commands = session.apply(PlaybackEvent::TogglePlayback);
        let ticket = play_ticket(&commands);
        assert!(session.is_playing());

        session.apply(PlaybackEvent::PlaySettled {
            ticket,
            succeeded: true,
        });
        assert_eq!(session.state(), PlaybackState::Playing);

        let commands = session.apply(PlaybackEvent::TogglePlayback);
        assert_eq!(commands, vec![TransportCommand::Pause]);
        assert_eq!(session.state(), PlaybackState::Idle);
        assert!(!session.is_playing());
    }

    #[test]
    fn rejected_play_faults_and_blocks_controls() {
        let mut session = loaded_session(120.0);
        let ticket = play_ticket(&session.apply(PlaybackEvent::TogglePlayback));
        session.apply(PlaybackEvent::PlaySettled {
            ticket,
            succeeded: false,
        });

        assert_eq!(session.state(), PlaybackState::Faulted);
        assert!(session.has_error());
        assert!(!session.is_playing());

        let position = session.position();
        assert!(session.apply(PlaybackEvent::Seek { percent: 50.0 }).is_empty());
        assert_eq!(session.position(), position);
        assert!(session.apply(PlaybackEvent::TogglePlayback).is_empty());
        assert!(session.apply(PlaybackEvent::SetVolume { percent: 20.0 }).is_empty());
        assert_eq!(session.volume(), DEFAULT_VOLUME);
    }

    #[test]
    fn pause_before_confirmation_wins() {
        let mut session = loaded_session(120.0);
        let ticket = play_ticket(&session.apply(PlaybackEvent::TogglePlayback));
        session.apply(PlaybackEvent::TogglePlayback);

        // The host rejects the interrupted request; that must not fault the preview.
        session.apply(PlaybackEvent::PlaySettled {
            ticket,
            succeeded: false,
        });
        assert_eq!(session.state(), PlaybackState::Idle);

        // A late success for the superseded request does not resume playback either.
        session.apply(PlaybackEvent::PlaySettled {
            ticket,
            succeeded: true,
        });
        assert_eq!(session.state(), PlaybackState::Idle);
    }

    #[test]
    fn fault_is_sticky_until_source_changes() {
        let mut session = loaded_session(120.0);
        session.apply(PlaybackEvent::TogglePlayback);
        let tag = session.tag();
        session.apply(PlaybackEvent::Media {
            tag,
            notification: MediaNotification::Fault(PlaybackUnavailable::MediaFault { code: Some(2) }),
        });
        assert_eq!(session.state(), PlaybackState::Faulted);
        assert!(!session.is_playing());

        // Metadata for the faulted source does not revive it.
        session.apply(PlaybackEvent::Media {
            tag,
            notification: MediaNotification::MetadataLoaded {
                duration: 90.0,
                position: 0.0,
            },
        });
        assert_eq!(session.state(), PlaybackState::Faulted);
        assert!(session.apply(PlaybackEvent::TogglePlayback).is_empty());

        session.apply(PlaybackEvent::SourceChanged(source("/audio/other.mp3")));
        assert_eq!(session.state(), PlaybackState::Idle);
        assert!(!session.has_error());
        assert_eq!(session.position(), 0.0);
        assert_eq!(session.duration(), None);
    }

    #[test]
    fn seek_scales_by_duration() {
        for duration in [0.0, 1.0, 59.5, 213.0] {
            for percent in [0.0, 12.5, 50.0, 99.9, 100.0] {
                let mut session = loaded_session(duration);
                session.apply(PlaybackEvent::Seek { percent });
                let expected = percent / 100.0 * duration;
                assert!(
                    (session.position() - expected).abs() < 1e-9,
                    "seek({percent}) on {duration}s landed at {}",
                    session.position()
                );
            }
        }
    }

    #[test]
    fn seek_needs_known_duration() {
        let mut session = PlaybackSession::default();
        session.apply(PlaybackEvent::SourceChanged(source("/a.mp3")));
        assert!(session.apply(PlaybackEvent::Seek { percent: 40.0 }).is_empty());
        assert_eq!(session.position(), 0.0);
    }

    #[test]
    fn seek_clamps_out_of_range_and_ignores_nan() {
        let mut session = loaded_session(200.0);
        session.apply(PlaybackEvent::Seek { percent: 150.0 });
        assert_eq!(session.position(), 200.0);
        session.apply(PlaybackEvent::Seek { percent: -5.0 });
        assert_eq!(session.position(), 0.0);
        assert!(session.apply(PlaybackEvent::Seek { percent: f64::NAN }).is_empty());
    }

    #[test]
    fn stale_position_after_seek_is_discarded() {
        let mut session = loaded_session(200.0);
        let before_seek = session.tag();
        session.apply(PlaybackEvent::Seek { percent: 10.0 });
        assert_eq!(session.position(), 20.0);

        session.apply(PlaybackEvent::Media {
            tag: before_seek,
            notification: MediaNotification::PositionAdvanced { position: 150.0 },
        });
        assert_eq!(session.position(), 20.0);

        let current = session.tag();
        session.apply(PlaybackEvent::Media {
            tag: current,
            notification: MediaNotification::PositionAdvanced { position: 21.0 },
        });
        assert_eq!(session.position(), 21.0);
    }

    #[test]
    fn stale_metadata_and_end_after_seek_are_discarded() {
        let mut session = loaded_session(200.0);
        let before_seek = session.tag();
        session.apply(PlaybackEvent::TogglePlayback);
        session.apply(PlaybackEvent::Seek { percent: 50.0 });
        assert_eq!(session.position(), 100.0);

        session.apply(PlaybackEvent::Media {
            tag: before_seek,
            notification: MediaNotification::MetadataLoaded {
                duration: 180.0,
                position: 3.0,
            },
        });
        assert_eq!(session.position(), 100.0);
        assert_eq!(session.duration(), Some(180.0));

        session.apply(PlaybackEvent::Seek { percent: 25.0 });
        assert_eq!(session.position(), 45.0);
        session.apply(PlaybackEvent::Media {
            tag: before_seek,
            notification: MediaNotification::Ended,
        });
        assert_eq!(session.state(), PlaybackState::Playing);
        assert_eq!(session.position(), 45.0);

        let current = session.tag();
        session.apply(PlaybackEvent::Media {
            tag: current,
            notification: MediaNotification::Ended,
        });
        assert_eq!(session.state(), PlaybackState::Idle);
        assert_eq!(session.position(), 180.0);
    }

    #[test]
    fn notifications_from_previous_source_are_discarded() {
        let mut session = loaded_session(200.0);
        let old = session.tag();
        session.apply(PlaybackEvent::SourceChanged(source("/b.mp3")));

        session.apply(PlaybackEvent::Media {
            tag: old,
            notification: MediaNotification::PositionAdvanced { position: 80.0 },
        });
        session.apply(PlaybackEvent::Media {
            tag: old,
            notification: MediaNotification::Fault(PlaybackUnavailable::MediaFault { code: None }),
        });
        assert_eq!(session.position(), 0.0);
        assert_eq!(session.state(), PlaybackState::Idle);
    }

    #[test]
    fn positions_clamp_to_duration() {
        let mut session = loaded_session(30.0);
        let tag = session.tag();
        session.apply(PlaybackEvent::Media {
            tag,
            notification: MediaNotification::PositionAdvanced { position: 31.5 },
        });
        assert_eq!(session.position(), 30.0);
        assert_eq!(session.progress_percent(), 100.0);
    }

    #[test]
    fn unknown_duration_from_metadata() {
        let mut session = loaded_session(f64::INFINITY);
        assert_eq!(session.duration(), None);
        assert_eq!(session.progress_percent(), 0.0);
        assert!(session.apply(PlaybackEvent::Seek { percent: 30.0 }).is_empty());
    }

    #[test]
    fn track_end_returns_to_idle() {
        let mut session = loaded_session(42.0);
        session.apply(PlaybackEvent::TogglePlayback);
        let tag = session.tag();
        session.apply(PlaybackEvent::Media {
            tag,
            notification: MediaNotification::Ended,
        });
        assert_eq!(session.state(), PlaybackState::Idle);
        assert_eq!(session.position(), 42.0);
    }

    #[test]
    fn volume_is_idempotent_and_survives_source_changes() {
        let mut session = loaded_session(60.0);
        session.apply(PlaybackEvent::SetVolume { percent: 50.0 });
        session.apply(PlaybackEvent::SetVolume { percent: 50.0 });
        assert_eq!(session.volume(), 0.5);

        let commands = session.apply(PlaybackEvent::SourceChanged(source("/c.mp3")));
        assert_eq!(session.volume(), 0.5);
        assert!(commands.contains(&TransportCommand::SetVolume(0.5)));

        session.apply(PlaybackEvent::SourceChanged(None));
        assert_eq!(session.state(), PlaybackState::NoMedia);
        assert_eq!(session.volume(), 0.5);
    }

    #[test]
    fn switching_source_while_playing_pauses_first() {
        let mut session = loaded_session(60.0);
        session.apply(PlaybackEvent::TogglePlayback);
        let commands = session.apply(PlaybackEvent::SourceChanged(source("/d.mp3")));
        assert_eq!(commands.first(), Some(&TransportCommand::Pause));
        assert_eq!(commands.get(1), Some(&TransportCommand::Release));
        assert!(!session.is_playing());
    }

    #[test]
    fn out_of_range_initial_volume_is_clamped() {
        assert_eq!(PlaybackSession::new(3.0).volume(), 1.0);
        assert_eq!(PlaybackSession::new(f64::NAN).volume(), DEFAULT_VOLUME);
    }
}
