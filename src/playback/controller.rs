use futures_util::future::LocalBoxFuture;
use tracing::{debug, info, warn};

use super::error::PlaybackUnavailable;
use super::primitive::{
    AudioPrimitive, MediaNotification, MediaTag, NotificationSink, SourceRef, Subscription,
};
use super::session::{PlayTicket, PlaybackEvent, PlaybackSession, TransportCommand};

/// A play request whose outcome is still in flight.
///
/// The caller awaits `outcome` without blocking the UI and reports it back
/// through [`PlaybackController::on_play_settled`].
pub struct PendingPlay {
    pub ticket: PlayTicket,
    pub outcome: LocalBoxFuture<'static, Result<(), PlaybackUnavailable>>,
}

/// Mediates between user intent and one audio primitive.
pub struct PlaybackController<P: AudioPrimitive> {
    session: PlaybackSession,
    primitive: P,
    sink: NotificationSink,
    subscription: Option<Subscription>,
    last_failure: Option<PlaybackUnavailable>,
}

impl<P: AudioPrimitive> PlaybackController<P> {
    pub fn new(primitive: P, volume: f64, sink: NotificationSink) -> Self {
        Self {
            session: PlaybackSession::new(volume),
            primitive,
            sink,
            subscription: None,
            last_failure: None,
        }
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn last_failure(&self) -> Option<&PlaybackUnavailable> {
        self.last_failure.as_ref()
    }

    pub fn set_source(&mut self, source: Option<SourceRef>) {
        if source.as_ref() == self.session.source() {
            return;
        }
        self.last_failure = None;
        self.dispatch(PlaybackEvent::SourceChanged(source));
        info!(
            generation = self.session.tag().generation,
            source = ?self.session.source().map(SourceRef::as_str),
            "audio preview source changed"
        );
    }

    pub fn toggle_playback(&mut self) -> Option<PendingPlay> {
        self.dispatch(PlaybackEvent::TogglePlayback)
    }

    pub fn seek(&mut self, percent: f64) {
        self.dispatch(PlaybackEvent::Seek { percent });
    }

    pub fn set_volume(&mut self, percent: f64) {
        self.dispatch(PlaybackEvent::SetVolume { percent });
    }

    pub fn on_play_settled(&mut self, ticket: PlayTicket, outcome: Result<(), PlaybackUnavailable>) {
        let was_playing = self.session.is_playing();
        let failure = outcome.err();
        self.dispatch(PlaybackEvent::PlaySettled {
            ticket,
            succeeded: failure.is_none(),
        });
        match failure {
            Some(err) if was_playing && self.session.has_error() => {
                warn!(%err, "audio preview unavailable");
                self.last_failure = Some(err);
            }
            Some(err) => debug!(?ticket, %err, "ignoring outcome of a superseded play request"),
            None => {}
        }
    }

    /// Entry point for everything the primitive reports.
    pub fn handle(&mut self, tag: MediaTag, notification: MediaNotification) {
        if tag.generation != self.session.tag().generation {
            debug!(?tag, current = ?self.session.tag(), "discarding notification from a previous source");
            return;
        }
        if let MediaNotification::Fault(err) = &notification {
            if !self.session.has_error() {
                warn!(%err, "audio preview unavailable");
                self.last_failure = Some(err.clone());
            }
        }
        self.dispatch(PlaybackEvent::Media { tag, notification });
    }

    pub fn on_metadata_loaded(&mut self, tag: MediaTag, duration: f64, position: f64) {
        self.handle(tag, MediaNotification::MetadataLoaded { duration, position });
    }

    pub fn on_position_advanced(&mut self, tag: MediaTag, position: f64) {
        self.handle(tag, MediaNotification::PositionAdvanced { position });
    }

    pub fn on_playback_fault(&mut self, tag: MediaTag, cause: PlaybackUnavailable) {
        self.handle(tag, MediaNotification::Fault(cause));
    }

    pub fn on_track_ended(&mut self, tag: MediaTag) {
        self.handle(tag, MediaNotification::Ended);
    }

    /// Stop playback, release the listeners and detach the media. Also runs on drop.
    pub fn teardown(&mut self) {
        self.dispatch(PlaybackEvent::SourceChanged(None));
    }

    fn dispatch(&mut self, event: PlaybackEvent) -> Option<PendingPlay> {
        let mut pending = None;
        for command in self.session.apply(event) {
            match command {
                TransportCommand::Release => {
                    self.subscription = None;
                }
                TransportCommand::Load(source) => self.primitive.load(source.as_ref()),
                TransportCommand::Subscribe(tag) => {
                    self.subscription = Some(self.primitive.subscribe(tag, self.sink.clone()));
                }
                TransportCommand::Play(ticket) => {
                    debug!(?ticket, "requesting playback");
                    pending = Some(PendingPlay {
                        ticket,
                        outcome: self.primitive.play(),
                    });
                }
                TransportCommand::Pause => self.primitive.pause(),
                TransportCommand::SetPosition { seconds, tag } => {
                    self.primitive.set_position(seconds, tag)
                }
                TransportCommand::SetVolume(volume) => self.primitive.set_volume(volume),
            }
        }
        pending
    }
}

impl<P: AudioPrimitive> Drop for PlaybackController<P> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::session::PlaybackState;
    use futures_util::future::{ready, FutureExt};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Load(Option<String>),
        Subscribe(MediaTag),
        Unsubscribe(MediaTag),
        Play,
        Pause,
        SetPosition(f64),
        SetVolume(f64),
    }

    #[derive(Clone, Default)]
    struct RecordingAudio {
        calls: Rc<RefCell<Vec<Call>>>,
    }

    impl RecordingAudio {
        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn clear(&self) {
            self.calls.borrow_mut().clear();
        }
    }

    impl AudioPrimitive for RecordingAudio {
        fn load(&mut self, source: Option<&SourceRef>) {
            self.calls
                .borrow_mut()
                .push(Call::Load(source.map(|s| s.to_string())));
        }

        fn subscribe(&mut self, tag: MediaTag, _sink: NotificationSink) -> Subscription {
            self.calls.borrow_mut().push(Call::Subscribe(tag));
            let calls = self.calls.clone();
            Subscription::new(move || calls.borrow_mut().push(Call::Unsubscribe(tag)))
        }

        fn play(&mut self) -> LocalBoxFuture<'static, Result<(), PlaybackUnavailable>> {
            self.calls.borrow_mut().push(Call::Play);
            ready(Ok(())).boxed_local()
        }

        fn pause(&mut self) {
            self.calls.borrow_mut().push(Call::Pause);
        }

        fn set_position(&mut self, seconds: f64, _tag: MediaTag) {
            self.calls.borrow_mut().push(Call::SetPosition(seconds));
        }

        fn set_volume(&mut self, volume: f64) {
            self.calls.borrow_mut().push(Call::SetVolume(volume));
        }
    }

    fn controller() -> (PlaybackController<RecordingAudio>, RecordingAudio) {
        let audio = RecordingAudio::default();
        let sink: NotificationSink = Rc::new(|_, _| {});
        (PlaybackController::new(audio.clone(), 0.7, sink), audio)
    }

    fn with_source(duration: f64) -> (PlaybackController<RecordingAudio>, RecordingAudio) {
        let (mut controller, audio) = controller();
        controller.set_source(SourceRef::parse("/audio/field.mp3"));
        let tag = controller.session().tag();
        controller.on_metadata_loaded(tag, duration, 0.0);
        audio.clear();
        (controller, audio)
    }

    #[test]
    fn controls_without_source_touch_nothing() {
        let (mut controller, audio) = controller();
        assert!(controller.toggle_playback().is_none());
        controller.seek(50.0);
        controller.set_volume(20.0);
        assert!(audio.calls().is_empty());
        assert_eq!(controller.session().state(), PlaybackState::NoMedia);
        assert_eq!(controller.session().volume(), 0.7);
    }

    #[test]
    fn source_change_resubscribes_after_releasing() {
        let (mut controller, audio) = controller();
        controller.set_source(SourceRef::parse("/a.mp3"));
        let first = controller.session().tag();
        controller.set_source(SourceRef::parse("/b.mp3"));
        let second = controller.session().tag();

        assert_eq!(
            audio.calls(),
            vec![
                Call::Load(Some("/a.mp3".into())),
                Call::SetVolume(0.7),
                Call::Subscribe(first),
                Call::Unsubscribe(first),
                Call::Load(Some("/b.mp3".into())),
                Call::SetVolume(0.7),
                Call::Subscribe(second),
            ]
        );
    }

    #[test]
    fn successful_play_then_pause() {
        let (mut controller, audio) = with_source(180.0);
        let pending = controller.toggle_playback().expect("play requested");
        controller.on_play_settled(pending.ticket, Ok(()));
        assert_eq!(controller.session().state(), PlaybackState::Playing);
        assert!(controller.session().is_playing());

        assert!(controller.toggle_playback().is_none());
        assert_eq!(controller.session().state(), PlaybackState::Idle);
        assert_eq!(audio.calls(), vec![Call::Play, Call::Pause]);
    }

    #[test]
    fn rejected_play_faults_the_session() {
        let (mut controller, audio) = with_source(180.0);
        let pending = controller.toggle_playback().expect("play requested");
        controller.on_play_settled(
            pending.ticket,
            Err(PlaybackUnavailable::PlayRejected("NotAllowedError".into())),
        );

        assert_eq!(controller.session().state(), PlaybackState::Faulted);
        assert!(controller.session().has_error());
        assert!(!controller.session().is_playing());
        assert!(matches!(
            controller.last_failure(),
            Some(PlaybackUnavailable::PlayRejected(_))
        ));

        audio.clear();
        controller.seek(50.0);
        assert!(controller.toggle_playback().is_none());
        assert!(audio.calls().is_empty());
    }

    #[test]
    fn fault_notification_is_terminal_until_new_source() {
        let (mut controller, audio) = with_source(180.0);
        controller.toggle_playback();
        let tag = controller.session().tag();
        controller.on_playback_fault(tag, PlaybackUnavailable::MediaFault { code: Some(3) });
        assert!(!controller.session().is_playing());
        assert!(controller.toggle_playback().is_none());
        assert!(controller.toggle_playback().is_none());

        controller.set_source(SourceRef::parse("/audio/other.mp3"));
        assert_eq!(controller.session().state(), PlaybackState::Idle);
        assert!(controller.last_failure().is_none());
        assert!(controller.toggle_playback().is_some());
        assert!(audio.calls().contains(&Call::Load(Some("/audio/other.mp3".into()))));
    }

    #[test]
    fn seek_forwards_target_to_primitive() {
        let (mut controller, audio) = with_source(240.0);
        controller.seek(25.0);
        assert_eq!(controller.session().position(), 60.0);
        assert_eq!(audio.calls(), vec![Call::SetPosition(60.0)]);
    }

    #[test]
    fn volume_updates_primitive_immediately() {
        let (mut controller, audio) = with_source(240.0);
        controller.set_volume(50.0);
        controller.set_volume(50.0);
        assert_eq!(controller.session().volume(), 0.5);
        assert_eq!(audio.calls(), vec![Call::SetVolume(0.5), Call::SetVolume(0.5)]);
    }

    #[test]
    fn stale_generation_is_dropped_before_reducing() {
        let (mut controller, _audio) = with_source(240.0);
        let stale = controller.session().tag();
        controller.set_source(SourceRef::parse("/audio/next.mp3"));
        controller.on_playback_fault(stale, PlaybackUnavailable::MediaFault { code: Some(2) });
        assert_eq!(controller.session().state(), PlaybackState::Idle);
        assert!(controller.last_failure().is_none());
    }

    #[test]
    fn teardown_pauses_and_unsubscribes() {
        let (mut controller, audio) = with_source(240.0);
        let tag = controller.session().tag();
        controller.toggle_playback();
        audio.clear();

        drop(controller);
        assert_eq!(
            audio.calls(),
            vec![Call::Pause, Call::Unsubscribe(tag), Call::Load(None)]
        );
    }
}
