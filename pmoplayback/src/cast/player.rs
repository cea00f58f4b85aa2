use std::fmt;
use std::sync::{Arc, Weak};

use crossbeam_channel::Receiver;
use futures::FutureExt;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::errors::{Deferred, PlaybackError, Result, rejected};
use crate::events::{EventKind, Listener, ListenerRegistry, PlayerEvent};
use crate::model::clamp_volume;

use super::framework::{
    CUSTOM_MESSAGE_NAMESPACE, CastContext, CastFramework, CastOptions, RemotePlayer,
    RemotePlayerChangedEvent, RemotePlayerController, RemotePlayerEventType,
};
use super::media::{
    LiveSeekableRange, LoadOptions, LoadRequest, MediaInfo, MediaSession, PlayerState, QueueEntry,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastEventKind {
    ConnectionChanged,
    MediaInfoChanged,
    PlayerStateChanged,
    TimeChanged,
    DurationChanged,
    VolumeChanged,
    IsMutedChanged,
    QueueChanged,
    LiveSeekableRangeChanged,
}

impl EventKind for CastEventKind {
    const ALL: &'static [Self] = &[
        CastEventKind::ConnectionChanged,
        CastEventKind::MediaInfoChanged,
        CastEventKind::PlayerStateChanged,
        CastEventKind::TimeChanged,
        CastEventKind::DurationChanged,
        CastEventKind::VolumeChanged,
        CastEventKind::IsMutedChanged,
        CastEventKind::QueueChanged,
        CastEventKind::LiveSeekableRangeChanged,
    ];

    fn name(self) -> &'static str {
        match self {
            CastEventKind::ConnectionChanged => "connectionChanged",
            CastEventKind::MediaInfoChanged => "mediaInfoChanged",
            CastEventKind::PlayerStateChanged => "playerStateChanged",
            CastEventKind::TimeChanged => "timeChanged",
            CastEventKind::DurationChanged => "durationChanged",
            CastEventKind::VolumeChanged => "volumeChanged",
            CastEventKind::IsMutedChanged => "isMutedChanged",
            CastEventKind::QueueChanged => "queueChanged",
            CastEventKind::LiveSeekableRangeChanged => "liveSeekableRangeChanged",
        }
    }
}

/// Event delivered to listeners of a [`CastPlayer`].
#[derive(Debug, Clone, PartialEq)]
pub enum CastEvent {
    ConnectionChanged(bool),
    MediaInfoChanged(Option<MediaInfo>),
    PlayerStateChanged(Option<PlayerState>),
    TimeChanged(f64),
    DurationChanged(f64),
    VolumeChanged(f64),
    IsMutedChanged(bool),
    QueueChanged(Vec<QueueEntry>),
    LiveSeekableRangeChanged(Option<LiveSeekableRange>),
}

impl PlayerEvent for CastEvent {
    type Kind = CastEventKind;

    fn kind(&self) -> CastEventKind {
        match self {
            CastEvent::ConnectionChanged(_) => CastEventKind::ConnectionChanged,
            CastEvent::MediaInfoChanged(_) => CastEventKind::MediaInfoChanged,
            CastEvent::PlayerStateChanged(_) => CastEventKind::PlayerStateChanged,
            CastEvent::TimeChanged(_) => CastEventKind::TimeChanged,
            CastEvent::DurationChanged(_) => CastEventKind::DurationChanged,
            CastEvent::VolumeChanged(_) => CastEventKind::VolumeChanged,
            CastEvent::IsMutedChanged(_) => CastEventKind::IsMutedChanged,
            CastEvent::QueueChanged(_) => CastEventKind::QueueChanged,
            CastEvent::LiveSeekableRangeChanged(_) => CastEventKind::LiveSeekableRangeChanged,
        }
    }
}

struct RemoteHandles {
    player: Arc<dyn RemotePlayer>,
    controller: Arc<dyn RemotePlayerController>,
}

/// Media session of the current cast session, only while `player` is connected.
fn connected_media_session(
    player: &dyn RemotePlayer,
    context: &dyn CastContext,
) -> Option<MediaSession> {
    if !player.is_connected() {
        return None;
    }
    context.current_session()?.media_session()
}

fn or_zero(seconds: f64) -> f64 {
    if seconds.is_nan() { 0.0 } else { seconds }
}

/// Translates one remote player change into the adapter event, re-reading
/// derived values from the player and the current session.
fn forward_event(
    change: &RemotePlayerChangedEvent,
    player: &dyn RemotePlayer,
    context: &dyn CastContext,
) -> CastEvent {
    match change.kind {
        RemotePlayerEventType::IsConnectedChanged => CastEvent::ConnectionChanged(
            change.value.as_bool().unwrap_or_else(|| player.is_connected()),
        ),
        RemotePlayerEventType::MediaInfoChanged => CastEvent::MediaInfoChanged(
            connected_media_session(player, context).and_then(|session| session.media),
        ),
        RemotePlayerEventType::PlayerStateChanged => {
            CastEvent::PlayerStateChanged(player.player_state())
        }
        RemotePlayerEventType::CurrentTimeChanged => CastEvent::TimeChanged(
            change.value.as_seconds().unwrap_or_else(|| player.current_time()),
        ),
        RemotePlayerEventType::DurationChanged => CastEvent::DurationChanged(
            change.value.as_seconds().unwrap_or_else(|| player.duration()),
        ),
        RemotePlayerEventType::VolumeLevelChanged => {
            CastEvent::VolumeChanged(player.volume_level())
        }
        RemotePlayerEventType::IsMutedChanged => CastEvent::IsMutedChanged(player.is_muted()),
        RemotePlayerEventType::QueueDataChanged => CastEvent::QueueChanged(
            connected_media_session(player, context)
                .map(|session| session.queue_entries())
                .unwrap_or_default(),
        ),
        RemotePlayerEventType::LiveSeekableRangeChanged => {
            CastEvent::LiveSeekableRangeChanged(change.value.as_seekable_range())
        }
    }
}

/// Playback adapter over a casting SDK.
///
/// The adapter is ready once [`initialize`](Self::initialize) succeeded, and
/// connected while ready and the remote player reports a connection. Getters
/// return safe defaults and commands do nothing while disconnected.
pub struct CastPlayer {
    framework: Arc<dyn CastFramework>,
    context: Option<Arc<dyn CastContext>>,
    remote: Option<RemoteHandles>,
    ready: bool,
    namespace: String,
    listeners: Arc<ListenerRegistry<CastEvent>>,
}

impl CastPlayer {
    pub fn new(framework: Arc<dyn CastFramework>) -> Self {
        Self::with_namespace(framework, CUSTOM_MESSAGE_NAMESPACE)
    }

    /// Same as [`new`](Self::new) with a custom message namespace.
    pub fn with_namespace(framework: Arc<dyn CastFramework>, namespace: impl Into<String>) -> Self {
        Self {
            framework,
            context: None,
            remote: None,
            ready: false,
            namespace: namespace.into(),
            listeners: Arc::new(ListenerRegistry::new()),
        }
    }

    /// Initializes the adapter, logging any failure.
    pub fn initialize(&mut self, options: CastOptions) -> bool {
        match self.try_initialize(options) {
            Ok(()) => true,
            Err(e) => {
                error!("Error initializing Cast player: {}", e);
                false
            }
        }
    }

    /// Acquires the shared context, applies `options`, creates the remote
    /// player pair and starts forwarding its changes.
    pub fn try_initialize(&mut self, options: CastOptions) -> Result<()> {
        if self.ready {
            warn!("Cast player already initialized");
            return Ok(());
        }

        if !self.framework.is_available() {
            return Err(PlaybackError::CastApiUnavailable);
        }

        let context = self.framework.context()?;
        self.context = Some(Arc::clone(&context));
        context.set_options(&options)?;

        let (player, controller) = self.framework.create_remote_player()?;
        self.bind_forwarders(&player, &controller, &context);

        self.remote = Some(RemoteHandles { player, controller });
        self.ready = true;
        info!(
            app_id = %options.receiver_application_id,
            policy = %options.auto_join_policy,
            "Cast player initialized"
        );
        Ok(())
    }

    fn bind_forwarders(
        &self,
        player: &Arc<dyn RemotePlayer>,
        controller: &Arc<dyn RemotePlayerController>,
        context: &Arc<dyn CastContext>,
    ) {
        for kind in RemotePlayerEventType::ALL {
            let player: Weak<dyn RemotePlayer> = Arc::downgrade(player);
            let context: Weak<dyn CastContext> = Arc::downgrade(context);
            let listeners = Arc::clone(&self.listeners);
            controller.add_event_listener(
                kind,
                Box::new(move |change: &RemotePlayerChangedEvent| {
                    let (Some(player), Some(context)) = (player.upgrade(), context.upgrade())
                    else {
                        return;
                    };
                    listeners.emit(&forward_event(change, player.as_ref(), context.as_ref()));
                }),
            );
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.ready
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn is_connected(&self) -> bool {
        self.connected().is_some()
    }

    fn connected(&self) -> Option<&RemoteHandles> {
        if !self.ready {
            return None;
        }
        self.remote
            .as_ref()
            .filter(|remote| remote.player.is_connected())
    }

    fn media_session(&self) -> Option<MediaSession> {
        let remote = self.connected()?;
        connected_media_session(remote.player.as_ref(), self.context.as_deref()?)
    }

    pub fn media_info(&self) -> Option<MediaInfo> {
        self.media_session()?.media
    }

    pub fn is_fullscreen(&self) -> bool {
        self.media_session()
            .is_some_and(|session| session.is_fullscreen())
    }

    pub fn current_time(&self) -> f64 {
        self.connected()
            .map_or(0.0, |remote| or_zero(remote.player.current_time()))
    }

    pub fn duration(&self) -> f64 {
        self.connected()
            .map_or(0.0, |remote| or_zero(remote.player.duration()))
    }

    pub fn is_paused(&self) -> bool {
        self.connected()
            .map_or(true, |remote| remote.player.is_paused())
    }

    pub fn player_state(&self) -> Option<PlayerState> {
        self.connected()?.player.player_state()
    }

    pub fn volume(&self) -> f64 {
        self.connected()
            .map_or(1.0, |remote| remote.player.volume_level())
    }

    pub fn is_muted(&self) -> bool {
        self.connected()
            .is_some_and(|remote| remote.player.is_muted())
    }

    pub fn queue_items(&self) -> Vec<QueueEntry> {
        self.media_session()
            .map(|session| session.queue_entries())
            .unwrap_or_default()
    }

    /// Loads `url` on the receiver through the current session.
    pub fn load_media(&self, url: &str, options: LoadOptions) -> Deferred {
        if !self.is_connected() {
            return rejected(PlaybackError::NotConnected);
        }
        if url.is_empty() {
            return rejected(PlaybackError::MissingUrl);
        }
        let Some(session) = self.context.as_ref().and_then(|c| c.current_session()) else {
            return rejected(PlaybackError::NoSession);
        };

        let request = LoadRequest {
            media: MediaInfo::for_url(url),
            current_time: options.start_time,
            autoplay: options.autoplay,
            custom_data: options.custom_data,
        };
        debug!(
            url,
            content_type = %request.media.content_type,
            start = request.current_time,
            "Loading media on cast device"
        );
        session.load_media(request)
    }

    pub fn play_or_pause(&self) {
        if let Some(remote) = self.connected() {
            remote.controller.play_or_pause();
        }
    }

    /// Resumes playback, only when the receiver is paused.
    pub fn play(&self) {
        if let Some(remote) = self.connected() {
            if remote.player.is_paused() {
                debug!("Play");
                remote.controller.play_or_pause();
            }
        }
    }

    /// Pauses playback, only when the receiver is playing.
    pub fn pause(&self) {
        if let Some(remote) = self.connected() {
            if !remote.player.is_paused() {
                debug!("Pause");
                remote.controller.play_or_pause();
            }
        }
    }

    pub fn stop(&self) {
        if let Some(remote) = self.connected() {
            debug!("Stop");
            remote.controller.stop();
        }
    }

    pub fn seek(&self, seconds: f64) {
        if let Some(remote) = self.connected() {
            debug!(seconds, "Seek");
            remote.player.set_current_time(seconds);
            remote.controller.seek();
        }
    }

    pub fn set_volume(&self, level: f64) {
        if let Some(remote) = self.connected() {
            remote.player.set_volume_level(clamp_volume(level));
            remote.controller.set_volume_level();
        }
    }

    pub fn mute_or_unmute(&self) {
        if let Some(remote) = self.connected() {
            remote.controller.mute_or_unmute();
        }
    }

    pub fn mute(&self) {
        if let Some(remote) = self.connected() {
            if !remote.player.is_muted() {
                remote.controller.mute_or_unmute();
            }
        }
    }

    pub fn unmute(&self) {
        if let Some(remote) = self.connected() {
            if remote.player.is_muted() {
                remote.controller.mute_or_unmute();
            }
        }
    }

    pub fn request_session(&self) -> Deferred {
        match &self.context {
            Some(context) => context.request_session(),
            None => rejected(PlaybackError::ContextNotInitialized),
        }
    }

    pub fn end_current_session(&self, stop_casting: bool) -> Deferred {
        match &self.context {
            Some(context) => context.end_current_session(stop_casting),
            None => rejected(PlaybackError::ContextNotInitialized),
        }
    }

    /// Sends `data` on the custom namespace of the current session.
    ///
    /// Rejected with [`PlaybackError::NoSession`] when there is no session. A
    /// failed send is only logged: the returned outcome still resolves `Ok`.
    pub fn send_custom_message(&self, data: &Value) -> Deferred {
        let Some(session) = self.context.as_ref().and_then(|c| c.current_session()) else {
            warn!("No cast session available for custom message");
            return rejected(PlaybackError::NoSession);
        };

        let sending = session.send_message(&self.namespace, data);
        let data = data.clone();
        async move {
            match sending.await {
                Ok(()) => debug!(message = %data, "Custom message sent"),
                Err(e) => error!(message = %data, "Error sending custom message: {}", e),
            }
            Ok(())
        }
        .boxed()
    }

    pub fn on(&self, kind: CastEventKind, listener: Listener<CastEvent>) {
        self.listeners.on(kind, listener);
    }

    pub fn off(&self, kind: CastEventKind, listener: &Listener<CastEvent>) {
        self.listeners.off(kind, listener);
    }

    pub fn on_named(&self, name: &str, listener: Listener<CastEvent>) -> bool {
        self.listeners.on_named(name, listener)
    }

    pub fn off_named(&self, name: &str, listener: &Listener<CastEvent>) -> bool {
        self.listeners.off_named(name, listener)
    }

    pub fn subscribe(&self) -> Receiver<CastEvent> {
        self.listeners.subscribe()
    }

    pub fn subscribe_bounded(&self, capacity: usize) -> Receiver<CastEvent> {
        self.listeners.subscribe_bounded(capacity)
    }
}

impl fmt::Debug for CastPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CastPlayer")
            .field("ready", &self.ready)
            .field("context", &self.context.is_some())
            .field("namespace", &self.namespace)
            .field("listeners", &self.listeners)
            .finish()
    }
}
