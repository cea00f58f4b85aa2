use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::Receiver;
use tracing::{debug, error, info, warn};

use crate::errors::{Deferred, PlaybackError, rejected};
use crate::events::{EventKind, Listener, ListenerRegistry, PlayerEvent};
use crate::model::{VolumeState, clamp_volume};

use super::element::{ElementEvent, MediaElement, MediaElementError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalEventKind {
    TimeUpdate,
    DurationChange,
    Play,
    Pause,
    Ended,
    Error,
    LoadedData,
    VolumeChange,
}

impl EventKind for LocalEventKind {
    const ALL: &'static [Self] = &[
        LocalEventKind::TimeUpdate,
        LocalEventKind::DurationChange,
        LocalEventKind::Play,
        LocalEventKind::Pause,
        LocalEventKind::Ended,
        LocalEventKind::Error,
        LocalEventKind::LoadedData,
        LocalEventKind::VolumeChange,
    ];

    fn name(self) -> &'static str {
        match self {
            LocalEventKind::TimeUpdate => "timeUpdate",
            LocalEventKind::DurationChange => "durationChange",
            LocalEventKind::Play => "play",
            LocalEventKind::Pause => "pause",
            LocalEventKind::Ended => "ended",
            LocalEventKind::Error => "error",
            LocalEventKind::LoadedData => "loadedData",
            LocalEventKind::VolumeChange => "volumeChange",
        }
    }
}

/// Event delivered to listeners of a [`LocalPlayer`].
#[derive(Debug, Clone, PartialEq)]
pub enum LocalEvent {
    TimeUpdate(f64),
    DurationChange(f64),
    Play,
    Pause,
    Ended,
    Error(Option<MediaElementError>),
    LoadedData,
    VolumeChange(VolumeState),
}

impl PlayerEvent for LocalEvent {
    type Kind = LocalEventKind;

    fn kind(&self) -> LocalEventKind {
        match self {
            LocalEvent::TimeUpdate(_) => LocalEventKind::TimeUpdate,
            LocalEvent::DurationChange(_) => LocalEventKind::DurationChange,
            LocalEvent::Play => LocalEventKind::Play,
            LocalEvent::Pause => LocalEventKind::Pause,
            LocalEvent::Ended => LocalEventKind::Ended,
            LocalEvent::Error(_) => LocalEventKind::Error,
            LocalEvent::LoadedData => LocalEventKind::LoadedData,
            LocalEvent::VolumeChange(_) => LocalEventKind::VolumeChange,
        }
    }
}

impl LocalEvent {
    /// Builds the event for a native notification, reading the payload from
    /// the element at dispatch time.
    fn from_element(event: ElementEvent, element: &dyn MediaElement) -> Self {
        match event {
            ElementEvent::TimeUpdate => LocalEvent::TimeUpdate(element.current_time()),
            ElementEvent::DurationChange => LocalEvent::DurationChange(element.duration()),
            ElementEvent::Play => LocalEvent::Play,
            ElementEvent::Pause => LocalEvent::Pause,
            ElementEvent::Ended => LocalEvent::Ended,
            ElementEvent::Error => LocalEvent::Error(element.error()),
            ElementEvent::LoadedData => LocalEvent::LoadedData,
            ElementEvent::VolumeChange => LocalEvent::VolumeChange(VolumeState {
                volume: element.volume(),
                muted: element.muted(),
            }),
        }
    }
}

/// Playback adapter over a native [`MediaElement`].
///
/// Created unbound; every accessor returns a safe default and every command
/// is a no-op until [`initialize`](Self::initialize) succeeds.
pub struct LocalPlayer {
    element: Option<Arc<dyn MediaElement>>,
    listeners: Arc<ListenerRegistry<LocalEvent>>,
    // Incremented on each binding; forwarders of a replaced element go quiet.
    binding: Arc<AtomicU64>,
}

impl LocalPlayer {
    pub fn new() -> Self {
        Self {
            element: None,
            listeners: Arc::new(ListenerRegistry::new()),
            binding: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Binds the adapter to `element` and starts forwarding its notifications.
    ///
    /// Returns `false` when no element is given. Initializing again with the
    /// element already bound does nothing and returns `true`.
    pub fn initialize(&mut self, element: Option<Arc<dyn MediaElement>>) -> bool {
        let Some(element) = element else {
            error!("Media element not provided");
            return false;
        };

        if let Some(current) = &self.element {
            if std::ptr::addr_eq(Arc::as_ptr(current), Arc::as_ptr(&element)) {
                warn!("Local player already bound to this media element");
                return true;
            }
            debug!("Rebinding local player to a new media element");
        }

        let generation = self.binding.fetch_add(1, Ordering::SeqCst) + 1;
        for event in ElementEvent::ALL {
            let weak = Arc::downgrade(&element);
            let listeners = Arc::clone(&self.listeners);
            let binding = Arc::clone(&self.binding);
            element.add_event_listener(
                event,
                Box::new(move || {
                    if binding.load(Ordering::SeqCst) != generation {
                        return;
                    }
                    let Some(element) = weak.upgrade() else {
                        return;
                    };
                    listeners.emit(&LocalEvent::from_element(event, element.as_ref()));
                }),
            );
        }

        self.element = Some(element);
        info!("Local player initialized");
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.element.is_some()
    }

    pub fn current_time(&self) -> f64 {
        self.element.as_ref().map_or(0.0, |e| e.current_time())
    }

    pub fn duration(&self) -> f64 {
        self.element.as_ref().map_or(0.0, |e| e.duration())
    }

    pub fn is_paused(&self) -> bool {
        self.element.as_ref().map_or(true, |e| e.paused())
    }

    pub fn is_ended(&self) -> bool {
        self.element.as_ref().is_some_and(|e| e.ended())
    }

    pub fn volume(&self) -> f64 {
        self.element.as_ref().map_or(1.0, |e| e.volume())
    }

    pub fn is_muted(&self) -> bool {
        self.element.as_ref().is_some_and(|e| e.muted())
    }

    pub fn source(&self) -> Option<String> {
        self.element.as_ref().and_then(|e| e.source())
    }

    /// Sets the element source and reloads it. Empty URLs are ignored.
    pub fn load(&self, url: &str) {
        let Some(element) = &self.element else {
            return;
        };
        if url.is_empty() {
            return;
        }
        debug!(url, "Loading media");
        element.set_source(url);
        element.load();
    }

    pub fn play(&self) -> Deferred {
        match &self.element {
            Some(element) => {
                debug!("Play");
                element.play()
            }
            None => rejected(PlaybackError::NoMediaElement),
        }
    }

    pub fn pause(&self) {
        if let Some(element) = &self.element {
            debug!("Pause");
            element.pause();
        }
    }

    /// Pauses, rewinds and unloads the current source.
    pub fn stop(&self) {
        if let Some(element) = &self.element {
            debug!("Stop");
            element.pause();
            element.set_current_time(0.0);
            element.remove_source();
            element.load();
        }
    }

    pub fn seek(&self, seconds: f64) {
        if let Some(element) = &self.element {
            debug!(seconds, "Seek");
            element.set_current_time(seconds);
        }
    }

    pub fn set_volume(&self, level: f64) {
        if let Some(element) = &self.element {
            element.set_volume(clamp_volume(level));
        }
    }

    pub fn mute(&self) {
        if let Some(element) = &self.element {
            element.set_muted(true);
        }
    }

    pub fn unmute(&self) {
        if let Some(element) = &self.element {
            element.set_muted(false);
        }
    }

    /// With `None` (or an empty url), tells whether any source is set. With
    /// `Some(url)`, whether the current source is exactly `url`.
    pub fn is_media_loaded(&self, url: Option<&str>) -> bool {
        let Some(source) = self.source() else {
            return false;
        };
        match url.filter(|url| !url.is_empty()) {
            Some(url) => source == url,
            None => !source.is_empty(),
        }
    }

    pub fn on(&self, kind: LocalEventKind, listener: Listener<LocalEvent>) {
        self.listeners.on(kind, listener);
    }

    pub fn off(&self, kind: LocalEventKind, listener: &Listener<LocalEvent>) {
        self.listeners.off(kind, listener);
    }

    pub fn on_named(&self, name: &str, listener: Listener<LocalEvent>) -> bool {
        self.listeners.on_named(name, listener)
    }

    pub fn off_named(&self, name: &str, listener: &Listener<LocalEvent>) -> bool {
        self.listeners.off_named(name, listener)
    }

    pub fn subscribe(&self) -> Receiver<LocalEvent> {
        self.listeners.subscribe()
    }

    pub fn subscribe_bounded(&self, capacity: usize) -> Receiver<LocalEvent> {
        self.listeners.subscribe_bounded(capacity)
    }
}

impl Default for LocalPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LocalPlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalPlayer")
            .field("initialized", &self.is_initialized())
            .field("listeners", &self.listeners)
            .finish()
    }
}
