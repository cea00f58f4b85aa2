//! Abstraction of a native media-rendering handle.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::Deferred;

/// Notifications a media element can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementEvent {
    TimeUpdate,
    DurationChange,
    Play,
    Pause,
    Ended,
    Error,
    LoadedData,
    VolumeChange,
}

impl ElementEvent {
    pub const ALL: [ElementEvent; 8] = [
        ElementEvent::TimeUpdate,
        ElementEvent::DurationChange,
        ElementEvent::Play,
        ElementEvent::Pause,
        ElementEvent::Ended,
        ElementEvent::Error,
        ElementEvent::LoadedData,
        ElementEvent::VolumeChange,
    ];

    /// Native event name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementEvent::TimeUpdate => "timeupdate",
            ElementEvent::DurationChange => "durationchange",
            ElementEvent::Play => "play",
            ElementEvent::Pause => "pause",
            ElementEvent::Ended => "ended",
            ElementEvent::Error => "error",
            ElementEvent::LoadedData => "loadeddata",
            ElementEvent::VolumeChange => "volumechange",
        }
    }
}

impl fmt::Display for ElementEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error detail reported by the element after a failed load or decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaElementError {
    pub code: u16,
    pub message: String,
}

impl fmt::Display for MediaElementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "media error {}: {}", self.code, self.message)
    }
}

pub type ElementHandler = Box<dyn Fn() + Send + Sync>;

/// Native media element driven by [`LocalPlayer`](super::LocalPlayer).
///
/// Implementations use interior mutability: every method takes `&self` so the
/// element can be shared between the adapter and the host UI.
pub trait MediaElement: Send + Sync {
    fn current_time(&self) -> f64;
    fn set_current_time(&self, seconds: f64);
    fn duration(&self) -> f64;
    fn paused(&self) -> bool;
    fn ended(&self) -> bool;
    fn volume(&self) -> f64;
    fn set_volume(&self, level: f64);
    fn muted(&self) -> bool;
    fn set_muted(&self, muted: bool);

    /// Current source URL, `None` when no source attribute is set.
    fn source(&self) -> Option<String>;
    fn set_source(&self, url: &str);
    fn remove_source(&self);

    fn error(&self) -> Option<MediaElementError>;

    /// Reloads the element from its current source.
    fn load(&self);
    fn play(&self) -> Deferred;
    fn pause(&self);

    fn add_event_listener(&self, event: ElementEvent, handler: ElementHandler);
}
