//! Backend-agnostic playback façade.
//!
//! `MediaController` wraps the local and cast adapters behind one control
//! surface so that a UI can drive whichever target is active without caring
//! which one it is.

use std::fmt;

use pmoutils::format_time;
use tracing::debug;

use crate::cast::{CastPlayer, LoadOptions};
use crate::errors::{Deferred, PlaybackError, rejected, resolved};
use crate::local::LocalPlayer;

/// Placeholder shown in place of an unavailable time.
const UNKNOWN_TIME: &str = "--:--:--";

/// Where playback happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackTarget {
    Local,
    Cast,
}

impl PlaybackTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackTarget::Local => "local",
            PlaybackTarget::Cast => "cast",
        }
    }
}

impl fmt::Display for PlaybackTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub enum MediaController {
    /// Native media element on this host.
    Local(LocalPlayer),
    /// Receiver reached through a cast session.
    Cast(CastPlayer),
}

impl MediaController {
    pub fn target(&self) -> PlaybackTarget {
        match self {
            MediaController::Local(_) => PlaybackTarget::Local,
            MediaController::Cast(_) => PlaybackTarget::Cast,
        }
    }

    /// Initialized for a local target, connected for a cast target.
    pub fn is_ready(&self) -> bool {
        match self {
            MediaController::Local(p) => p.is_initialized(),
            MediaController::Cast(p) => p.is_connected(),
        }
    }

    pub fn current_time(&self) -> f64 {
        match self {
            MediaController::Local(p) => p.current_time(),
            MediaController::Cast(p) => p.current_time(),
        }
    }

    pub fn duration(&self) -> f64 {
        match self {
            MediaController::Local(p) => p.duration(),
            MediaController::Cast(p) => p.duration(),
        }
    }

    pub fn is_paused(&self) -> bool {
        match self {
            MediaController::Local(p) => p.is_paused(),
            MediaController::Cast(p) => p.is_paused(),
        }
    }

    pub fn volume(&self) -> f64 {
        match self {
            MediaController::Local(p) => p.volume(),
            MediaController::Cast(p) => p.volume(),
        }
    }

    pub fn is_muted(&self) -> bool {
        match self {
            MediaController::Local(p) => p.is_muted(),
            MediaController::Cast(p) => p.is_muted(),
        }
    }

    /// Loads `url` on the active target.
    ///
    /// The local target resolves as soon as the source is set; the cast
    /// target resolves with the receiver's load outcome.
    pub fn load(&self, url: &str) -> Deferred {
        debug!(playback = %self.target(), url, "Loading media");
        match self {
            MediaController::Local(p) => {
                if !p.is_initialized() {
                    return rejected(PlaybackError::NoMediaElement);
                }
                if url.is_empty() {
                    return rejected(PlaybackError::MissingUrl);
                }
                p.load(url);
                resolved()
            }
            MediaController::Cast(p) => p.load_media(url, LoadOptions::default()),
        }
    }

    pub fn play(&self) -> Deferred {
        match self {
            MediaController::Local(p) => p.play(),
            MediaController::Cast(p) => {
                if !p.is_connected() {
                    return rejected(PlaybackError::NotConnected);
                }
                p.play();
                resolved()
            }
        }
    }

    pub fn pause(&self) {
        match self {
            MediaController::Local(p) => p.pause(),
            MediaController::Cast(p) => p.pause(),
        }
    }

    pub fn stop(&self) {
        match self {
            MediaController::Local(p) => p.stop(),
            MediaController::Cast(p) => p.stop(),
        }
    }

    pub fn seek(&self, seconds: f64) {
        match self {
            MediaController::Local(p) => p.seek(seconds),
            MediaController::Cast(p) => p.seek(seconds),
        }
    }

    pub fn set_volume(&self, level: f64) {
        match self {
            MediaController::Local(p) => p.set_volume(level),
            MediaController::Cast(p) => p.set_volume(level),
        }
    }

    pub fn mute(&self) {
        match self {
            MediaController::Local(p) => p.mute(),
            MediaController::Cast(p) => p.mute(),
        }
    }

    pub fn unmute(&self) {
        match self {
            MediaController::Local(p) => p.unmute(),
            MediaController::Cast(p) => p.unmute(),
        }
    }

    /// `current / duration`, e.g. `00:01:15 / 00:03:20`.
    pub fn position_label(&self) -> String {
        let label = |seconds: f64| {
            format_time(Some(seconds)).unwrap_or_else(|| UNKNOWN_TIME.to_string())
        };
        format!("{} / {}", label(self.current_time()), label(self.duration()))
    }

    pub fn as_local(&self) -> Option<&LocalPlayer> {
        match self {
            MediaController::Local(p) => Some(p),
            MediaController::Cast(_) => None,
        }
    }

    pub fn as_cast(&self) -> Option<&CastPlayer> {
        match self {
            MediaController::Cast(p) => Some(p),
            MediaController::Local(_) => None,
        }
    }
}

impl From<LocalPlayer> for MediaController {
    fn from(player: LocalPlayer) -> Self {
        MediaController::Local(player)
    }
}

impl From<CastPlayer> for MediaController {
    fn from(player: CastPlayer) -> Self {
        MediaController::Cast(player)
    }
}
