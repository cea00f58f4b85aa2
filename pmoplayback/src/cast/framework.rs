//! Object graph of a casting SDK, seen from the sender side.
//!
//! The adapter never reaches for a global instance: the host hands it a
//! [`CastFramework`], which gives access to the shared [`CastContext`] and
//! creates [`RemotePlayer`] / [`RemotePlayerController`] pairs.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{Deferred, Result};

use super::media::{LiveSeekableRange, LoadRequest, MediaSession, PlayerState};

/// Receiver application launched when no other id is configured.
pub const DEFAULT_RECEIVER_APP_ID: &str = "67338B81";

/// Namespace of the receiver's custom message channel.
pub const CUSTOM_MESSAGE_NAMESPACE: &str = "urn:x-cast:com.antiglitch.ccast.custom";

/// Which existing sessions a new sender joins automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoJoinPolicy {
    TabAndOriginScoped,
    #[default]
    OriginScoped,
    PageScoped,
}

impl AutoJoinPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AutoJoinPolicy::TabAndOriginScoped => "tab_and_origin_scoped",
            AutoJoinPolicy::OriginScoped => "origin_scoped",
            AutoJoinPolicy::PageScoped => "page_scoped",
        }
    }
}

impl fmt::Display for AutoJoinPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AutoJoinPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tab_and_origin_scoped" => Ok(AutoJoinPolicy::TabAndOriginScoped),
            "origin_scoped" => Ok(AutoJoinPolicy::OriginScoped),
            "page_scoped" => Ok(AutoJoinPolicy::PageScoped),
            other => Err(anyhow!("Unknown auto join policy: {}", other)),
        }
    }
}

/// Options applied to the cast context on initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastOptions {
    pub receiver_application_id: String,
    pub auto_join_policy: AutoJoinPolicy,
    pub android_receiver_compatible: bool,
}

impl CastOptions {
    pub fn with_app_id(receiver_application_id: impl Into<String>) -> Self {
        Self {
            receiver_application_id: receiver_application_id.into(),
            ..Self::default()
        }
    }
}

impl Default for CastOptions {
    fn default() -> Self {
        Self {
            receiver_application_id: DEFAULT_RECEIVER_APP_ID.to_string(),
            auto_join_policy: AutoJoinPolicy::OriginScoped,
            android_receiver_compatible: true,
        }
    }
}

/// Remote player property changes observable through the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemotePlayerEventType {
    IsConnectedChanged,
    MediaInfoChanged,
    PlayerStateChanged,
    CurrentTimeChanged,
    DurationChanged,
    VolumeLevelChanged,
    IsMutedChanged,
    QueueDataChanged,
    LiveSeekableRangeChanged,
}

impl RemotePlayerEventType {
    pub const ALL: [RemotePlayerEventType; 9] = [
        RemotePlayerEventType::IsConnectedChanged,
        RemotePlayerEventType::MediaInfoChanged,
        RemotePlayerEventType::PlayerStateChanged,
        RemotePlayerEventType::CurrentTimeChanged,
        RemotePlayerEventType::DurationChanged,
        RemotePlayerEventType::VolumeLevelChanged,
        RemotePlayerEventType::IsMutedChanged,
        RemotePlayerEventType::QueueDataChanged,
        RemotePlayerEventType::LiveSeekableRangeChanged,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RemotePlayerEventType::IsConnectedChanged => "isConnectedChanged",
            RemotePlayerEventType::MediaInfoChanged => "mediaInfoChanged",
            RemotePlayerEventType::PlayerStateChanged => "playerStateChanged",
            RemotePlayerEventType::CurrentTimeChanged => "currentTimeChanged",
            RemotePlayerEventType::DurationChanged => "durationChanged",
            RemotePlayerEventType::VolumeLevelChanged => "volumeLevelChanged",
            RemotePlayerEventType::IsMutedChanged => "isMutedChanged",
            RemotePlayerEventType::QueueDataChanged => "queueDataChanged",
            RemotePlayerEventType::LiveSeekableRangeChanged => "liveSeekableRangeChanged",
        }
    }
}

/// New value carried by a remote player change.
#[derive(Debug, Clone, PartialEq)]
pub enum RemotePlayerValue {
    Flag(bool),
    Seconds(f64),
    SeekableRange(Option<LiveSeekableRange>),
    Unit,
}

impl RemotePlayerValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RemotePlayerValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_seconds(&self) -> Option<f64> {
        match self {
            RemotePlayerValue::Seconds(seconds) => Some(*seconds),
            _ => None,
        }
    }

    pub fn as_seekable_range(&self) -> Option<LiveSeekableRange> {
        match self {
            RemotePlayerValue::SeekableRange(range) => *range,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemotePlayerChangedEvent {
    pub kind: RemotePlayerEventType,
    pub value: RemotePlayerValue,
}

pub type RemotePlayerHandler = Box<dyn Fn(&RemotePlayerChangedEvent) + Send + Sync>;

/// Entry point of the casting SDK.
pub trait CastFramework: Send + Sync {
    /// Whether the SDK is loaded and usable.
    fn is_available(&self) -> bool;

    /// Shared context of the sender application.
    fn context(&self) -> Result<Arc<dyn CastContext>>;

    fn create_remote_player(
        &self,
    ) -> Result<(Arc<dyn RemotePlayer>, Arc<dyn RemotePlayerController>)>;
}

pub trait CastContext: Send + Sync {
    fn set_options(&self, options: &CastOptions) -> Result<()>;
    fn current_session(&self) -> Option<Arc<dyn CastSession>>;
    /// Opens the device picker and starts a session.
    fn request_session(&self) -> Deferred;
    fn end_current_session(&self, stop_casting: bool) -> Deferred;
}

pub trait CastSession: Send + Sync {
    fn media_session(&self) -> Option<MediaSession>;
    fn load_media(&self, request: LoadRequest) -> Deferred;
    fn send_message(&self, namespace: &str, message: &Value) -> Deferred;
}

/// Live state of the receiver, mirrored by the SDK.
pub trait RemotePlayer: Send + Sync {
    fn is_connected(&self) -> bool;
    fn current_time(&self) -> f64;
    fn set_current_time(&self, seconds: f64);
    fn duration(&self) -> f64;
    fn is_paused(&self) -> bool;
    fn player_state(&self) -> Option<PlayerState>;
    fn volume_level(&self) -> f64;
    fn set_volume_level(&self, level: f64);
    fn is_muted(&self) -> bool;
}

/// Pushes the values written on the paired [`RemotePlayer`] to the receiver.
pub trait RemotePlayerController: Send + Sync {
    fn add_event_listener(&self, event: RemotePlayerEventType, handler: RemotePlayerHandler);
    fn play_or_pause(&self);
    fn stop(&self);
    /// Seeks to the player's current time.
    fn seek(&self);
    /// Applies the player's volume level.
    fn set_volume_level(&self);
    fn mute_or_unmute(&self);
}
