//! Adaptateur de diffusion vers un appareil Cast.

mod framework;
mod media;
mod player;

pub use framework::{
    AutoJoinPolicy, CUSTOM_MESSAGE_NAMESPACE, CastContext, CastFramework, CastOptions,
    CastSession, DEFAULT_RECEIVER_APP_ID, RemotePlayer, RemotePlayerChangedEvent,
    RemotePlayerController, RemotePlayerEventType, RemotePlayerHandler, RemotePlayerValue,
};
pub use media::{
    LiveSeekableRange, LoadOptions, LoadRequest, METADATA_TYPE_GENERIC, MediaInfo, MediaMetadata,
    MediaSession, PlayerState, QueueEntry, QueueItem, StreamFormat, StreamType, content_type_for,
};
pub use player::{CastEvent, CastEventKind, CastPlayer};
