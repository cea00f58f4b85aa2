//! Media payloads exchanged with a cast receiver.
//!
//! Field names follow the receiver message conventions: camelCase keys and
//! SCREAMING_SNAKE_CASE enum values.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `metadataType` of generic media metadata.
pub const METADATA_TYPE_GENERIC: u32 = 0;

const LOAD_TITLE: &str = "Casting URL";

/// Streaming format inferred from a media URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamFormat {
    Hls,
    Dash,
    Mp4,
}

impl StreamFormat {
    /// Infers the format from the URL suffix, case-insensitively.
    pub fn from_url(url: &str) -> Self {
        let url = url.to_lowercase();
        if url.ends_with(".m3u8") {
            StreamFormat::Hls
        } else if url.ends_with(".mpd") {
            StreamFormat::Dash
        } else {
            StreamFormat::Mp4
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            StreamFormat::Hls => "application/x-mpegURL",
            StreamFormat::Dash => "application/dash+xml",
            StreamFormat::Mp4 => "video/mp4",
        }
    }
}

/// Content type sent to the receiver for `url`.
pub fn content_type_for(url: &str) -> &'static str {
    StreamFormat::from_url(url).content_type()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreamType {
    None,
    Buffered,
    Live,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaMetadata {
    pub metadata_type: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

impl MediaMetadata {
    pub fn generic() -> Self {
        Self {
            metadata_type: METADATA_TYPE_GENERIC,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInfo {
    pub content_id: String,
    pub content_type: String,
    pub stream_type: StreamType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MediaMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl MediaInfo {
    /// Buffered descriptor for a user supplied URL, with generic metadata.
    pub fn for_url(url: &str) -> Self {
        Self {
            content_id: url.to_string(),
            content_type: content_type_for(url).to_string(),
            stream_type: StreamType::Buffered,
            metadata: Some(MediaMetadata {
                title: Some(LOAD_TITLE.to_string()),
                subtitle: Some(url.to_string()),
                ..MediaMetadata::generic()
            }),
            duration: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadRequest {
    pub media: MediaInfo,
    pub current_time: f64,
    pub autoplay: bool,
    pub custom_data: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueItem {
    pub item_id: Option<i64>,
    pub media: MediaInfo,
}

/// Media session of the current cast session, as reported by the receiver.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSession {
    #[serde(default)]
    pub media: Option<MediaInfo>,
    #[serde(default)]
    pub items: Vec<QueueItem>,
    #[serde(default)]
    pub custom_data: Option<Value>,
}

impl MediaSession {
    /// `fullscreen` flag of the receiver custom data.
    pub fn is_fullscreen(&self) -> bool {
        self.custom_data
            .as_ref()
            .and_then(|data| data.get("fullscreen"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Flattens the queue into ordered entries.
    pub fn queue_entries(&self) -> Vec<QueueEntry> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| QueueEntry {
                id: index,
                title: item
                    .media
                    .metadata
                    .as_ref()
                    .and_then(|m| m.title.clone())
                    .filter(|title| !title.is_empty())
                    .unwrap_or_else(|| format!("Item {}", index + 1)),
                url: item.media.content_id.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerState {
    Idle,
    Playing,
    Paused,
    Buffering,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveSeekableRange {
    pub start: f64,
    pub end: f64,
    pub is_moving_window: bool,
    pub is_live_done: bool,
}

/// Queue entry exposed to listeners and UIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: usize,
    pub title: String,
    pub url: String,
}

/// Optional parameters of [`CastPlayer::load_media`](super::CastPlayer::load_media).
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOptions {
    pub start_time: f64,
    pub autoplay: bool,
    pub custom_data: Value,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            autoplay: true,
            custom_data: Value::String(String::new()),
        }
    }
}
