//! Twitch API Types
//!
//! Type definitions for the Twitch catalog, search and stream-metadata
//! responses, plus the access token and resolved playlist variants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Decode `null` as the type's default value.
///
/// The API answers `"stream": null` for an offline channel and
/// `"games": null` for a search without hits.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode an id sent either as a JSON number or as a numeric string.
/// API v5 sends strings, older revisions send numbers.
fn numeric_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Number(id)) => Ok(id),
        Some(RawId::Text(s)) if s.is_empty() => Ok(0),
        Some(RawId::Text(s)) => s.parse().map_err(serde::de::Error::custom),
        None => Ok(0),
    }
}

// ============================================================================
// Catalog Entities
// ============================================================================

/// Twitch channel
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Channel {
    #[serde(rename = "_id", deserialize_with = "numeric_id")]
    pub id: u64,
    /// Stable, URL-safe lookup key
    pub name: String,
    pub display_name: String,
    pub game: Option<String>,
    pub status: Option<String>,
    pub mature: bool,
    pub partner: bool,
    pub language: Option<String>,
    pub broadcaster_language: Option<String>,
    pub broadcaster_type: Option<String>,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub video_banner: Option<String>,
    pub profile_banner: Option<String>,
    pub url: Option<String>,
    pub views: u64,
    pub followers: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Live stream of a channel
///
/// An `id` of 0 means the channel is offline.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Stream {
    #[serde(rename = "_id", deserialize_with = "numeric_id")]
    pub id: u64,
    pub game: Option<String>,
    pub viewers: u64,
    pub video_height: u64,
    pub average_fps: f64,
    pub delay: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub is_playlist: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub channel: Channel,
}

impl Stream {
    /// Whether this stream is actually live
    pub fn is_online(&self) -> bool {
        self.id != 0
    }
}

/// Game/category catalog entry
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Game {
    #[serde(rename = "_id", deserialize_with = "numeric_id")]
    pub id: u64,
    pub name: String,
    pub localized_name: Option<String>,
    pub locale: Option<String>,
    pub popularity: u64,
    #[serde(deserialize_with = "numeric_id")]
    pub giantbomb_id: u64,
}

/// Game with aggregate counts across its live streams
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct GameInfo {
    pub game: Game,
    pub viewers: u64,
    pub channels: u64,
}

/// Promoted stream with editorial fields
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Featured {
    pub title: String,
    pub text: String,
    pub image: Option<String>,
    pub priority: u64,
    pub scheduled: bool,
    pub sponsored: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub stream: Stream,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Links {
    #[serde(rename = "self")]
    pub self_link: Option<String>,
    pub channel: Option<String>,
}

/// Response of the stream-metadata endpoint
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct StreamData {
    #[serde(deserialize_with = "null_as_default")]
    pub stream: Stream,
    #[serde(rename = "_links")]
    pub links: Links,
}

// ============================================================================
// List / Search Results
// ============================================================================

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ChannelSearchResult {
    #[serde(rename = "_total")]
    pub total: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub channels: Vec<Channel>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct GameSearchResult {
    #[serde(deserialize_with = "null_as_default")]
    pub games: Vec<Game>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct StreamListResult {
    #[serde(rename = "_total")]
    pub total: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub streams: Vec<Stream>,
}

/// Stream search shares the stream list envelope
pub type StreamSearchResult = StreamListResult;

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct GameListResult {
    #[serde(rename = "_total")]
    pub total: u64,
    #[serde(rename = "top", deserialize_with = "null_as_default")]
    pub games: Vec<GameInfo>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct FeaturedListResult {
    #[serde(deserialize_with = "null_as_default")]
    pub featured: Vec<Featured>,
}

// ============================================================================
// Errors, Tokens and Playlists
// ============================================================================

/// Structured error body returned with non-2xx responses
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
    pub message: String,
}

/// Signed, single-use playlist access token
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AccessToken {
    pub token: String,
    #[serde(rename = "sig")]
    pub signature: String,
}

/// One playable rendition of a live stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamVariant {
    /// Peak bandwidth in bits per second
    pub bandwidth: u64,
    pub quality: String,
    /// `WxH`, empty for audio-only renditions
    pub resolution: String,
    pub uri: String,
}

impl StreamVariant {
    pub fn bandwidth_kbps(&self) -> u64 {
        self.bandwidth / 1024
    }

    pub fn is_audio_only(&self) -> bool {
        self.resolution.is_empty()
    }
}
