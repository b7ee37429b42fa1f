//! Twitch Integration
//!
//! This module provides access to the Twitch catalog and live streams.
//!
//! # Overview
//!
//! - **Transport**: one pooled HTTP client carrying the `Client-ID` header
//! - **API Client**: typed catalog, search and stream-metadata calls
//! - **Playlist**: access token exchange and master manifest resolution
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::services::twitch::{TwitchApi, TwitchClient};
//!
//! let client = TwitchClient::from_config(&config)?;
//! let data = client.get_stream_data(channel.id).await?;
//! if data.stream.is_online() {
//!     let variants = client.get_stream_variants(&data.stream.channel.name).await?;
//! }
//! ```

pub mod client;
pub mod error;
pub mod http;
pub mod playlist;
pub mod types;

// Re-exports for convenience
pub use client::{TwitchApi, TwitchClient};
pub use error::{ApiAction, TwitchError};
pub use types::{
    Channel, ChannelSearchResult, Featured, FeaturedListResult, Game, GameInfo, GameListResult,
    GameSearchResult, Stream, StreamData, StreamListResult, StreamSearchResult, StreamVariant,
};
