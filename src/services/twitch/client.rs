//! Twitch API Client
//!
//! Typed access to the catalog, search and stream-metadata endpoints.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error};

use super::error::{ApiAction, TwitchError};
use super::http::{build_http_client, TransportConfig};
use super::types::*;
use crate::config::Config;

/// Base URLs and the pinned API revision
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Catalog, search and stream-metadata API (e.g. "https://api.twitch.tv/kraken")
    pub api: String,
    /// Access token API (e.g. "https://api.twitch.tv/api")
    pub token_api: String,
    /// Manifest generator (e.g. "https://usher.ttvnw.net/api/channel/hls")
    pub usher: String,
    /// Accept header pinning the API revision
    pub accept: String,
}

impl Endpoints {
    pub fn from_config(config: &Config) -> Self {
        Self {
            api: config.api_url.trim_end_matches('/').to_string(),
            token_api: config.token_api_url.trim_end_matches('/').to_string(),
            usher: config.usher_url.trim_end_matches('/').to_string(),
            accept: config.api_accept.clone(),
        }
    }
}

/// Capability surface of the Twitch service
#[async_trait]
pub trait TwitchApi: Send + Sync {
    /// Live-stream metadata; offline channels yield a stream with id 0
    async fn get_stream_data(&self, channel_id: u64) -> Result<StreamData, TwitchError>;

    /// Channel search, best match first
    async fn get_channel_search(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<ChannelSearchResult, TwitchError>;

    async fn get_game_search(&self, query: &str) -> Result<GameSearchResult, TwitchError>;

    async fn get_stream_search(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<StreamSearchResult, TwitchError>;

    /// Top games by current viewers
    async fn get_game_list(&self, limit: u32) -> Result<GameListResult, TwitchError>;

    async fn get_featured_list(&self, limit: u32) -> Result<FeaturedListResult, TwitchError>;

    /// Live streams, optionally restricted to one game
    async fn get_stream_list(
        &self,
        game: Option<&str>,
        limit: u32,
    ) -> Result<StreamListResult, TwitchError>;

    /// Resolve the playable variants of a channel's live stream
    async fn get_stream_variants(&self, channel: &str) -> Result<Vec<StreamVariant>, TwitchError>;
}

/// Twitch API Client
pub struct TwitchClient {
    pub(super) http: Client,
    pub(super) endpoints: Endpoints,
    last_cache_buster: AtomicU64,
}

impl TwitchClient {
    /// Create a new client with its own connection pool
    pub fn new(transport: &TransportConfig, endpoints: Endpoints) -> Result<Self, TwitchError> {
        let http = build_http_client(transport)?;
        Ok(Self::with_http(http, endpoints))
    }

    /// Create from application configuration
    pub fn from_config(config: &Config) -> Result<Self, TwitchError> {
        Self::new(
            &TransportConfig::from_config(config),
            Endpoints::from_config(config),
        )
    }

    pub fn with_http(http: Client, endpoints: Endpoints) -> Self {
        Self {
            http,
            endpoints,
            last_cache_buster: AtomicU64::new(0),
        }
    }

    /// Nanosecond timestamp, strictly increasing across calls
    pub(super) fn next_cache_buster(&self) -> u64 {
        let now = chrono::Utc::now()
            .timestamp_nanos_opt()
            .map(|n| n.max(0) as u64)
            .unwrap_or_default();
        let previous = self
            .last_cache_buster
            .fetch_max(now, Ordering::SeqCst);
        if now > previous {
            now
        } else {
            // Clock did not advance (or went back); step past the last value
            self.last_cache_buster.fetch_add(1, Ordering::SeqCst) + 1
        }
    }

    /// Versioned request against the catalog API
    fn api_request(&self, path: &str) -> RequestBuilder {
        self.http
            .get(format!("{}/{}", self.endpoints.api, path))
            .header(ACCEPT, &self.endpoints.accept)
    }

    /// Send a request and decode a JSON body
    pub(super) async fn fetch<T: DeserializeOwned>(
        &self,
        action: ApiAction,
        request: RequestBuilder,
    ) -> Result<T, TwitchError> {
        debug!("Twitch API request: {}", action);

        let response = request
            .send()
            .await
            .map_err(|source| TwitchError::Transport { action, source })?;

        let body = check_status(action, response)
            .await?
            .bytes()
            .await
            .map_err(|source| TwitchError::Transport { action, source })?;

        serde_json::from_slice(&body).map_err(|source| {
            error!("Failed to parse Twitch response for '{}': {}", action, source);
            let text = String::from_utf8_lossy(&body);
            debug!("Response text: {}", truncate(&text, 500));
            TwitchError::Decode { action, source }
        })
    }
}

/// Classify a non-2xx response
///
/// A decodable error body yields [`TwitchError::Status`] with the platform
/// message; anything else degrades to the raw status line.
pub(super) async fn check_status(
    action: ApiAction,
    response: Response,
) -> Result<Response, TwitchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let degraded = || TwitchError::DegradedStatus {
        action,
        status_line: status.to_string(),
    };

    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => {
            debug!("Failed to read error body for '{}': {}", action, e);
            return Err(degraded());
        }
    };

    match serde_json::from_slice::<ErrorResponse>(&body) {
        Ok(err) => Err(TwitchError::Status {
            action,
            code: status.as_u16(),
            status: err.error,
            message: err.message,
        }),
        Err(e) => {
            debug!("Undecodable error body for '{}' ({}): {}", action, status, e);
            Err(degraded())
        }
    }
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[async_trait]
impl TwitchApi for TwitchClient {
    async fn get_stream_data(&self, channel_id: u64) -> Result<StreamData, TwitchError> {
        let request = self.api_request(&format!("streams/{}", channel_id));
        self.fetch(ApiAction::StreamData, request).await
    }

    async fn get_channel_search(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<ChannelSearchResult, TwitchError> {
        let request = self
            .api_request("search/channels")
            .query(&[("query", query.to_string()), ("limit", limit.to_string())]);
        self.fetch(ApiAction::ChannelSearch, request).await
    }

    async fn get_game_search(&self, query: &str) -> Result<GameSearchResult, TwitchError> {
        let request = self.api_request("search/games").query(&[("query", query)]);
        self.fetch(ApiAction::GameSearch, request).await
    }

    async fn get_stream_search(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<StreamSearchResult, TwitchError> {
        let request = self
            .api_request("search/streams")
            .query(&[("query", query.to_string()), ("limit", limit.to_string())]);
        self.fetch(ApiAction::StreamSearch, request).await
    }

    async fn get_game_list(&self, limit: u32) -> Result<GameListResult, TwitchError> {
        let request = self.api_request("games/top").query(&[("limit", limit)]);
        self.fetch(ApiAction::GameList, request).await
    }

    async fn get_featured_list(&self, limit: u32) -> Result<FeaturedListResult, TwitchError> {
        let request = self.api_request("streams/featured").query(&[("limit", limit)]);
        self.fetch(ApiAction::FeaturedList, request).await
    }

    async fn get_stream_list(
        &self,
        game: Option<&str>,
        limit: u32,
    ) -> Result<StreamListResult, TwitchError> {
        let mut request = self.api_request("streams").query(&[("limit", limit)]);
        if let Some(game) = game.filter(|g| !g.is_empty()) {
            request = request.query(&[("game", game)]);
        }
        self.fetch(ApiAction::StreamList, request).await
    }

    async fn get_stream_variants(&self, channel: &str) -> Result<Vec<StreamVariant>, TwitchError> {
        self.resolve_variants(channel).await
    }
}
