//! HTTP transport shared by every Twitch call

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::error::TwitchError;
use crate::config::Config;

/// Header carrying the application's client identifier (sent as `Client-ID`)
pub const CLIENT_ID_HEADER: &str = "client-id";

/// Connection settings for the pooled HTTP client
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub client_id: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Covers both the TCP connect and the TLS handshake
    pub connect_timeout: Duration,
    pub tcp_keepalive: Duration,
    pub pool_max_idle: usize,
    pub pool_idle_timeout: Duration,
}

impl TransportConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            client_id: config.client_id.clone(),
            user_agent: config.user_agent.clone(),
            timeout: config.http_timeout(),
            connect_timeout: config.connect_timeout(),
            tcp_keepalive: config.tcp_keepalive(),
            pool_max_idle: config.pool_max_idle,
            pool_idle_timeout: config.pool_idle_timeout(),
        }
    }
}

/// Build the pooled client
///
/// HTTP/2 is negotiated through ALPN when the server offers it, otherwise
/// requests fall back to HTTP/1.1. No retries happen at this layer.
pub fn build_http_client(config: &TransportConfig) -> Result<Client, TwitchError> {
    if config.client_id.trim().is_empty() {
        return Err(TwitchError::MissingClientId);
    }

    let client_id = HeaderValue::from_str(&config.client_id)
        .map_err(|e| TwitchError::InvalidHeader(format!("{}: {}", CLIENT_ID_HEADER, e)))?;

    let mut headers = HeaderMap::new();
    headers.insert(CLIENT_ID_HEADER, client_id);

    debug!(
        "Building HTTP client (timeout {:?}, connect {:?}, idle pool {})",
        config.timeout, config.connect_timeout, config.pool_max_idle
    );

    Client::builder()
        .default_headers(headers)
        .user_agent(&config.user_agent)
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .tcp_keepalive(config.tcp_keepalive)
        .pool_max_idle_per_host(config.pool_max_idle)
        .pool_idle_timeout(config.pool_idle_timeout)
        .http2_adaptive_window(true)
        .build()
        .map_err(TwitchError::Build)
}
