use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Twitch API
    pub client_id: String,
    pub api_url: String,
    pub token_api_url: String,
    pub usher_url: String,
    pub api_accept: String,

    // HTTP transport
    pub http_timeout_ms: u64,
    pub connect_timeout_ms: u64,
    pub tcp_keepalive_secs: u64,
    pub pool_max_idle: usize,
    pub pool_idle_timeout_secs: u64,

    // Commands
    pub channel_search_limit: u32,
    pub list_limit: u32,

    // Player
    pub player_path: String,
    pub player_args: Vec<String>,
    pub player_fullscreen_arg: String,

    // Misc
    pub user_agent: String,
    pub log_format: String,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            // Twitch API
            client_id: env::var("TWITCH_CLIENT_ID").unwrap_or_default(),
            api_url: env::var("TWITCH_API_URL")
                .unwrap_or_else(|_| "https://api.twitch.tv/kraken".to_string()),
            token_api_url: env::var("TWITCH_TOKEN_API_URL")
                .unwrap_or_else(|_| "https://api.twitch.tv/api".to_string()),
            usher_url: env::var("TWITCH_USHER_URL")
                .unwrap_or_else(|_| "https://usher.ttvnw.net/api/channel/hls".to_string()),
            api_accept: env::var("TWITCH_API_ACCEPT")
                .unwrap_or_else(|_| "application/vnd.twitchtv.v5+json".to_string()),

            // HTTP transport
            http_timeout_ms: env::var("HTTP_TIMEOUT_MS")
                .unwrap_or_else(|_| "20000".to_string())
                .parse()
                .unwrap_or(20_000), // 20 seconds

            connect_timeout_ms: env::var("CONNECT_TIMEOUT_MS")
                .unwrap_or_else(|_| "30000".to_string())
                .parse()
                .unwrap_or(30_000),

            tcp_keepalive_secs: env::var("TCP_KEEPALIVE_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),

            pool_max_idle: env::var("POOL_MAX_IDLE")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .unwrap_or(100),

            pool_idle_timeout_secs: env::var("POOL_IDLE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "90".to_string())
                .parse()
                .unwrap_or(90),

            // Commands
            channel_search_limit: env::var("CHANNEL_SEARCH_LIMIT")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),

            list_limit: env::var("LIST_LIMIT")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),

            // Player
            player_path: env::var("PLAYER_PATH").unwrap_or_else(|_| "vlc".to_string()),
            player_args: env::var("PLAYER_ARGS")
                .map(|v| v.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default(),
            player_fullscreen_arg: env::var("PLAYER_FULLSCREEN_ARG")
                .unwrap_or_else(|_| "--fullscreen".to_string()),

            // Misc
            user_agent: env::var("USER_AGENT")
                .unwrap_or_else(|_| format!("twitch-player/{}", env!("CARGO_PKG_VERSION"))),
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn tcp_keepalive(&self) -> Duration {
        Duration::from_secs(self.tcp_keepalive_secs)
    }

    pub fn pool_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_idle_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
