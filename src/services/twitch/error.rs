//! Twitch client error types

use std::fmt;
use thiserror::Error;

/// Names the API call an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiAction {
    Token,
    Manifest,
    StreamData,
    ChannelSearch,
    GameSearch,
    StreamSearch,
    GameList,
    FeaturedList,
    StreamList,
}

impl fmt::Display for ApiAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiAction::Token => write!(f, "Getting token"),
            ApiAction::Manifest => write!(f, "Getting streams"),
            ApiAction::StreamData => write!(f, "Getting stream data"),
            ApiAction::ChannelSearch => write!(f, "Searching channels"),
            ApiAction::GameSearch => write!(f, "Searching games"),
            ApiAction::StreamSearch => write!(f, "Searching streams"),
            ApiAction::GameList => write!(f, "Listing games"),
            ApiAction::FeaturedList => write!(f, "Listing featured streams"),
            ApiAction::StreamList => write!(f, "Listing streams"),
        }
    }
}

/// Twitch API error types
///
/// Variants wrapping a lower-level error expose it through `source()`
/// instead of repeating it in their message.
#[derive(Debug, Error)]
pub enum TwitchError {
    /// Connection, timeout or body read failure
    #[error("{action}: request failed")]
    Transport {
        action: ApiAction,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx status with a structured error body
    #[error("{action}: HTTP {code} - {status}: {message}")]
    Status {
        action: ApiAction,
        code: u16,
        status: String,
        message: String,
    },

    /// Non-2xx status whose body could not be decoded
    #[error("{action}: HTTP {status_line}")]
    DegradedStatus { action: ApiAction, status_line: String },

    /// 2xx status with a body that does not match the expected schema
    #[error("{action}: invalid response body")]
    Decode {
        action: ApiAction,
        #[source]
        source: serde_json::Error,
    },

    /// 2xx manifest response that is not a master playlist
    #[error("Stream offline or does not exist")]
    StreamUnavailable,

    #[error("Stream manifest contains no playable variants")]
    NoVariants,

    #[error("No Twitch client id configured (set TWITCH_CLIENT_ID)")]
    MissingClientId,

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    #[error("Failed to create HTTP client")]
    Build(#[source] reqwest::Error),
}

impl TwitchError {
    /// The API call this error was raised for, if any
    pub fn action(&self) -> Option<ApiAction> {
        match self {
            TwitchError::Transport { action, .. }
            | TwitchError::Status { action, .. }
            | TwitchError::DegradedStatus { action, .. }
            | TwitchError::Decode { action, .. } => Some(*action),
            TwitchError::StreamUnavailable | TwitchError::NoVariants => Some(ApiAction::Manifest),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_carries_platform_message() {
        let err = TwitchError::Status {
            action: ApiAction::StreamData,
            code: 404,
            status: "Not Found".to_string(),
            message: "Channel 'mychan' does not exist".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Getting stream data: HTTP 404 - Not Found: Channel 'mychan' does not exist"
        );
    }

    #[test]
    fn test_degraded_error_shows_status_line() {
        let err = TwitchError::DegradedStatus {
            action: ApiAction::Token,
            status_line: "502 Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "Getting token: HTTP 502 Bad Gateway");
        assert_eq!(err.action(), Some(ApiAction::Token));
    }

    #[test]
    fn test_unavailable_message() {
        assert_eq!(
            TwitchError::StreamUnavailable.to_string(),
            "Stream offline or does not exist"
        );
        assert_eq!(TwitchError::MissingClientId.action(), None);
    }
}
