//! CLI command handlers

pub mod display;
pub mod list;
pub mod search;
pub mod stream;

#[cfg(test)]
pub(crate) mod testing;

use std::io;
use thiserror::Error;

use crate::services::player::PlayerError;
use crate::services::twitch::TwitchError;

/// Errors ending a command
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Api(#[from] TwitchError),

    #[error(transparent)]
    Player(#[from] PlayerError),

    #[error(transparent)]
    Console(#[from] io::Error),

    #[error("No channels found for {0}")]
    NoChannels(String),

    #[error("No online stream found for channel {0}")]
    Offline(String),
}
