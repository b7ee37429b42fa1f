//! Media player capability
//!
//! The selection flow only talks to [`Player`]; [`ProcessPlayer`] is the
//! production implementation driving an external player executable.

pub mod process;

use async_trait::async_trait;
use thiserror::Error;

pub use process::ProcessPlayer;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Media player not found: {0}")]
    NotFound(String),

    #[error("Cannot load media: invalid URI {0}")]
    InvalidUri(String),

    #[error("Cannot load media: no such file {0}")]
    MissingFile(String),

    #[error("Cannot play: No media loaded")]
    NoMedia,

    #[error("Cannot stop: No media playing")]
    NotPlaying,

    #[error("Cannot enter fullscreen: Is already fullscreen")]
    AlreadyFullscreen,

    #[error("Cannot exit fullscreen: No fullscreen to exit")]
    NotFullscreen,

    #[error("Media player is closed")]
    Closed,

    #[error("Media player process failed")]
    Process(#[from] std::io::Error),
}

/// Playback device driven by the selection flow
#[async_trait]
pub trait Player: Send {
    /// Load media from a URI, releasing whatever was loaded before
    async fn load_from_uri(&mut self, uri: &str) -> Result<(), PlayerError>;

    /// Load media from a local file, releasing whatever was loaded before
    async fn load_from_file(&mut self, path: &str) -> Result<(), PlayerError>;

    async fn play(&mut self) -> Result<(), PlayerError>;

    async fn stop(&mut self) -> Result<(), PlayerError>;

    /// Fails if already fullscreen
    async fn enter_fullscreen(&mut self) -> Result<(), PlayerError>;

    /// Fails if not fullscreen
    async fn exit_fullscreen(&mut self) -> Result<(), PlayerError>;

    /// Stop playback and release loaded media. Idempotent.
    async fn reset(&mut self) -> Result<(), PlayerError>;

    /// Release the underlying engine. Call once at exit.
    async fn close(&mut self) -> Result<(), PlayerError>;
}
