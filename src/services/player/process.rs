//! External process media player
//!
//! Drives a media player executable (VLC by default) as a child process:
//! `play` spawns it with the loaded media, `stop` kills it. Fullscreen is a
//! launch flag, so toggling it while playing relaunches the child.

use async_trait::async_trait;
use std::env;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};
use url::Url;

use super::{Player, PlayerError};
use crate::config::Config;

pub struct ProcessPlayer {
    program: PathBuf,
    args: Vec<String>,
    fullscreen_arg: String,
    media: Option<String>,
    child: Option<Child>,
    fullscreen: bool,
    closed: bool,
}

impl ProcessPlayer {
    /// Create a player for an executable name or path
    pub fn new(
        program: &str,
        args: Vec<String>,
        fullscreen_arg: &str,
    ) -> Result<Self, PlayerError> {
        let program =
            find_executable(program).ok_or_else(|| PlayerError::NotFound(program.to_string()))?;

        debug!("Using media player {}", program.display());

        Ok(Self {
            program,
            args,
            fullscreen_arg: fullscreen_arg.to_string(),
            media: None,
            child: None,
            fullscreen: false,
            closed: false,
        })
    }

    /// Create from configuration plus optional audio/video output devices
    pub fn from_config(
        config: &Config,
        aout: Option<&str>,
        vout: Option<&str>,
    ) -> Result<Self, PlayerError> {
        let mut args = config.player_args.clone();
        if let Some(aout) = aout {
            args.push(format!("--aout={}", aout));
        }
        if let Some(vout) = vout {
            args.push(format!("--vout={}", vout));
        }
        Self::new(&config.player_path, args, &config.player_fullscreen_arg)
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Whether the child process is still running
    pub fn is_playing(&mut self) -> bool {
        let running = match self.child.as_mut().map(|child| child.try_wait()) {
            Some(Ok(None)) => true,
            Some(Ok(Some(status))) => {
                debug!("Media player exited with {}", status);
                false
            }
            Some(Err(e)) => {
                warn!("Failed to poll media player: {}", e);
                false
            }
            None => false,
        };
        if !running {
            self.child = None;
        }
        running
    }

    fn ensure_open(&self) -> Result<(), PlayerError> {
        if self.closed {
            return Err(PlayerError::Closed);
        }
        Ok(())
    }

    fn spawn(&mut self) -> Result<(), PlayerError> {
        let media = self.media.as_deref().ok_or(PlayerError::NoMedia)?;

        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if self.fullscreen && !self.fullscreen_arg.is_empty() {
            command.arg(&self.fullscreen_arg);
        }
        command
            .arg(media)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let child = command.spawn()?;
        info!(
            "Started media player {} (pid {:?})",
            self.program.display(),
            child.id()
        );
        self.child = Some(child);
        Ok(())
    }

    async fn kill(&mut self) -> Result<(), PlayerError> {
        if let Some(mut child) = self.child.take() {
            child.kill().await?;
            debug!("Media player stopped");
        }
        Ok(())
    }

    /// Relaunch a running child so a fullscreen change takes effect
    async fn relaunch_if_playing(&mut self) -> Result<(), PlayerError> {
        if self.is_playing() {
            self.kill().await?;
            self.spawn()?;
        }
        Ok(())
    }
}

#[async_trait]
impl Player for ProcessPlayer {
    async fn load_from_uri(&mut self, uri: &str) -> Result<(), PlayerError> {
        self.ensure_open()?;
        self.reset().await?;

        Url::parse(uri).map_err(|_| PlayerError::InvalidUri(uri.to_string()))?;
        self.media = Some(uri.to_string());
        Ok(())
    }

    async fn load_from_file(&mut self, path: &str) -> Result<(), PlayerError> {
        self.ensure_open()?;
        self.reset().await?;

        if !Path::new(path).is_file() {
            return Err(PlayerError::MissingFile(path.to_string()));
        }
        self.media = Some(path.to_string());
        Ok(())
    }

    async fn play(&mut self) -> Result<(), PlayerError> {
        self.ensure_open()?;
        if self.media.is_none() {
            return Err(PlayerError::NoMedia);
        }
        if self.is_playing() {
            return Ok(());
        }
        self.spawn()
    }

    async fn stop(&mut self) -> Result<(), PlayerError> {
        if !self.is_playing() {
            return Err(PlayerError::NotPlaying);
        }
        self.kill().await
    }

    async fn enter_fullscreen(&mut self) -> Result<(), PlayerError> {
        self.ensure_open()?;
        if self.fullscreen {
            return Err(PlayerError::AlreadyFullscreen);
        }
        self.fullscreen = true;
        self.relaunch_if_playing().await
    }

    async fn exit_fullscreen(&mut self) -> Result<(), PlayerError> {
        self.ensure_open()?;
        if !self.fullscreen {
            return Err(PlayerError::NotFullscreen);
        }
        self.fullscreen = false;
        self.relaunch_if_playing().await
    }

    async fn reset(&mut self) -> Result<(), PlayerError> {
        let stopped = if self.is_playing() {
            self.kill().await
        } else {
            Ok(())
        };
        self.media = None;
        stopped
    }

    async fn close(&mut self) -> Result<(), PlayerError> {
        if self.closed {
            return Ok(());
        }
        let result = self.reset().await;
        self.closed = true;
        result
    }
}

/// Locate an executable by path or through `PATH`
fn find_executable(program: &str) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }

    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .flat_map(|dir| {
            let plain = dir.join(program);
            let exe = dir.join(format!("{}.exe", program));
            [plain, exe]
        })
        .find(|path| path.is_file())
}
