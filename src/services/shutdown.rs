//! Termination signals ending playback

use std::fmt;
use std::io;

/// Which external signal ended playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Aborted,
    Interrupted,
    Terminated,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Aborted => write!(f, "Stream aborted!"),
            Termination::Interrupted => write!(f, "Stream interrupted!"),
            Termination::Terminated => write!(f, "Stream terminated!"),
        }
    }
}

/// Wait for SIGABRT, SIGINT or SIGTERM
#[cfg(unix)]
pub async fn wait_for_termination() -> io::Result<Termination> {
    use tokio::signal::unix::{signal, SignalKind};

    // Same value on every Unix tokio supports
    const SIGABRT: i32 = 6;

    let mut abort = signal(SignalKind::from_raw(SIGABRT))?;
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    let termination = tokio::select! {
        _ = abort.recv() => Termination::Aborted,
        _ = interrupt.recv() => Termination::Interrupted,
        _ = terminate.recv() => Termination::Terminated,
    };
    tracing::debug!("Received termination signal: {:?}", termination);
    Ok(termination)
}

/// Wait for Ctrl-C
#[cfg(not(unix))]
pub async fn wait_for_termination() -> io::Result<Termination> {
    tokio::signal::ctrl_c().await?;
    Ok(Termination::Interrupted)
}
