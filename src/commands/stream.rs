//! `stream` command: pick a channel, pick a variant, play it
//!
//! channel search → disambiguation → stream metadata → variant selection →
//! player hand-off → wait for a termination signal.

use std::future::Future;
use std::io::{self, BufRead, Write};
use tracing::info;

use super::display;
use super::CommandError;
use crate::services::console::Console;
use crate::services::player::Player;
use crate::services::shutdown::Termination;
use crate::services::twitch::{Channel, TwitchApi, TwitchError};

#[derive(Debug, Clone)]
pub struct StreamOptions {
    /// Channel name as typed by the user
    pub channel: String,
    pub fullscreen: bool,
    /// Number of channel search results offered for disambiguation
    pub search_limit: u32,
}

/// Turn user input into a channel
///
/// An exact name match on the best search result is taken without asking;
/// otherwise every result is offered in a numbered menu.
pub async fn resolve_channel<A, R, W>(
    api: &A,
    console: &mut Console<R, W>,
    query: &str,
    limit: u32,
) -> Result<Channel, CommandError>
where
    A: TwitchApi + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut channels = api.get_channel_search(query, limit).await?.channels;

    if channels.is_empty() {
        return Err(CommandError::NoChannels(query.to_string()));
    }

    if channels[0].name == query {
        return Ok(channels.swap_remove(0));
    }

    console.line(format_args!(
        "No channels found for {}. Did you possibly mean...\n",
        query
    ))?;
    for (i, c) in channels.iter().enumerate() {
        console.line(format_args!(
            "[{} - {}] {} (id {})?",
            i, c.name, c.display_name, c.id
        ))?;
    }

    let max = channels.len() - 1;
    let selection = console.select(&format!("\nSelect stream channel: [0-{}]: ", max), max)?;
    Ok(channels.swap_remove(selection))
}

/// Play a channel until a termination signal arrives
///
/// Returns which signal ended playback. Playback is reset afterwards; closing
/// the player is left to the caller (see [`run`]).
pub async fn play_channel<A, P, R, W, F>(
    api: &A,
    player: &mut P,
    console: &mut Console<R, W>,
    options: &StreamOptions,
    shutdown: F,
) -> Result<Termination, CommandError>
where
    A: TwitchApi + ?Sized,
    P: Player + ?Sized,
    R: BufRead,
    W: Write,
    F: Future<Output = io::Result<Termination>>,
{
    let channel = resolve_channel(api, console, &options.channel, options.search_limit).await?;
    info!("Selected channel {} (id {})", channel.name, channel.id);

    let stream = api.get_stream_data(channel.id).await?.stream;
    if !stream.is_online() {
        return Err(CommandError::Offline(options.channel.clone()));
    }

    let variants = api.get_stream_variants(&stream.channel.name).await?;
    if variants.is_empty() {
        return Err(TwitchError::NoVariants.into());
    }

    console.line(format_args!("\n{}\n", display::stream_summary(&stream)))?;
    display::print_variants(console.output(), &variants)?;

    let max = variants.len() - 1;
    let selection = console.select(&format!("\nSelect stream format: [0-{}]: ", max), max)?;
    let variant = &variants[selection];
    let resolution = display::variant_resolution(variant);

    console.line(format_args!(
        "Loading {} {} ({})...",
        channel.name, resolution, variant.quality
    ))?;
    player.load_from_uri(&variant.uri).await?;

    console.line(format_args!(
        "Playing {} {} ({})...",
        channel.name, resolution, variant.quality
    ))?;
    player.play().await?;

    if options.fullscreen {
        console.line(format_args!("Entering fullscreen..."))?;
        player.enter_fullscreen().await?;
    }

    let termination = shutdown.await?;
    console.line(format_args!("{}", termination))?;
    info!("Playback of {} ended: {:?}", channel.name, termination);

    player.reset().await?;
    Ok(termination)
}

/// [`play_channel`] followed by closing the player, whatever the outcome
///
/// A flow error takes precedence over a close error.
pub async fn run<A, P, R, W, F>(
    api: &A,
    player: &mut P,
    console: &mut Console<R, W>,
    options: &StreamOptions,
    shutdown: F,
) -> Result<Termination, CommandError>
where
    A: TwitchApi + ?Sized,
    P: Player + ?Sized,
    R: BufRead,
    W: Write,
    F: Future<Output = io::Result<Termination>>,
{
    let outcome = play_channel(api, player, console, options, shutdown).await;
    let closed = player.close().await;

    let termination = outcome?;
    closed?;
    Ok(termination)
}
