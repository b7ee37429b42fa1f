//! `list` command: top games, featured streams, streams by game

use std::io::Write;

use super::display;
use super::CommandError;
use crate::services::twitch::TwitchApi;

pub async fn list_games<A, W>(api: &A, out: &mut W, limit: u32) -> Result<(), CommandError>
where
    A: TwitchApi + ?Sized,
    W: Write,
{
    let result = api.get_game_list(limit).await?;

    writeln!(
        out,
        "Listing top {} (out of {}) games:\n",
        result.games.len(),
        result.total
    )?;
    display::print_games_info(out, &result.games)?;
    writeln!(out)?;

    Ok(())
}

pub async fn list_featured<A, W>(api: &A, out: &mut W, limit: u32) -> Result<(), CommandError>
where
    A: TwitchApi + ?Sized,
    W: Write,
{
    let result = api.get_featured_list(limit).await?;

    writeln!(out, "Listing top {} featured streams:\n", result.featured.len())?;
    display::print_featured(out, &result.featured)?;
    writeln!(out)?;

    Ok(())
}

pub async fn list_streams<A, W>(
    api: &A,
    out: &mut W,
    game: Option<&str>,
    limit: u32,
) -> Result<(), CommandError>
where
    A: TwitchApi + ?Sized,
    W: Write,
{
    let result = api.get_stream_list(game, limit).await?;

    writeln!(
        out,
        "Listing top {} streamers (out of {}):\n",
        result.streams.len(),
        result.total
    )?;
    display::print_streams(out, &result.streams)?;
    writeln!(out)?;

    Ok(())
}
