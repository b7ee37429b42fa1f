//! `search` command: channels, games or live streams

use std::io::Write;

use super::display;
use super::CommandError;
use crate::services::twitch::TwitchApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Channels,
    Games,
    Streams,
}

pub async fn search<A, W>(
    api: &A,
    out: &mut W,
    query: &str,
    kind: SearchKind,
    limit: u32,
) -> Result<(), CommandError>
where
    A: TwitchApi + ?Sized,
    W: Write,
{
    match kind {
        SearchKind::Channels => {
            let result = api.get_channel_search(query, limit).await?;
            write_header(out, result.total, result.channels.len())?;
            display::print_channels(out, &result.channels)?;
        }
        SearchKind::Games => {
            // Game search has no paging, every hit is returned
            let result = api.get_game_search(query).await?;
            write_header(out, result.games.len() as u64, result.games.len())?;
            display::print_games(out, &result.games)?;
        }
        SearchKind::Streams => {
            let result = api.get_stream_search(query, limit).await?;
            write_header(out, result.total, result.streams.len())?;
            display::print_streams(out, &result.streams)?;
        }
    }
    writeln!(out)?;

    Ok(())
}

fn write_header<W: Write>(out: &mut W, total: u64, shown: usize) -> std::io::Result<()> {
    writeln!(out, "{} results - displaying first {}:\n", total, shown)
}
