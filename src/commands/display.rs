//! Terminal rendering of catalog entries

use std::io::{self, Write};

use crate::services::twitch::{Channel, Featured, Game, GameInfo, Stream, StreamVariant};

fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim(),
        _ => "-",
    }
}

pub fn print_channels<W: Write>(out: &mut W, channels: &[Channel]) -> io::Result<()> {
    for channel in channels {
        writeln!(
            out,
            "{} ({}) - {}: {} [{} followers, {} views]",
            channel.display_name,
            channel.name,
            or_dash(channel.game.as_deref()),
            or_dash(channel.status.as_deref()),
            channel.followers,
            channel.views
        )?;
    }
    Ok(())
}

pub fn print_games<W: Write>(out: &mut W, games: &[Game]) -> io::Result<()> {
    for game in games {
        writeln!(
            out,
            "{} (id {}, popularity {})",
            game.name, game.id, game.popularity
        )?;
    }
    Ok(())
}

pub fn print_games_info<W: Write>(out: &mut W, games: &[GameInfo]) -> io::Result<()> {
    for (i, info) in games.iter().enumerate() {
        writeln!(
            out,
            "{:>3}. {}: {} viewers on {} channels",
            i + 1,
            info.game.name,
            info.viewers,
            info.channels
        )?;
    }
    Ok(())
}

pub fn print_streams<W: Write>(out: &mut W, streams: &[Stream]) -> io::Result<()> {
    for stream in streams {
        writeln!(out, "{}", stream_summary(stream))?;
    }
    Ok(())
}

pub fn print_featured<W: Write>(out: &mut W, featured: &[Featured]) -> io::Result<()> {
    for entry in featured {
        let sponsored = if entry.sponsored { " (sponsored)" } else { "" };
        writeln!(out, "[{}] {}{}", entry.priority, entry.title, sponsored)?;
        writeln!(out, "      {}", stream_summary(&entry.stream))?;
    }
    Ok(())
}

/// `{display_name} playing {game} for {viewers} viewers: {status}`
pub fn stream_summary(stream: &Stream) -> String {
    let game = stream
        .game
        .as_deref()
        .or(stream.channel.game.as_deref());
    format!(
        "{} playing {} for {} viewers: {}",
        stream.channel.display_name,
        or_dash(game),
        stream.viewers,
        or_dash(stream.channel.status.as_deref())
    )
}

/// Resolution label, `audio only` for renditions without video
pub fn variant_resolution(variant: &StreamVariant) -> &str {
    if variant.is_audio_only() {
        "audio only"
    } else {
        &variant.resolution
    }
}

/// `[index]: resolution (quality, bandwidth-in-kbps)`
pub fn print_variants<W: Write>(out: &mut W, variants: &[StreamVariant]) -> io::Result<()> {
    for (i, variant) in variants.iter().enumerate() {
        writeln!(
            out,
            "[{}]: {} ({}, {}kbps)",
            i,
            variant_resolution(variant),
            variant.quality,
            variant.bandwidth_kbps()
        )?;
    }
    Ok(())
}
