//! Fakes for command tests

use async_trait::async_trait;
use std::sync::Mutex;

use crate::services::player::{Player, PlayerError};
use crate::services::twitch::types::*;
use crate::services::twitch::{TwitchApi, TwitchError};

pub fn channel(id: u64, name: &str) -> Channel {
    Channel {
        id,
        name: name.to_string(),
        display_name: name.to_uppercase(),
        game: Some("Chess".to_string()),
        status: Some("blitz all day".to_string()),
        ..Default::default()
    }
}

pub fn live_stream(id: u64, channel: Channel) -> Stream {
    Stream {
        id,
        game: Some("Chess".to_string()),
        viewers: 321,
        channel,
        ..Default::default()
    }
}

pub fn variant(quality: &str, resolution: &str, bandwidth: u64) -> StreamVariant {
    StreamVariant {
        bandwidth,
        quality: quality.to_string(),
        resolution: resolution.to_string(),
        uri: format!("https://video-weaver.example/{}.m3u8", quality),
    }
}

/// Scripted [`TwitchApi`] recording every call
#[derive(Default)]
pub struct FakeApi {
    pub channels: Vec<Channel>,
    pub stream: Stream,
    pub variants: Vec<StreamVariant>,
    pub manifest_unavailable: bool,
    pub games: Vec<GameInfo>,
    pub found_games: Vec<Game>,
    pub streams: Vec<Stream>,
    pub featured: Vec<Featured>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeApi {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TwitchApi for FakeApi {
    async fn get_stream_data(&self, channel_id: u64) -> Result<StreamData, TwitchError> {
        self.record(format!("stream_data:{}", channel_id));
        Ok(StreamData {
            stream: self.stream.clone(),
            ..Default::default()
        })
    }

    async fn get_channel_search(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<ChannelSearchResult, TwitchError> {
        self.record(format!("channel_search:{}:{}", query, limit));
        Ok(ChannelSearchResult {
            total: self.channels.len() as u64,
            channels: self.channels.clone(),
        })
    }

    async fn get_game_search(&self, query: &str) -> Result<GameSearchResult, TwitchError> {
        self.record(format!("game_search:{}", query));
        Ok(GameSearchResult {
            games: self.found_games.clone(),
        })
    }

    async fn get_stream_search(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<StreamSearchResult, TwitchError> {
        self.record(format!("stream_search:{}:{}", query, limit));
        Ok(StreamSearchResult {
            total: 1000,
            streams: self.streams.clone(),
        })
    }

    async fn get_game_list(&self, limit: u32) -> Result<GameListResult, TwitchError> {
        self.record(format!("game_list:{}", limit));
        Ok(GameListResult {
            total: 1157,
            games: self.games.clone(),
        })
    }

    async fn get_featured_list(&self, limit: u32) -> Result<FeaturedListResult, TwitchError> {
        self.record(format!("featured_list:{}", limit));
        Ok(FeaturedListResult {
            featured: self.featured.clone(),
        })
    }

    async fn get_stream_list(
        &self,
        game: Option<&str>,
        limit: u32,
    ) -> Result<StreamListResult, TwitchError> {
        self.record(format!("stream_list:{}:{}", game.unwrap_or(""), limit));
        Ok(StreamListResult {
            total: 300,
            streams: self.streams.clone(),
        })
    }

    async fn get_stream_variants(&self, channel: &str) -> Result<Vec<StreamVariant>, TwitchError> {
        self.record(format!("variants:{}", channel));
        if self.manifest_unavailable {
            return Err(TwitchError::StreamUnavailable);
        }
        Ok(self.variants.clone())
    }
}

/// [`Player`] recording every call
#[derive(Default)]
pub struct FakePlayer {
    pub calls: Vec<String>,
    pub fail_play: bool,
}

#[async_trait]
impl Player for FakePlayer {
    async fn load_from_uri(&mut self, uri: &str) -> Result<(), PlayerError> {
        self.calls.push(format!("load_uri:{}", uri));
        Ok(())
    }

    async fn load_from_file(&mut self, path: &str) -> Result<(), PlayerError> {
        self.calls.push(format!("load_file:{}", path));
        Ok(())
    }

    async fn play(&mut self) -> Result<(), PlayerError> {
        self.calls.push("play".to_string());
        if self.fail_play {
            return Err(PlayerError::NoMedia);
        }
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), PlayerError> {
        self.calls.push("stop".to_string());
        Ok(())
    }

    async fn enter_fullscreen(&mut self) -> Result<(), PlayerError> {
        self.calls.push("enter_fullscreen".to_string());
        Ok(())
    }

    async fn exit_fullscreen(&mut self) -> Result<(), PlayerError> {
        self.calls.push("exit_fullscreen".to_string());
        Ok(())
    }

    async fn reset(&mut self) -> Result<(), PlayerError> {
        self.calls.push("reset".to_string());
        Ok(())
    }

    async fn close(&mut self) -> Result<(), PlayerError> {
        self.calls.push("close".to_string());
        Ok(())
    }
}
