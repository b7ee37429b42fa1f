//! Playlist resolution
//!
//! Turns a channel name into playable variants in three steps:
//!
//! 1. exchange the channel name for a signed access token
//! 2. fetch the HLS master manifest with that token
//! 3. extract one [`StreamVariant`] per rendition, in manifest order
//!
//! Tokens are single-use and never cached.

use m3u8_rs::Playlist;
use tracing::{debug, info, warn};

use super::client::{check_status, TwitchClient};
use super::error::{ApiAction, TwitchError};
use super::types::{AccessToken, StreamVariant};

impl TwitchClient {
    /// Request a signed access token scoped to one channel
    pub async fn get_access_token(&self, channel: &str) -> Result<AccessToken, TwitchError> {
        let url = format!(
            "{}/channels/{}/access_token",
            self.endpoints.token_api,
            urlencoding::encode(channel)
        );
        self.fetch(ApiAction::Token, self.http.get(url)).await
    }

    /// Fetch the raw master manifest for a channel
    pub async fn get_manifest(
        &self,
        channel: &str,
        token: &AccessToken,
    ) -> Result<Vec<u8>, TwitchError> {
        let action = ApiAction::Manifest;
        let url = format!(
            "{}/{}.m3u8",
            self.endpoints.usher,
            urlencoding::encode(channel)
        );
        let cache_buster = self.next_cache_buster();

        debug!("Twitch API request: {} (p={})", action, cache_buster);

        let response = self
            .http
            .get(url)
            .query(&[
                ("player", "twitchweb"),
                ("token", token.token.as_str()),
                ("sig", token.signature.as_str()),
                ("allow_audio_only", "true"),
                ("allow_source", "true"),
                ("type", "any"),
                ("allow_spectre", "false"),
            ])
            .query(&[("p", cache_buster)])
            .send()
            .await
            .map_err(|source| TwitchError::Transport { action, source })?;

        let body = check_status(action, response)
            .await?
            .bytes()
            .await
            .map_err(|source| TwitchError::Transport { action, source })?;

        Ok(body.to_vec())
    }

    /// Resolve the playable variants of a live channel
    pub async fn resolve_variants(&self, channel: &str) -> Result<Vec<StreamVariant>, TwitchError> {
        let token = self.get_access_token(channel).await?;
        let manifest = self.get_manifest(channel, &token).await?;
        let variants = parse_master_playlist(&manifest)?;

        info!("Resolved {} variants for channel {}", variants.len(), channel);
        Ok(variants)
    }
}

/// Decode a master manifest into its playable variants
///
/// Anything that is not a master playlist means the stream is not available.
/// Manifest order is kept as-is; I-frame-only renditions are skipped.
pub fn parse_master_playlist(manifest: &[u8]) -> Result<Vec<StreamVariant>, TwitchError> {
    let master = match m3u8_rs::parse_playlist_res(manifest) {
        Ok(Playlist::MasterPlaylist(master)) => master,
        Ok(Playlist::MediaPlaylist(_)) => {
            warn!("Manifest is a media playlist, expected a master playlist");
            return Err(TwitchError::StreamUnavailable);
        }
        Err(e) => {
            warn!("Manifest could not be parsed: {:?}", e);
            return Err(TwitchError::StreamUnavailable);
        }
    };

    let variants: Vec<StreamVariant> = master
        .variants
        .into_iter()
        .filter(|variant| !variant.is_i_frame)
        .map(|variant| StreamVariant {
            bandwidth: variant.bandwidth,
            quality: variant.video.unwrap_or_default(),
            resolution: variant
                .resolution
                .map(|r| format!("{}x{}", r.width, r.height))
                .unwrap_or_default(),
            uri: variant.uri,
        })
        .collect();

    if variants.is_empty() {
        return Err(TwitchError::NoVariants);
    }

    Ok(variants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::twitch::client::Endpoints;
    use crate::services::twitch::http::TransportConfig;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MASTER: &str = "#EXTM3U
#EXT-X-STREAM-INF:BANDWIDTH=6000000,RESOLUTION=1920x1080,CODECS=\"avc1.64002A,mp4a.40.2\",VIDEO=\"chunked\",FRAME-RATE=60.000
https://video-weaver.example/v1/playlist/chunked.m3u8
#EXT-X-STREAM-INF:BANDWIDTH=3000000,RESOLUTION=1280x720,CODECS=\"avc1.4D401F,mp4a.40.2\",VIDEO=\"720p60\",FRAME-RATE=60.000
https://video-weaver.example/v1/playlist/720p60.m3u8
#EXT-X-STREAM-INF:BANDWIDTH=160000,CODECS=\"mp4a.40.2\",VIDEO=\"audio_only\"
https://video-weaver.example/v1/playlist/audio_only.m3u8
";

    const MEDIA: &str = "#EXTM3U
#EXT-X-VERSION:3
#EXT-X-TARGETDURATION:10
#EXT-X-MEDIA-SEQUENCE:0
#EXTINF:10.0,
segment0.ts
#EXT-X-ENDLIST
";

    fn test_client(server: &MockServer) -> TwitchClient {
        let transport = TransportConfig {
            client_id: "test-client".to_string(),
            user_agent: "twitch-player/test".to_string(),
            timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(5),
            tcp_keepalive: Duration::from_secs(30),
            pool_max_idle: 4,
            pool_idle_timeout: Duration::from_secs(90),
        };
        let endpoints = Endpoints {
            api: format!("{}/kraken", server.uri()),
            token_api: format!("{}/api", server.uri()),
            usher: format!("{}/hls", server.uri()),
            accept: "application/vnd.twitchtv.v5+json".to_string(),
        };
        TwitchClient::new(&transport, endpoints).unwrap()
    }

    async fn mount_token(server: &MockServer, expected_calls: u64) {
        Mock::given(method("GET"))
            .and(path("/api/channels/mychan/access_token"))
            .and(header("Client-ID", "test-client"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"token": "tok{\"a\":1}", "sig": "s1g"}"#),
            )
            .expect(expected_calls)
            .mount(server)
            .await;
    }

    /// `p` values of every manifest request received, in arrival order
    async fn manifest_cache_busters(server: &MockServer) -> Vec<u64> {
        server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter(|request| request.url.path() == "/hls/mychan.m3u8")
            .map(|request| {
                request
                    .url
                    .query_pairs()
                    .find(|(key, _)| key == "p")
                    .map(|(_, value)| value.parse::<u64>().unwrap())
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_master_playlist_keeps_manifest_order() {
        let variants = parse_master_playlist(MASTER.as_bytes()).unwrap();

        assert_eq!(variants.len(), 3);
        assert_eq!(variants[0].quality, "chunked");
        assert_eq!(variants[0].resolution, "1920x1080");
        assert_eq!(variants[0].bandwidth, 6_000_000);
        assert_eq!(
            variants[0].uri,
            "https://video-weaver.example/v1/playlist/chunked.m3u8"
        );
        assert_eq!(variants[1].quality, "720p60");
        assert_eq!(variants[2].quality, "audio_only");
        assert!(variants[2].is_audio_only());
    }

    #[test]
    fn test_lower_quality_first_is_not_reordered() {
        let manifest = "#EXTM3U
#EXT-X-STREAM-INF:BANDWIDTH=600000,RESOLUTION=640x360,VIDEO=\"360p30\"
low.m3u8
#EXT-X-STREAM-INF:BANDWIDTH=6000000,RESOLUTION=1920x1080,VIDEO=\"chunked\"
high.m3u8
";
        let variants = parse_master_playlist(manifest.as_bytes()).unwrap();
        let uris: Vec<&str> = variants.iter().map(|v| v.uri.as_str()).collect();
        assert_eq!(uris, vec!["low.m3u8", "high.m3u8"]);
    }

    #[test]
    fn test_media_playlist_means_unavailable() {
        let err = parse_master_playlist(MEDIA.as_bytes()).unwrap_err();
        assert!(matches!(err, TwitchError::StreamUnavailable));
        assert_eq!(err.to_string(), "Stream offline or does not exist");
    }

    #[test]
    fn test_garbage_body_means_unavailable() {
        let err = parse_master_playlist(b"<html>not here</html>").unwrap_err();
        assert!(matches!(err, TwitchError::StreamUnavailable));
    }

    #[test]
    fn test_iframe_only_manifest_has_no_variants() {
        let manifest = "#EXTM3U
#EXT-X-I-FRAME-STREAM-INF:BANDWIDTH=100000,URI=\"iframes.m3u8\"
";
        let err = parse_master_playlist(manifest.as_bytes()).unwrap_err();
        assert!(matches!(err, TwitchError::NoVariants));
    }

    #[tokio::test]
    async fn test_resolve_variants_end_to_end() {
        let server = MockServer::start().await;
        mount_token(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/hls/mychan.m3u8"))
            .and(query_param("token", "tok{\"a\":1}"))
            .and(query_param("sig", "s1g"))
            .and(query_param("player", "twitchweb"))
            .and(query_param("allow_source", "true"))
            .and(query_param("allow_audio_only", "true"))
            .and(query_param("type", "any"))
            .and(query_param("allow_spectre", "false"))
            .and(header("Client-ID", "test-client"))
            .respond_with(ResponseTemplate::new(200).set_body_string(MASTER))
            .expect(1)
            .mount(&server)
            .await;

        let variants = test_client(&server).resolve_variants("mychan").await.unwrap();
        assert_eq!(variants.len(), 3);
        assert_eq!(variants[0].quality, "chunked");

        let busters = manifest_cache_busters(&server).await;
        assert_eq!(busters.len(), 1);
        assert!(busters[0] > 0);
    }

    #[tokio::test]
    async fn test_tokens_are_not_reused() {
        let server = MockServer::start().await;
        mount_token(&server, 2).await;
        Mock::given(method("GET"))
            .and(path("/hls/mychan.m3u8"))
            .respond_with(ResponseTemplate::new(200).set_body_string(MASTER))
            .expect(2)
            .mount(&server)
            .await;

        let client = test_client(&server);
        client.resolve_variants("mychan").await.unwrap();
        client.resolve_variants("mychan").await.unwrap();

        let busters = manifest_cache_busters(&server).await;
        assert_eq!(busters.len(), 2);
        assert!(busters[1] > busters[0]);
    }

    #[tokio::test]
    async fn test_token_failure_is_tagged_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/channels/mychan/access_token"))
            .respond_with(ResponseTemplate::new(404).set_body_string(
                r#"{"error": "Not Found", "status": 404, "message": "Channel 'mychan' does not exist"}"#,
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/hls/mychan.m3u8"))
            .respond_with(ResponseTemplate::new(200).set_body_string(MASTER))
            .expect(0)
            .mount(&server)
            .await;

        let err = test_client(&server)
            .resolve_variants("mychan")
            .await
            .unwrap_err();
        assert_eq!(err.action(), Some(ApiAction::Token));
        assert!(err.to_string().contains("does not exist"));
    }

    #[tokio::test]
    async fn test_manifest_http_failure_is_tagged_manifest() {
        let server = MockServer::start().await;
        mount_token(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/hls/mychan.m3u8"))
            .respond_with(ResponseTemplate::new(403).set_body_string("[]"))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .resolve_variants("mychan")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TwitchError::DegradedStatus {
                action: ApiAction::Manifest,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_offline_manifest_is_unavailable_not_decode_error() {
        let server = MockServer::start().await;
        mount_token(&server, 1).await;
        Mock::given(method("GET"))
            .and(path("/hls/mychan.m3u8"))
            .respond_with(ResponseTemplate::new(200).set_body_string(MEDIA))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .resolve_variants("mychan")
            .await
            .unwrap_err();
        assert!(matches!(err, TwitchError::StreamUnavailable));
    }
}
