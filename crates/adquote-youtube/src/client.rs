//! HTTP client for the YouTube Data API v3.
//!
//! Wraps `reqwest` with YouTube-specific error handling, API key
//! management, and typed response deserialization. Error payloads
//! (`{"error": {...}}`) are surfaced as [`YoutubeError::ApiError`].

use std::time::Duration;

use reqwest::{Client, Url};

use adquote_core::{ChannelProfile, ChannelSnapshot, ChannelStats, VideoStats};

use crate::error::YoutubeError;
use crate::types::{
    parse_count, ChannelItem, ChannelListResponse, PlaylistItemsResponse, VideoListResponse,
};
use crate::url::ChannelRef;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Client for the YouTube Data API v3.
///
/// Manages the HTTP client, API key, and base URL. Use [`YoutubeClient::new`]
/// for production or [`YoutubeClient::with_base_url`] to point at a mock
/// server in tests.
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl YoutubeClient {
    /// Creates a new client pointed at the production YouTube API.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, YoutubeError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`YoutubeError::ApiError`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("adquote/0.1 (influencer-valuation)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so
        // that resource segments append rather than replace the last
        // path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| YoutubeError::ApiError(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches the channel resource for a resolved identifier.
    ///
    /// Calls the `channels` endpoint with `part=snippet,statistics,contentDetails`,
    /// keyed by `id` for canonical ids or `forHandle` for handles.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::ChannelNotFound`] if the lookup matches nothing.
    /// - [`YoutubeError::ApiError`] if the API returns an error payload.
    /// - [`YoutubeError::Http`] on network failure or non-2xx HTTP status.
    /// - [`YoutubeError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn get_channel(&self, channel: &ChannelRef) -> Result<ChannelItem, YoutubeError> {
        let (param, value) = match channel {
            ChannelRef::Id(id) => ("id", id.as_str()),
            ChannelRef::Handle(handle) => ("forHandle", handle.as_str()),
        };
        let url = self.build_url(
            "channels",
            &[("part", "snippet,statistics,contentDetails"), (param, value)],
        );
        let body = self.request_json(&url).await?;
        Self::check_api_error(&body)?;

        let response: ChannelListResponse =
            serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
                context: format!("channels({param}={value})"),
                source: e,
            })?;

        response
            .items
            .into_iter()
            .next()
            .ok_or_else(|| YoutubeError::ChannelNotFound(value.to_string()))
    }

    /// Fetches up to `max_results` most recent video ids from an uploads
    /// playlist.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::ApiError`] if the API returns an error payload.
    /// - [`YoutubeError::Http`] on network failure or non-2xx HTTP status.
    /// - [`YoutubeError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn get_recent_video_ids(
        &self,
        playlist_id: &str,
        max_results: usize,
    ) -> Result<Vec<String>, YoutubeError> {
        let max = max_results.to_string();
        let url = self.build_url(
            "playlistItems",
            &[
                ("part", "contentDetails"),
                ("playlistId", playlist_id),
                ("maxResults", &max),
            ],
        );
        let body = self.request_json(&url).await?;
        Self::check_api_error(&body)?;

        let response: PlaylistItemsResponse =
            serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
                context: format!("playlistItems(playlistId={playlist_id})"),
                source: e,
            })?;

        Ok(response
            .items
            .into_iter()
            .map(|item| item.content_details.video_id)
            .collect())
    }

    /// Fetches statistics for a batch of video ids.
    ///
    /// Videos the API no longer returns (deleted/private) are simply
    /// absent from the result, not errors.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::ApiError`] if the API returns an error payload.
    /// - [`YoutubeError::Http`] on network failure or non-2xx HTTP status.
    /// - [`YoutubeError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn get_videos(&self, video_ids: &[String]) -> Result<Vec<VideoStats>, YoutubeError> {
        let ids = video_ids.join(",");
        let url = self.build_url("videos", &[("part", "snippet,statistics"), ("id", &ids)]);
        let body = self.request_json(&url).await?;
        Self::check_api_error(&body)?;

        let response: VideoListResponse =
            serde_json::from_value(body).map_err(|e| YoutubeError::Deserialize {
                context: format!("videos(id={ids})"),
                source: e,
            })?;

        Ok(response
            .items
            .into_iter()
            .map(|item| VideoStats {
                title: item.snippet.title,
                views: parse_count(item.statistics.view_count.as_deref()),
                likes: parse_count(item.statistics.like_count.as_deref()),
                comments: parse_count(item.statistics.comment_count.as_deref()),
                published_at: item.snippet.published_at,
            })
            .collect())
    }

    /// Fetches everything one valuation needs: channel record, uploads
    /// playlist, and the recent-video batch.
    ///
    /// The three calls are naturally sequential: each depends on the
    /// previous result.
    ///
    /// # Errors
    ///
    /// Propagates the per-call errors above, plus
    /// [`YoutubeError::NoRecentVideos`] when the uploads playlist yields
    /// no retrievable videos.
    pub async fn fetch_channel_snapshot(
        &self,
        channel: &ChannelRef,
        max_videos: usize,
    ) -> Result<ChannelSnapshot, YoutubeError> {
        let item = self.get_channel(channel).await?;

        let profile = ChannelProfile {
            id: item.id.clone(),
            title: item.snippet.title,
            description: item.snippet.description,
            published_at: item.snippet.published_at,
            uploads_playlist_id: item.content_details.related_playlists.uploads,
        };
        let stats = ChannelStats {
            subscriber_count: parse_count(item.statistics.subscriber_count.as_deref()),
            video_count: parse_count(item.statistics.video_count.as_deref()),
            total_view_count: parse_count(item.statistics.view_count.as_deref()),
        };

        let video_ids = self
            .get_recent_video_ids(&profile.uploads_playlist_id, max_videos)
            .await?;
        if video_ids.is_empty() {
            return Err(YoutubeError::NoRecentVideos(item.id));
        }

        let videos = self.get_videos(&video_ids).await?;
        if videos.is_empty() {
            return Err(YoutubeError::NoRecentVideos(item.id));
        }

        tracing::debug!(
            channel = %profile.id,
            subscribers = stats.subscriber_count,
            videos = videos.len(),
            "fetched channel snapshot"
        );

        Ok(ChannelSnapshot {
            profile,
            stats,
            videos,
        })
    }

    /// Builds the full request URL for a resource with percent-encoded
    /// query parameters, the API key appended last.
    fn build_url(&self, resource: &str, extra: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        {
            // The base URL is validated in the constructor, so it always
            // accepts path segments.
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.push(resource);
            }
        }
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        url
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the
    /// response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] on network failure or a non-2xx status.
    /// Returns [`YoutubeError::Deserialize`] if the body is not valid JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, YoutubeError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| YoutubeError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Checks for the YouTube error envelope and surfaces its message.
    fn check_api_error(body: &serde_json::Value) -> Result<(), YoutubeError> {
        if let Some(error) = body.get("error") {
            let msg = error
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(YoutubeError::ApiError(msg));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_client(base_url: &str) -> YoutubeClient {
        YoutubeClient::with_base_url("test-key", 30, base_url)
            .expect("client construction should not fail")
    }

    fn channel_body() -> serde_json::Value {
        json!({
            "items": [{
                "id": "UCtest",
                "snippet": {
                    "title": "Test Channel",
                    "description": "about",
                    "publishedAt": "2019-03-01T00:00:00Z"
                },
                "statistics": {
                    "subscriberCount": "50000",
                    "videoCount": "100",
                    "viewCount": "9000000"
                },
                "contentDetails": {
                    "relatedPlaylists": { "uploads": "UUtest" }
                }
            }]
        })
    }

    #[test]
    fn build_url_appends_resource_and_key() {
        let client = test_client("https://www.googleapis.com/youtube/v3");
        let url = client.build_url("channels", &[("part", "snippet"), ("id", "UCx")]);
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/youtube/v3/channels?part=snippet&id=UCx&key=test-key"
        );
    }

    #[test]
    fn build_url_encodes_special_characters() {
        let client = test_client("https://www.googleapis.com/youtube/v3");
        let url = client.build_url("channels", &[("forHandle", "a b&c")]);
        assert!(
            url.as_str().contains("forHandle=a+b%26c"),
            "query param should be percent-encoded: {url}"
        );
    }

    #[tokio::test]
    async fn get_channel_by_id_parses_the_resource() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/channels"))
            .and(query_param("id", "UCtest"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(channel_body()))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let item = client
            .get_channel(&ChannelRef::Id("UCtest".to_string()))
            .await
            .unwrap();
        assert_eq!(item.id, "UCtest");
        assert_eq!(item.snippet.title, "Test Channel");
    }

    #[tokio::test]
    async fn get_channel_by_handle_uses_for_handle_param() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/channels"))
            .and(query_param("forHandle", "somehandle"))
            .respond_with(ResponseTemplate::new(200).set_body_json(channel_body()))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let item = client
            .get_channel(&ChannelRef::Handle("somehandle".to_string()))
            .await
            .unwrap();
        assert_eq!(item.id, "UCtest");
    }

    #[tokio::test]
    async fn empty_items_is_channel_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/channels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.get_channel(&ChannelRef::Id("UCmissing".to_string())).await;
        assert!(
            matches!(result, Err(YoutubeError::ChannelNotFound(ref id)) if id == "UCmissing"),
            "expected ChannelNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn api_error_payload_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/channels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": { "code": 403, "message": "quota exceeded" }
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.get_channel(&ChannelRef::Id("UCtest".to_string())).await;
        assert!(
            matches!(result, Err(YoutubeError::ApiError(ref m)) if m == "quota exceeded"),
            "expected ApiError, got {result:?}"
        );
    }

    #[tokio::test]
    async fn non_json_body_is_a_deserialize_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/channels"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>quota page</html>"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client.get_channel(&ChannelRef::Id("UCtest".to_string())).await;
        assert!(
            matches!(result, Err(YoutubeError::Deserialize { .. })),
            "expected Deserialize, got {result:?}"
        );
    }

    #[tokio::test]
    async fn snapshot_orchestrates_all_three_calls() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/channels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(channel_body()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/playlistItems"))
            .and(query_param("playlistId", "UUtest"))
            .and(query_param("maxResults", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    { "contentDetails": { "videoId": "vid1" } },
                    { "contentDetails": { "videoId": "vid2" } }
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .and(query_param("id", "vid1,vid2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {
                        "snippet": { "title": "First", "publishedAt": "2025-05-20T00:00:00Z" },
                        "statistics": { "viewCount": "8000", "likeCount": "400", "commentCount": "40" }
                    },
                    {
                        "snippet": { "title": "Second", "publishedAt": "2025-05-10T00:00:00Z" },
                        "statistics": { "viewCount": "6000" }
                    }
                ]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let snapshot = client
            .fetch_channel_snapshot(&ChannelRef::Id("UCtest".to_string()), 10)
            .await
            .unwrap();

        assert_eq!(snapshot.profile.title, "Test Channel");
        assert_eq!(snapshot.stats.subscriber_count, 50_000);
        assert_eq!(snapshot.videos.len(), 2);
        assert_eq!(snapshot.videos[0].views, 8_000);
        // Hidden like/comment counts default to zero.
        assert_eq!(snapshot.videos[1].likes, 0);
    }

    #[tokio::test]
    async fn empty_uploads_playlist_is_no_recent_videos() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/channels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(channel_body()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/playlistItems"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let result = client
            .fetch_channel_snapshot(&ChannelRef::Id("UCtest".to_string()), 10)
            .await;
        assert!(
            matches!(result, Err(YoutubeError::NoRecentVideos(_))),
            "expected NoRecentVideos, got {result:?}"
        );
    }
}
