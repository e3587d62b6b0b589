use thiserror::Error;

/// Errors returned by the YouTube statistics client.
#[derive(Debug, Error)]
pub enum YoutubeError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The YouTube API returned an error payload.
    #[error("YouTube API error: {0}")]
    ApiError(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The input was not a recognizable channel URL.
    #[error("not a recognizable YouTube channel URL: {0}")]
    InvalidChannelUrl(String),

    /// The channel lookup returned no items.
    #[error("channel not found: {0}")]
    ChannelNotFound(String),

    /// The uploads playlist had no retrievable videos. Distinct from a
    /// zero-statistics channel: absence of data, not a zero.
    #[error("no recent-video data for channel {0}")]
    NoRecentVideos(String),
}
