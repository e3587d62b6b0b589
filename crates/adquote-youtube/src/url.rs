//! Channel identifier extraction from user-supplied YouTube URLs.

use regex::Regex;

use crate::error::YoutubeError;

/// A resolved channel identifier, ready for the `channels` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelRef {
    /// Canonical channel id (`youtube.com/channel/UC…`), looked up by `id`.
    Id(String),
    /// Handle or legacy custom/user name, looked up by `forHandle`.
    Handle(String),
}

/// Extract a channel identifier from a YouTube URL.
///
/// Recognized forms: `/channel/<id>`, `/@<handle>`, `/c/<name>`,
/// `/user/<name>`. The two legacy forms resolve through the handle
/// lookup, which is their modern successor.
///
/// # Errors
///
/// Returns [`YoutubeError::InvalidChannelUrl`] when no pattern matches;
/// rejected here, before any network call is made.
pub fn extract_channel_ref(url: &str) -> Result<ChannelRef, YoutubeError> {
    let id_re = Regex::new(r"youtube\.com/channel/([a-zA-Z0-9_-]+)").expect("valid regex");
    if let Some(cap) = id_re.captures(url) {
        return Ok(ChannelRef::Id(cap[1].to_string()));
    }

    let handle_re =
        Regex::new(r"youtube\.com/(?:@|c/|user/)([a-zA-Z0-9._-]+)").expect("valid regex");
    if let Some(cap) = handle_re.captures(url) {
        return Ok(ChannelRef::Handle(cap[1].to_string()));
    }

    Err(YoutubeError::InvalidChannelUrl(url.to_string()))
}
