//! YouTube Data API v3 client for adquote.
//!
//! Resolves a channel URL to a typed identifier, then fetches the channel
//! record, its uploads playlist, and the recent-video batch, the three
//! sequential calls behind one valuation. A failure anywhere here is
//! fatal to the valuation: no price without real data.

pub mod client;
pub mod error;
pub mod types;
pub mod url;

pub use client::YoutubeClient;
pub use error::YoutubeError;
pub use url::{extract_channel_ref, ChannelRef};
