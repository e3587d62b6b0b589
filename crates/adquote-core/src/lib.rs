//! Core domain types and configuration for adquote.
//!
//! Holds the channel/video records shared by every other crate, the pure
//! video-sample aggregation that turns raw per-video statistics into the
//! averages the pricing engine consumes, and the env-driven application
//! config.

pub mod aggregate;
pub mod app_config;
pub mod config;
pub mod format;
pub mod types;

pub use aggregate::{aggregate_videos, channel_age_days, AggregateError, VideoAggregate};
pub use app_config::{AppConfig, ConfigError};
pub use config::{load_app_config, load_app_config_from_env};
pub use types::{ChannelProfile, ChannelSnapshot, ChannelStats, VideoStats};
