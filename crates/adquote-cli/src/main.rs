use clap::Parser;
use tracing_subscriber::EnvFilter;

mod render;
mod run;

#[derive(Debug, Parser)]
#[command(name = "adquote")]
#[command(about = "YouTube influencer ad-fee valuation")]
struct Cli {
    /// Channel URL (`youtube.com/@handle`, `/channel/<id>`, `/c/<name>`,
    /// `/user/<name>`)
    channel: String,

    /// Emit the full report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Skip the brand-safety assessment even when a Gemini key is configured
    #[arg(long)]
    no_assessment: bool,

    /// How many recent uploads to sample (defaults to ADQUOTE_MAX_VIDEOS)
    #[arg(long)]
    max_videos: Option<usize>,

    /// CPM rate in currency units per 1,000 views (defaults to ADQUOTE_CPM_RATE)
    #[arg(long)]
    cpm: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = adquote_core::load_app_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .with_writer(std::io::stderr)
        .init();

    run::run(&cli, &config).await
}
