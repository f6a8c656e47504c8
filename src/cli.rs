use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Refresh the badge fixture and its local images.
    Badges(BadgesArgs),
    /// Refresh the article fixture and its local images.
    Articles(ArticlesArgs),
}

#[derive(Debug, Args)]
pub struct BadgesArgs {
    /// Badge API URL (skips `--request-file`).
    #[arg(long)]
    pub url: Option<String>,

    /// File holding the operator-pasted request (curl command or URL).
    #[arg(long, default_value = ".credly-curl")]
    pub request_file: String,

    /// Output path for the badge fixture.
    #[arg(long, default_value = "src/dataFetchers/credly.backup.json")]
    pub out: String,

    /// Directory for downloaded badge images.
    #[arg(long, default_value = "public/images/badges/credly")]
    pub images_dir: String,

    /// Provider-side pre-resize dimension (NxN).
    #[arg(long, default_value_t = 200)]
    pub size: u32,

    /// Delay between consecutive downloads (politeness).
    #[arg(long, default_value_t = 2000)]
    pub delay_ms: u64,
}

#[derive(Debug, Args)]
pub struct ArticlesArgs {
    /// Feed API URL.
    #[arg(long, default_value = crate::fetch::FEED_URL)]
    pub url: String,

    /// Output path for the article fixture.
    #[arg(long, default_value = "src/dataFetchers/mediumData.json")]
    pub out: String,

    /// Directory for downloaded article images.
    #[arg(long, default_value = "public/images/medium")]
    pub images_dir: String,

    /// Maximum image width; larger images are scaled down, never up.
    #[arg(long, default_value_t = 370)]
    pub max_width: u32,

    /// Delay between consecutive downloads (politeness).
    #[arg(long, default_value_t = 2000)]
    pub delay_ms: u64,
}
