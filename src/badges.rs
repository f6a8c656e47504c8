use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;

use crate::cli::BadgesArgs;
use crate::credential::{self, RequestSource};
use crate::formats::BadgeFixture;

pub async fn run(args: BadgesArgs) -> anyhow::Result<()> {
    let images_dir = PathBuf::from(&args.images_dir);
    std::fs::create_dir_all(&images_dir)
        .with_context(|| format!("create images dir: {}", images_dir.display()))?;

    let source = match args.url.as_deref() {
        Some(url) => credential::parse_request_source(url).context("parse --url")?,
        None => credential::load_request_file(Path::new(&args.request_file))
            .context("load request file")?,
    };
    if let RequestSource::CurlCommand(_) = &source {
        tracing::debug!(file = %args.request_file, "using operator-pasted request");
    }

    let client = crate::fetch::build_client()?;

    tracing::info!("badges: fetch");
    let raw = crate::fetch::fetch_badges(&client, &source)
        .await
        .context("fetch badges")?;
    println!("Fetched {} badges", raw.data.len());

    tracing::info!("badges: filter");
    let records = crate::filter::filter_badges(&raw);

    tracing::info!("badges: download images");
    let total = records.len();
    let (records, stats) = crate::media::transform_badge_images(
        &client,
        records,
        &images_dir,
        args.size,
        Duration::from_millis(args.delay_ms),
    )
    .await;

    tracing::info!("badges: persist");
    crate::fixture::write_fixture(Path::new(&args.out), &BadgeFixture { data: records })
        .context("write badge fixture")?;
    println!("Updated {}", args.out);

    stats.print_summary("badges", total);
    Ok(())
}
