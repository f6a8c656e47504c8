use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use url::Url;

use crate::cli::ArticlesArgs;

pub async fn run(args: ArticlesArgs) -> anyhow::Result<()> {
    let images_dir = PathBuf::from(&args.images_dir);
    std::fs::create_dir_all(&images_dir)
        .with_context(|| format!("create images dir: {}", images_dir.display()))?;

    let url = Url::parse(&args.url).context("parse --url")?;
    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!("--url must be http/https: {url}");
    }

    let client = crate::fetch::build_client()?;

    tracing::info!("articles: fetch");
    let raw = crate::fetch::fetch_articles(&client, &url)
        .await
        .context("fetch articles")?;
    println!("Fetched {} articles", raw.items.len());

    tracing::info!("articles: filter");
    let records = crate::filter::filter_articles(&raw);

    tracing::info!("articles: download images");
    let total = records.len();
    let (records, stats) = crate::media::transform_article_images(
        &client,
        records,
        &images_dir,
        args.max_width,
        Duration::from_millis(args.delay_ms),
    )
    .await;

    tracing::info!("articles: persist");
    crate::fixture::write_fixture(Path::new(&args.out), &records)
        .context("write article fixture")?;
    println!("Updated {}", args.out);

    stats.print_summary("articles", total);
    Ok(())
}
