use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use anyhow::Context as _;
use regex::Regex;
use reqwest::header::USER_AGENT;

use crate::formats::{ArticleRecord, BadgeRecord};

pub const CREDLY_IMAGE_BASE: &str = "https://images.credly.com/";

/// Single target format for stored images; the extension only deviates when
/// the post-write sniff finds the bytes are something else.
pub const TARGET_EXT: &str = "webp";

static SIZE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-\d+x\d+").expect("size suffix regex"));

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MediaStats {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl MediaStats {
    pub fn print_summary(&self, what: &str, total: usize) {
        println!();
        println!("Download summary:");
        println!("  downloaded: {}", self.downloaded);
        println!("  skipped: {}", self.skipped);
        println!("  failed: {}", self.failed);
        println!("  total {what}: {total}");
    }
}

/// Rewrite a provider image URL to its pre-resized variant by inserting a
/// `size/<N>x<N>/` path segment after the base. URLs outside the base are
/// returned unchanged.
pub fn resized_image_url(url: &str, base: &str, size: u32) -> String {
    match url.strip_prefix(base) {
        Some(rest) => format!("{base}size/{size}x{size}/{rest}"),
        None => url.to_owned(),
    }
}

/// Derive the local badge filename from the remote image URL. Generic final
/// segments (`image.png`, `blob`, anything shorter than 5 characters) fall
/// back to the provider UUID one segment up; otherwise the final segment
/// loses its extension and any `-<digits>x<digits>` size suffix.
pub fn badge_filename(image_url: &str) -> String {
    let segments: Vec<&str> = image_url
        .trim_end_matches('/')
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    let last = segments.last().copied().unwrap_or_default();
    let parent = segments
        .len()
        .checked_sub(2)
        .and_then(|index| segments.get(index))
        .copied()
        .unwrap_or(last);

    let base = if is_generic_segment(last) {
        parent.to_owned()
    } else {
        let stem = last.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(last);
        SIZE_SUFFIX.replace(stem, "").into_owned()
    };

    format!("{base}.{TARGET_EXT}")
}

fn is_generic_segment(segment: &str) -> bool {
    segment == "image.png" || segment == "blob" || segment.len() < 5
}

/// Derive the local article filename from the guid's trailing path segment,
/// independent of the image URL. One image per article, whatever the CDN
/// path looks like.
pub fn article_filename(guid: &str) -> String {
    let id = guid
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    format!("{id}.{TARGET_EXT}")
}

/// Map an on-disk images directory to the web path recorded in the fixture.
/// The website serves everything under public/ from the web root.
pub fn web_image_path(images_dir: &Path, filename: &str) -> String {
    let segments: Vec<String> = images_dir
        .components()
        .filter_map(|component| match component {
            std::path::Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    let start = segments
        .iter()
        .rposition(|segment| segment == "public")
        .map(|index| index + 1)
        .unwrap_or(0);

    let mut path = String::new();
    for segment in &segments[start..] {
        path.push('/');
        path.push_str(segment);
    }
    path.push('/');
    path.push_str(filename);
    path
}

pub async fn transform_badge_images(
    client: &reqwest::Client,
    badges: Vec<BadgeRecord>,
    images_dir: &Path,
    size: u32,
    delay: Duration,
) -> (Vec<BadgeRecord>, MediaStats) {
    let mut stats = MediaStats::default();
    let mut throttle = false;
    let mut out = Vec::with_capacity(badges.len());

    for mut badge in badges {
        let filename = badge_filename(&badge.image_url);
        let dest = images_dir.join(&filename);

        if dest.exists() {
            println!("Skip: {filename} (already exists)");
            badge.image_url = web_image_path(images_dir, &filename);
            stats.skipped += 1;
            out.push(badge);
            continue;
        }

        if throttle {
            tokio::time::sleep(delay).await;
        }
        throttle = true;

        println!("Downloading: {filename}...");
        let source = resized_image_url(&badge.image_url, CREDLY_IMAGE_BASE, size);
        match fetch_and_store(client, &source, &dest, None).await {
            Ok(stored) => {
                badge.image_url = web_image_path(images_dir, &stored);
                stats.downloaded += 1;
                println!("Saved: {stored}");
            }
            Err(err) => {
                // The record keeps its remote URL; the website falls back to it.
                println!("Failed: {filename} - {err:#}");
                stats.failed += 1;
            }
        }
        out.push(badge);
    }

    (out, stats)
}

pub async fn transform_article_images(
    client: &reqwest::Client,
    articles: Vec<ArticleRecord>,
    images_dir: &Path,
    max_width: u32,
    delay: Duration,
) -> (Vec<ArticleRecord>, MediaStats) {
    let mut stats = MediaStats::default();
    let mut throttle = false;
    let mut out = Vec::with_capacity(articles.len());

    for mut article in articles {
        if article.image.is_empty() {
            println!("Skip: no image found for {:?}", article.title);
            stats.failed += 1;
            out.push(article);
            continue;
        }

        let filename = article_filename(&article.guid);
        let dest = images_dir.join(&filename);

        if dest.exists() {
            println!("Skip: {filename} (already exists)");
            article.image = web_image_path(images_dir, &filename);
            stats.skipped += 1;
            out.push(article);
            continue;
        }

        if throttle {
            tokio::time::sleep(delay).await;
        }
        throttle = true;

        println!("Downloading: {filename}...");
        let source = article.image.clone();
        match fetch_and_store(client, &source, &dest, Some(max_width)).await {
            Ok(stored) => {
                article.image = web_image_path(images_dir, &stored);
                stats.downloaded += 1;
                println!("Saved: {stored}");
            }
            Err(err) => {
                println!("Failed: {filename} - {err:#}");
                stats.failed += 1;
            }
        }
        out.push(article);
    }

    (out, stats)
}

async fn fetch_and_store(
    client: &reqwest::Client,
    url: &str,
    dest: &Path,
    max_width: Option<u32>,
) -> anyhow::Result<String> {
    let bytes = download_bytes(client, url).await?;

    if let Err(err) = store_media(&bytes, dest, max_width) {
        if dest.exists() {
            let _ = std::fs::remove_file(dest);
        }
        return Err(err);
    }

    let stored = correct_media_extension(dest)?;
    stored
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_owned)
        .ok_or_else(|| anyhow::anyhow!("stored file has no name: {}", stored.display()))
}

async fn download_bytes(client: &reqwest::Client, url: &str) -> anyhow::Result<Vec<u8>> {
    let response = client
        .get(url)
        .header(USER_AGENT, crate::fetch::AGENT)
        .send()
        .await
        .with_context(|| format!("GET {url}"))?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("download failed ({status})");
    }

    let bytes = response.bytes().await.context("read download body")?;
    if bytes.is_empty() {
        anyhow::bail!("downloaded file is empty");
    }

    Ok(bytes.to_vec())
}

/// Ordered storage strategies; first success wins.
#[derive(Debug, Clone, Copy)]
enum StoreStrategy {
    /// Decode, optionally scale down, re-encode to the target format.
    Reencode,
    /// Use the source bytes unmodified.
    CopyOriginal,
}

const STORE_STRATEGIES: &[StoreStrategy] = &[StoreStrategy::Reencode, StoreStrategy::CopyOriginal];

fn store_media(bytes: &[u8], dest: &Path, max_width: Option<u32>) -> anyhow::Result<()> {
    let mut last_failure: Option<anyhow::Error> = None;

    for strategy in STORE_STRATEGIES {
        let result = match strategy {
            StoreStrategy::Reencode => reencode(bytes, dest, max_width),
            StoreStrategy::CopyOriginal => {
                std::fs::write(dest, bytes).with_context(|| format!("write {}", dest.display()))
            }
        };

        match result {
            Ok(()) => return Ok(()),
            Err(err) => {
                tracing::debug!(?strategy, ?err, "store strategy failed");
                last_failure = Some(err);
            }
        }
    }

    Err(last_failure.unwrap_or_else(|| anyhow::anyhow!("no store strategy available")))
}

fn reencode(bytes: &[u8], dest: &Path, max_width: Option<u32>) -> anyhow::Result<()> {
    let mut img = image::load_from_memory(bytes).context("decode image")?;

    if let Some(max_width) = max_width
        && img.width() > max_width
    {
        let height = ((u64::from(img.height()) * u64::from(max_width)) / u64::from(img.width()))
            .max(1) as u32;
        img = img.resize(max_width, height, image::imageops::FilterType::Lanczos3);
    }

    img.save_with_format(dest, image::ImageFormat::WebP)
        .with_context(|| format!("encode {}", dest.display()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SniffedFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl SniffedFormat {
    fn extension(self) -> &'static str {
        match self {
            SniffedFormat::Jpeg => "jpeg",
            SniffedFormat::Png => "png",
            SniffedFormat::Gif => "gif",
            SniffedFormat::Webp => "webp",
        }
    }
}

fn sniff_format(head: &[u8]) -> Option<SniffedFormat> {
    if head.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some(SniffedFormat::Jpeg);
    }
    if head.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        return Some(SniffedFormat::Png);
    }
    if head.starts_with(&[0x47, 0x49, 0x46, 0x38]) {
        return Some(SniffedFormat::Gif);
    }
    if head.starts_with(&[0x52, 0x49, 0x46, 0x46]) {
        return Some(SniffedFormat::Webp);
    }
    None
}

/// Rename the file when its leading bytes disagree with its extension.
/// An inconclusive sniff is assumed to be JPEG, but does not displace an
/// existing jpg/jpeg extension.
fn correct_media_extension(path: &Path) -> anyhow::Result<PathBuf> {
    let mut head = [0u8; 8];
    let mut file =
        std::fs::File::open(path).with_context(|| format!("open {}", path.display()))?;
    let read = file
        .read(&mut head)
        .with_context(|| format!("read {}", path.display()))?;

    let current = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let desired = match sniff_format(&head[..read]) {
        Some(format) => format.extension(),
        None if current == "jpg" || current == "jpeg" => return Ok(path.to_path_buf()),
        None => "jpeg",
    };

    if desired == current {
        return Ok(path.to_path_buf());
    }

    let renamed = path.with_extension(desired);
    std::fs::rename(path, &renamed)
        .with_context(|| format!("rename {} -> {}", path.display(), renamed.display()))?;
    Ok(renamed)
}
