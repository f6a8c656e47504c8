use std::path::Path;

use anyhow::Context as _;
use serde::Serialize;

/// Overwrite the fixture wholesale with the pretty-printed collection. The
/// fixture is never patched in place; a run either replaces it or leaves it
/// untouched.
pub fn write_fixture<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create fixture dir: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(value).context("serialize fixture")?;
    std::fs::write(path, format!("{json}\n"))
        .with_context(|| format!("write fixture: {}", path.display()))?;

    Ok(())
}
