//! Fetch orchestration: resolve a source and download every file it names
//! into a destination directory, one at a time.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use url::Url;

use crate::fetch::{self, FetchOptions};
use crate::resolve;
use crate::source::SourceRef;

/// Joins an entry URL against the site origin. Absolute URLs pass through
/// unchanged; relative hrefs resolve against `origin`.
pub fn resolve_against(origin: &Url, entry_url: &str) -> Result<Url> {
    origin
        .join(entry_url)
        .with_context(|| format!("cannot resolve {} against {}", entry_url, origin))
}

/// Downloads every file named by `source` into `dst`.
///
/// Creates `dst` (one level only) when absent. Entries download strictly in
/// stream order, each overwriting any same-named file; the first failure
/// aborts the run and files completed before it stay in place.
pub fn load_files(
    source: &SourceRef,
    dst: &Path,
    extension: Option<&str>,
    origin: &Url,
    options: FetchOptions,
) -> Result<()> {
    if !dst.exists() {
        println!("creating: {}", dst.display());
        fs::create_dir(dst)
            .with_context(|| format!("failed to create destination {}", dst.display()))?;
    }

    let mut count = 0u64;
    for entry in resolve::entries(source, extension, options) {
        let entry = entry?;
        let file_url = resolve_against(origin, &entry.url)?;
        let file_path = dst.join(&entry.name);

        println!("downloading: {} -> {}", file_url, file_path.display());
        tracing::info!(url = %file_url, path = %file_path.display(), "downloading");

        fetch::download_to_path(file_url.as_str(), &file_path, options)
            .with_context(|| format!("failed to download {}", file_url))?;
        count += 1;
    }

    tracing::info!("downloaded {} file(s)", count);
    Ok(())
}
