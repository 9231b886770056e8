//! Source references and manifest/listing classification.

use std::path::{Path, PathBuf};

use url::Url;

/// Path prefix that marks a URL as a plain-text manifest rather than an
/// HTML listing page.
const FILELIST_PREFIX: &str = "filelist/";

/// Where the set of downloadable files is described.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRef {
    /// URL of an HTML listing page or of a `filelist/` manifest.
    Remote(String),
    /// Local file containing direct URLs, one per line.
    Manifest(PathBuf),
}

impl SourceRef {
    /// Maps a CLI `src` argument: an existing regular file is a local
    /// manifest, anything else is treated as remote.
    pub fn from_cli_arg(src: &str) -> SourceRef {
        let path = Path::new(src);
        if path.is_file() {
            SourceRef::Manifest(path.to_path_buf())
        } else {
            SourceRef::Remote(src.to_string())
        }
    }
}

/// True when `src` points at a plain-text manifest: its URL path, stripped
/// of leading and trailing slashes, starts with `filelist/`.
///
/// Strings that do not parse as URLs (bare relative paths in particular)
/// classify as listing pages.
pub fn is_filelist_url(src: &str) -> bool {
    match Url::parse(src) {
        Ok(parsed) => parsed.path().trim_matches('/').starts_with(FILELIST_PREFIX),
        Err(_) => false,
    }
}
