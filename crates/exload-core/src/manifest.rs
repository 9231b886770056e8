//! Plain-text manifest reading.
//!
//! A manifest is a newline-delimited list of direct file URLs, fetched from
//! a `filelist/` URL or read from a local file. Lines are yielded verbatim
//! in file order; empty lines are skipped.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::fetch::{self, FetchOptions};

/// Where a manifest body comes from.
#[derive(Debug, Clone)]
pub enum ManifestSource {
    /// Manifest served over HTTP.
    Remote { url: String, options: FetchOptions },
    /// Manifest on the local filesystem.
    Local(PathBuf),
}

/// Single-pass iterator over the non-empty lines of a manifest.
///
/// The body is fetched (or read) once, on the first pull; a failure there
/// yields a single `Err` and ends the stream.
pub struct ManifestLines {
    source: Option<ManifestSource>,
    lines: std::vec::IntoIter<String>,
    failed: bool,
}

impl ManifestLines {
    pub fn new(source: ManifestSource) -> ManifestLines {
        ManifestLines {
            source: Some(source),
            lines: Vec::new().into_iter(),
            failed: false,
        }
    }
}

impl Iterator for ManifestLines {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Result<String>> {
        if self.failed {
            return None;
        }
        if let Some(source) = self.source.take() {
            match load_body(&source) {
                Ok(body) => {
                    let lines: Vec<String> = body
                        .split('\n')
                        .filter(|line| !line.is_empty())
                        .map(str::to_string)
                        .collect();
                    self.lines = lines.into_iter();
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
        self.lines.next().map(Ok)
    }
}

fn load_body(source: &ManifestSource) -> Result<String> {
    match source {
        ManifestSource::Remote { url, options } => fetch::fetch_text(url, *options)
            .with_context(|| format!("failed to fetch manifest {}", url)),
        ManifestSource::Local(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest {}", path.display())),
    }
}
