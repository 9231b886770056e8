//! Source resolution: one lazy stream of file entries for any source kind.

use anyhow::Result;

use crate::fetch::FetchOptions;
use crate::filename;
use crate::listing::ListingEntries;
use crate::manifest::{ManifestLines, ManifestSource};
use crate::source::{self, SourceRef};

/// One downloadable item: local file name plus source URL. The URL may be
/// absolute or a relative href still to be joined against the site origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub url: String,
}

/// Lazy stream of the file entries named by `source`.
///
/// Classification is decided here, up front; all network and file I/O is
/// deferred to the first pull. Manifest lines are named by the filename
/// deriver with `extension` applied; listing entries keep their page titles
/// verbatim, and the extension does not apply to them.
pub fn entries(source: &SourceRef, extension: Option<&str>, options: FetchOptions) -> FileEntries {
    match source {
        SourceRef::Manifest(path) => FileEntries::Manifest {
            lines: ManifestLines::new(ManifestSource::Local(path.clone())),
            extension: extension.map(str::to_string),
        },
        SourceRef::Remote(url) if source::is_filelist_url(url) => FileEntries::Manifest {
            lines: ManifestLines::new(ManifestSource::Remote {
                url: url.clone(),
                options,
            }),
            extension: extension.map(str::to_string),
        },
        SourceRef::Remote(url) => FileEntries::Listing(ListingEntries::new(url.clone(), options)),
    }
}

/// Iterator behind [`entries`]; the variant records which naming rule the
/// stream uses.
pub enum FileEntries {
    Manifest {
        lines: ManifestLines,
        extension: Option<String>,
    },
    Listing(ListingEntries),
}

impl Iterator for FileEntries {
    type Item = Result<FileEntry>;

    fn next(&mut self) -> Option<Result<FileEntry>> {
        match self {
            FileEntries::Manifest { lines, extension } => {
                let line = lines.next()?;
                Some(line.map(|url| FileEntry {
                    name: filename::filename_from_url(&url, extension.as_deref()),
                    url,
                }))
            }
            FileEntries::Listing(listing) => {
                let entry = listing.next()?;
                Some(entry.map(|(title, href)| FileEntry {
                    name: title,
                    url: href,
                }))
            }
        }
    }
}
