//! HTML listing page parsing.
//!
//! Listing pages are scraped with tree queries rather than regexes: the
//! queries in [`parse`] return typed absences, and any node missing from
//! the expected table structure surfaces as a [`ListingError`].

mod parse;

pub use parse::manifest_link;

use anyhow::{Context, Result};
use ego_tree::NodeId;
use scraper::Html;
use thiserror::Error;

use crate::fetch::{self, FetchOptions};

/// Structure errors raised when a listing page does not match the expected
/// table markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListingError {
    #[error("listing page has no <table class=\"list\">")]
    TableMissing,
    #[error("listing table has no rows")]
    RowMissing,
    #[error("file annotation is outside any table cell")]
    CellMissing,
    #[error("listing cell has no anchor")]
    AnchorMissing,
    #[error("listing anchor has no {0} attribute")]
    AttributeMissing(&'static str),
}

/// Fetches `url` and parses the body as an HTML document.
pub fn fetch_listing(url: &str, options: FetchOptions) -> Result<Html> {
    let body = fetch::fetch_text(url, options)
        .with_context(|| format!("failed to fetch listing page {}", url))?;
    Ok(Html::parse_document(&body))
}

/// Single-pass iterator over the `(title, href)` file entries of a listing
/// page.
///
/// The page is fetched and parsed on the first pull and the annotation
/// positions are collected in one pass over the table. Each pull then
/// resolves a single annotation to its entry, so rows before a malformed
/// one still come out; the first error ends the stream.
pub struct ListingEntries {
    source: Option<ListingSource>,
    cursor: Option<EntryCursor>,
    failed: bool,
}

enum ListingSource {
    Remote { url: String, options: FetchOptions },
    #[cfg(test)]
    Parsed(Html),
}

/// Parsed page plus the annotation ids not yet resolved, in document order.
struct EntryCursor {
    doc: Html,
    ids: std::vec::IntoIter<NodeId>,
}

impl ListingEntries {
    pub fn new(url: String, options: FetchOptions) -> ListingEntries {
        ListingEntries::from_source(ListingSource::Remote { url, options })
    }

    #[cfg(test)]
    fn from_doc(doc: Html) -> ListingEntries {
        ListingEntries::from_source(ListingSource::Parsed(doc))
    }

    fn from_source(source: ListingSource) -> ListingEntries {
        ListingEntries {
            source: Some(source),
            cursor: None,
            failed: false,
        }
    }
}

impl Iterator for ListingEntries {
    type Item = Result<(String, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if let Some(source) = self.source.take() {
            match open_cursor(source) {
                Ok(cursor) => self.cursor = Some(cursor),
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
        let cursor = self.cursor.as_mut()?;
        let id = cursor.ids.next()?;
        let annotation = parse::annotation_at(&cursor.doc, id);
        match parse::entry_for_annotation(annotation) {
            Ok(entry) => Some(Ok(entry)),
            Err(e) => {
                self.failed = true;
                Some(Err(e.into()))
            }
        }
    }
}

/// Loads the document and collects its annotation ids.
fn open_cursor(source: ListingSource) -> Result<EntryCursor> {
    let doc = match source {
        ListingSource::Remote { url, options } => fetch_listing(&url, options)?,
        #[cfg(test)]
        ListingSource::Parsed(doc) => doc,
    };
    let ids = parse::annotation_ids(&doc)?;
    Ok(EntryCursor {
        doc,
        ids: ids.into_iter(),
    })
}
