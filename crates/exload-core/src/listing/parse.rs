//! Tree queries over a parsed listing page.
//!
//! A listing page carries one `<table class="list">`. Each downloadable file
//! is marked by an element with class `small` (usually a span, sometimes the
//! anchor itself) inside a table cell; the cell's first anchor holds the
//! display title and the file href. The table's first row links to the
//! page's own `filelist/` manifest.

use std::sync::OnceLock;

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};

use super::ListingError;

static TABLE_SELECTOR: OnceLock<Selector> = OnceLock::new();
static SMALL_SELECTOR: OnceLock<Selector> = OnceLock::new();
static ROW_SELECTOR: OnceLock<Selector> = OnceLock::new();
static ANCHOR_SELECTOR: OnceLock<Selector> = OnceLock::new();

fn selector(cell: &'static OnceLock<Selector>, css: &str) -> &'static Selector {
    cell.get_or_init(|| Selector::parse(css).expect("selector is valid"))
}

/// First `<table class="list">` of the document.
pub fn listing_table(doc: &Html) -> Result<ElementRef<'_>, ListingError> {
    doc.select(selector(&TABLE_SELECTOR, "table.list"))
        .next()
        .ok_or(ListingError::TableMissing)
}

/// Ids of every class-`small` file annotation under the listing table, in
/// document order, collected in a single pass.
pub fn annotation_ids(doc: &Html) -> Result<Vec<NodeId>, ListingError> {
    let table = listing_table(doc)?;
    Ok(table
        .select(selector(&SMALL_SELECTOR, ".small"))
        .map(|annotation| annotation.id())
        .collect())
}

/// Re-wraps a collected annotation id as an element of `doc`.
pub fn annotation_at(doc: &Html, id: NodeId) -> ElementRef<'_> {
    doc.tree
        .get(id)
        .and_then(ElementRef::wrap)
        .expect("annotation id is in the document")
}

/// Resolves one file annotation to its `(title, href)` pair.
///
/// Walks up to the containing `<td>` and reads the `title` and `href`
/// attributes of the first anchor inside it. Any absent node or attribute
/// is a structure error.
pub fn entry_for_annotation(annotation: ElementRef<'_>) -> Result<(String, String), ListingError> {
    let cell = containing_cell(annotation).ok_or(ListingError::CellMissing)?;
    let anchor = first_anchor(cell).ok_or(ListingError::AnchorMissing)?;
    let title = attribute(anchor, "title")?;
    let href = attribute(anchor, "href")?;
    Ok((title, href))
}

/// Href of the listing's own manifest: the first anchor of the table's
/// first row.
pub fn manifest_link(doc: &Html) -> Result<String, ListingError> {
    let table = listing_table(doc)?;
    let row = table
        .select(selector(&ROW_SELECTOR, "tr"))
        .next()
        .ok_or(ListingError::RowMissing)?;
    let anchor = first_anchor(row).ok_or(ListingError::AnchorMissing)?;
    attribute(anchor, "href")
}

fn containing_cell(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == "td")
}

fn first_anchor(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.select(selector(&ANCHOR_SELECTOR, "a")).next()
}

fn attribute(anchor: ElementRef<'_>, name: &'static str) -> Result<String, ListingError> {
    anchor
        .value()
        .attr(name)
        .map(str::to_string)
        .ok_or(ListingError::AttributeMissing(name))
}
