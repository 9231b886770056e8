//! Filename derivation from URL paths.
//!
//! Files named by a manifest are stored under the last segment of their URL
//! path, with an optional forced extension appended.

use url::Url;

/// Derives a local file name from `url`.
///
/// Takes the URL's path component and returns the substring after the last
/// `/` (the whole path when it contains no `/`). Strings that do not parse
/// as URLs are treated as bare paths, minus any query or fragment suffix.
/// A non-empty `extension` is appended with a separating dot; an empty one
/// is ignored.
///
/// A path ending in `/` derives an empty base name, which is kept as-is, so
/// `http://host/a/` with extension `dat` yields `.dat`.
pub fn filename_from_url(url: &str, extension: Option<&str>) -> String {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => {
            let raw = url.split('#').next().unwrap_or("");
            raw.split('?').next().unwrap_or("").to_string()
        }
    };
    let base = match path.rfind('/') {
        Some(i) => &path[i + 1..],
        None => path.as_str(),
    };
    match extension {
        Some(ext) if !ext.is_empty() => format!("{}.{}", base, ext),
        _ => base.to_string(),
    }
}
