//! Blocking HTTP GET primitives built on libcurl.
//!
//! Two entry points: [`fetch_text`] pulls a small body (listing page or
//! manifest) into memory, [`download_to_path`] streams a file to disk.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

/// Transfer knobs shared by the body fetch and the file download.
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    /// TCP connect timeout for every transfer.
    pub connect_timeout: Duration,
    /// Whole-transfer timeout for listing and manifest fetches.
    pub fetch_timeout: Duration,
    /// Whole-transfer timeout for file downloads.
    pub download_timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        FetchOptions {
            connect_timeout: Duration::from_secs(15),
            fetch_timeout: Duration::from_secs(60),
            download_timeout: Duration::from_secs(3600),
        }
    }
}

/// Fetches `url` with a blocking GET and returns the body as UTF-8 text.
///
/// Follows redirects; HTTP statuses >= 400 and invalid UTF-8 are errors.
pub fn fetch_text(url: &str, options: FetchOptions) -> Result<String> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.fail_on_error(true)?;
    easy.connect_timeout(options.connect_timeout)?;
    easy.timeout(options.fetch_timeout)?;

    let mut body = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer
            .perform()
            .with_context(|| format!("GET {} failed", url))?;
    }

    let code = easy.response_code().context("no response code")?;
    if code < 200 || code >= 300 {
        anyhow::bail!("GET {} returned HTTP {}", url, code);
    }

    String::from_utf8(body).with_context(|| format!("body of {} is not valid UTF-8", url))
}

/// Downloads `url` to `dest` with a blocking GET, overwriting any existing
/// file. Returns the number of bytes written.
///
/// The destination is opened when the first body byte arrives, so a request
/// that fails before the body (DNS, connect, HTTP >= 400) leaves no file
/// behind. A 2xx response with an empty body still produces an empty file.
pub fn download_to_path(url: &str, dest: &Path, options: FetchOptions) -> Result<u64> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.fail_on_error(true)?;
    easy.connect_timeout(options.connect_timeout)?;
    easy.low_speed_limit(1024)?;
    easy.low_speed_time(Duration::from_secs(60))?;
    easy.timeout(options.download_timeout)?;

    let mut file: Option<File> = None;
    let mut written: u64 = 0;
    let mut write_error: Option<io::Error> = None;
    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            let result = match ensure_open(&mut file, dest) {
                Ok(f) => f.write_all(data),
                Err(e) => Err(e),
            };
            match result {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    tracing::warn!("write to {} failed: {}", dest.display(), e);
                    write_error = Some(e);
                    Ok(0) // abort transfer
                }
            }
        })?;
        transfer.perform()
    };

    if let Some(e) = write_error {
        return Err(anyhow::Error::new(e)
            .context(format!("failed writing {}", dest.display())));
    }
    performed.with_context(|| format!("GET {} failed", url))?;

    let code = easy.response_code().context("no response code")?;
    if code < 200 || code >= 300 {
        anyhow::bail!("GET {} returned HTTP {}", url, code);
    }

    if file.is_none() {
        File::create(dest).with_context(|| format!("failed to create {}", dest.display()))?;
    }
    Ok(written)
}

/// Opens (and truncates) the destination on the first body chunk.
fn ensure_open<'a>(file: &'a mut Option<File>, dest: &Path) -> io::Result<&'a mut File> {
    if file.is_none() {
        *file = Some(File::create(dest)?);
    }
    Ok(file.as_mut().expect("destination file is open"))
}
