//! CLI for the exload batch downloader.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use exload_core::config;
use exload_core::loader;
use exload_core::source::SourceRef;

/// Top-level CLI for the exload batch downloader.
#[derive(Debug, Parser)]
#[command(name = "exload")]
#[command(
    about = "Download every file referenced by a listing page or filelist manifest",
    long_about = None
)]
pub struct Cli {
    /// Listing page URL, filelist URL, or path to a local file with direct
    /// URLs (one per line).
    pub src: String,

    /// Directory to store the downloaded files in.
    pub dst: PathBuf,

    /// Extension appended to file names derived from a filelist.
    #[arg(long, value_name = "EXT")]
    pub ext: Option<String>,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let origin = cfg.origin_url()?;
        let source = SourceRef::from_cli_arg(&cli.src);
        tracing::debug!("resolved source: {:?}", source);

        loader::load_files(
            &source,
            &cli.dst,
            cli.ext.as_deref(),
            &origin,
            cfg.fetch_options(),
        )
    }
}

#[cfg(test)]
mod tests;
