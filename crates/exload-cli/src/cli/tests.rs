//! CLI parse tests.

use std::path::Path;

use clap::Parser;

use super::Cli;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_src_and_dst() {
    let cli = parse(&["exload", "http://www.ex.ua/view/81631", "downloads"]);
    assert_eq!(cli.src, "http://www.ex.ua/view/81631");
    assert_eq!(cli.dst, Path::new("downloads"));
    assert!(cli.ext.is_none());
}

#[test]
fn cli_parse_ext_flag() {
    let cli = parse(&[
        "exload",
        "http://www.ex.ua/filelist/81631",
        "downloads",
        "--ext",
        "mkv",
    ]);
    assert_eq!(cli.ext.as_deref(), Some("mkv"));
}

#[test]
fn cli_parse_local_manifest_path() {
    let cli = parse(&["exload", "lists/filelist.txt", "out"]);
    assert_eq!(cli.src, "lists/filelist.txt");
    assert_eq!(cli.dst, Path::new("out"));
}

#[test]
fn cli_missing_dst_is_an_error() {
    assert!(Cli::try_parse_from(["exload", "http://www.ex.ua/view/81631"]).is_err());
}

#[test]
fn cli_unknown_flag_is_an_error() {
    assert!(Cli::try_parse_from(["exload", "src", "dst", "--jobs", "4"]).is_err());
}
