use clap::Parser;
use std::path::{Path, PathBuf};

use protoget_cli::args::{CliArgs, OutputFormat};

#[test]
fn parses_defaults() {
    let args = CliArgs::try_parse_from(["protoget"]).expect("default args should parse");

    assert!(args.paths.is_empty());
    assert!(args.project.is_none());
    assert_eq!(args.format, OutputFormat::Text);
    assert_eq!(args.pretty, None);
    assert_eq!(args.marker, None);
    assert!(!args.list_files);
}

#[test]
fn parses_common_flags() {
    let args = CliArgs::try_parse_from([
        "protoget",
        "--project",
        "configs/protoget.json",
        "--format",
        "json",
        "--pretty",
        "false",
        "--marker",
        "Reset",
        "--list-files",
        "gen",
        "cmd/server",
    ])
    .expect("flagged args should parse");

    assert_eq!(
        args.project.as_deref(),
        Some(Path::new("configs/protoget.json"))
    );
    assert_eq!(args.format, OutputFormat::Json);
    assert_eq!(args.pretty, Some(false));
    assert_eq!(args.marker.as_deref(), Some("Reset"));
    assert!(args.list_files);
    assert_eq!(
        args.paths,
        vec![PathBuf::from("gen"), PathBuf::from("cmd/server")]
    );
}

#[test]
fn rejects_unknown_format() {
    assert!(CliArgs::try_parse_from(["protoget", "--format", "xml"]).is_err());
}
