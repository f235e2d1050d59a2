use clap::Parser;
use std::path::{Path, PathBuf};

use protoget_cli::args::CliArgs;
use protoget_cli::config::{
    DEFAULT_INCLUDE, load_config, parse_config, resolve_config, resolve_config_path,
};

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create test dir");
    }
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

fn args(extra: &[&str]) -> CliArgs {
    let mut argv = vec!["protoget"];
    argv.extend_from_slice(extra);
    CliArgs::try_parse_from(argv).expect("args")
}

#[test]
fn parses_jsonc_with_trailing_commas() {
    let input = r#"
    {
      // comment
      "include": ["gen/**/*.go",],
      "exclude": ["**/*_test.go"], /* inline */
      "checkerOptions": {
        "markerMethod": "Reset",
      },
    }
    "#;

    let config = parse_config(input).expect("should parse JSONC");
    assert_eq!(config.include, Some(vec!["gen/**/*.go".to_string()]));
    assert_eq!(config.exclude, Some(vec!["**/*_test.go".to_string()]));
    assert_eq!(
        config.checker_options.and_then(|o| o.marker_method).as_deref(),
        Some("Reset")
    );
}

#[test]
fn comment_markers_inside_strings_are_kept() {
    let config = parse_config(r#"{"include": ["a//b/*.go", "c/*,]"]}"#).expect("parse");
    assert_eq!(
        config.include,
        Some(vec!["a//b/*.go".to_string(), "c/*,]".to_string()])
    );
}

#[test]
fn trailing_comma_before_a_comment_is_dropped() {
    let input = "{\"include\": [\"a.go\", // last\n], \"exclude\": [\"b.go\", /* x */]}";
    let config = parse_config(input).expect("parse");
    assert_eq!(config.include, Some(vec!["a.go".to_string()]));
    assert_eq!(config.exclude, Some(vec!["b.go".to_string()]));
}

#[test]
fn escaped_quotes_do_not_end_strings() {
    let config = parse_config(r#"{"include": ["a\"//,]", "b"]}"#).expect("parse");
    assert_eq!(
        config.include,
        Some(vec!["a\"//,]".to_string(), "b".to_string()])
    );
}

#[test]
fn errors_point_at_the_original_line() {
    let input = "{\n  /* one\n     two */\n  // three\n  \"include\": [1,],\n}";
    let err = parse_config(input).expect_err("include must hold strings");
    let message = format!("{err:#}");
    assert!(message.contains("line 5"), "{message}");
}

#[test]
fn load_config_merges_extends() {
    let temp = tempfile::tempdir().expect("temp dir");

    write_file(
        temp.path(),
        "base.json",
        r#"{
          "include": ["src/**/*.go"],
          "exclude": ["src/legacy/**"],
          "checkerOptions": {"markerMethod": "Reset"}
        }"#,
    );
    let child = write_file(
        temp.path(),
        "protoget.json",
        r#"{
          "extends": "./base",
          "exclude": [],
        }"#,
    );

    let config = load_config(&child).expect("should load");
    assert_eq!(config.include, Some(vec!["src/**/*.go".to_string()]));
    assert_eq!(config.exclude, Some(vec![]));
    assert_eq!(
        config.checker_options.and_then(|o| o.marker_method).as_deref(),
        Some("Reset")
    );
    assert!(config.extends.is_none());
}

#[test]
fn load_config_detects_extends_cycles() {
    let temp = tempfile::tempdir().expect("temp dir");
    let a = write_file(temp.path(), "a.json", r#"{"extends": "./b.json"}"#);
    write_file(temp.path(), "b.json", r#"{"extends": "./a.json"}"#);

    let err = load_config(&a).expect_err("cycle should fail");
    assert!(format!("{err:#}").contains("cycle"), "{err:#}");
}

#[test]
fn missing_config_file_is_an_error() {
    let temp = tempfile::tempdir().expect("temp dir");
    assert!(resolve_config_path(temp.path(), Some(Path::new("nope.json"))).is_err());
    assert!(resolve_config_path(temp.path(), Some(Path::new("."))).is_err());
    assert_eq!(resolve_config_path(temp.path(), None).unwrap(), None);
}

#[test]
fn finds_config_in_project_directory() {
    let temp = tempfile::tempdir().expect("temp dir");
    let path = write_file(temp.path(), "svc/protoget.json", "{}");
    let found = resolve_config_path(temp.path(), Some(Path::new("svc"))).unwrap();
    assert_eq!(found, Some(path));
}

#[test]
fn flags_override_config_values() {
    let config = parse_config(
        r#"{"files": ["a.go"], "checkerOptions": {"markerMethod": "Reset"}}"#,
    )
    .unwrap();
    let base = Path::new("/project");

    let resolved = resolve_config(Some(&config), base, &args(&[]));
    assert_eq!(resolved.checker.marker_method, "Reset");
    assert_eq!(resolved.include, vec![DEFAULT_INCLUDE.to_string()]);
    assert_eq!(resolved.files, vec![base.join("a.go")]);

    let resolved = resolve_config(Some(&config), base, &args(&["--marker", "Validate"]));
    assert_eq!(resolved.checker.marker_method, "Validate");

    let resolved = resolve_config(None, base, &args(&[]));
    assert_eq!(resolved.checker.marker_method, "ProtoMessage");
    assert!(resolved.files.is_empty());
}
