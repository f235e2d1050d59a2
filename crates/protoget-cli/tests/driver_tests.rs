use clap::Parser;
use std::path::{Path, PathBuf};

use protoget_cli::args::CliArgs;
use protoget_cli::config::{parse_config, resolve_config, ResolvedConfig};
use protoget_cli::driver::{check_files, discover_files, display_name, run};

const PERSON: &str = r#"package pb

type Person struct {
	Name string
	Age  int
}

func (x *Person) ProtoMessage() {}
"#;

const MAIN: &str = r#"package main

import (
	"fmt"

	"example.com/project/gen/pb"
)

func show(m *pb.Person) {
	m.Age = 3
	fmt.Println(m.Name)
}
"#;

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create test dir");
    }
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

fn config(dir: &Path, json: &str, flags: &[&str]) -> ResolvedConfig {
    let mut argv = vec!["protoget"];
    argv.extend_from_slice(flags);
    let args = CliArgs::try_parse_from(argv).expect("args");
    let parsed = parse_config(json).expect("config");
    resolve_config(Some(&parsed), dir, &args)
}

fn project() -> tempfile::TempDir {
    let temp = tempfile::tempdir().expect("temp dir");
    write_file(temp.path(), "gen/pb/person.pb.go", PERSON);
    write_file(temp.path(), "app/main.go", MAIN);
    temp
}

fn relative_names(root: &Path, files: &[PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|f| display_name(f.strip_prefix(root).unwrap()))
        .collect()
}

#[test]
fn discovery_skips_tool_directories_and_applies_globs() {
    let temp = project();
    write_file(temp.path(), "vendor/lib/lib.go", "package lib\n");
    write_file(temp.path(), "app/testdata/bad.go", "package bad\n");
    write_file(temp.path(), ".git/hooks.go", "package hooks\n");
    write_file(temp.path(), "_scratch/s.go", "package s\n");
    write_file(temp.path(), "app/main_test.go", "package main\n");
    write_file(temp.path(), "README.md", "# readme\n");

    let all = discover_files(&config(temp.path(), "{}", &[]), &[]).unwrap();
    assert_eq!(
        relative_names(temp.path(), &all),
        vec!["app/main.go", "app/main_test.go", "gen/pb/person.pb.go"]
    );

    let filtered = discover_files(
        &config(temp.path(), r#"{"exclude": ["**/*_test.go", "gen/**"]}"#, &[]),
        &[],
    )
    .unwrap();
    assert_eq!(relative_names(temp.path(), &filtered), vec!["app/main.go"]);
}

#[test]
fn explicit_files_and_missing_roots() {
    let temp = project();
    let resolved = config(temp.path(), r#"{"files": ["app/main.go"]}"#, &[]);
    let files = discover_files(&resolved, &[]).unwrap();
    assert_eq!(relative_names(temp.path(), &files), vec!["app/main.go"]);

    let missing = temp.path().join("nope");
    assert!(discover_files(&resolved, &[missing]).is_err());
}

#[test]
fn reports_reads_of_imported_messages() {
    let temp = project();
    let result = run(&config(temp.path(), "{}", &[]), &[]).unwrap();

    assert_eq!(result.files.len(), 2);
    assert_eq!(result.diagnostics.len(), 1, "{:?}", result.diagnostics);
    let diagnostic = &result.diagnostics[0];
    assert!(diagnostic.file.ends_with("app/main.go"), "{}", diagnostic.file);
    assert_eq!(diagnostic.message_text, "protoget: \"m.Name\"");
    assert!(result.has_errors());

    let text = &result.sources[&diagnostic.file];
    assert_eq!(&text[diagnostic.start as usize..diagnostic.end() as usize], "m.Name");
}

#[test]
fn custom_marker_from_flags() {
    let temp = project();
    let result = run(&config(temp.path(), "{}", &["--marker", "Reset"]), &[]).unwrap();
    assert!(!result.has_errors(), "{:?}", result.diagnostics);
}

#[test]
fn external_test_packages_are_checked() {
    let temp = project();
    write_file(
        temp.path(),
        "app/main_test.go",
        "package main_test\n\nimport \"example.com/project/gen/pb\"\n\nfunc check(m *pb.Person) int {\n\treturn m.Age\n}\n",
    );
    let result = run(&config(temp.path(), "{}", &[]), &[]).unwrap();
    let messages: Vec<_> = result
        .diagnostics
        .iter()
        .map(|d| d.message_text.as_str())
        .collect();
    assert_eq!(messages, vec!["protoget: \"m.Name\"", "protoget: \"m.Age\""]);
}

#[test]
fn parse_errors_are_reported_alongside_findings() {
    let temp = project();
    write_file(temp.path(), "broken/broken.go", "package broken\n\nfunc f( {\n}\n");
    let result = run(&config(temp.path(), "{}", &[]), &[]).unwrap();

    let sources: Vec<_> = result.diagnostics.iter().map(|d| d.source).collect();
    assert_eq!(sources.first(), Some(&"protoget"));
    assert!(sources[1..].iter().all(|&s| s == "parser"), "{sources:?}");
    assert!(result.diagnostics[1].file.ends_with("broken/broken.go"));
}

#[test]
fn clean_files_have_no_diagnostics() {
    let temp = tempfile::tempdir().expect("temp dir");
    let file = write_file(temp.path(), "pb/person.pb.go", PERSON);
    let resolved = config(temp.path(), "{}", &[]);
    let result = check_files(&[file], &[temp.path().to_path_buf()], &resolved).unwrap();
    assert!(!result.has_errors());
    assert_eq!(result.sources.len(), 1);
}
