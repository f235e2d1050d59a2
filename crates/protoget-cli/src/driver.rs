//! File discovery, package grouping and the parallel check pipeline.
//!
//! All files are parsed in parallel, types are resolved once for the whole
//! program, then every file is checked on its own in parallel.

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use protoget_checker::CheckerState;
use protoget_common::{Diagnostic, Span};
use protoget_parser::parser::{NodeArena, NodeIndex, ParserState};
use protoget_types::{PackageInput, SourceUnit, resolve_program};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::ResolvedConfig;

/// Source of the diagnostic reported when a file cannot be checked.
pub const INTERNAL_SOURCE: &str = "internal";

pub struct CheckResult {
    /// Checked files in path order.
    pub files: Vec<PathBuf>,
    /// Parse errors and findings, by file, then in emission order.
    pub diagnostics: Vec<Diagnostic>,
    /// File contents keyed by the name used in diagnostics.
    pub sources: FxHashMap<String, String>,
}

impl CheckResult {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

struct ParsedFile {
    path: PathBuf,
    name: String,
    arena: NodeArena,
    root: NodeIndex,
    parse_diagnostics: Vec<Diagnostic>,
}

// =============================================================================
// Discovery
// =============================================================================

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob =
            Glob::new(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))?;
        builder.add(glob);
    }
    builder.build().context("failed to build glob set")
}

/// Directories the go tool never descends into.
fn is_skipped_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name.starts_with('_') || name == "testdata" || name == "vendor"
}

/// Files to check: the configured `files`, plus every file under `roots`
/// (the base directory when empty) matching `include` and not `exclude`.
pub fn discover_files(config: &ResolvedConfig, roots: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let include = build_glob_set(&config.include)?;
    let exclude = build_glob_set(&config.exclude)?;

    let mut files: Vec<PathBuf> = config.files.clone();
    let default_root = [config.base_dir.clone()];
    let roots = if roots.is_empty() && config.files.is_empty() {
        &default_root[..]
    } else {
        roots
    };

    for root in roots {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }
        if !root.is_dir() {
            anyhow::bail!("no such file or directory: {}", root.display());
        }
        for entry in WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_skipped_dir(e))
        {
            let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            if include.is_match(relative) && !exclude.is_match(relative) {
                files.push(entry.into_path());
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Name used for `path` in diagnostics: the path as discovered, without a
/// leading `./`.
pub fn display_name(path: &Path) -> String {
    let path = path.strip_prefix(".").unwrap_or(path);
    path.to_string_lossy().replace('\\', "/")
}

/// Import-matchable path of the package in `dir`: the directory relative to
/// the root it was found under, or its last component.
fn package_path(dir: &Path, roots: &[PathBuf]) -> String {
    let relative = roots
        .iter()
        .filter_map(|root| dir.strip_prefix(root).ok())
        .filter(|rel| !rel.as_os_str().is_empty())
        .min_by_key(|rel| rel.components().count());
    let path = match relative {
        Some(rel) => rel.to_path_buf(),
        None => std::fs::canonicalize(dir)
            .ok()
            .and_then(|abs| abs.file_name().map(PathBuf::from))
            .unwrap_or_default(),
    };
    path.to_string_lossy().replace('\\', "/")
}

// =============================================================================
// Pipeline
// =============================================================================

fn parse_file(path: &Path) -> Result<(ParsedFile, String)> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let name = display_name(path);

    let mut parser = ParserState::new(name.clone(), source.clone());
    let root = parser.parse_source_file();
    let parse_diagnostics = parser
        .get_diagnostics()
        .iter()
        .map(|d| d.to_diagnostic(&name))
        .collect();

    let parsed = ParsedFile {
        path: path.to_path_buf(),
        name,
        arena: parser.into_arena(),
        root,
        parse_diagnostics,
    };
    Ok((parsed, source))
}

/// Group files into packages by directory and declared package name, so an
/// external `_test` package is separate from the package it tests.
fn group_packages<'a>(
    files: &'a [ParsedFile],
    roots: &[PathBuf],
) -> Vec<(String, Vec<&'a ParsedFile>)> {
    let mut groups: BTreeMap<(PathBuf, &str), Vec<&ParsedFile>> = BTreeMap::new();
    for file in files {
        let dir = file.path.parent().map(Path::to_path_buf).unwrap_or_default();
        let package = file.arena.package_name(file.root).unwrap_or_default();
        groups.entry((dir, package)).or_default().push(file);
    }

    groups
        .into_iter()
        .map(|((dir, _), members)| (package_path(&dir, roots), members))
        .collect()
}

/// Check `files`; `roots` are the directories they were discovered under.
#[tracing::instrument(level = "debug", skip_all, fields(files = files.len()))]
pub fn check_files(
    files: &[PathBuf],
    roots: &[PathBuf],
    config: &ResolvedConfig,
) -> Result<CheckResult> {
    let loaded: Vec<(ParsedFile, String)> = files
        .par_iter()
        .map(|path| parse_file(path))
        .collect::<Result<_>>()?;
    let (parsed, texts): (Vec<ParsedFile>, Vec<String>) = loaded.into_iter().unzip();

    let packages = group_packages(&parsed, roots);
    let inputs: Vec<PackageInput<'_>> = packages
        .iter()
        .map(|(path, members)| PackageInput {
            path: path.clone(),
            files: members
                .iter()
                .map(|file| SourceUnit {
                    arena: &file.arena,
                    root: file.root,
                })
                .collect(),
        })
        .collect();
    let mut types = resolve_program(&inputs);
    let marker = config.checker.marker_interface(&mut types.interner);
    debug!(packages = inputs.len(), "resolved program");

    let units: Vec<(usize, usize, &ParsedFile)> = packages
        .iter()
        .enumerate()
        .flat_map(|(pkg, (_, members))| {
            members
                .iter()
                .enumerate()
                .map(move |(index, file)| (pkg, index, *file))
        })
        .collect();

    let mut per_file: Vec<(&str, Vec<Diagnostic>)> = units
        .par_iter()
        .map(|&(pkg, index, file)| {
            let mut diagnostics = file.parse_diagnostics.clone();
            if let Some(info) = types.type_info(pkg, index) {
                let checker = CheckerState::new(&file.arena, info, file.name.as_str(), marker);
                match checker.check_source_file(file.root) {
                    Ok(found) => diagnostics.extend(found),
                    Err(err) => {
                        warn!(file = %file.name, error = %err, "check aborted");
                        diagnostics.push(Diagnostic::error(
                            file.name.as_str(),
                            Span::new(0, 0),
                            format!("protoget: check aborted: {err}"),
                            INTERNAL_SOURCE,
                        ));
                    }
                }
            }
            (file.name.as_str(), diagnostics)
        })
        .collect();
    per_file.sort_by(|a, b| a.0.cmp(b.0));
    let diagnostics = per_file.into_iter().flat_map(|(_, d)| d).collect();

    let files = parsed.iter().map(|f| f.path.clone()).collect();
    let sources = parsed
        .iter()
        .zip(texts)
        .map(|(file, text)| (file.name.clone(), text))
        .collect();

    Ok(CheckResult {
        files,
        diagnostics,
        sources,
    })
}

/// Discover and check every file selected by `config` and `roots`.
pub fn run(config: &ResolvedConfig, roots: &[PathBuf]) -> Result<CheckResult> {
    let files = discover_files(config, roots)?;
    let roots = if roots.is_empty() {
        vec![config.base_dir.clone()]
    } else {
        roots.to_vec()
    };
    check_files(&files, &roots, config)
}
