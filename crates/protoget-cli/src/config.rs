//! `protoget.json` loading: JSON with comments and trailing commas, with
//! `extends` chains merged base-first.

use anyhow::{Context, Result, anyhow, bail};
use protoget_checker::CheckerOptions;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::args::CliArgs;

pub const CONFIG_FILE_NAME: &str = "protoget.json";

pub const DEFAULT_INCLUDE: &str = "**/*.go";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProtogetConfig {
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub include: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
    #[serde(default)]
    pub files: Option<Vec<String>>,
    #[serde(default)]
    pub checker_options: Option<CheckerOptionsConfig>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CheckerOptionsConfig {
    #[serde(default)]
    pub marker_method: Option<String>,
}

/// Configuration after merging `extends`, defaults and command-line flags.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Directory relative paths in the configuration are resolved against.
    pub base_dir: PathBuf,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub files: Vec<PathBuf>,
    pub checker: CheckerOptions,
}

pub fn parse_config(source: &str) -> Result<ProtogetConfig> {
    let config = serde_json::from_str(&normalize_jsonc(source))
        .context("failed to parse protoget.json")?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<ProtogetConfig> {
    let mut visited = HashSet::new();
    load_config_inner(path, &mut visited)
}

fn load_config_inner(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<ProtogetConfig> {
    let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical.clone()) {
        bail!("protoget.json extends cycle detected at {}", canonical.display());
    }

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let mut config = parse_config(&source)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;

    if let Some(extends_path) = config.extends.take() {
        let base_path = resolve_extends_path(path, &extends_path)?;
        let base_config = load_config_inner(&base_path, visited)?;
        config = merge_configs(base_config, config);
    }

    visited.remove(&canonical);
    Ok(config)
}

fn resolve_extends_path(current_path: &Path, extends: &str) -> Result<PathBuf> {
    let base_dir = current_path
        .parent()
        .ok_or_else(|| anyhow!("config has no parent directory"))?;
    let mut candidate = PathBuf::from(extends);
    if candidate.extension().is_none() {
        candidate.set_extension("json");
    }

    if candidate.is_absolute() {
        Ok(candidate)
    } else {
        Ok(base_dir.join(candidate))
    }
}

fn merge_configs(base: ProtogetConfig, child: ProtogetConfig) -> ProtogetConfig {
    let checker_options = match (base.checker_options, child.checker_options) {
        (Some(base_opts), Some(child_opts)) => Some(CheckerOptionsConfig {
            marker_method: child_opts.marker_method.or(base_opts.marker_method),
        }),
        (base_opts, child_opts) => child_opts.or(base_opts),
    };

    ProtogetConfig {
        extends: None,
        include: child.include.or(base.include),
        exclude: child.exclude.or(base.exclude),
        files: child.files.or(base.files),
        checker_options,
    }
}

/// `protoget.json` in `dir`, if present.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    let candidate = dir.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// The config file named by `--project` (a file or a directory holding
/// one), or the one in `cwd`.
pub fn resolve_config_path(cwd: &Path, project: Option<&Path>) -> Result<Option<PathBuf>> {
    let Some(project) = project else {
        return Ok(find_config(cwd));
    };
    let path = if project.is_absolute() {
        project.to_path_buf()
    } else {
        cwd.join(project)
    };
    if path.is_dir() {
        return find_config(&path)
            .map(Some)
            .ok_or_else(|| anyhow!("no {CONFIG_FILE_NAME} found in {}", path.display()));
    }
    if !path.is_file() {
        bail!("config file not found: {}", path.display());
    }
    Ok(Some(path))
}

/// Merge the loaded configuration with defaults and command-line flags.
pub fn resolve_config(
    config: Option<&ProtogetConfig>,
    base_dir: &Path,
    args: &CliArgs,
) -> ResolvedConfig {
    let config = config.cloned().unwrap_or_default();

    let mut checker = CheckerOptions::default();
    if let Some(marker) = config.checker_options.and_then(|o| o.marker_method) {
        checker.marker_method = marker;
    }
    if let Some(marker) = &args.marker {
        checker.marker_method = marker.clone();
    }

    ResolvedConfig {
        base_dir: base_dir.to_path_buf(),
        include: config
            .include
            .unwrap_or_else(|| vec![DEFAULT_INCLUDE.to_string()]),
        exclude: config.exclude.unwrap_or_default(),
        files: config
            .files
            .unwrap_or_default()
            .into_iter()
            .map(|file| base_dir.join(file))
            .collect(),
        checker,
    }
}

/// Where the normalizer is in `protoget.json` text.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Jsonc {
    Code,
    String { escaped: bool },
    LineComment,
    BlockComment,
}

/// Turn JSON with comments into plain JSON in one pass. Comments are
/// dropped but their newlines kept, so serde's line numbers still point at
/// the user's file. A comma whose next significant character is `}` or `]`
/// is dropped.
fn normalize_jsonc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    // A comma not yet known to be trailing, with the blanks seen after it.
    let mut held: Option<String> = None;
    let mut state = Jsonc::Code;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        state = match state {
            Jsonc::String { escaped } => {
                out.push(ch);
                match ch {
                    _ if escaped => Jsonc::String { escaped: false },
                    '\\' => Jsonc::String { escaped: true },
                    '"' => Jsonc::Code,
                    _ => state,
                }
            }
            Jsonc::LineComment if ch == '\n' => {
                push_blank(&mut out, &mut held, ch);
                Jsonc::Code
            }
            Jsonc::LineComment => state,
            Jsonc::BlockComment => {
                if ch == '*' && chars.next_if_eq(&'/').is_some() {
                    Jsonc::Code
                } else {
                    if ch == '\n' {
                        push_blank(&mut out, &mut held, ch);
                    }
                    state
                }
            }
            Jsonc::Code => match ch {
                '/' if chars.next_if_eq(&'/').is_some() => Jsonc::LineComment,
                '/' if chars.next_if_eq(&'*').is_some() => Jsonc::BlockComment,
                c if c.is_whitespace() => {
                    push_blank(&mut out, &mut held, c);
                    state
                }
                c => {
                    if let Some(blanks) = held.take() {
                        if !matches!(c, '}' | ']') {
                            out.push(',');
                        }
                        out.push_str(&blanks);
                    }
                    if c == ',' {
                        held = Some(String::new());
                        state
                    } else {
                        out.push(c);
                        if c == '"' {
                            Jsonc::String { escaped: false }
                        } else {
                            state
                        }
                    }
                }
            },
        };
    }

    if let Some(blanks) = held {
        out.push(',');
        out.push_str(&blanks);
    }
    out
}

fn push_blank(out: &mut String, held: &mut Option<String>, ch: char) {
    match held {
        Some(blanks) => blanks.push(ch),
        None => out.push(ch),
    }
}
