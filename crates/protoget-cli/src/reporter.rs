use anyhow::{Context, Result};
use colored::Colorize;
use protoget_common::{Diagnostic, DiagnosticCategory, LineMap, Position};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// Text reporter: `file:line:col - error source: message`, the
/// source line with a `~` underline, then the suggested fix.
pub struct Reporter {
    color: bool,
    sources: HashMap<String, String>,
    line_maps: HashMap<String, LineMap>,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter {
            color,
            sources: HashMap::new(),
            line_maps: HashMap::new(),
        }
    }

    /// Register the text of `file` so it is not read back from disk.
    pub fn add_source(&mut self, file: impl Into<String>, text: impl Into<String>) {
        self.sources.insert(file.into(), text.into());
    }

    pub fn render(&mut self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for diagnostic in diagnostics {
            out.push_str(&self.format_diagnostic(diagnostic));
            out.push('\n');
        }
        if !diagnostics.is_empty() {
            out.push_str(&self.format_summary(diagnostics.len()));
            out.push('\n');
        }
        out
    }

    pub fn format_diagnostic(&mut self, diagnostic: &Diagnostic) -> String {
        let location = self.format_location(&diagnostic.file, diagnostic.start);
        let category = self.format_category(diagnostic.category);

        let mut output = String::new();
        if let Some(location) = location {
            output.push_str(&location);
        } else if !diagnostic.file.is_empty() {
            output.push_str(&diagnostic.file);
        } else {
            output.push_str("<unknown>");
        }

        output.push_str(" - ");
        output.push_str(&category);
        output.push(' ');
        output.push_str(&self.format_source(diagnostic.source));
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        if let Some(snippet) =
            self.format_snippet(&diagnostic.file, diagnostic.start, diagnostic.length)
        {
            output.push_str(&snippet);
        }

        if let Some(fix) = self.format_fix(diagnostic) {
            output.push('\n');
            output.push_str(&fix);
        }

        output
    }

    /// Source line with the span underlined:
    ///
    /// ```text
    ///    12   fmt.Println(m.Name)
    ///                     ~~~~~~
    /// ```
    fn format_snippet(&mut self, file: &str, start: u32, length: u32) -> Option<String> {
        if file.is_empty() || length == 0 {
            return None;
        }

        let start_pos = self.position_for(file, start)?;
        let end_pos = self.position_for(file, start + length)?;
        let source = self.sources.get(file)?;
        let line_map = self.line_maps.get(file)?;
        let line_text = line_map.line_text(start_pos.line, source)?;

        let end_column = if end_pos.line == start_pos.line {
            end_pos.character
        } else {
            line_text.chars().count() as u32
        };

        let mut underline = String::new();
        for (column, ch) in line_text.chars().enumerate() {
            let column = column as u32;
            if column >= end_column {
                break;
            }
            let marker = if column < start_pos.character { ' ' } else { '~' };
            // Tabs expand to 4 columns
            let width = if ch == '\t' { 4 } else { 1 };
            underline.extend(std::iter::repeat_n(marker, width));
        }
        if !underline.contains('~') {
            underline.push('~');
        }

        let underline = if self.color {
            underline.red().to_string()
        } else {
            underline
        };
        let line_text = line_text.replace('\t', "    ");
        Some(format!(
            "\n  {:>3}   {}\n        {}",
            start_pos.line + 1,
            line_text,
            underline
        ))
    }

    /// `Use the getter instead: m.GetName()` for a diagnostic whose fix edits
    /// lie inside its span.
    fn format_fix(&mut self, diagnostic: &Diagnostic) -> Option<String> {
        let fix = diagnostic.suggested_fixes.first()?;
        self.ensure_source(&diagnostic.file)?;
        let source = self.sources.get(&diagnostic.file)?;
        let original = diagnostic.span().slice(source)?;

        let mut replaced = original.to_string();
        let mut edits: Vec<_> = fix.text_edits.iter().collect();
        edits.sort_by_key(|edit| std::cmp::Reverse(edit.start));
        for edit in edits {
            if edit.start < diagnostic.start || edit.end > diagnostic.end() {
                return None;
            }
            let from = (edit.start - diagnostic.start) as usize;
            let to = (edit.end - diagnostic.start) as usize;
            replaced.replace_range(from..to, &edit.new_text);
        }

        let replaced = if self.color {
            replaced.green().to_string()
        } else {
            replaced
        };
        Some(format!("        {}: {}", fix.message, replaced))
    }

    fn format_summary(&self, count: usize) -> String {
        let noun = if count == 1 { "problem" } else { "problems" };
        let summary = format!("Found {count} {noun}.");
        if self.color {
            summary.bold().to_string()
        } else {
            summary
        }
    }

    fn format_location(&mut self, file: &str, offset: u32) -> Option<String> {
        if file.is_empty() {
            return None;
        }

        let position = self.position_for(file, offset)?;
        let location = format!("{}:{}:{}", file, position.line + 1, position.character + 1);
        if self.color {
            Some(location.cyan().to_string())
        } else {
            Some(location)
        }
    }

    fn position_for(&mut self, file: &str, offset: u32) -> Option<Position> {
        self.ensure_source(file)?;
        if !self.line_maps.contains_key(file) {
            let source = self.sources.get(file)?;
            let map = LineMap::build(source);
            self.line_maps.insert(file.to_string(), map);
        }

        let source = self.sources.get(file)?;
        let line_map = self.line_maps.get(file)?;
        Some(line_map.offset_to_position(offset, source))
    }

    fn ensure_source(&mut self, file: &str) -> Option<()> {
        if !self.sources.contains_key(file) {
            let contents = std::fs::read_to_string(Path::new(file)).ok()?;
            self.sources.insert(file.to_string(), contents);
        }
        Some(())
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = match category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        };

        if !self.color {
            return label.to_string();
        }

        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_source(&self, source: &str) -> String {
        if self.color {
            source.bright_blue().to_string()
        } else {
            source.to_string()
        }
    }

    // =========================================================================
    // JSON
    // =========================================================================

    /// Pretty-printed JSON array of diagnostics with 1-based positions.
    pub fn render_json(&mut self, diagnostics: &[Diagnostic]) -> Result<String> {
        let entries: Vec<JsonDiagnostic<'_>> = diagnostics
            .iter()
            .map(|diagnostic| {
                let start = self.json_position(&diagnostic.file, diagnostic.start);
                let end = self.json_position(&diagnostic.file, diagnostic.end());
                let fixes = diagnostic
                    .suggested_fixes
                    .iter()
                    .map(|fix| JsonFix {
                        message: &fix.message,
                        edits: fix
                            .text_edits
                            .iter()
                            .map(|edit| JsonEdit {
                                start: self.json_position(&diagnostic.file, edit.start),
                                end: self.json_position(&diagnostic.file, edit.end),
                                new_text: &edit.new_text,
                            })
                            .collect(),
                    })
                    .collect();
                JsonDiagnostic {
                    file: &diagnostic.file,
                    start,
                    end,
                    category: diagnostic.category,
                    source: diagnostic.source,
                    message: &diagnostic.message_text,
                    fixes,
                }
            })
            .collect();
        serde_json::to_string_pretty(&entries).context("failed to serialize diagnostics")
    }

    fn json_position(&mut self, file: &str, offset: u32) -> JsonPosition {
        let position = self.position_for(file, offset);
        JsonPosition {
            offset,
            line: position.map(|p| p.line + 1),
            column: position.map(|p| p.character + 1),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonDiagnostic<'a> {
    file: &'a str,
    start: JsonPosition,
    end: JsonPosition,
    category: DiagnosticCategory,
    source: &'a str,
    message: &'a str,
    fixes: Vec<JsonFix<'a>>,
}

#[derive(Serialize)]
struct JsonPosition {
    offset: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<u32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonFix<'a> {
    message: &'a str,
    edits: Vec<JsonEdit<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonEdit<'a> {
    start: JsonPosition,
    end: JsonPosition,
    new_text: &'a str,
}
