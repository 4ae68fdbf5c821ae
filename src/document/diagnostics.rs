//! Parameter file diagnostics with source-annotated error messages

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Syntax error in a parameter file, with source location
#[derive(Debug, Error, Diagnostic)]
#[error("{kind} syntax error: {message}")]
#[diagnostic(code(linesizer::document::syntax))]
pub struct DocumentSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    kind: &'static str,

    /// The underlying parser message
    message: String,
}

impl DocumentSyntaxError {
    /// Create a syntax error from a serde_yml error
    pub fn from_yaml_error(err: &serde_yml::Error, source: &str, filename: &str) -> Self {
        let (line, column) = err
            .location()
            .map(|loc| (loc.line(), loc.column()))
            .unwrap_or((1, 1));

        Self::at_location("YAML", err.to_string(), source, filename, line, column)
    }

    /// Create a syntax error from a serde_json error
    pub fn from_json_error(err: &serde_json::Error, source: &str, filename: &str) -> Self {
        // serde_json reports line 0 for errors without a position
        let line = err.line().max(1);
        let column = err.column().max(1);

        Self::at_location("JSON", err.to_string(), source, filename, line, column)
    }

    fn at_location(
        kind: &'static str,
        message: String,
        source: &str,
        filename: &str,
        line: usize,
        column: usize,
    ) -> Self {
        let offset = line_col_to_offset(source, line, column);
        let help = generate_help(&message);

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1)),
            help,
            kind,
            message,
        }
    }
}

/// Convert line/column to byte offset
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;
    let mut current_line = 1;

    for (i, ch) in source.char_indices() {
        if current_line == line {
            let line_start = i;
            let mut col = 1;
            for (j, c) in source[line_start..].char_indices() {
                if col == column {
                    return line_start + j;
                }
                if c == '\n' {
                    break;
                }
                col += 1;
            }
            return line_start + column.saturating_sub(1);
        }
        if ch == '\n' {
            current_line += 1;
        }
        offset = i;
    }

    offset
}

/// Byte span of the first occurrence of `key` used as a mapping key
///
/// Matches both `"key"` (JSON) and `key:` (YAML) spellings.
pub fn locate_key(source: &str, key: &str) -> Option<SourceSpan> {
    let quoted = format!("\"{}\"", key);
    if let Some(pos) = source.find(&quoted) {
        return Some(SourceSpan::from(pos..pos + quoted.len()));
    }

    let mut search_from = 0;
    while let Some(found) = source[search_from..].find(key) {
        let pos = search_from + found;
        let end = pos + key.len();
        let at_line_start = source[..pos]
            .chars()
            .rev()
            .take_while(|c| *c != '\n')
            .all(char::is_whitespace);
        if at_line_start && source[end..].trim_start_matches([' ', '\t']).starts_with(':') {
            return Some(SourceSpan::from(pos..end));
        }
        search_from = end;
    }

    None
}

/// Generate helpful suggestions based on error message
fn generate_help(message: &str) -> Option<String> {
    let msg_lower = message.to_lowercase();

    if msg_lower.contains("trailing comma") {
        return Some("Remove the comma after the last entry of the object".to_string());
    }

    if msg_lower.contains("expected `,` or `}`") {
        return Some("Separate entries with commas: {\"a\": 1, \"b\": 2}".to_string());
    }

    if msg_lower.contains("key must be a string") {
        return Some("Parameter names must be quoted: \"shift_duration\": 8".to_string());
    }

    if msg_lower.contains("eof while parsing") {
        return Some("The file ends early - check for a missing closing brace".to_string());
    }

    if msg_lower.contains("tab") {
        return Some(
            "YAML requires spaces for indentation, not tabs. Replace tabs with spaces.".to_string(),
        );
    }

    if msg_lower.contains("duplicate key") {
        return Some("Each parameter can only appear once. Remove the duplicate key.".to_string());
    }

    if msg_lower.contains("mapping values are not allowed") {
        return Some("You may be missing a space after ':' or have incorrect indentation.".to_string());
    }

    None
}
