// SPDX-FileCopyrightText: 2026 Autoshorts Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns figment failures into miette diagnostics.
//!
//! Every section of `autoshorts.toml` is defaulted, so a parse can only fail
//! on an unknown key, a value of the wrong type, or a malformed file.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use figment::error::Kind;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler similarity a key must reach to be offered as a correction.
const SIMILARITY_FLOOR: f64 = 0.8;

/// A configuration problem, ready for rendering.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown key `{key}` in {table}")]
    #[diagnostic(code(autoshorts::config::unknown_key))]
    UnknownKey {
        key: String,
        /// `[pipeline]`, `[youtube]`, or `the top level`.
        table: String,
        /// Closest accepted key, when one is close enough.
        suggestion: Option<String>,
        #[help]
        help: String,
        #[label("not a recognized key")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("`{key}` has the wrong type: found {found}")]
    #[diagnostic(code(autoshorts::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        found: String,
        expected: String,
    },

    /// A value parsed but failed a semantic check.
    #[error("validation error: {message}")]
    #[diagnostic(code(autoshorts::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(autoshorts::config::other))]
    Other(String),
}

/// Converts every error carried by `err` into a [`ConfigError`].
///
/// `toml_sources` holds `(path, content)` pairs; they are only used to point
/// a label at an unknown key.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| classify(&error, toml_sources))
        .collect()
}

fn classify(error: &figment::Error, toml_sources: &[(String, String)]) -> ConfigError {
    match &error.kind {
        Kind::UnknownField(key, accepted) => {
            let suggestion = closest_key(key, accepted);
            let table = if error.path.is_empty() {
                "the top level".to_string()
            } else {
                format!("[{}]", error.path.join("."))
            };
            let help = match &suggestion {
                Some(s) => format!("did you mean `{s}`?"),
                None => format!("{table} accepts: {}", accepted.join(", ")),
            };
            let (span, src) = source_label(error, key, toml_sources);
            ConfigError::UnknownKey {
                key: key.clone(),
                table,
                suggestion,
                help,
                span,
                src,
            }
        }
        Kind::InvalidType(found, expected) => ConfigError::InvalidType {
            key: error.path.join("."),
            found: found.to_string(),
            expected: expected.clone(),
        },
        _ => ConfigError::Other(error.to_string()),
    }
}

/// The file the error came from, with a span over `key`.
fn source_label(
    error: &figment::Error,
    key: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let origin = error.metadata.as_ref().and_then(|m| match &m.source {
        Some(figment::Source::File(path)) => Some(path.display().to_string()),
        _ => None,
    });
    // Inline strings have no path; a lone source must be the one.
    let source = match origin {
        Some(path) => toml_sources.iter().find(|(p, _)| *p == path),
        None if toml_sources.len() == 1 => toml_sources.first(),
        None => None,
    };

    source
        .and_then(|(path, content)| {
            let offset = locate_key(content, &error.path, key)?;
            Some((
                Some(SourceSpan::new(offset.into(), key.len())),
                Some(NamedSource::new(path, content.clone())),
            ))
        })
        .unwrap_or((None, None))
}

/// Byte offset of `key = ...` inside the `[table]` named by `table_path`.
///
/// Tracks the current table header line by line, so a key of the same name
/// in another table is never matched. An empty path means top-level keys.
pub fn locate_key(content: &str, table_path: &[String], key: &str) -> Option<usize> {
    let wanted = table_path.join(".");
    let mut table = String::new();
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let trimmed = line.trim();
        if let Some(header) = trimmed.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
            table = header.trim().to_string();
        } else if table == wanted {
            let indent = line.len() - line.trim_start().len();
            if let Some(rest) = line[indent..].strip_prefix(key)
                && rest.trim_start().starts_with('=')
            {
                return Some(offset + indent);
            }
        }
        offset += line.len();
    }

    None
}

/// The accepted key most similar to `unknown`, if any clears [`SIMILARITY_FLOOR`].
pub fn closest_key(unknown: &str, accepted: &[&str]) -> Option<String> {
    accepted
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score >= SIMILARITY_FLOOR)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Writes each error to stderr through miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut report = String::new();
        match handler.render_report(&mut report, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{report}"),
            Err(_) => eprintln!("Error: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closest_key_fixes_transposed_letters() {
        let accepted = &["default_region", "log_level"];
        assert_eq!(
            closest_key("default_regoin", accepted),
            Some("default_region".to_string())
        );
    }

    #[test]
    fn closest_key_ignores_unrelated_names() {
        assert_eq!(closest_key("zzzzzz", &["model", "api_key", "base_url"]), None);
    }

    #[test]
    fn locate_key_stays_inside_its_table() {
        let content = "[openai]\nmodel = \"gpt\"\n\n[replicate]\n  model = \"a/b\"\n";
        let offset = locate_key(content, &["replicate".to_string()], "model").unwrap();
        assert_eq!(&content[offset..offset + 5], "model");
        assert!(offset > content.find("[replicate]").unwrap());
    }

    #[test]
    fn locate_key_needs_an_assignment() {
        let content = "[youtube]\ndefault_tags_extra = \"x\"\n";
        assert_eq!(locate_key(content, &["youtube".to_string()], "default_tags"), None);
    }

    #[test]
    fn locate_key_at_top_level() {
        let content = "telemetry = true\n[pipeline]\ntelemetry = false\n";
        assert_eq!(locate_key(content, &[], "telemetry"), Some(0));
    }

    #[test]
    fn missing_table_has_no_offset() {
        let content = "[openai]\nmodel = \"gpt\"\n";
        assert_eq!(locate_key(content, &["youtube".to_string()], "model"), None);
    }
}
