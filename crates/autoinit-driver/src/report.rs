//! Error reporting for the command line

use std::fs;

use ariadne::{Color, Label, Report, ReportKind, Source};
use autoinit_graph::DiscoveryError;
use autoinit_manifest::ManifestParseError;
use autoinit_plugin::PluginError;
use autoinit_resolver::ResolveError;

use crate::CliError;

pub fn report_error(err: &CliError) {
    if let Some(manifest_err) = manifest_error(err) {
        if report_manifest_error(manifest_err) {
            return;
        }
    }
    eprintln!("error: {err}");
}

/// The manifest parse failure behind `err`, wherever it was raised.
fn manifest_error(err: &CliError) -> Option<&ManifestParseError> {
    let CliError::Plugin(PluginError::Discovery(discovery)) = err else {
        return None;
    };
    match discovery {
        DiscoveryError::ManifestParse(e) => Some(e),
        DiscoveryError::Resolver {
            source: ResolveError::Manifest(e),
            ..
        } => Some(e),
        _ => None,
    }
}

/// Render a source-annotated report. Returns `false` when there is no
/// location to point at or the manifest can no longer be read.
fn report_manifest_error(err: &ManifestParseError) -> bool {
    let Some((line, column)) = err.line_col() else {
        return false;
    };
    let Ok(source) = fs::read_to_string(&err.path) else {
        return false;
    };

    let filename = err.path.display().to_string();
    let offset = char_offset(&source, line, column);
    let span = (filename.as_str(), offset..offset + 1);

    Report::build(ReportKind::Error, span.clone())
        .with_code("E0100")
        .with_message("Failed to parse package.json")
        .with_label(
            Label::new(span)
                .with_message(err.reason())
                .with_color(Color::Red),
        )
        .finish()
        .eprint((filename.as_str(), Source::from(source.as_str())))
        .is_ok()
}

/// Char offset of a one-based line and column; column 0 points at the start
/// of the line.
fn char_offset(source: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;
    for (index, text) in source.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let byte_column = column.saturating_sub(1);
            return offset + text.char_indices().take_while(|(i, _)| *i < byte_column).count();
        }
        offset += text.chars().count();
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_offset() {
        let source = "{\n  \"name\": ,\n}";
        assert_eq!(char_offset(source, 1, 1), 0);
        assert_eq!(char_offset(source, 2, 11), 12);
        assert_eq!(char_offset(source, 9, 1), source.chars().count());
    }

    #[test]
    fn test_char_offset_counts_chars_not_bytes() {
        let source = "{\"é\": 1,\n x}";
        assert_eq!(char_offset(source, 2, 2), 10);
    }
}
