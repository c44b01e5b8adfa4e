//! Placeholder substitution and template-file classification.
//!
//! Substitution is literal: `{{KEY}}` tokens are replaced with the value
//! from the placeholder mapping in a single left-to-right pass. There are
//! no expressions, conditionals or loops, unknown keys pass through
//! verbatim, and inserted values are never re-scanned.

use std::path::Path;

use crate::config::Placeholders;
use crate::constants::TEMPLATE_MARKER;

/// Replaces every `{{KEY}}` whose key exists in `vars`.
///
/// The scan resumes after the inserted value, so a value containing the
/// literal text `{{OTHER}}` survives unexpanded. A key absent from the
/// mapping (or a token that is not a well-formed identifier) is left
/// untouched. The result does not depend on map iteration order.
pub fn substitute(content: &str, vars: &Placeholders) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let replaced = after.find("}}").and_then(|end| {
            let key = &after[..end];
            if is_identifier(key) {
                vars.get(key).map(|value| (value, end))
            } else {
                None
            }
        });

        match replaced {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                // Unknown or malformed token: emit one brace and rescan
                // from the next character, so overlapping braces like
                // `{{{KEY}}}` still resolve.
                out.push('{');
                rest = &rest[start + 1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Placeholder keys are identifiers: ASCII alphanumerics and underscores.
/// No whitespace tolerance inside the braces.
fn is_identifier(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A file is a template when the marker appears anywhere in its name.
/// Directories are traversed, never classified.
pub fn is_template_name(file_name: &str) -> bool {
    file_name.contains(TEMPLATE_MARKER)
}

/// Destination name: the source name with every marker occurrence removed.
pub fn strip_marker(name: &str) -> String {
    name.replace(TEMPLATE_MARKER, "")
}

/// Classifies a source path by its file name and yields the de-marked
/// relative destination path.
///
/// The marker is stripped from the whole relative path so marker-bearing
/// intermediate directory names are de-marked too, but only the file name
/// itself decides whether content is substituted.
pub fn classify(relative_path: &Path) -> (String, bool) {
    let is_template = relative_path
        .file_name()
        .and_then(|n| n.to_str())
        .map(is_template_name)
        .unwrap_or(false);

    let target = strip_marker(&relative_path.to_string_lossy());
    (target, is_template)
}
