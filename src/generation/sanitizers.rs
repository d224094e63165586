//! Text sanitizers for generated C++ comments
//!
//! Documentation strings come straight from the model and may contain
//! anything, including sequences that would terminate a block comment early.

use once_cell::sync::Lazy;
use regex::Regex;

static COMMENT_TERMINATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*+/").expect("valid comment terminator regex"));

/// Wraps free text in a `/** ... */` block, one ` * ` line per input line.
///
/// Blank input yields an empty string so callers can push the result
/// unconditionally. Embedded `*/` is broken up so the comment cannot close
/// early.
///
/// # Examples
/// ```
/// use umlcpp::generation::sanitizers::format_documentation;
///
/// assert_eq!(format_documentation("Hello"), "/**\n * Hello\n */\n");
/// assert_eq!(format_documentation("   "), "");
/// ```
pub fn format_documentation(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }

    let safe = COMMENT_TERMINATOR.replace_all(text, |caps: &regex::Captures| {
        let stars = &caps[0][..caps[0].len() - 1];
        format!("{stars} /")
    });

    let mut out = String::from("/**\n");
    for line in safe.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            out.push_str(" *\n");
        } else {
            out.push_str(" * ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push_str(" */\n");
    out
}

/// Upper-case identifier used in include guards (`Widget` -> `WIDGET`)
pub fn guard_identifier(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}
