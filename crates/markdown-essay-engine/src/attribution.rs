//! The attribution sigil `[[Source|*]]`.
//!
//! A wikilink whose display text is `*` credits the source of a quoted
//! passage. It is not a real link: export removes it entirely. All
//! construction and detection of the sigil goes through this module.

use std::sync::LazyLock;

use regex::Regex;

use crate::markup::{ATTRIBUTION_DISPLAY, QUOTE_MARKER, WIKILINK_ALIAS, WIKILINK_CLOSE, WIKILINK_OPEN};

/// `[[target|*]]`, capturing the target.
static SIGIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]|]+)\|\*\]\]").expect("valid sigil regex"));

/// Sigil plus the whitespace before it, for stripping.
static SIGIL_WITH_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]*\[\[[^\]|]+\|\*\]\]").expect("valid sigil regex"));

/// Builds the sigil for `source`.
pub fn encode(source: &str) -> String {
    format!(
        "{WIKILINK_OPEN}{}{WIKILINK_ALIAS}{ATTRIBUTION_DISPLAY}{WIKILINK_CLOSE}",
        source.trim()
    )
}

/// Source named by the last sigil on `line`.
pub fn decode(line: &str) -> Option<&str> {
    SIGIL_RE
        .captures_iter(line)
        .last()
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Removes every sigil, along with the whitespace in front of it.
pub fn strip(text: &str) -> String {
    SIGIL_WITH_SPACE_RE.replace_all(text, "").into_owned()
}

/// Renders `body` as a quoted passage credited to `source`.
///
/// Every line gets the quote marker (blank lines get a bare `>`), and the last
/// line carries the sigil. Surrounding blank lines in `body` are dropped.
pub fn render_quote(body: &str, source: &str) -> String {
    let lines: Vec<&str> = body.trim_matches('\n').lines().collect();
    let mut out: Vec<String> = lines
        .iter()
        .map(|line| {
            if line.trim().is_empty() {
                QUOTE_MARKER.trim_end().to_string()
            } else {
                format!("{QUOTE_MARKER}{}", line.trim_end())
            }
        })
        .collect();

    let sigil = encode(source);
    match out.last_mut() {
        Some(last) => {
            last.push(' ');
            last.push_str(&sigil);
        }
        None => out.push(format!("{QUOTE_MARKER}{sigil}")),
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn encode_builds_sigil() {
        assert_eq!(encode("Deep Work"), "[[Deep Work|*]]");
        assert_eq!(encode("  Padded "), "[[Padded|*]]");
    }

    #[test]
    fn decode_finds_source() {
        assert_eq!(decode("> words [[Deep Work|*]]"), Some("Deep Work"));
        assert_eq!(decode("> [[A|*]] and [[B|*]]"), Some("B"));
    }

    #[test]
    fn decode_ignores_ordinary_links() {
        assert_eq!(decode("see [[Deep Work]]"), None);
        assert_eq!(decode("see [[Deep Work|the book]]"), None);
    }

    #[test]
    fn encode_then_decode() {
        let line = format!("> text {}", encode("Source Note"));
        assert_eq!(decode(&line), Some("Source Note"));
    }

    #[test]
    fn strip_removes_sigil_and_leading_space() {
        assert_eq!(strip("> quoted [[Book|*]]"), "> quoted");
        assert_eq!(strip("keep [[Book]] link"), "keep [[Book]] link");
    }

    #[test]
    fn render_quote_prefixes_lines_and_attributes_last() {
        let rendered = render_quote("first line\n\nsecond line\n", "Book");
        assert_eq!(rendered, "> first line\n>\n> second line [[Book|*]]");
    }

    #[test]
    fn rendered_quote_decodes_to_source() {
        let rendered = render_quote("one\ntwo", "Essay Source");
        let last = rendered.lines().last().unwrap_or_default();
        assert_eq!(decode(last), Some("Essay Source"));
    }
}
