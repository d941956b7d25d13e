//! Plain-text export of the essay body.
//!
//! Only non-pinned sections are exported. Attribution sigils disappear and
//! wikilinks collapse to their visible text.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    attribution,
    markup::Markup,
    parsing::{content_sections, parse_sections, section_extent, split_lines},
};

/// `[[target]]` or `[[target|display]]`, with an optional embed `!`.
static WIKILINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!?\[\[([^\]|]+)(?:\|([^\]]*))?\]\]").expect("valid wikilink regex")
});

static BLANK_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)+").expect("valid blank run regex"));

/// Flattens the essay into clean text.
///
/// With `include_headings` false each section's `## ` line is dropped. A
/// document without any section is exported whole. Pure: the same input
/// always yields the same output.
pub fn render_export(text: &str, include_headings: bool, markup: &Markup) -> String {
    let sections = parse_sections(text, markup);
    let lines = split_lines(text);

    let joined = if sections.is_empty() {
        text.to_string()
    } else {
        content_sections(&sections)
            .iter()
            .map(|section| {
                let extent = section_extent(section, &sections, &lines, markup);
                let start = if include_headings {
                    extent.start
                } else {
                    (extent.start + 1).min(extent.end)
                };
                lines[start..extent.end].join("\n").trim().to_string()
            })
            .filter(|chunk| !chunk.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    let stripped = attribution::strip(&joined);
    let unlinked = unlink(&stripped);
    BLANK_RUN_RE.replace_all(&unlinked, "\n\n").trim().to_string()
}

/// Rewrites wikilinks to their display text, or their target when there is
/// none.
pub fn unlink(text: &str) -> String {
    WIKILINK_RE
        .replace_all(text, |caps: &regex::Captures| {
            let target = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
            let display = caps.get(2).map(|m| m.as_str().trim());
            display.filter(|d| !d.is_empty()).unwrap_or(target).to_string()
        })
        .into_owned()
}
