//! Line splicing shared by every structural edit.
//!
//! Edits never patch in place: they cut the text into line slices, rejoin
//! them around a payload, and normalize blank lines at the seams only.
//! Lines are rejoined with `\n`; each edit then restores the input's
//! [`LineEnding`].

use std::ops::Range;

use crate::{
    markup::Markup,
    parsing::{LineClass, classify, classify::is_blank, pinned_section, sections_from_lines},
};

pub use crate::parsing::lines::{LineEnding, join_lines, split_lines};

/// Line index where new content goes: directly above the pinned section,
/// skipping back over blank lines and one horizontal rule (with its own
/// blank padding); document end when there is no pinned section.
pub fn insertion_point(lines: &[&str], markup: &Markup) -> usize {
    let sections = sections_from_lines(lines, markup);
    let Some(pinned) = pinned_section(&sections) else {
        return lines.len();
    };

    let mut at = skip_blank_back(lines, pinned.start);
    if at > 0 && classify(lines[at - 1]) == LineClass::Rule {
        at = skip_blank_back(lines, at - 1);
    }
    at
}

fn skip_blank_back(lines: &[&str], mut at: usize) -> usize {
    while at > 0 && is_blank(lines[at - 1]) {
        at -= 1;
    }
    at
}

/// Removes `range` from `lines`, returning what is left and what was cut.
///
/// The blank lines meeting at the cut collapse to a single blank line, or to
/// none at the start or end of the document. A cut between two non-blank
/// lines also leaves one blank line, so the neighbours stay separate units.
/// Lines away from the cut are untouched.
pub fn excise<'a>(lines: &[&'a str], range: Range<usize>) -> (Vec<&'a str>, Vec<&'a str>) {
    let payload = lines[range.clone()].to_vec();
    let before = &lines[..range.start];
    let after = &lines[range.end..];

    let before_kept = before.len() - trailing_blank(before);
    let after_skip = leading_blank(after);

    let mut remaining = Vec::with_capacity(lines.len() - payload.len() + 1);
    remaining.extend_from_slice(&before[..before_kept]);
    let at_edge = before_kept == 0 || after_skip == after.len();
    if !at_edge {
        remaining.push("");
    }
    remaining.extend_from_slice(&after[after_skip..]);

    (remaining, payload)
}

/// Joins `before`, `payload` and `after` with exactly one blank line between
/// each non-empty part, then [`finish`]es the text.
pub fn join_with_payload(before: &[&str], payload: &[&str], after: &[&str]) -> String {
    let parts = [trim_blank(before), trim_blank(payload), trim_blank(after)];
    let text = parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .map(|part| join_lines(part))
        .collect::<Vec<_>>()
        .join("\n\n");
    finish(&text)
}

/// Drops blank and rule lines left dangling above the pinned section once
/// nothing else precedes it.
pub fn drop_dangling_padding<'a>(lines: Vec<&'a str>, markup: &Markup) -> Vec<&'a str> {
    let sections = sections_from_lines(&lines, markup);
    match pinned_section(&sections) {
        Some(pinned)
            if pinned.start > 0
                && lines[..pinned.start]
                    .iter()
                    .all(|line| classify(line).is_separator()) =>
        {
            lines[pinned.start..].to_vec()
        }
        _ => lines,
    }
}

/// Trims trailing whitespace and ends the text with exactly one newline.
/// Empty text stays empty.
pub fn finish(text: &str) -> String {
    let trimmed = text.trim_end();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}\n")
    }
}

/// Slice without its leading and trailing blank lines.
pub fn trim_blank<'s, 'a>(lines: &'s [&'a str]) -> &'s [&'a str] {
    let start = leading_blank(lines);
    let end = lines.len() - trailing_blank(&lines[start..]);
    &lines[start..end]
}

fn leading_blank(lines: &[&str]) -> usize {
    lines.iter().take_while(|line| is_blank(line)).count()
}

fn trailing_blank(lines: &[&str]) -> usize {
    lines.iter().rev().take_while(|line| is_blank(line)).count()
}
