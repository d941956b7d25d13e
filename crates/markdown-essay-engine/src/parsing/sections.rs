use std::ops::Range;

use serde::Serialize;

use super::{
    blocks::block_region_end,
    classify::{LineClass, classify},
    lines::split_lines,
};
use crate::markup::Markup;

/// A contiguous run of lines opened by a level-2 heading.
///
/// `end` is exclusive: either the next heading's line or the line count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub start: usize,
    pub end: usize,
    /// True for the first section whose title names the pinned section.
    pub pinned: bool,
}

impl Section {
    pub fn lines(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Lines after the heading line.
    pub fn body(&self) -> Range<usize> {
        (self.start + 1).min(self.end)..self.end
    }
}

/// Scans for `## ` headings and returns the sections they open, in order.
///
/// Content before the first heading belongs to no section. At most one
/// section is flagged `pinned`; later duplicates of the pinned title are
/// ordinary sections.
pub fn parse_sections(text: &str, markup: &Markup) -> Vec<Section> {
    sections_from_lines(&split_lines(text), markup)
}

/// [`parse_sections`] over lines that are already split.
pub fn sections_from_lines(lines: &[&str], markup: &Markup) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut seen_pinned = false;

    for (i, line) in lines.iter().enumerate() {
        if let LineClass::Heading(title) = classify(line) {
            if let Some(open) = sections.last_mut() {
                open.end = i;
            }
            let pinned = !seen_pinned && markup.is_pinned_title(title);
            seen_pinned |= pinned;
            sections.push(Section {
                title: title.to_string(),
                start: i,
                end: lines.len(),
                pinned,
            });
        }
    }

    sections
}

/// The pinned section, if the document has one.
pub fn pinned_section(sections: &[Section]) -> Option<&Section> {
    sections.iter().find(|s| s.pinned)
}

/// Sections eligible for move, remove and extract: everything but the pinned
/// one, in document order.
pub fn content_sections(sections: &[Section]) -> Vec<&Section> {
    sections.iter().filter(|s| !s.pinned).collect()
}

/// Lines that belong to `section` as a unit of editing or export.
///
/// A section sitting right above the pinned section stops before the blank
/// and rule padding in front of it; that padding stays with the pinned
/// section.
pub fn section_extent(
    section: &Section,
    sections: &[Section],
    lines: &[&str],
    markup: &Markup,
) -> Range<usize> {
    match pinned_section(sections) {
        Some(pinned) if pinned.start == section.end => {
            section.start..block_region_end(lines, markup).max(section.start + 1)
        }
        _ => section.lines(),
    }
}
