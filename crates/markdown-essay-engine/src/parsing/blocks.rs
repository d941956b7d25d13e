use std::ops::Range;

use serde::Serialize;

use super::{
    classify::{LineClass, classify},
    lines::split_lines,
    preview::{PREVIEW_CHARS, preview, quote_preview},
    sections::{pinned_section, sections_from_lines},
};
use crate::{attribution, markup::Markup};

/// The kind of a block, with the data the sidebar shows for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BlockKind {
    /// A single `## ` heading line.
    Heading { title: String },
    /// Consecutive `>` lines.
    Quote {
        preview: String,
        /// Source named by an attribution sigil on the last line.
        attribution: Option<String>,
    },
    /// Consecutive lines that are none of the above and not separators.
    Prose { preview: String },
}

/// A minimal run of lines of one kind. `end` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub kind: BlockKind,
    pub start: usize,
    pub end: usize,
}

impl Block {
    pub fn lines(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn is_heading(&self) -> bool {
        matches!(self.kind, BlockKind::Heading { .. })
    }

    /// Heading title, quote preview or prose preview.
    pub fn label(&self) -> &str {
        match &self.kind {
            BlockKind::Heading { title } => title,
            BlockKind::Quote { preview, .. } | BlockKind::Prose { preview } => preview,
        }
    }
}

/// Parses blocks from the region before the pinned section.
///
/// The region ends at the pinned heading, minus any blank or rule lines
/// directly above it; with no pinned section it is the whole document.
/// Everything inside or after the pinned section is invisible here.
pub fn parse_blocks(text: &str, markup: &Markup) -> Vec<Block> {
    let lines = split_lines(text);
    let end = block_region_end(&lines, markup);

    let mut builder = BlockBuilder::new(&lines);
    for (i, line) in lines[..end].iter().enumerate() {
        builder.push(i, classify(line));
    }
    builder.finish()
}

/// First line index not scanned by [`parse_blocks`].
pub fn block_region_end(lines: &[&str], markup: &Markup) -> usize {
    let sections = sections_from_lines(lines, markup);
    let mut end = pinned_section(&sections).map_or(lines.len(), |s| s.start);
    while end > 0 && classify(lines[end - 1]).is_separator() {
        end -= 1;
    }
    end
}

#[derive(Debug, Clone, Copy)]
enum LeafState {
    None,
    Quote { start: usize },
    Prose { start: usize },
}

/// Line-at-a-time block construction. Each pushed line either extends the
/// open leaf, closes it, or opens a new one.
struct BlockBuilder<'a> {
    lines: &'a [&'a str],
    leaf: LeafState,
    /// One past the last pushed line.
    next: usize,
    out: Vec<Block>,
}

impl<'a> BlockBuilder<'a> {
    fn new(lines: &'a [&'a str]) -> Self {
        Self {
            lines,
            leaf: LeafState::None,
            next: 0,
            out: vec![],
        }
    }

    fn push(&mut self, i: usize, class: LineClass<'_>) {
        self.next = i + 1;
        match class {
            LineClass::Blank | LineClass::Rule => self.flush(i),
            LineClass::Heading(title) => {
                self.flush(i);
                self.out.push(Block {
                    kind: BlockKind::Heading {
                        title: title.to_string(),
                    },
                    start: i,
                    end: i + 1,
                });
            }
            LineClass::Quote => {
                if !matches!(self.leaf, LeafState::Quote { .. }) {
                    self.flush(i);
                    self.leaf = LeafState::Quote { start: i };
                }
            }
            LineClass::Text => {
                if !matches!(self.leaf, LeafState::Prose { .. }) {
                    self.flush(i);
                    self.leaf = LeafState::Prose { start: i };
                }
            }
        }
    }

    fn finish(mut self) -> Vec<Block> {
        // EOF flush
        self.flush(self.next);
        self.out
    }

    /// Closes the open leaf at line `end` (exclusive).
    fn flush(&mut self, end: usize) {
        let prev = std::mem::replace(&mut self.leaf, LeafState::None);
        let block = match prev {
            LeafState::None => return,
            LeafState::Quote { start } => Block {
                kind: BlockKind::Quote {
                    preview: quote_preview(self.lines[start], PREVIEW_CHARS),
                    attribution: attribution::decode(self.lines[end - 1]).map(str::to_string),
                },
                start,
                end,
            },
            LeafState::Prose { start } => Block {
                kind: BlockKind::Prose {
                    preview: preview(self.lines[start], PREVIEW_CHARS),
                },
                start,
                end,
            },
        };
        self.out.push(block);
    }
}
