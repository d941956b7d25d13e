//! Source notes and highlight references handed in by the host.
//!
//! The editor does not search or rank notes. It receives a chosen note's
//! name and raw text, and prepares the text for insertion.

use relative_path::RelativePath;

use crate::{editing::EditError, markup::RULE};

/// A note picked by the user to pull into the essay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceNote {
    /// Basename without extension; also the wikilink target.
    pub name: String,
    pub raw: String,
}

impl SourceNote {
    pub fn new(name: impl Into<String>, raw: impl Into<String>) -> Result<Self, EditError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(EditError::EmptyName);
        }
        Ok(Self {
            name,
            raw: raw.into(),
        })
    }

    /// Builds a note from its storage path, naming it after the file stem.
    pub fn from_path(path: &RelativePath, raw: impl Into<String>) -> Result<Self, EditError> {
        Self::new(display_name(path), raw)
    }

    /// Insertable body: front matter and a leading `# <name>` title removed,
    /// surrounding whitespace trimmed.
    pub fn body(&self) -> String {
        let text = strip_front_matter(&self.raw);
        let text = text.trim_start();

        let mut lines = text.lines();
        let without_title = match lines.next() {
            Some(first) if is_own_title(first, &self.name) => lines.collect::<Vec<_>>().join("\n"),
            _ => text.to_string(),
        };
        without_title.trim().to_string()
    }
}

/// File stem of a note path (strips the `.md` extension).
pub fn display_name(path: &RelativePath) -> String {
    path.file_name()
        .map(|name| name.strip_suffix(".md").unwrap_or(name))
        .unwrap_or_default()
        .to_string()
}

/// Turns a heading into a note name that is safe as a file name and a
/// wikilink target.
pub fn note_name(title: &str) -> Result<String, EditError> {
    const FORBIDDEN: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|', '#', '^', '[', ']'];
    let name: String = title.chars().filter(|c| !FORBIDDEN.contains(c)).collect();
    let name = name.split_whitespace().collect::<Vec<_>>().join(" ");
    if name.is_empty() {
        return Err(EditError::EmptyName);
    }
    Ok(name)
}

fn strip_front_matter(raw: &str) -> &str {
    let mut lines = raw.split_inclusive('\n');
    match lines.next() {
        Some(first) if first.trim_end() == RULE => {}
        _ => return raw,
    }

    let mut consumed = raw.split_inclusive('\n').next().map_or(0, str::len);
    for line in lines {
        consumed += line.len();
        if line.trim_end() == RULE {
            return &raw[consumed..];
        }
    }
    // Unterminated fence: not front matter.
    raw
}

fn is_own_title(line: &str, name: &str) -> bool {
    line.strip_prefix("# ")
        .is_some_and(|title| title.trim().eq_ignore_ascii_case(name.trim()))
}

/// Metadata about a highlight, supplied by the highlight importer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightRef {
    pub author: String,
    pub source_title: String,
    /// Link markup passed through verbatim.
    pub link_markup: String,
}

/// Marker line above the reference block of a distilled note.
pub const REFERENCE_MARKER: &str = "**Reference**";

/// Content for a distilled note, with the highlight reference appended
/// under [`REFERENCE_MARKER`] when there is one.
pub fn compose_distilled(content: &str, reference: Option<&HighlightRef>) -> String {
    let content = content.trim();
    let Some(reference) = reference else {
        return format!("{content}\n");
    };

    let mut out = String::new();
    if !content.is_empty() {
        out.push_str(content);
        out.push_str("\n\n");
    }
    out.push_str(REFERENCE_MARKER);
    out.push('\n');
    for line in [
        reference.author.trim(),
        reference.source_title.trim(),
        reference.link_markup.trim(),
    ] {
        if !line.is_empty() {
            out.push('\n');
            out.push_str(line);
        }
    }
    out.push('\n');
    out
}

/// Index of the first candidate matching `selection`.
///
/// Best effort: whitespace is collapsed and case ignored, and either text
/// may contain the other. Reformatted text can fail to match.
pub fn match_highlight<S: AsRef<str>>(selection: &str, candidates: &[S]) -> Option<usize> {
    let needle = normalize(selection);
    if needle.is_empty() {
        return None;
    }
    candidates.iter().position(|candidate| {
        let hay = normalize(candidate.as_ref());
        !hay.is_empty() && (hay.contains(&needle) || needle.contains(&hay))
    })
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
