use crate::markup::{HEADING_MARKER, RULE};

/// Classification of a single line, computed without looking at its
/// neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// Empty or whitespace only.
    Blank,
    /// Horizontal rule: three or more hyphens and nothing else.
    Rule,
    /// Level-2 heading, carrying its trimmed title.
    Heading(&'a str),
    /// First character is the quote marker `>`.
    Quote,
    /// Anything else.
    Text,
}

impl LineClass<'_> {
    /// Blank lines and rules separate blocks without belonging to one.
    pub fn is_separator(&self) -> bool {
        matches!(self, LineClass::Blank | LineClass::Rule)
    }
}

/// Classifies one line. Trailing `\r` is ignored.
pub fn classify(line: &str) -> LineClass<'_> {
    let line = line.trim_end_matches('\r');
    if line.trim().is_empty() {
        return LineClass::Blank;
    }
    if is_rule(line) {
        return LineClass::Rule;
    }
    if let Some(title) = heading_title(line) {
        return LineClass::Heading(title);
    }
    if line.starts_with('>') {
        return LineClass::Quote;
    }
    LineClass::Text
}

/// Returns the title of a `## ` heading line.
pub fn heading_title(line: &str) -> Option<&str> {
    line.trim_end_matches('\r')
        .strip_prefix(HEADING_MARKER)
        .map(str::trim)
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn is_rule(line: &str) -> bool {
    let line = line.trim_end();
    line.len() >= RULE.len() && line.bytes().all(|b| b == b'-')
}
