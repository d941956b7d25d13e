//! Markup conventions owned by the editor.
//!
//! These strings are a wire contract with documents already on disk, so they
//! are bit-exact. Only the pinned section name is configurable.

use serde::{Deserialize, Serialize};

/// Level-2 heading marker that opens a section.
pub const HEADING_MARKER: &str = "## ";
/// Per-line marker for quoted passages.
pub const QUOTE_MARKER: &str = "> ";
/// Shortest horizontal rule.
pub const RULE: &str = "---";
pub const WIKILINK_OPEN: &str = "[[";
pub const WIKILINK_CLOSE: &str = "]]";
pub const WIKILINK_ALIAS: char = '|';
/// Display text that turns a wikilink into an attribution sigil.
pub const ATTRIBUTION_DISPLAY: &str = "*";
/// Default name of the pinned (bibliography) section.
pub const DEFAULT_PINNED_SECTION: &str = "Sources";

/// Explicit configuration threaded into every parser and mutator call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markup {
    /// Heading text of the section that always sorts last.
    #[serde(default = "default_pinned_section")]
    pub pinned_section: String,
}

fn default_pinned_section() -> String {
    DEFAULT_PINNED_SECTION.to_string()
}

impl Default for Markup {
    fn default() -> Self {
        Self {
            pinned_section: default_pinned_section(),
        }
    }
}

impl Markup {
    pub fn new(pinned_section: impl Into<String>) -> Self {
        Self {
            pinned_section: pinned_section.into(),
        }
    }

    /// Whether a heading title names the pinned section.
    ///
    /// Comparison ignores surrounding whitespace and letter case.
    pub fn is_pinned_title(&self, title: &str) -> bool {
        title.trim().to_lowercase() == self.pinned_section.trim().to_lowercase()
    }

    /// The heading line used when the pinned section has to be created.
    pub fn pinned_heading(&self) -> String {
        format!("{HEADING_MARKER}{}", self.pinned_section.trim())
    }
}
