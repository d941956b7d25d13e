//! # Structural Editing
//!
//! Every edit takes the full document text and returns a brand-new full
//! text. Nothing is patched in place, so a failed edit leaves the input
//! untouched and the caller commits the result as one whole-text replace.
//!
//! The shared shape of an edit:
//!
//! 1. compute the line range of the unit being moved or removed
//! 2. splice it out ([`splice::excise`])
//! 3. re-parse what is left to resolve the target position
//! 4. splice the payload back in ([`splice::join_with_payload`])
//!
//! Indices name units (blocks, groups, non-pinned sections) as the parsers
//! number them. Stale indices are not errors: they produce
//! [`Outcome::Unchanged`].
//!
//! ## Modules
//!
//! - **`splice`**: line cutting, joining and blank-line normalization
//! - **`blocks`**: move and remove a single block
//! - **`groups`**: move a heading together with its children
//! - **`sections`**: move, remove and extract `## ` sections
//! - **`insert`**: new content above the pinned section, and back-references

pub mod blocks;
pub mod groups;
pub mod insert;
pub mod sections;
pub mod splice;

use relative_path::RelativePathBuf;

pub use blocks::{move_block, remove_block};
pub use groups::move_group;
pub use insert::{
    add_reference, insert_note, insert_placeholder, insert_quote, insert_section, reference_entry,
};
pub use sections::{extract_section, move_section, remove_section};

use crate::markup::Markup;
use splice::{insertion_point, join_with_payload, split_lines};

/// Result of an edit that may legitimately do nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    /// The new full document text.
    Changed(String),
    /// Stale index or self-move; the document is untouched.
    Unchanged,
}

impl Outcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, Outcome::Changed(_))
    }

    /// New text, or `original` when nothing changed.
    pub fn into_text(self, original: &str) -> String {
        match self {
            Outcome::Changed(text) => text,
            Outcome::Unchanged => original.to_string(),
        }
    }
}

/// Preconditions checked before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("Nothing to extract: the section has no body")]
    EmptyExtraction,
    #[error("Name must not be empty")]
    EmptyName,
    #[error("Nothing selected to quote")]
    EmptySelection,
    #[error("'{0}' is the pinned section's name")]
    ReservedName(String),
    #[error("Destination already exists: {0}")]
    DestinationExists(RelativePathBuf),
}

/// Body of a section copied out for a new note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// The section's heading text.
    pub title: String,
    /// Body lines with surrounding blank lines trimmed.
    pub body: String,
}

/// Puts `payload` back into `remaining` in front of unit `to`, or above the
/// pinned section when `to` is past the last unit.
///
/// `starts` holds the first line of every unit, resolved against
/// `remaining` (not the text before removal).
pub(crate) fn place(
    remaining: &str,
    payload: &[&str],
    to: usize,
    starts: &[usize],
    markup: &Markup,
) -> String {
    let lines = split_lines(remaining);
    let at = match starts.get(to) {
        Some(&start) => start,
        None => insertion_point(&lines, markup),
    };
    log::debug!("placing {} line(s) at line {at}", payload.len());
    join_with_payload(&lines[..at], payload, &lines[at..])
}
