//! # Structure Parsing
//!
//! Structure is always derived from the text on demand and thrown away after
//! use. Nothing here is cached between edits.
//!
//! ## Modules
//!
//! - **`lines`**: lossless line splitting and joining
//! - **`classify`**: `LineClass` for a single line (blank, rule, heading, quote, text)
//! - **`sections`**: `## ` sections, including the pinned one
//! - **`blocks`**: headings, quoted passages and prose before the pinned section
//! - **`groups`**: heading-plus-children view over blocks
//! - **`preview`**: truncated labels for blocks
//!
//! ## Key Invariants
//!
//! - All ranges are line indices into the `\n`-split text, end exclusive
//! - Sections never overlap; blocks never overlap
//! - Only blank and rule lines fall between blocks

pub mod blocks;
pub mod classify;
pub mod groups;
pub mod lines;
pub mod preview;
pub mod sections;

pub use blocks::{Block, BlockKind, block_region_end, parse_blocks};
pub use classify::{LineClass, classify};
pub use groups::{Group, GroupedBlocks, group_blocks};
pub use lines::{LineEnding, join_lines, split_lines};
pub use sections::{
    Section, content_sections, parse_sections, pinned_section, section_extent, sections_from_lines,
};
