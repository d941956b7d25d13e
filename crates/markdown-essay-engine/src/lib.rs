pub mod attribution;
pub mod editing;
pub mod export;
pub mod io;
pub mod markup;
pub mod models;
pub mod notes;
pub mod parsing;
pub mod reconcile;
pub mod session;


// Re-export key types for easier usage
pub use editing::{EditError, Extraction, Outcome};
pub use export::render_export;
pub use io::{DiskStorage, IoError, Storage};
pub use markup::Markup;
pub use models::LiveBuffer;
pub use notes::{HighlightRef, SourceNote};
pub use parsing::{
    Block, BlockKind, Group, GroupedBlocks, Section, group_blocks, parse_blocks, parse_sections,
};
pub use reconcile::{DiskSource, LiveBufferSource, Reconciler, TextSource};
pub use session::{EssaySession, SessionError};
