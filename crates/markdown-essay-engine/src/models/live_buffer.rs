use xi_rope::Rope;

/// An open editing surface holding a document's unsaved state.
///
/// While a buffer is open it is the authoritative copy of the document: its
/// content may be ahead of what is on disk. Structural edits replace the
/// whole content and leave saving to the surface's own save cycle.
#[derive(Debug, Clone)]
pub struct LiveBuffer {
    /// Entire document as one rope
    buffer: Rope,
    /// Content differs from the last save
    dirty: bool,
    /// Incremented on every replace
    version: u64,
}

impl LiveBuffer {
    /// Opens a buffer on freshly loaded text; it starts clean.
    pub fn new(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            dirty: false,
            version: 0,
        }
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    /// Swaps in new content as one edit and marks the buffer dirty.
    pub fn replace(&mut self, text: &str) {
        let len = self.buffer.len();
        self.buffer.edit(0..len, text);
        self.dirty = true;
        self.version += 1;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called by the surface once its content has been written out.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}
