//! Where the current text of a document lives.
//!
//! A document open in a [`LiveBuffer`] is read from and written to that
//! buffer, so structural edits never clobber unsaved changes with a stale
//! disk copy. Otherwise storage is used directly. Every read fetches the
//! current truth; nothing is cached here.

use std::collections::HashMap;

use relative_path::{RelativePath, RelativePathBuf};

use crate::{
    io::{IoError, Storage},
    models::LiveBuffer,
};

/// Read and whole-text replace of one document.
pub trait TextSource {
    fn read(&self) -> Result<String, IoError>;
    fn write(&mut self, text: &str) -> Result<(), IoError>;
}

/// An open buffer; writes mark it dirty for its own save cycle.
pub struct LiveBufferSource<'a> {
    buffer: &'a mut LiveBuffer,
}

impl TextSource for LiveBufferSource<'_> {
    fn read(&self) -> Result<String, IoError> {
        Ok(self.buffer.text())
    }

    fn write(&mut self, text: &str) -> Result<(), IoError> {
        self.buffer.replace(text);
        Ok(())
    }
}

/// A document that is not open anywhere.
pub struct DiskSource<'a, S: Storage> {
    storage: &'a S,
    path: &'a RelativePath,
}

impl<S: Storage> TextSource for DiskSource<'_, S> {
    fn read(&self) -> Result<String, IoError> {
        self.storage.read(self.path)
    }

    fn write(&mut self, text: &str) -> Result<(), IoError> {
        self.storage.write(self.path, text)
    }
}

/// Storage plus the registry of open buffers.
pub struct Reconciler<S: Storage> {
    storage: S,
    buffers: HashMap<RelativePathBuf, LiveBuffer>,
}

impl<S: Storage> Reconciler<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            buffers: HashMap::new(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Opens a buffer on the stored document, or returns the one already
    /// open.
    pub fn open_buffer(&mut self, path: &RelativePath) -> Result<&mut LiveBuffer, IoError> {
        if !self.buffers.contains_key(path) {
            let text = self.storage.read(path)?;
            log::debug!("opening buffer for {path}");
            self.buffers.insert(path.to_relative_path_buf(), LiveBuffer::new(&text));
        }
        self.buffers
            .get_mut(path)
            .ok_or_else(|| IoError::NotFound(path.to_path("")))
    }

    /// Closes a buffer, handing back its final state. Unsaved content is the
    /// caller's to save or discard.
    pub fn close_buffer(&mut self, path: &RelativePath) -> Option<LiveBuffer> {
        self.buffers.remove(path)
    }

    pub fn buffer(&self, path: &RelativePath) -> Option<&LiveBuffer> {
        self.buffers.get(path)
    }

    /// Writes an open buffer to storage and marks it saved.
    pub fn save_buffer(&mut self, path: &RelativePath) -> Result<(), IoError> {
        let Some(buffer) = self.buffers.get_mut(path) else {
            return Ok(());
        };
        self.storage.write(path, &buffer.text())?;
        buffer.mark_saved();
        Ok(())
    }

    /// The authoritative source for `path`: its open buffer, else storage.
    pub fn source<'a>(&'a mut self, path: &'a RelativePath) -> Box<dyn TextSource + 'a> {
        match self.buffers.get_mut(path) {
            Some(buffer) => Box::new(LiveBufferSource { buffer }),
            None => Box::new(DiskSource {
                storage: &self.storage,
                path,
            }),
        }
    }

    pub fn current_text(&mut self, path: &RelativePath) -> Result<String, IoError> {
        self.source(path).read()
    }

    /// Replaces the whole text of `path`. A document missing from storage
    /// is a hard failure and nothing is written.
    pub fn commit(&mut self, path: &RelativePath, text: &str) -> Result<(), IoError> {
        let live = self.buffers.contains_key(path);
        if !live && !self.storage.exists(path) {
            log::warn!("commit to missing document {path}");
            return Err(IoError::NotFound(path.to_path("")));
        }
        self.source(path).write(text)?;
        log::info!(
            "committed {} bytes to {path} ({})",
            text.len(),
            if live { "live buffer" } else { "storage" }
        );
        Ok(())
    }
}
