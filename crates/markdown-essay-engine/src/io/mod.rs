use relative_path::RelativePath;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("File already exists: {0}")]
    AlreadyExists(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid notes directory: {0}")]
    InvalidNotesDir(String),
}

/// Durable storage for notes, addressed by paths relative to a notes root.
pub trait Storage {
    /// Reads a whole note.
    fn read(&self, path: &RelativePath) -> Result<String, IoError>;
    /// Replaces an existing note. Fails with [`IoError::NotFound`] if the
    /// note is gone.
    fn write(&self, path: &RelativePath, content: &str) -> Result<(), IoError>;
    fn exists(&self, path: &RelativePath) -> bool;
    /// Creates a new note. Never overwrites: fails with
    /// [`IoError::AlreadyExists`].
    fn create(&self, path: &RelativePath, content: &str) -> Result<(), IoError>;
    /// Deletes a note. Fails with [`IoError::NotFound`] if it is gone.
    fn remove(&self, path: &RelativePath) -> Result<(), IoError>;
}

/// Notes stored as files under a root directory.
#[derive(Debug, Clone)]
pub struct DiskStorage {
    notes_root: PathBuf,
}

impl DiskStorage {
    pub fn new(notes_root: impl Into<PathBuf>) -> Result<Self, IoError> {
        let notes_root = notes_root.into();
        validate_notes_dir(&notes_root)?;
        Ok(Self { notes_root })
    }

    pub fn notes_root(&self) -> &Path {
        &self.notes_root
    }
}

impl Storage for DiskStorage {
    fn read(&self, path: &RelativePath) -> Result<String, IoError> {
        read_file(path, &self.notes_root)
    }

    fn write(&self, path: &RelativePath, content: &str) -> Result<(), IoError> {
        let absolute_path = path.to_path(&self.notes_root);
        if !absolute_path.exists() {
            return Err(IoError::NotFound(absolute_path));
        }
        fs::write(&absolute_path, content).map_err(IoError::Io)
    }

    fn exists(&self, path: &RelativePath) -> bool {
        path.to_path(&self.notes_root).exists()
    }

    fn create(&self, path: &RelativePath, content: &str) -> Result<(), IoError> {
        let absolute_path = path.to_path(&self.notes_root);

        // Create parent directories if they don't exist
        if let Some(parent) = absolute_path.parent() {
            fs::create_dir_all(parent).map_err(IoError::Io)?;
        }

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&absolute_path)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => IoError::AlreadyExists(absolute_path.clone()),
                _ => IoError::Io(e),
            })?;
        std::io::Write::write_all(&mut file, content.as_bytes()).map_err(IoError::Io)
    }

    fn remove(&self, path: &RelativePath) -> Result<(), IoError> {
        let absolute_path = path.to_path(&self.notes_root);
        if !absolute_path.exists() {
            return Err(IoError::NotFound(absolute_path));
        }
        fs::remove_file(&absolute_path).map_err(IoError::Io)
    }
}

/// Read a markdown file and return its content
pub fn read_file(relative_path: &RelativePath, notes_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(notes_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

pub fn validate_notes_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidNotesDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}
