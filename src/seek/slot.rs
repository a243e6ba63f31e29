//! Single-slot storage for cross-page seek requests.
//!
//! Last write wins. There is no locking: concurrent hovers are resolved
//! purely by the order of writes and clears.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{SeekRequest, SeekSlotError};

/// A single global slot holding at most one [`SeekRequest`].
pub trait SeekSlot {
    /// Replace the slot contents.
    fn write(&mut self, request: &SeekRequest) -> Result<(), SeekSlotError>;

    /// Current request. Malformed records read as empty.
    fn read(&self) -> Result<Option<SeekRequest>, SeekSlotError>;

    /// Empty the slot. Clearing an empty slot is not an error.
    fn clear(&mut self) -> Result<(), SeekSlotError>;
}

fn decode(raw: &str) -> Option<SeekRequest> {
    if raw.trim().is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(request) => Some(request),
        Err(e) => {
            tracing::debug!(error = %e, "ignoring seek record");
            None
        }
    }
}

/// In-process slot. Stores the encoded record, like the persistent one.
#[derive(Debug, Default)]
pub struct MemorySlot {
    record: Option<String>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored record, if any.
    pub fn raw(&self) -> Option<&str> {
        self.record.as_deref()
    }

    /// Store a raw record without validation.
    #[cfg(test)]
    pub(crate) fn put_raw(&mut self, record: impl Into<String>) {
        self.record = Some(record.into());
    }
}

impl SeekSlot for MemorySlot {
    fn write(&mut self, request: &SeekRequest) -> Result<(), SeekSlotError> {
        self.record = Some(request.to_string());
        Ok(())
    }

    fn read(&self) -> Result<Option<SeekRequest>, SeekSlotError> {
        Ok(self.record.as_deref().and_then(decode))
    }

    fn clear(&mut self) -> Result<(), SeekSlotError> {
        self.record = None;
        Ok(())
    }
}

/// Slot persisted as one small file, shared between processes.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// File name used inside the data directory.
    pub const FILE_NAME: &'static str = "seek-request";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SeekSlot for FileSlot {
    fn write(&mut self, request: &SeekRequest) -> Result<(), SeekSlotError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, request.to_string())?;
        Ok(())
    }

    fn read(&self) -> Result<Option<SeekRequest>, SeekSlotError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(decode(&raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn clear(&mut self) -> Result<(), SeekSlotError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
