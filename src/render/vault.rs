//! File resolution service.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::link::DocumentId;

/// A resolved vault file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileHandle {
    /// Vault-relative path with `/` separators
    pub path: String,
    /// File name without extension
    pub basename: String,
    /// Extension without the dot, as written
    pub extension: String,
}

impl FileHandle {
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let as_path = Path::new(&path);
        let basename = as_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = as_path
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            basename,
            extension,
        }
    }
}

/// Host lookups for link targets and file contents.
///
/// Reads happen on the cue worker thread, hence `Send + Sync`.
pub trait Vault: Send + Sync {
    /// Resolve link text relative to the document containing it.
    fn resolve(&self, link: &str, from: &DocumentId) -> Option<FileHandle>;

    /// Full text content of a file.
    fn read(&self, file: &FileHandle) -> io::Result<String>;
}

/// Vault backed by a directory on disk.
///
/// Links resolve against the folder of the linking document first, then
/// against the vault root. `..` segments are folded lexically; a path that
/// would climb above the root, or carries a root or drive prefix, never
/// resolves.
#[derive(Debug, Clone)]
pub struct DirVault {
    root: PathBuf,
}

impl DirVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Vault for DirVault {
    fn resolve(&self, link: &str, from: &DocumentId) -> Option<FileHandle> {
        let link = link.split('#').next().unwrap_or(link).trim_start_matches('/');
        if link.is_empty() {
            return None;
        }

        let sibling = Path::new(from.as_str())
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| dir.join(link));

        sibling
            .into_iter()
            .chain(std::iter::once(PathBuf::from(link)))
            .filter_map(|candidate| normalize(&candidate))
            .find(|candidate| self.root.join(candidate).is_file())
            .map(|found| {
                let path = found
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                FileHandle::from_path(path)
            })
    }

    fn read(&self, file: &FileHandle) -> io::Result<String> {
        let path = normalize(Path::new(&file.path)).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is outside the vault", file.path),
            )
        })?;
        fs::read_to_string(self.root.join(path))
    }
}

/// Fold `.` and `..` in a vault-relative path. `None` if it leaves the root.
fn normalize(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return None;
                }
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(out)
}
