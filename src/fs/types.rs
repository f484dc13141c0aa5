//! File System Types
//!
//! Core types for the virtual file system: entry identities, the closed set
//! of entry kinds, and the error taxonomy shared by tree operations.

use indexmap::IndexMap;
use thiserror::Error;

/// File system errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FsError {
    #[error("EEXIST: file already exists, '{name}'")]
    NameConflict { name: String },

    #[error("ENOENT: no such file or directory, '{path}'")]
    NotFound { path: String },

    #[error("ENOTDIR: not a directory, '{path}'")]
    NotADirectory { path: String },

    #[error("EISDIR: illegal operation on a directory, '{path}'")]
    IsADirectory { path: String },

    #[error("EINVAL: not a regular file, '{path}'")]
    NotAFile { path: String },

    #[error("ELOOP: unresolved symbolic link, '{path}'")]
    Unresolved { path: String },
}

/// Stable identity of an entry in the tree arena.
///
/// Entries are never removed, so an id stays valid for the lifetime of the
/// tree that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub(crate) usize);

impl EntryId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The kind-specific payload of an entry.
#[derive(Debug, Clone)]
pub enum EntryKind {
    File {
        content: Vec<u8>,
    },
    Directory {
        children: IndexMap<String, EntryId>,
        quota: Option<u64>,
    },
    Symlink {
        target: String,
    },
    /// Aliases the File stored at `file`; never points at another link.
    Hardlink {
        file: EntryId,
    },
}

/// A node in the virtual file system tree.
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub owner: String,
    pub mode: u32,
    /// Directory this entry was inserted into; `None` only for the root.
    pub parent: Option<EntryId>,
    pub kind: EntryKind,
}

impl Entry {
    pub fn file(name: &str, owner: &str, content: Vec<u8>) -> Self {
        Self::with_kind(name, owner, DEFAULT_FILE_MODE, EntryKind::File { content })
    }

    pub fn directory(name: &str, owner: &str) -> Self {
        Self::with_kind(
            name,
            owner,
            DEFAULT_DIR_MODE,
            EntryKind::Directory { children: IndexMap::new(), quota: None },
        )
    }

    pub fn symlink(name: &str, owner: &str, target: &str) -> Self {
        Self::with_kind(
            name,
            owner,
            DEFAULT_SYMLINK_MODE,
            EntryKind::Symlink { target: target.to_string() },
        )
    }

    pub fn hardlink(name: &str, owner: &str, file: EntryId) -> Self {
        Self::with_kind(name, owner, DEFAULT_FILE_MODE, EntryKind::Hardlink { file })
    }

    pub fn with_kind(name: &str, owner: &str, mode: u32, kind: EntryKind) -> Self {
        Self {
            name: name.to_string(),
            owner: owner.to_string(),
            mode: mode & MODE_MASK,
            parent: None,
            kind,
        }
    }

    /// Check if entry is a file
    pub fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File { .. })
    }

    /// Check if entry is a directory
    pub fn is_directory(&self) -> bool {
        matches!(self.kind, EntryKind::Directory { .. })
    }

    /// Check if entry is a symlink
    pub fn is_symlink(&self) -> bool {
        matches!(self.kind, EntryKind::Symlink { .. })
    }

    /// Check if entry is a hardlink
    pub fn is_hardlink(&self) -> bool {
        matches!(self.kind, EntryKind::Hardlink { .. })
    }

    /// One-character type glyph used by long listings.
    pub fn type_glyph(&self) -> char {
        match self.kind {
            EntryKind::File { .. } => '-',
            EntryKind::Directory { .. } => 'd',
            EntryKind::Symlink { .. } => 'l',
            EntryKind::Hardlink { .. } => 'h',
        }
    }
}

/// Only the nine rwx bits are tracked.
pub const MODE_MASK: u32 = 0o777;
pub const DEFAULT_FILE_MODE: u32 = 0o644;
pub const DEFAULT_DIR_MODE: u32 = 0o755;
pub const DEFAULT_SYMLINK_MODE: u32 = 0o777;

// ============================================================================
// Tests
// ============================================================================
