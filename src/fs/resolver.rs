//! Path Resolver
//!
//! Walks slash-separated paths through the tree and dereferences links down
//! to a concrete File or Directory.
//!
//! Hardlinks resolve in one step. Symlink targets are walked segment by
//! segment, absolute targets from the root and relative ones from the
//! caller's working directory. Each resolution carries the set of symlinks
//! already on the current chain; meeting one of them again means a cycle and
//! the result is `Unresolved` instead of a loop. A call also stops with
//! `Unresolved` once it has followed `MAX_SYMLINK_FOLLOWS` symlinks, which
//! bounds the work on deep non-cyclic chains.

use std::collections::HashSet;

use super::tree::Tree;
use super::types::*;

/// Symlink dereferences allowed in one lookup or resolution. Past this the
/// result is `Unresolved`, as with ELOOP.
pub const MAX_SYMLINK_FOLLOWS: usize = 40;

/// A link-free entry: what every dereference ends at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    File(EntryId),
    Directory(EntryId),
}

impl Resolved {
    pub fn id(self) -> EntryId {
        match self {
            Resolved::File(id) | Resolved::Directory(id) => id,
        }
    }
}

/// Dereference `entry` to a File or Directory.
pub fn resolve(tree: &Tree, entry: EntryId, cwd: EntryId) -> Result<Resolved, FsError> {
    let mut budget = MAX_SYMLINK_FOLLOWS;
    resolve_chain(tree, entry, cwd, HashSet::new(), &mut budget)
}

/// Look up `path` from `cwd` without dereferencing the final component.
///
/// Intermediate components are dereferenced so paths may pass through
/// symlinked directories. An empty path names `cwd` itself.
pub fn lookup_path(tree: &Tree, cwd: EntryId, path: &str) -> Result<EntryId, FsError> {
    let mut budget = MAX_SYMLINK_FOLLOWS;
    walk(tree, cwd, path, &HashSet::new(), &mut budget)
}

/// Look up `path` and dereference the result.
pub fn resolve_path(tree: &Tree, cwd: EntryId, path: &str) -> Result<Resolved, FsError> {
    let id = lookup_path(tree, cwd, path)?;
    resolve(tree, id, cwd)
}

/// Split `path` into the directory that would contain it and the final name.
///
/// Used by creating commands: the parent must exist (through links) and be a
/// directory; the name must be a plain component.
pub fn parent_and_name(tree: &Tree, cwd: EntryId, path: &str) -> Result<(EntryId, String), FsError> {
    let trimmed = if path.len() > 1 { path.trim_end_matches('/') } else { path };
    let (parent_path, name) = match trimmed.rfind('/') {
        Some(0) => ("/", &trimmed[1..]),
        Some(pos) => (&trimmed[..pos], &trimmed[pos + 1..]),
        None => ("", trimmed),
    };
    if name.is_empty() || name == "." || name == ".." {
        return Err(FsError::NotFound { path: path.to_string() });
    }
    match resolve_path(tree, cwd, parent_path)? {
        Resolved::Directory(dir) => Ok((dir, name.to_string())),
        Resolved::File(_) => Err(FsError::NotADirectory { path: parent_path.to_string() }),
    }
}

fn resolve_chain(
    tree: &Tree,
    entry: EntryId,
    cwd: EntryId,
    mut chain: HashSet<EntryId>,
    budget: &mut usize,
) -> Result<Resolved, FsError> {
    let mut current = entry;
    loop {
        match &tree.get(current).kind {
            EntryKind::File { .. } => return Ok(Resolved::File(current)),
            EntryKind::Directory { .. } => return Ok(Resolved::Directory(current)),
            EntryKind::Hardlink { file } => return Ok(Resolved::File(*file)),
            EntryKind::Symlink { target } => {
                if *budget == 0 || !chain.insert(current) {
                    return Err(unresolved(tree, entry));
                }
                *budget -= 1;
                current = walk(tree, cwd, target, &chain, budget).map_err(|_| unresolved(tree, entry))?;
            }
        }
    }
}

fn walk(
    tree: &Tree,
    cwd: EntryId,
    path: &str,
    chain: &HashSet<EntryId>,
    budget: &mut usize,
) -> Result<EntryId, FsError> {
    let mut current = if path.starts_with('/') { tree.root() } else { cwd };
    for segment in path.split('/').filter(|s| !s.is_empty() && *s != ".") {
        let dir = match resolve_chain(tree, current, cwd, chain.clone(), budget)? {
            Resolved::Directory(dir) => dir,
            Resolved::File(_) => return Err(FsError::NotADirectory { path: path.to_string() }),
        };
        current = if segment == ".." {
            tree.parent(dir).unwrap_or_else(|| tree.root())
        } else {
            tree.lookup(dir, segment)
                .map_err(|_| FsError::NotFound { path: path.to_string() })?
        };
    }
    Ok(current)
}

fn unresolved(tree: &Tree, entry: EntryId) -> FsError {
    FsError::Unresolved { path: tree.get(entry).name.clone() }
}

// ============================================================================
// Tests
// ============================================================================
