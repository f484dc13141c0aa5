//! Size Accountant
//!
//! Disk usage over a subtree. File storage is counted once per accounting
//! pass by identity, so a File reached through several hardlinks (or once
//! directly and once through a link) contributes its size a single time.
//! Symlinks are pointers and contribute nothing.

use std::collections::HashSet;

use super::tree::Tree;
use super::types::*;

/// Total bytes stored under `dir`, deduplicated by File identity.
pub fn subtree_size(tree: &Tree, dir: EntryId) -> u64 {
    let mut seen = HashSet::new();
    accumulate(tree, dir, &mut seen)
}

/// Bytes attributed to a single entry in its own pass.
pub fn entry_size(tree: &Tree, id: EntryId) -> u64 {
    let mut seen = HashSet::new();
    accumulate(tree, id, &mut seen)
}

fn accumulate(tree: &Tree, id: EntryId, seen: &mut HashSet<EntryId>) -> u64 {
    match &tree.get(id).kind {
        EntryKind::File { content } => {
            if seen.insert(id) { content.len() as u64 } else { 0 }
        }
        EntryKind::Hardlink { file } => {
            if seen.insert(*file) { tree.file_size(*file) } else { 0 }
        }
        EntryKind::Symlink { .. } => 0,
        EntryKind::Directory { children, .. } => children
            .values()
            .map(|child| accumulate(tree, *child, seen))
            .sum(),
    }
}

/// Used space next to the advisory quota of one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageReport {
    pub path: String,
    pub used: u64,
    pub quota: Option<u64>,
}

impl UsageReport {
    pub fn for_dir(tree: &Tree, dir: EntryId) -> Self {
        Self {
            path: tree.path_of(dir),
            used: subtree_size(tree, dir),
            quota: tree.quota(dir),
        }
    }

    /// Remaining bytes under the quota; saturates at zero when over.
    pub fn available(&self) -> Option<u64> {
        self.quota.map(|q| q.saturating_sub(self.used))
    }

    /// Percentage of the quota in use, rounded up. Computed in `u128` so
    /// quotas near `u64::MAX` cannot overflow.
    pub fn percent_used(&self) -> Option<u64> {
        match self.quota {
            Some(0) => Some(100),
            Some(q) => {
                let q = u128::from(q);
                let percent = (u128::from(self.used) * 100 + q - 1) / q;
                Some(u64::try_from(percent).unwrap_or(u64::MAX))
            }
            None => None,
        }
    }
}
