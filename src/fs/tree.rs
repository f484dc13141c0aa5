//! Entry Tree
//!
//! Arena-backed tree of entries. Every entry lives in one `Vec` and is
//! addressed by its `EntryId`; directories map child names to ids. Hardlinks
//! store the id of the File they alias, so sharing and identity checks are
//! plain integer comparisons.

use super::types::*;

/// The virtual file system tree. Has exactly one root, created with no parent.
#[derive(Debug, Clone)]
pub struct Tree {
    entries: Vec<Entry>,
    root: EntryId,
}

impl Tree {
    /// Create a tree holding only the root directory.
    pub fn new(root_owner: &str) -> Self {
        let root = Entry::directory("/", root_owner);
        Self { entries: vec![root], root: EntryId(0) }
    }

    pub fn root(&self) -> EntryId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: EntryId) -> &Entry {
        &self.entries[id.0]
    }

    pub fn get_mut(&mut self, id: EntryId) -> &mut Entry {
        &mut self.entries[id.0]
    }

    /// Insert `entry` into directory `dir`.
    ///
    /// Fails with `NameConflict` when the name is already taken; the existing
    /// child is left untouched.
    pub fn insert(&mut self, dir: EntryId, mut entry: Entry) -> Result<EntryId, FsError> {
        let id = EntryId(self.entries.len());
        let name = entry.name.clone();
        match &self.entries[dir.0].kind {
            EntryKind::Directory { children, .. } => {
                if children.contains_key(&name) {
                    return Err(FsError::NameConflict { name });
                }
            }
            _ => return Err(FsError::NotADirectory { path: self.entries[dir.0].name.clone() }),
        }
        if let EntryKind::Hardlink { file } = entry.kind {
            if !self.entries.get(file.0).map_or(false, Entry::is_file) {
                return Err(FsError::NotAFile { path: name });
            }
        }
        entry.parent = Some(dir);
        self.entries.push(entry);
        if let EntryKind::Directory { children, .. } = &mut self.entries[dir.0].kind {
            children.insert(name, id);
        }
        Ok(id)
    }

    /// Look up a direct child of `dir` by name.
    pub fn lookup(&self, dir: EntryId, name: &str) -> Result<EntryId, FsError> {
        match &self.get(dir).kind {
            EntryKind::Directory { children, .. } => children
                .get(name)
                .copied()
                .ok_or_else(|| FsError::NotFound { path: name.to_string() }),
            _ => Err(FsError::NotADirectory { path: self.get(dir).name.clone() }),
        }
    }

    /// Child names in internal listing order (insertion order). Callers sort
    /// for display.
    pub fn list_names(&self, dir: EntryId) -> Vec<&str> {
        self.children(dir).map(|(name, _)| name).collect()
    }

    /// Children of `dir` in listing order; empty for non-directories.
    pub fn children(&self, dir: EntryId) -> impl Iterator<Item = (&str, EntryId)> + '_ {
        let children = match &self.get(dir).kind {
            EntryKind::Directory { children, .. } => Some(children),
            _ => None,
        };
        children
            .into_iter()
            .flat_map(|c| c.iter().map(|(name, id)| (name.as_str(), *id)))
    }

    pub fn parent(&self, id: EntryId) -> Option<EntryId> {
        self.get(id).parent
    }

    /// Absolute path of an entry, following parent links.
    pub fn path_of(&self, id: EntryId) -> String {
        let mut parts = Vec::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            if cur == self.root {
                break;
            }
            parts.push(self.get(cur).name.as_str());
            current = self.parent(cur);
        }
        parts.reverse();
        format!("/{}", parts.join("/"))
    }

    /// Byte length of a File's content; zero for anything else.
    pub fn file_size(&self, id: EntryId) -> u64 {
        match &self.get(id).kind {
            EntryKind::File { content } => content.len() as u64,
            _ => 0,
        }
    }

    pub fn content(&self, id: EntryId) -> Option<&[u8]> {
        match &self.get(id).kind {
            EntryKind::File { content } => Some(content),
            _ => None,
        }
    }

    /// Replace a File's content. Size is derived from the content length.
    pub fn write_content(&mut self, file: EntryId, data: Vec<u8>) -> Result<(), FsError> {
        let name = self.get(file).name.clone();
        match &mut self.get_mut(file).kind {
            EntryKind::File { content } => {
                *content = data;
                Ok(())
            }
            EntryKind::Directory { .. } => Err(FsError::IsADirectory { path: name }),
            _ => Err(FsError::NotAFile { path: name }),
        }
    }

    pub fn append_content(&mut self, file: EntryId, data: &[u8]) -> Result<(), FsError> {
        let mut combined = self
            .content(file)
            .map(<[u8]>::to_vec)
            .ok_or_else(|| FsError::NotAFile { path: self.get(file).name.clone() })?;
        combined.extend_from_slice(data);
        self.write_content(file, combined)
    }

    pub fn quota(&self, dir: EntryId) -> Option<u64> {
        match &self.get(dir).kind {
            EntryKind::Directory { quota, .. } => *quota,
            _ => None,
        }
    }

    /// Record an advisory quota. Never checked on writes.
    pub fn set_quota(&mut self, dir: EntryId, limit: Option<u64>) -> Result<(), FsError> {
        let name = self.get(dir).name.clone();
        match &mut self.get_mut(dir).kind {
            EntryKind::Directory { quota, .. } => {
                *quota = limit;
                Ok(())
            }
            _ => Err(FsError::NotADirectory { path: name }),
        }
    }

    /// Every directory in the tree, depth-first from the root.
    pub fn directories(&self) -> Vec<EntryId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(dir) = stack.pop() {
            out.push(dir);
            let mut subdirs: Vec<EntryId> = self
                .children(dir)
                .map(|(_, id)| id)
                .filter(|id| self.get(*id).is_directory())
                .collect();
            subdirs.reverse();
            stack.extend(subdirs);
        }
        out
    }

    /// Create every directory along an absolute path, reusing existing ones.
    /// Used to seed default layouts.
    pub fn ensure_dir(&mut self, path: &str, owner: &str) -> Result<EntryId, FsError> {
        let mut current = self.root;
        for part in path.split('/').filter(|p| !p.is_empty()) {
            current = match self.lookup(current, part) {
                Ok(id) if self.get(id).is_directory() => id,
                Ok(_) => return Err(FsError::NotADirectory { path: part.to_string() }),
                Err(_) => self.insert(current, Entry::directory(part, owner))?,
            };
        }
        Ok(current)
    }
}

// ============================================================================
// Tests
// ============================================================================
