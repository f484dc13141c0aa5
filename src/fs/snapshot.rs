//! Tree Snapshots
//!
//! Serializes the whole tree to a single JSON document and back. Nodes are
//! tagged by `type` (`file`, `dir`, `symlink`, `hardlink`). A hardlink node
//! names a File in its own directory; loading resolves those names in a
//! second pass so the link aliases the rebuilt File rather than a copy.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::tree::Tree;
use super::types::*;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("cannot access '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("hardlink '{name}' targets missing file '{target}'")]
    DanglingHardlink { name: String, target: String },

    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

/// One node of the persisted tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    File {
        name: String,
        owner: String,
        mode: u32,
        #[serde(default)]
        content: String,
    },
    Dir {
        name: String,
        owner: String,
        mode: u32,
        #[serde(default)]
        contents: IndexMap<String, Node>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_size: Option<u64>,
    },
    Symlink {
        name: String,
        owner: String,
        mode: u32,
        target: String,
    },
    Hardlink {
        name: String,
        owner: String,
        mode: u32,
        target: String,
    },
}

/// Convert the tree into its persisted node form.
pub fn to_node(tree: &Tree) -> Node {
    node_for(tree, tree.root())
}

fn node_for(tree: &Tree, id: EntryId) -> Node {
    let entry = tree.get(id);
    let name = entry.name.clone();
    let owner = entry.owner.clone();
    let mode = entry.mode;
    match &entry.kind {
        EntryKind::File { content } => Node::File {
            name,
            owner,
            mode,
            content: String::from_utf8_lossy(content).into_owned(),
        },
        EntryKind::Directory { children, quota } => Node::Dir {
            name,
            owner,
            mode,
            contents: children
                .iter()
                .map(|(child_name, child)| (child_name.clone(), node_for(tree, *child)))
                .collect(),
            max_size: *quota,
        },
        EntryKind::Symlink { target } => Node::Symlink { name, owner, mode, target: target.clone() },
        EntryKind::Hardlink { file } => {
            if tree.parent(*file) == entry.parent {
                Node::Hardlink { name, owner, mode, target: tree.get(*file).name.clone() }
            } else {
                // The format can only name a File in the same directory.
                warn!(
                    link = %tree.path_of(id),
                    file = %tree.path_of(*file),
                    "hardlink crosses directories, saving a copy of the file"
                );
                let content = tree.content(*file).unwrap_or_default();
                Node::File { name, owner, mode, content: String::from_utf8_lossy(content).into_owned() }
            }
        }
    }
}

struct PendingLink {
    dir: EntryId,
    name: String,
    owner: String,
    mode: u32,
    target: String,
}

/// Rebuild a tree from its persisted node form.
pub fn from_node(node: &Node) -> Result<Tree, PersistError> {
    let (owner, mode, contents, max_size) = match node {
        Node::Dir { owner, mode, contents, max_size, .. } => (owner, *mode, contents, *max_size),
        _ => return Err(PersistError::InvalidSnapshot("root node must be a directory".to_string())),
    };
    let mut tree = Tree::new(owner);
    let root = tree.root();
    tree.get_mut(root).mode = mode & MODE_MASK;
    tree.set_quota(root, max_size).map_err(invalid)?;

    // Pass 1: everything but hardlinks.
    let mut pending = Vec::new();
    build_children(&mut tree, root, contents, &mut pending)?;

    // Pass 2: hardlinks, against already-built siblings. Repeat while progress
    // is made so a link naming another link still lands on the File.
    while !pending.is_empty() {
        let before = pending.len();
        let mut waiting = Vec::new();
        for link in pending {
            match link_target(&tree, &link) {
                Some(file) => {
                    let entry = Entry::with_kind(&link.name, &link.owner, link.mode, EntryKind::Hardlink { file });
                    tree.insert(link.dir, entry).map_err(invalid)?;
                }
                None => waiting.push(link),
            }
        }
        if waiting.len() == before {
            let link = &waiting[0];
            return Err(PersistError::DanglingHardlink {
                name: link.name.clone(),
                target: link.target.clone(),
            });
        }
        pending = waiting;
    }

    debug!(entries = tree.len(), "snapshot rebuilt");
    Ok(tree)
}

fn link_target(tree: &Tree, link: &PendingLink) -> Option<EntryId> {
    let id = tree.lookup(link.dir, &link.target).ok()?;
    match &tree.get(id).kind {
        EntryKind::File { .. } => Some(id),
        EntryKind::Hardlink { file } => Some(*file),
        _ => None,
    }
}

fn build_children(
    tree: &mut Tree,
    dir: EntryId,
    contents: &IndexMap<String, Node>,
    pending: &mut Vec<PendingLink>,
) -> Result<(), PersistError> {
    for (name, node) in contents {
        match node {
            Node::File { owner, mode, content, .. } => {
                let kind = EntryKind::File { content: content.as_bytes().to_vec() };
                tree.insert(dir, Entry::with_kind(name, owner, *mode, kind)).map_err(invalid)?;
            }
            Node::Dir { owner, mode, contents, max_size, .. } => {
                let mut entry = Entry::directory(name, owner);
                entry.mode = mode & MODE_MASK;
                let child = tree.insert(dir, entry).map_err(invalid)?;
                tree.set_quota(child, *max_size).map_err(invalid)?;
                build_children(tree, child, contents, pending)?;
            }
            Node::Symlink { owner, mode, target, .. } => {
                let kind = EntryKind::Symlink { target: target.clone() };
                tree.insert(dir, Entry::with_kind(name, owner, *mode, kind)).map_err(invalid)?;
            }
            Node::Hardlink { owner, mode, target, .. } => pending.push(PendingLink {
                dir,
                name: name.clone(),
                owner: owner.clone(),
                mode: *mode,
                target: target.clone(),
            }),
        }
    }
    Ok(())
}

fn invalid(err: FsError) -> PersistError {
    PersistError::InvalidSnapshot(err.to_string())
}

/// Write the tree to `path` as pretty-printed JSON.
pub fn save_tree(tree: &Tree, path: &Path) -> Result<(), PersistError> {
    let json = serde_json::to_string_pretty(&to_node(tree))?;
    fs::write(path, json).map_err(|source| PersistError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Read a tree from `path`. Nothing is modified on failure.
pub fn load_tree(path: &Path) -> Result<Tree, PersistError> {
    let text = fs::read_to_string(path).map_err(|source| PersistError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let node: Node = serde_json::from_str(&text).map_err(|source| PersistError::Decode {
        path: path.display().to_string(),
        source,
    })?;
    from_node(&node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::usage::subtree_size;

    fn sample() -> Tree {
        let mut tree = Tree::new("root");
        let root = tree.root();
        let docs = tree.ensure_dir("/home/guest/docs", "guest").unwrap();
        tree.set_quota(docs, Some(4096)).unwrap();
        let a = tree.insert(docs, Entry::file("a", "guest", b"hello".to_vec())).unwrap();
        tree.insert(docs, Entry::hardlink("b", "guest", a)).unwrap();
        tree.insert(docs, Entry::symlink("s", "guest", "a")).unwrap();
        tree.get_mut(a).mode = 0o600;
        tree.insert(root, Entry::file("motd", "root", b"hi\n".to_vec())).unwrap();
        tree
    }

    #[test]
    fn test_round_trip_keeps_structure_and_aliasing() {
        let tree = sample();
        let node = to_node(&tree);
        let rebuilt = from_node(&node).unwrap();
        assert_eq!(to_node(&rebuilt), node);
        assert_eq!(subtree_size(&rebuilt, rebuilt.root()), subtree_size(&tree, tree.root()));

        let docs = crate::fs::lookup_path(&rebuilt, rebuilt.root(), "/home/guest/docs").unwrap();
        let a = rebuilt.lookup(docs, "a").unwrap();
        let b = rebuilt.lookup(docs, "b").unwrap();
        assert!(matches!(rebuilt.get(b).kind, EntryKind::Hardlink { file } if file == a));
        assert_eq!(rebuilt.quota(docs), Some(4096));
        assert_eq!(rebuilt.get(a).mode, 0o600);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(to_node(&sample())).unwrap();
        assert_eq!(json["type"], "dir");
        let docs = &json["contents"]["home"]["contents"]["guest"]["contents"]["docs"];
        assert_eq!(docs["max_size"], 4096);
        assert_eq!(docs["contents"]["b"]["type"], "hardlink");
        assert_eq!(docs["contents"]["b"]["target"], "a");
        assert_eq!(docs["contents"]["s"]["type"], "symlink");
        assert!(json.get("max_size").is_none());
    }

    #[test]
    fn test_dangling_hardlink_fails() {
        let json = r#"{"type":"dir","name":"/","owner":"root","mode":493,"contents":{
            "b":{"type":"hardlink","name":"b","owner":"root","mode":420,"target":"a"}}}"#;
        let node: Node = serde_json::from_str(json).unwrap();
        assert!(matches!(from_node(&node), Err(PersistError::DanglingHardlink { .. })));
    }

    #[test]
    fn test_link_to_link_lands_on_file() {
        let json = r#"{"type":"dir","name":"/","owner":"root","mode":493,"contents":{
            "c":{"type":"hardlink","name":"c","owner":"root","mode":420,"target":"b"},
            "b":{"type":"hardlink","name":"b","owner":"root","mode":420,"target":"a"},
            "a":{"type":"file","name":"a","owner":"root","mode":420,"content":"xyz"}}}"#;
        let node: Node = serde_json::from_str(json).unwrap();
        let tree = from_node(&node).unwrap();
        let a = tree.lookup(tree.root(), "a").unwrap();
        let c = tree.lookup(tree.root(), "c").unwrap();
        assert!(matches!(tree.get(c).kind, EntryKind::Hardlink { file } if file == a));
        assert_eq!(subtree_size(&tree, tree.root()), 3);
    }

    #[test]
    fn test_root_must_be_dir() {
        let node = Node::File { name: "/".into(), owner: "root".into(), mode: 0o644, content: String::new() };
        assert!(matches!(from_node(&node), Err(PersistError::InvalidSnapshot(_))));
    }

    #[test]
    fn test_cross_directory_hardlink_saved_as_copy() {
        let mut tree = Tree::new("root");
        let src = tree.ensure_dir("/src", "root").unwrap();
        let dst = tree.ensure_dir("/dst", "root").unwrap();
        let f = tree.insert(src, Entry::file("f", "root", b"data".to_vec())).unwrap();
        tree.insert(dst, Entry::hardlink("h", "root", f)).unwrap();
        match to_node(&tree) {
            Node::Dir { contents, .. } => match &contents["dst"] {
                Node::Dir { contents, .. } => {
                    assert!(matches!(&contents["h"], Node::File { content, .. } if content == "data"));
                }
                other => panic!("unexpected node {:?}", other),
            },
            other => panic!("unexpected node {:?}", other),
        }
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fs.json");
        let tree = sample();
        save_tree(&tree, &path).unwrap();
        let loaded = load_tree(&path).unwrap();
        assert_eq!(to_node(&loaded), to_node(&tree));
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(load_tree(&missing), Err(PersistError::Io { .. })));
        let garbage = dir.path().join("garbage.json");
        fs::write(&garbage, "{not json").unwrap();
        assert!(matches!(load_tree(&garbage), Err(PersistError::Decode { .. })));
    }
}
