//! World
//!
//! The shared context every window operates on: one tree, one user table and
//! the configuration. Passed explicitly to the dispatcher next to the active
//! session, so independent worlds can coexist (each test builds its own).

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::Config;
use crate::fs::snapshot::{load_tree, save_tree};
use crate::fs::{Entry, PersistError, Tree};
use crate::users::UserTable;

pub struct World {
    pub tree: Tree,
    pub users: UserTable,
    pub config: Config,
    generation: u64,
}

impl World {
    /// A world with the default layout and built-in accounts.
    pub fn new(config: Config) -> Self {
        let users = UserTable::with_defaults();
        let tree = default_tree(&users);
        Self { tree, users, config, generation: 0 }
    }

    /// Bumped whenever the tree is replaced wholesale; sessions compare it to
    /// know when their path stacks point into a stale tree.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether `username` may elevate with `sudo`.
    pub fn is_admin(&self, username: &str) -> bool {
        username == self.config.admin_account
            || self.users.get(username).map_or(false, |u| u.uid == 0)
    }

    /// Persist the tree and user table. Returns the snapshot path written.
    pub fn save(&self, snapshot: Option<&Path>) -> Result<PathBuf, PersistError> {
        let path = snapshot.map_or_else(|| self.config.snapshot_path.clone(), Path::to_path_buf);
        save_tree(&self.tree, &path)?;
        self.users.save(&self.config.users_path)?;
        info!(path = %path.display(), entries = self.tree.len(), "filesystem saved");
        Ok(path)
    }

    /// Replace the tree and user table from disk. On any failure the world
    /// is left exactly as it was.
    pub fn load(&mut self, snapshot: Option<&Path>) -> Result<PathBuf, PersistError> {
        let path = snapshot.map_or_else(|| self.config.snapshot_path.clone(), Path::to_path_buf);
        let tree = load_tree(&path)?;
        let users = UserTable::load_merged(&self.config.users_path)?;
        self.tree = tree;
        self.users = users;
        self.generation += 1;
        info!(path = %path.display(), entries = self.tree.len(), "filesystem loaded");
        Ok(path)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Standard directories, one home per account, and a greeting in /etc/motd.
/// A home that cannot be created is logged and skipped.
pub fn default_tree(users: &UserTable) -> Tree {
    let mut tree = Tree::new("root");
    for dir in ["/etc", "/var", "/tmp", "/home"] {
        if let Err(e) = tree.ensure_dir(dir, "root") {
            warn!(path = dir, error = %e, "could not create standard directory");
        }
    }
    match tree.ensure_dir("/etc", "root") {
        Ok(etc) => {
            let motd = Entry::file("motd", "root", b"Welcome to TerminalOS.\n".to_vec());
            if let Err(e) = tree.insert(etc, motd) {
                warn!(error = %e, "could not create /etc/motd");
            }
        }
        Err(e) => warn!(error = %e, "could not create /etc/motd"),
    }
    for (name, record) in users.iter() {
        let owner = if record.home_path.starts_with("/home/") { name } else { "root" };
        if let Err(e) = tree.ensure_dir(&record.home_path, owner) {
            warn!(user = name, home = %record.home_path, error = %e, "could not create home directory");
        }
    }
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::lookup_path;
    use crate::users::UserRecord;

    #[test]
    fn test_default_layout() {
        let world = World::default();
        let tree = &world.tree;
        let guest = lookup_path(tree, tree.root(), "/home/guest").unwrap();
        assert_eq!(tree.get(guest).owner, "guest");
        let root_home = lookup_path(tree, tree.root(), "/root").unwrap();
        assert_eq!(tree.get(root_home).owner, "root");
        assert!(lookup_path(tree, tree.root(), "/etc/motd").is_ok());
    }

    #[test]
    fn test_default_tree_skips_conflicting_entries() {
        let mut users = UserTable::with_defaults();
        users.insert("mallory", UserRecord::new(None, "/etc/motd/x", 3000));
        let tree = default_tree(&users);
        let root = tree.root();
        let motd = lookup_path(&tree, root, "/etc/motd").unwrap();
        assert!(tree.get(motd).is_file());
        assert!(lookup_path(&tree, root, "/etc/motd/x").is_err());
        assert!(lookup_path(&tree, root, "/home/guest").is_ok());
        assert!(lookup_path(&tree, root, "/root").is_ok());
    }

    #[test]
    fn test_is_admin() {
        let world = World::default();
        assert!(world.is_admin("root"));
        assert!(world.is_admin("admin"));
        assert!(!world.is_admin("guest"));
        assert!(!world.is_admin("nobody"));
    }

    #[test]
    fn test_failed_load_leaves_world_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.users_path = dir.path().join("users.json");
        let mut world = World::new(config);
        let before = world.tree.len();
        assert!(world.load(Some(&dir.path().join("missing.json"))).is_err());
        assert_eq!(world.tree.len(), before);
        assert_eq!(world.generation(), 0);
    }

    #[test]
    fn test_save_then_load_bumps_generation() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.snapshot_path = dir.path().join("fs.json");
        config.users_path = dir.path().join("users.json");
        let mut world = World::new(config);
        world.save(None).unwrap();
        world.load(None).unwrap();
        assert_eq!(world.generation(), 1);
        assert!(lookup_path(&world.tree, world.tree.root(), "/home/admin").is_ok());
    }
}
