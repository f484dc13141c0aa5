//! User Table
//!
//! Accounts known to the login flow. Passwords are kept as lowercase hex
//! SHA-256 digests; an account without a digest is passwordless and accepts
//! any input.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::fs::PersistError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "password")]
    pub password_hash: Option<String>,
    #[serde(rename = "home")]
    pub home_path: String,
    pub uid: u32,
}

impl UserRecord {
    pub fn new(password: Option<&str>, home_path: &str, uid: u32) -> Self {
        Self {
            password_hash: password.map(hash_password),
            home_path: home_path.to_string(),
            uid,
        }
    }

    /// Passwordless records accept anything.
    pub fn verify(&self, submitted: &str) -> bool {
        match &self.password_hash {
            Some(hash) => *hash == hash_password(submitted),
            None => true,
        }
    }
}

pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Username to record, kept sorted for stable persistence output.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserTable {
    users: BTreeMap<String, UserRecord>,
}

impl UserTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in accounts present in every world.
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.insert("root", UserRecord::new(Some("root"), "/root", 0));
        table.insert("admin", UserRecord::new(Some("admin"), "/home/admin", 1000));
        table.insert("guest", UserRecord::new(None, "/home/guest", 1001));
        table
    }

    pub fn insert(&mut self, name: &str, record: UserRecord) {
        self.users.insert(name.to_string(), record);
    }

    pub fn get(&self, name: &str) -> Option<&UserRecord> {
        self.users.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.users.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UserRecord)> {
        self.users.iter().map(|(name, record)| (name.as_str(), record))
    }

    /// Overlay `other` on this table; records in `other` win.
    pub fn merge(&mut self, other: UserTable) {
        self.users.extend(other.users);
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| PersistError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Read a persisted table and merge it over the built-in defaults.
    /// A missing file yields the defaults alone.
    pub fn load_merged(path: &Path) -> Result<Self, PersistError> {
        let mut table = Self::with_defaults();
        if !path.exists() {
            return Ok(table);
        }
        let text = fs::read_to_string(path).map_err(|source| PersistError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let stored: UserTable = serde_json::from_str(&text).map_err(|source| PersistError::Decode {
            path: path.display().to_string(),
            source,
        })?;
        table.merge(stored);
        Ok(table)
    }
}
