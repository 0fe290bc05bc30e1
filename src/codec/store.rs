//! Persisted stores: a string key-value map and a cookie jar.
//!
//! Both are small JSON files under the configured state directory. Writes
//! go to a sibling temp file first and are renamed into place, so a failed
//! write never leaves a half-written store behind.

use crate::codec::{COOKIE_DELIMITER, CookieAssignment};
use crate::model::StoreError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name of the key-value store inside the state directory.
pub const STORAGE_FILE: &str = "storage.json";

/// File name of the cookie jar inside the state directory.
pub const COOKIES_FILE: &str = "cookies.json";

/// String key-value storage.
pub trait KeyValueStore {
    /// Snapshot of every stored pair.
    fn items(&self) -> BTreeMap<String, String>;

    /// Value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Write every pair in one save. Either all pairs land or none do.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be persisted.
    fn set_items(&mut self, items: Vec<(String, String)>) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be persisted.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.set_items(vec![(key.to_string(), value.to_string())])
    }
}

/// Cookie storage exposed as a header-style string.
pub trait CookieJar {
    /// `name=value` pairs joined by `"; "`.
    fn cookie_header(&self) -> String;

    /// Set one cookie, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the jar cannot be persisted.
    fn apply(&mut self, assignment: &CookieAssignment) -> Result<(), StoreError>;
}

// ===== File-backed implementations =====

fn load_map(path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let contents = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

fn save_map(path: &Path, map: &BTreeMap<String, String>) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let json = serde_json::to_string_pretty(map).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json).map_err(io_err)?;
    std::fs::rename(&tmp, path).map_err(io_err)
}

/// Key-value store persisted as `storage.json`.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileKeyValueStore {
    /// Open (or start) the store in `state_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if an existing file cannot be read or parsed.
    pub fn open(state_dir: &Path) -> Result<Self, StoreError> {
        let path = state_dir.join(STORAGE_FILE);
        let items = load_map(&path)?;
        Ok(Self { path, items })
    }

    /// File backing this store.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn items(&self) -> BTreeMap<String, String> {
        self.items.clone()
    }

    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_items(&mut self, items: Vec<(String, String)>) -> Result<(), StoreError> {
        let mut next = self.items.clone();
        next.extend(items);
        save_map(&self.path, &next)?;
        self.items = next;
        Ok(())
    }
}

/// Cookie jar persisted as `cookies.json`.
///
/// Only names and values are kept; attributes such as expiry or path are
/// not part of the export format and are dropped.
#[derive(Debug, Clone)]
pub struct FileCookieJar {
    path: PathBuf,
    cookies: BTreeMap<String, String>,
}

impl FileCookieJar {
    /// Open (or start) the jar in `state_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if an existing file cannot be read or parsed.
    pub fn open(state_dir: &Path) -> Result<Self, StoreError> {
        let path = state_dir.join(COOKIES_FILE);
        let cookies = load_map(&path)?;
        Ok(Self { path, cookies })
    }

    /// Current value of cookie `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }
}

impl CookieJar for FileCookieJar {
    fn cookie_header(&self) -> String {
        self.cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(COOKIE_DELIMITER)
    }

    fn apply(&mut self, assignment: &CookieAssignment) -> Result<(), StoreError> {
        let mut next = self.cookies.clone();
        next.insert(assignment.name.clone(), assignment.value.clone());
        save_map(&self.path, &next)?;
        self.cookies = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fresh_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn key_value_store_persists_across_open() {
        let dir = fresh_dir("zonegrid_store_kv_persist");

        let mut store = FileKeyValueStore::open(&dir).unwrap();
        store.set_item("darkMode", "true").unwrap();

        let reopened = FileKeyValueStore::open(&dir).unwrap();
        assert_eq!(reopened.get_item("darkMode").as_deref(), Some("true"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn set_items_merges_with_existing_pairs() {
        let dir = fresh_dir("zonegrid_store_kv_merge");

        let mut store = FileKeyValueStore::open(&dir).unwrap();
        store.set_item("keep", "1").unwrap();
        store
            .set_items(vec![
                ("new".to_string(), "2".to_string()),
                ("keep".to_string(), "3".to_string()),
            ])
            .unwrap();

        let items = store.items();
        assert_eq!(items.get("keep").map(String::as_str), Some("3"));
        assert_eq!(items.get("new").map(String::as_str), Some("2"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_store_file_is_reported() {
        let dir = fresh_dir("zonegrid_store_kv_corrupt");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(STORAGE_FILE), "{not json").unwrap();

        let result = FileKeyValueStore::open(&dir);
        assert!(matches!(result, Err(StoreError::Corrupt { .. })));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn cookie_header_joins_pairs() {
        let dir = fresh_dir("zonegrid_store_cookie_header");

        let mut jar = FileCookieJar::open(&dir).unwrap();
        assert_eq!(jar.cookie_header(), "");

        jar.apply(&CookieAssignment::parse("b=2").unwrap()).unwrap();
        jar.apply(&CookieAssignment::parse("a=1").unwrap()).unwrap();
        assert_eq!(jar.cookie_header(), "a=1; b=2");

        jar.apply(&CookieAssignment::parse("a=9").unwrap()).unwrap();
        assert_eq!(jar.get("a"), Some("9"));

        let _ = fs::remove_dir_all(&dir);
    }
}
