//! Local persistent store — the console's analogue of the browser's
//! localStorage. One JSON object in one file, read and rewritten wholesale
//! on every access. There is deliberately no file locking: two consoles
//! pointed at the same state directory clobber each other exactly like two
//! browser tabs do.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Store keys carried over from the original client, verbatim.
pub mod keys {
    pub const TOKEN: &str = "token";
    pub const USER_ID: &str = "userId";
    pub const ROLE: &str = "role";
    pub const RECOMMENDED_APPLICANTS: &str = "recommendedApplicants";
    pub const RECOMMENDED_COURSES: &str = "recommendedCourses";
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store contains invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// File-backed key/value store. Values are stored as raw JSON; there is no
/// schema versioning and no integrity check beyond JSON well-formedness.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// Opens (or lazily creates) the store file `store.json` under `dir`.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join("store.json"),
        })
    }

    /// Reads the value under `key`, if any. A missing file and a missing
    /// key are the same thing: nothing saved.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let map = self.read_all()?;
        match map.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// Writes `value` under `key`, replacing whatever was there.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let mut map = self.read_all()?;
        map.insert(key.to_string(), serde_json::to_value(value)?);
        self.write_all(&map)
    }

    /// Deletes `key`. Deleting an absent key is a no-op.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self.read_all()?;
        if map.remove(key).is_some() {
            self.write_all(&map)?;
        }
        Ok(())
    }

    fn read_all(&self) -> Result<Map<String, Value>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        let value: Value = serde_json::from_str(&raw)?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }

    fn write_all(&self, map: &Map<String, Value>) -> Result<(), StoreError> {
        fs::write(&self.path, serde_json::to_string_pretty(map)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_get_missing_key_is_none() {
        let (_dir, store) = temp_store();
        let got: Option<String> = store.get("token").unwrap();
        assert!(got.is_none());
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let (_dir, store) = temp_store();
        store.set(keys::TOKEN, &"abc123".to_string()).unwrap();
        let got: Option<String> = store.get(keys::TOKEN).unwrap();
        assert_eq!(got.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_set_overwrites_wholesale() {
        let (_dir, store) = temp_store();
        store.set(keys::ROLE, &"user".to_string()).unwrap();
        store.set(keys::ROLE, &"company".to_string()).unwrap();
        let got: Option<String> = store.get(keys::ROLE).unwrap();
        assert_eq!(got.as_deref(), Some("company"));
    }

    #[test]
    fn test_remove_deletes_only_that_key() {
        let (_dir, store) = temp_store();
        store.set(keys::TOKEN, &"t".to_string()).unwrap();
        store.set(keys::USER_ID, &"u".to_string()).unwrap();
        store.remove(keys::TOKEN).unwrap();
        assert!(store.get::<String>(keys::TOKEN).unwrap().is_none());
        assert_eq!(
            store.get::<String>(keys::USER_ID).unwrap().as_deref(),
            Some("u")
        );
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let (_dir, store) = temp_store();
        store.remove("neverSet").unwrap();
    }

    #[test]
    fn test_values_may_be_structured_json() {
        let (_dir, store) = temp_store();
        let list = vec![serde_json::json!({"title": "X", "match_score": 92})];
        store.set(keys::RECOMMENDED_APPLICANTS, &list).unwrap();
        let got: Option<Vec<serde_json::Value>> =
            store.get(keys::RECOMMENDED_APPLICANTS).unwrap();
        assert_eq!(got.unwrap()[0]["match_score"], 92);
    }
}
