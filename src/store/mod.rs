use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Errors from the JSON document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("serialization error: {0}")]
  Serialize(#[from] serde_json::Error),
}

/// Whole-document JSON persistence at a fixed path.
///
/// Load prefers availability over strictness: a missing file yields the
/// caller's default silently, an unreadable or unparsable one yields the
/// default with a logged warning. Save rewrites the entire file in place;
/// what a failed save means is the caller's decision.
#[derive(Debug, Clone)]
pub struct JsonStore {
  path: PathBuf,
}

impl JsonStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn load_or_default<T>(&self) -> T
  where
    T: DeserializeOwned + Default,
  {
    self.load_or_else(T::default)
  }

  pub fn load_or_else<T, F>(&self, default: F) -> T
  where
    T: DeserializeOwned,
    F: FnOnce() -> T,
  {
    match std::fs::read_to_string(&self.path) {
      Ok(data) => match serde_json::from_str(&data) {
        Ok(doc) => doc,
        Err(e) => {
          tracing::warn!("Unparsable document at {}: {}", self.path.display(), e);
          default()
        }
      },
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => default(),
      Err(e) => {
        tracing::warn!("Unreadable document at {}: {}", self.path.display(), e);
        default()
      }
    }
  }

  pub fn save<T: Serialize>(&self, doc: &T) -> Result<(), StoreError> {
    if let Some(parent) = self.path.parent() {
      if !parent.as_os_str().is_empty() {
        std::fs::create_dir_all(parent)?;
      }
    }
    let data = serde_json::to_string_pretty(doc)?;
    std::fs::write(&self.path, data)?;
    Ok(())
  }

  /// Save and reduce the outcome to a flag, logging any failure. Used by
  /// callers that keep their in-memory change whether or not the write
  /// reached disk.
  pub fn save_logged<T: Serialize>(&self, doc: &T) -> bool {
    match self.save(doc) {
      Ok(()) => true,
      Err(e) => {
        tracing::error!("Failed to save {}: {}", self.path.display(), e);
        false
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::BTreeMap;

  #[test]
  fn test_missing_file_yields_default() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("absent.json"));
    let doc: BTreeMap<String, u32> = store.load_or_default();
    assert!(doc.is_empty());
  }

  #[test]
  fn test_corrupt_file_yields_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    let store = JsonStore::new(path);
    let doc: BTreeMap<String, u32> = store.load_or_default();
    assert!(doc.is_empty());
  }

  #[test]
  fn test_save_then_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("doc.json"));
    let mut doc = BTreeMap::new();
    doc.insert("answer".to_string(), 42u32);
    store.save(&doc).unwrap();

    let loaded: BTreeMap<String, u32> = store.load_or_default();
    assert_eq!(loaded, doc);
  }

  #[test]
  fn test_save_creates_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("nested").join("doc.json"));
    let doc: BTreeMap<String, u32> = BTreeMap::new();
    assert!(store.save(&doc).is_ok());
    assert!(store.path().exists());
  }

  #[test]
  fn test_save_to_directory_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path());
    let doc: BTreeMap<String, u32> = BTreeMap::new();
    assert!(store.save(&doc).is_err());
    assert!(!store.save_logged(&doc));
  }

  #[test]
  fn test_save_is_pretty_printed() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path().join("doc.json"));
    let mut doc = BTreeMap::new();
    doc.insert("key".to_string(), 1u32);
    store.save(&doc).unwrap();
    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains('\n'));
  }
}
