//! The persistence gateway: whole-blob key-value storage.
//!
//! The rest of the crate only ever reads or writes a complete named blob of
//! text through [KeyValueStore]. There are no transactions and no partial
//! writes; an interrupted save leaves whatever the last completed write left.

use std::{
    collections::HashMap,
    fs,
    io::{self, Write},
    path::PathBuf,
};

use tempfile::NamedTempFile;

use crate::Error;

/// Opaque get/set of named text blobs.
pub trait KeyValueStore {
    /// Read the blob stored under `key`, or `None` if the key has never been
    /// written.
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Replace the blob stored under `key` with `value`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;
}

/// A [KeyValueStore] that keeps each key in its own file under a data
/// directory.
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the target, so a crash mid-write leaves the previous complete blob
/// rather than a torn one.
#[derive(Debug)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Open the store rooted at `data_dir`, creating the directory if needed.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, Error> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;

        Ok(Self { data_dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        let mut file = NamedTempFile::new_in(&self.data_dir)?;
        file.write_all(value.as_bytes())?;

        file.persist(self.path_for(key))
            .map_err(|error| Error::Io(error.to_string()))?;

        Ok(())
    }
}

/// A [KeyValueStore] backed by a hash map, for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.entries.insert(key.to_owned(), value.to_owned());

        Ok(())
    }
}

#[cfg(test)]
mod file_store_tests {
    use super::{FileStore, KeyValueStore};

    #[test]
    fn get_returns_none_for_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        assert_eq!(None, store.get("expenses").unwrap());
    }

    #[test]
    fn set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path()).unwrap();

        store.set("expenses", "[]").unwrap();

        assert_eq!(Some("[]".to_owned()), store.get("expenses").unwrap());
    }

    #[test]
    fn set_replaces_the_previous_blob() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path()).unwrap();

        store.set("username", "Me").unwrap();
        store.set("username", "Alex").unwrap();

        assert_eq!(Some("Alex".to_owned()), store.get("username").unwrap());
    }

    #[test]
    fn keys_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path()).unwrap();

        store.set("expenses", "[]").unwrap();
        store.set("username", "Me").unwrap();

        assert_eq!(Some("[]".to_owned()), store.get("expenses").unwrap());
        assert_eq!(Some("Me".to_owned()), store.get("username").unwrap());
    }
}
