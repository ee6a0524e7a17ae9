//! JSON-array file store with auto-incrementing record ids.
//!
//! The store materializes lazily: a nonexistent backing file reads as an
//! empty record sequence. Every append performs a full read-modify-write
//! cycle and rewrites the file in a single whole-file write.
//!
//! There is deliberately no locking around the read-modify-write cycle.
//! Under this server's single stdio connection tool calls arrive one at a
//! time, and the file format has no provision for partial updates anyway.

use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::StoreError;

/// A record that can be persisted in a [`JsonStore`].
///
/// Records own their id field; the store assigns it at append time and
/// never reuses a value, even when manual edits leave gaps.
pub trait Record {
    /// The record's assigned id, or 0 if not yet persisted.
    fn id(&self) -> u64;

    /// Set the record's id. Called exactly once, during append.
    fn set_id(&mut self, id: u64);
}

/// Append-only store backed by a single JSON-array file.
pub struct JsonStore<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T> JsonStore<T>
where
    T: Record + Serialize + DeserializeOwned,
{
    /// Create a store over the given backing file.
    ///
    /// The file is not touched until the first read or append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every record from the backing file, in insertion order.
    ///
    /// A nonexistent file is the empty store, not an error.
    pub async fn read_all(&self) -> Result<Vec<T>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("store file {} absent, treating as empty", self.path.display());
                Ok(Vec::new())
            }
            Err(source) => Err(StoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Append a record, assigning it the next id.
    ///
    /// The id is `max(existing ids) + 1` (1 for an empty store), so ids
    /// stay unique even when manual edits leave gaps in the sequence. The
    /// whole file is rewritten pretty-printed; on failure nothing of the
    /// attempted append survives in memory or on disk.
    ///
    /// Returns the assigned id.
    pub async fn append(&self, mut record: T) -> Result<u64, StoreError> {
        let mut records = self.read_all().await?;

        let id = records.iter().map(Record::id).max().unwrap_or(0) + 1;
        record.set_id(id);
        records.push(record);

        let json = serde_json::to_vec_pretty(&records).map_err(|source| StoreError::Serialize {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|source| StoreError::Write {
                        path: self.path.clone(),
                        source,
                    })?;
            }
        }

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;

        debug!("appended record {} to {}", id, self.path.display());
        Ok(id)
    }

    /// The most recently appended record, if any.
    pub async fn last(&self) -> Result<Option<T>, StoreError> {
        Ok(self.read_all().await?.pop())
    }

    /// Find a record by id.
    pub async fn find(&self, id: u64) -> Result<Option<T>, StoreError> {
        Ok(self.read_all().await?.into_iter().find(|r| r.id() == id))
    }

    /// The last `n` records, oldest first.
    pub async fn tail(&self, n: usize) -> Result<Vec<T>, StoreError> {
        let mut records = self.read_all().await?;
        let skip = records.len().saturating_sub(n);
        Ok(records.split_off(skip))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestRecord {
        #[serde(default)]
        id: u64,
        name: String,
    }

    impl Record for TestRecord {
        fn id(&self) -> u64 {
            self.id
        }

        fn set_id(&mut self, id: u64) {
            self.id = id;
        }
    }

    fn record(name: &str) -> TestRecord {
        TestRecord {
            id: 0,
            name: name.to_string(),
        }
    }

    fn test_store(dir: &TempDir) -> JsonStore<TestRecord> {
        JsonStore::new(dir.path().join("records.json"))
    }

    #[tokio::test]
    async fn test_read_all_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        let records = store.read_all().await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_first_append_assigns_id_one() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        let id = store.append(record("Ann")).await.unwrap();
        assert_eq!(id, 1);

        let records = store.read_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].name, "Ann");
    }

    #[tokio::test]
    async fn test_ids_strictly_increasing() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        let mut ids = Vec::new();
        for name in ["a", "b", "c", "d"] {
            ids.push(store.append(record(name)).await.unwrap());
        }
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_round_trip_preserves_order_and_fields() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        for name in ["first", "second", "third"] {
            store.append(record(name)).await.unwrap();
        }

        let records = store.read_all().await.unwrap();
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_append_skips_id_gaps() {
        // A store manually edited down to ids 1 and 3 must hand out 4,
        // not 3 (count + 1 would resurrect a deleted id).
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(
            &path,
            r#"[{"id": 1, "name": "kept"}, {"id": 3, "name": "survivor"}]"#,
        )
        .unwrap();

        let store: JsonStore<TestRecord> = JsonStore::new(&path);
        let id = store.append(record("Bo")).await.unwrap();
        assert_eq!(id, 4);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store: JsonStore<TestRecord> = JsonStore::new(&path);
        let err = store.read_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_file_is_pretty_printed_array() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        store.append(record("Ann")).await.unwrap();

        let text = std::fs::read_to_string(store.path()).unwrap();
        assert!(text.starts_with('['));
        // two-space indentation from the pretty printer
        assert!(text.contains("\n  {"));
    }

    #[tokio::test]
    async fn test_last_and_find() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        assert!(store.last().await.unwrap().is_none());

        store.append(record("a")).await.unwrap();
        store.append(record("b")).await.unwrap();

        assert_eq!(store.last().await.unwrap().unwrap().name, "b");
        assert_eq!(store.find(1).await.unwrap().unwrap().name, "a");
        assert!(store.find(99).await.unwrap().is_none());
    }

    #[test]
    fn test_tail_returns_most_recent_in_order() {
        tokio_test::block_on(async {
            let dir = TempDir::new().unwrap();
            let store = test_store(&dir);

            for name in ["a", "b", "c", "d"] {
                store.append(record(name)).await.unwrap();
            }

            let tail = store.tail(2).await.unwrap();
            let names: Vec<_> = tail.iter().map(|r| r.name.as_str()).collect();
            assert_eq!(names, vec!["c", "d"]);

            // asking for more than exists returns everything
            assert_eq!(store.tail(10).await.unwrap().len(), 4);
        });
    }
}
