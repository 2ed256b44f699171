//! Local lesson persistence
//!
//! Lessons live as one JSON array under a single key of a [`KeyValueStore`].
//! Every mutation is a whole-collection read-modify-write; there is no
//! cross-process locking, so two TeachDesk instances can lose each other's
//! updates.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use teachdesk_core::prelude::*;
use teachdesk_core::SavedLesson;

/// Key under which the lesson collection is stored
pub const SAVED_LESSONS_KEY: &str = "saved_lessons";

/// String key-value storage
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    /// Value stored under `key`, or `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File-backed store
// ─────────────────────────────────────────────────────────────────────────────

/// One `<key>.json` file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| Error::storage(format!("Failed to read {:?}: {}", path, e)))
    }

    /// Atomic write: temp file in the same directory, then rename
    fn set(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| Error::storage(format!("Failed to create {:?}: {}", self.dir, e)))?;

        let path = self.path_for(key);
        let temp_path = self.dir.join(format!(".{}.json.tmp", key));

        std::fs::write(&temp_path, value)
            .map_err(|e| Error::storage(format!("Failed to write temp file: {}", e)))?;

        std::fs::rename(&temp_path, &path)
            .map_err(|e| Error::storage(format!("Failed to rename temp file: {}", e)))?;

        debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory store
// ─────────────────────────────────────────────────────────────────────────────

/// Process-local store used for `--ephemeral` runs and tests
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| Error::storage("memory store lock poisoned"))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| Error::storage("memory store lock poisoned"))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File store in `dir`, or a memory store when no directory is available
pub fn open_store(dir: Option<PathBuf>) -> Box<dyn KeyValueStore + Send> {
    match dir {
        Some(dir) => {
            info!("Saved lessons directory: {:?}", dir);
            Box::new(FileKeyValueStore::new(dir))
        }
        None => {
            warn!("No data directory; saved lessons will last for this session only");
            Box::new(MemoryKeyValueStore::new())
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Lesson collection
// ─────────────────────────────────────────────────────────────────────────────

/// Saved-lesson collection on top of a [`KeyValueStore`]
pub struct LessonStore<S> {
    kv: S,
}

impl<S: KeyValueStore> LessonStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// All saved lessons, newest inserts first.
    ///
    /// A missing, unreadable or corrupt blob yields an empty list.
    pub fn list_saved(&self) -> Vec<SavedLesson> {
        let raw = match self.kv.get(SAVED_LESSONS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read saved lessons: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(lessons) => lessons,
            Err(e) => {
                warn!("Saved lessons are corrupt, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Replace the lesson with the same id in place, or insert it at the front
    pub fn upsert(&self, lesson: SavedLesson) -> Result<Vec<SavedLesson>> {
        let mut lessons = self.list_saved();

        match lessons.iter().position(|l| l.id == lesson.id) {
            Some(index) => lessons[index] = lesson,
            None => lessons.insert(0, lesson),
        }

        self.persist(&lessons)?;
        Ok(lessons)
    }

    /// Drop the lesson with `id`; unknown ids leave the collection unchanged
    pub fn remove(&self, id: &str) -> Result<Vec<SavedLesson>> {
        let mut lessons = self.list_saved();
        lessons.retain(|l| l.id != id);

        self.persist(&lessons)?;
        Ok(lessons)
    }

    fn persist(&self, lessons: &[SavedLesson]) -> Result<()> {
        let raw = serde_json::to_string(lessons)?;
        self.kv.set(SAVED_LESSONS_KEY, &raw)?;
        info!("Persisted {} saved lesson(s)", lessons.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teachdesk_core::LessonResult;
    use tempfile::tempdir;

    fn lesson(id: &str, topic: &str) -> SavedLesson {
        LessonResult::new_plan("7th Grade", "Science", topic, "content", vec![]).to_saved(id)
    }

    fn ids(lessons: &[SavedLesson]) -> Vec<&str> {
        lessons.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn test_file_store_missing_key_is_none() {
        let temp = tempdir().unwrap();
        let store = FileKeyValueStore::new(temp.path());
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn test_file_store_set_creates_dir_and_leaves_no_temp() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("data");
        let store = FileKeyValueStore::new(&dir);

        store.set("k", "[1,2]").unwrap();
        store.set("k", "[3]").unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("[3]"));
        assert!(dir.join("k.json").exists());
        assert!(!dir.join(".k.json.tmp").exists());
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryKeyValueStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_list_saved_empty_store() {
        let store = LessonStore::new(MemoryKeyValueStore::new());
        assert!(store.list_saved().is_empty());
    }

    #[test]
    fn test_upsert_inserts_new_lessons_at_front() {
        let store = LessonStore::new(MemoryKeyValueStore::new());

        store.upsert(lesson("a", "First")).unwrap();
        let lessons = store.upsert(lesson("b", "Second")).unwrap();

        assert_eq!(ids(&lessons), vec!["b", "a"]);
        assert_eq!(store.list_saved(), lessons);
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let store = LessonStore::new(MemoryKeyValueStore::new());
        store.upsert(lesson("a", "First")).unwrap();
        store.upsert(lesson("b", "Second")).unwrap();

        let mut edited = lesson("a", "First");
        edited.content = "edited".into();
        let lessons = store.upsert(edited).unwrap();

        assert_eq!(ids(&lessons), vec!["b", "a"]);
        assert_eq!(lessons[1].content, "edited");
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let first = lesson("a", "First");
        let second = lesson("b", "Second");

        let once = LessonStore::new(MemoryKeyValueStore::new());
        once.upsert(second.clone()).unwrap();
        let expected = once.upsert(first.clone()).unwrap();

        let twice = LessonStore::new(MemoryKeyValueStore::new());
        twice.upsert(second).unwrap();
        twice.upsert(first.clone()).unwrap();
        let lessons = twice.upsert(first).unwrap();

        assert_eq!(lessons, expected);
        assert_eq!(twice.list_saved(), once.list_saved());
    }

    #[test]
    fn test_remove_filters_by_id() {
        let store = LessonStore::new(MemoryKeyValueStore::new());
        store.upsert(lesson("a", "First")).unwrap();
        store.upsert(lesson("b", "Second")).unwrap();

        let lessons = store.remove("a").unwrap();
        assert_eq!(ids(&lessons), vec!["b"]);

        let lessons = store.remove("missing").unwrap();
        assert_eq!(ids(&lessons), vec!["b"]);
    }

    #[test]
    fn test_corrupt_blob_lists_as_empty() {
        let kv = MemoryKeyValueStore::new();
        kv.set(SAVED_LESSONS_KEY, "{not json").unwrap();
        let store = LessonStore::new(kv);

        assert!(store.list_saved().is_empty());

        let lessons = store.upsert(lesson("fresh", "Recovered")).unwrap();
        assert_eq!(ids(&lessons), vec!["fresh"]);
    }

    #[test]
    fn test_lessons_survive_reopening_file_store() {
        let temp = tempdir().unwrap();
        LessonStore::new(FileKeyValueStore::new(temp.path()))
            .upsert(lesson("a", "Persisted"))
            .unwrap();

        let reopened = LessonStore::new(FileKeyValueStore::new(temp.path()));
        let lessons = reopened.list_saved();
        assert_eq!(lessons.len(), 1);
        assert_eq!(lessons[0].topic, "Persisted");
    }

    #[test]
    fn test_read_failure_lists_as_empty() {
        let mut kv = MockKeyValueStore::new();
        kv.expect_get()
            .returning(|_| Err(Error::storage("disk unavailable")));

        let store = LessonStore::new(kv);
        assert!(store.list_saved().is_empty());
    }

    #[test]
    fn test_write_failure_propagates() {
        let mut kv = MockKeyValueStore::new();
        kv.expect_get().returning(|_| Ok(None));
        kv.expect_set()
            .withf(|key, _| key == SAVED_LESSONS_KEY)
            .times(1)
            .returning(|_, _| Err(Error::storage("read-only filesystem")));

        let store = LessonStore::new(kv);
        let err = store.upsert(lesson("a", "Topic")).unwrap_err();
        assert!(matches!(err, Error::Storage { .. }));
    }

    #[test]
    fn test_boxed_store_delegates() {
        let boxed: Box<dyn KeyValueStore> = Box::new(MemoryKeyValueStore::new());
        let store = LessonStore::new(boxed);
        store.upsert(lesson("a", "Boxed")).unwrap();
        assert_eq!(store.list_saved().len(), 1);
    }
}
