use super::DataStore;
use crate::error::{NexusError, Result};
use crate::model::{MediaItem, User};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const USER_FILE: &str = "user.json";
const ITEMS_FILE: &str = "items.json";

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(NexusError::Io)?;
        }
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let path = self.root.join(name);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(NexusError::Io)?;
        let value = serde_json::from_str(&content).map_err(NexusError::Serialization)?;
        Ok(Some(value))
    }

    fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(value).map_err(NexusError::Serialization)?;

        // Write to a temp file then rename so a crash never leaves half a catalog
        let tmp_file = self.root.join(format!(".{}-{}.tmp", name, Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(NexusError::Io)?;
        fs::rename(&tmp_file, self.root.join(name)).map_err(NexusError::Io)?;
        Ok(())
    }
}

impl DataStore for FileStore {
    fn load_user(&self) -> Result<Option<User>> {
        // `null` on disk means "signed out"
        Ok(self.read_json::<Option<User>>(USER_FILE)?.flatten())
    }

    fn save_user(&mut self, user: Option<&User>) -> Result<()> {
        self.write_json(USER_FILE, &user)
    }

    fn load_items(&self) -> Result<Vec<MediaItem>> {
        Ok(self.read_json(ITEMS_FILE)?.unwrap_or_default())
    }

    fn save_items(&mut self, items: &[MediaItem]) -> Result<()> {
        self.write_json(ITEMS_FILE, items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Comment;
    use crate::seed::demo_catalog;
    use chrono::Utc;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("data"));
        (dir, store)
    }

    #[test]
    fn empty_directory_loads_nothing() {
        let (_dir, store) = setup();
        assert_eq!(store.load_user().unwrap(), None);
        assert!(store.load_items().unwrap().is_empty());
    }

    #[test]
    fn items_round_trip_with_nested_comments() {
        let (_dir, mut store) = setup();
        let mut items = demo_catalog();
        let rae = User::new("Rae");
        items[0].prepend_comment(Comment::new(&rae, "first".into(), Utc::now()));
        items[0].prepend_comment(Comment::new(&rae, "second".into(), Utc::now()));
        items[1].thumbnail_url = None;

        store.save_items(&items).unwrap();
        assert_eq!(store.load_items().unwrap(), items);
    }

    #[test]
    fn user_can_be_saved_and_cleared() {
        let (_dir, mut store) = setup();
        let user = User::new("Rae");

        store.save_user(Some(&user)).unwrap();
        assert_eq!(store.load_user().unwrap(), Some(user));

        store.save_user(None).unwrap();
        assert_eq!(store.load_user().unwrap(), None);
    }

    #[test]
    fn writes_leave_no_temp_files() {
        let (_dir, mut store) = setup();
        store.save_items(&demo_catalog()).unwrap();

        for entry in fs::read_dir(store.root()).unwrap() {
            let name = entry.unwrap().file_name().to_string_lossy().to_string();
            assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
        }
    }

    #[test]
    fn corrupt_catalog_is_an_error() {
        let (_dir, store) = setup();
        fs::create_dir_all(store.root()).unwrap();
        fs::write(store.root().join(ITEMS_FILE), "not json").unwrap();

        assert!(matches!(
            store.load_items(),
            Err(NexusError::Serialization(_))
        ));
    }
}
