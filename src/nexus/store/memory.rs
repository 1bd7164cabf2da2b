use super::DataStore;
use crate::error::{NexusError, Result};
use crate::model::{MediaItem, User};

/// In-memory storage for testing and development.
/// Does NOT persist data. Counts writes so tests can assert on persistence.
#[derive(Default)]
pub struct InMemoryStore {
    user: Option<User>,
    items: Vec<MediaItem>,
    pub user_writes: usize,
    pub item_writes: usize,
    fail_writes: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<MediaItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    /// Every subsequent write fails with a store error.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes {
            return Err(NexusError::Store("store is read-only".to_string()));
        }
        Ok(())
    }
}

impl DataStore for InMemoryStore {
    fn load_user(&self) -> Result<Option<User>> {
        Ok(self.user.clone())
    }

    fn save_user(&mut self, user: Option<&User>) -> Result<()> {
        self.check_writable()?;
        self.user = user.cloned();
        self.user_writes += 1;
        Ok(())
    }

    fn load_items(&self) -> Result<Vec<MediaItem>> {
        Ok(self.items.clone())
    }

    fn save_items(&mut self, items: &[MediaItem]) -> Result<()> {
        self.check_writable()?;
        self.items = items.to_vec();
        self.item_writes += 1;
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use crate::model::{Category, MediaItem, User};
    use chrono::NaiveDate;

    /// A minimal item uploaded by `uploader`.
    pub fn item(id: &str, title: &str, uploader: &str) -> MediaItem {
        MediaItem {
            id: id.to_string(),
            title: title.to_string(),
            description: format!("Description of {}", title),
            category: Category::Binary,
            file_name: format!("{}.bin", id),
            file_size: "1.0 KB".to_string(),
            file_url: format!("file:///tmp/{}.bin", id),
            thumbnail_url: None,
            uploader: User::new(uploader),
            upload_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            views: 0,
            comments: Vec::new(),
            extension: "bin".to_string(),
        }
    }
}
