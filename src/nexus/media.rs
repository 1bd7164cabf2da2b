//! Turning a local file into an uploadable [`MediaItem`].
//!
//! The catalog trusts uploads to be fully formed; this is where they get formed.

use crate::error::{NexusError, Result};
use crate::model::{Category, MediaItem, User};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaDraft {
    pub title: String,
    pub description: String,
    pub file_name: String,
    pub size_bytes: u64,
    pub file_url: String,
    pub thumbnail_url: Option<String>,
}

impl MediaDraft {
    /// Reads name and size from `path`. An empty title falls back to the file stem.
    pub fn from_path(
        path: &Path,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<Self> {
        let metadata = fs::metadata(path).map_err(NexusError::Io)?;
        if !metadata.is_file() {
            return Err(NexusError::Media(format!(
                "{} is not a regular file",
                path.display()
            )));
        }
        let canonical = fs::canonicalize(path).map_err(NexusError::Io)?;
        let file_name = canonical
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| NexusError::Media(format!("{} has no file name", path.display())))?;

        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| file_stem(&file_name));

        Ok(Self {
            title,
            description: description.unwrap_or_default(),
            file_name,
            size_bytes: metadata.len(),
            file_url: format!("file://{}", canonical.display()),
            thumbnail_url: None,
        })
    }

    pub fn with_thumbnail(mut self, url: Option<String>) -> Self {
        self.thumbnail_url = url;
        self
    }

    pub fn extension(&self) -> String {
        Path::new(&self.file_name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }

    /// Completes the record: fresh id, uploader snapshot, zero views, no comments.
    pub fn into_item(self, uploader: &User, now: DateTime<Utc>) -> MediaItem {
        let extension = self.extension();
        MediaItem {
            id: Uuid::new_v4().to_string(),
            category: Category::from_extension(&extension),
            file_size: format_file_size(self.size_bytes),
            title: self.title,
            description: self.description,
            file_name: self.file_name,
            file_url: self.file_url,
            thumbnail_url: self.thumbnail_url,
            uploader: uploader.clone(),
            upload_date: now.date_naive(),
            views: 0,
            comments: Vec::new(),
            extension,
        }
    }
}

fn file_stem(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| file_name.to_string())
}

/// Human-readable size with one decimal, e.g. `15.4 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn formats_sizes() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(16_148_070), "15.4 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn draft_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Night Drive.MP3");
        fs::write(&path, vec![0u8; 2048]).unwrap();

        let draft = MediaDraft::from_path(&path, None, Some("late".into())).unwrap();
        assert_eq!(draft.title, "Night Drive");
        assert_eq!(draft.size_bytes, 2048);
        assert!(draft.file_url.starts_with("file://"));

        let rae = User::new("Rae");
        let item = draft.into_item(&rae, Utc::now());
        assert_eq!(item.category, Category::Audio);
        assert_eq!(item.extension, "mp3");
        assert_eq!(item.file_size, "2.0 KB");
        assert_eq!(item.uploader, rae);
        assert_eq!(item.views, 0);
        assert!(item.comments.is_empty());
    }

    #[test]
    fn explicit_title_wins() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blob.bin");
        fs::write(&path, b"x").unwrap();

        let draft = MediaDraft::from_path(&path, Some(" Firmware ".into()), None).unwrap();
        assert_eq!(draft.title, "Firmware");
    }

    #[test]
    fn directories_are_rejected() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            MediaDraft::from_path(dir.path(), None, None),
            Err(NexusError::Media(_))
        ));
    }

    #[test]
    fn each_item_gets_a_fresh_id() {
        let draft = MediaDraft {
            title: "t".into(),
            description: String::new(),
            file_name: "t.zip".into(),
            size_bytes: 1,
            file_url: "file:///t.zip".into(),
            thumbnail_url: None,
        };
        let rae = User::new("Rae");
        let a = draft.clone().into_item(&rae, Utc::now());
        let b = draft.into_item(&rae, Utc::now());
        assert_ne!(a.id, b.id);
        assert_eq!(a.category, Category::Binary);
    }
}
