use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const AVATAR_BASE_URL: &str = "https://robohash.org/";

/// Builds the avatar URL for a username. Same name, same avatar.
pub fn avatar_url(username: &str) -> String {
    format!("{}{}", AVATAR_BASE_URL, username)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub avatar: String,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        let username = username.into();
        let avatar = avatar_url(&username);
        Self { username, avatar }
    }

    pub fn with_avatar(username: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            avatar: avatar.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Video,
    Audio,
    Binary,
}

impl Category {
    /// Anything that is not a known video or audio container is `Binary`.
    pub fn from_extension(ext: &str) -> Self {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "mp4" | "webm" | "mov" | "mkv" | "avi" | "m4v" => Category::Video,
            "mp3" | "wav" | "ogg" | "flac" | "m4a" | "aac" | "opus" => Category::Audio,
            _ => Category::Binary,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Video => "video",
            Category::Audio => "audio",
            Category::Binary => "binary",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub username: String,
    pub avatar: String,
    pub text: String,
    pub date: DateTime<Utc>,
}

impl Comment {
    /// The id is the posting time in milliseconds.
    pub fn new(author: &User, text: String, date: DateTime<Utc>) -> Self {
        Self {
            id: date.timestamp_millis().to_string(),
            username: author.username.clone(),
            avatar: author.avatar.clone(),
            text,
            date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub file_name: String,
    pub file_size: String,
    pub file_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub uploader: User,
    pub upload_date: NaiveDate,
    pub views: u64,
    // Newest first
    pub comments: Vec<Comment>,
    pub extension: String,
}

impl MediaItem {
    pub fn record_view(&mut self) {
        self.views = self.views.saturating_add(1);
    }

    pub fn prepend_comment(&mut self, comment: Comment) {
        self.comments.insert(0, comment);
    }

    pub fn has_comment_id(&self, id: &str) -> bool {
        self.comments.iter().any(|c| c.id == id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveView {
    #[default]
    Feed,
    Channel,
}

/// The authoritative catalog state. Only the command layer mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub current_user: Option<User>,
    // Canonical order: newest upload first
    pub items: Vec<MediaItem>,
    pub search_query: String,
    pub active_view: ActiveView,
    pub selected_item_id: Option<String>,
    pub upload_modal_open: bool,
    pub comment_draft: String,
}

impl AppState {
    pub fn with_items(items: Vec<MediaItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn item(&self, id: &str) -> Option<&MediaItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn item_mut(&mut self, id: &str) -> Option<&mut MediaItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.item(id).is_some()
    }

    /// Resolves the selection against the catalog on every read.
    pub fn selected_item(&self) -> Option<&MediaItem> {
        self.selected_item_id
            .as_deref()
            .and_then(|id| self.item(id))
    }
}
