//! # Storage Layer
//!
//! The [`DataStore`] trait is the persistence contract of the catalog. A store is a
//! mirror of the catalog state: it is read once when the catalog starts and rewritten
//! after every mutating operation. It holds no business logic.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: JSON files in a data directory
//! - [`memory::InMemoryStore`]: in-memory storage for testing, records write counts
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! <data dir>/
//! ├── user.json      # The signed-in user, or `null`
//! ├── items.json     # The full catalog (JSON array, newest first)
//! └── config.json    # Configuration (see config.rs)
//! ```
//!
//! ## Granularity
//!
//! The full item collection is rewritten on every write; there are no deltas. The user
//! record is only written on login and logout.

use crate::error::Result;
use crate::model::{MediaItem, User};

pub mod fs;
pub mod memory;

/// Abstract interface for catalog persistence.
pub trait DataStore {
    /// Load the persisted user, if any
    fn load_user(&self) -> Result<Option<User>>;

    /// Persist the user, or clear it with `None`
    fn save_user(&mut self, user: Option<&User>) -> Result<()>;

    /// Load the full catalog in canonical order
    fn load_items(&self) -> Result<Vec<MediaItem>>;

    /// Replace the full catalog
    fn save_items(&mut self, items: &[MediaItem]) -> Result<()>;
}
