//! # Command Layer
//!
//! Each module holds the transition logic for one group of user intents. Commands
//! take the catalog state and a store, mutate the state, mirror the affected part
//! into the store, and describe what happened in a [`CmdResult`].
//!
//! Transitions are total: an intent that cannot apply (blank name, unknown id,
//! nobody signed in) leaves the state untouched and returns a result with
//! `applied == false`. Store failures are logged and reported as warnings; they
//! never undo a transition.

use crate::config::NexusConfig;
use crate::insight::InsightRequest;
use crate::model::{MediaItem, User};
use crate::store::DataStore;
use tracing::warn;

pub mod comment;
pub mod config;
pub mod navigate;
pub mod select;
pub mod session;
pub mod upload;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// False when the intent was ignored and the state is unchanged.
    pub applied: bool,
    pub affected_items: Vec<MediaItem>,
    pub insight_request: Option<InsightRequest>,
    pub config: Option<NexusConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn applied() -> Self {
        Self {
            applied: true,
            ..Self::default()
        }
    }

    pub fn ignored(reason: impl Into<String>) -> Self {
        let mut result = Self::default();
        result.add_message(CmdMessage::info(reason));
        result
    }

    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_items(mut self, items: Vec<MediaItem>) -> Self {
        self.affected_items = items;
        self
    }

    pub fn with_insight_request(mut self, request: InsightRequest) -> Self {
        self.insight_request = Some(request);
        self
    }

    pub fn with_config(mut self, config: NexusConfig) -> Self {
        self.config = Some(config);
        self
    }
}

pub(crate) fn persist_items<S: DataStore>(
    store: &mut S,
    items: &[MediaItem],
    result: &mut CmdResult,
) {
    if let Err(e) = store.save_items(items) {
        warn!(error = %e, "failed to persist catalog");
        result.add_message(CmdMessage::warning(format!("Catalog not saved: {}", e)));
    }
}

pub(crate) fn persist_user<S: DataStore>(
    store: &mut S,
    user: Option<&User>,
    result: &mut CmdResult,
) {
    if let Err(e) = store.save_user(user) {
        warn!(error = %e, "failed to persist session");
        result.add_message(CmdMessage::warning(format!("Session not saved: {}", e)));
    }
}
