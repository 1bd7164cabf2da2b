//! # API Facade
//!
//! [`NexusApi`] is the catalog store: it owns the [`AppState`], the storage
//! collaborator and the insight tracker, and it is the single entry point for every
//! state transition, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** intents to the command layer
//! - **Keeps the insight tracker in step** with the selection
//! - **Exposes read-only projections** for rendering
//!
//! ## What the API Does NOT Do
//!
//! - **Transition logic**: that belongs in `commands/*.rs`
//! - **Filtering**: that belongs in `projection.rs`
//! - **Network calls**: `select_item` hands back an [`InsightRequest`]; the caller
//!   runs it with [`crate::insight::fetch`] and returns the outcome via
//!   [`NexusApi::apply_insight`]
//!
//! ## Generic Over DataStore
//!
//! - Production: `NexusApi<FileStore>`
//! - Testing: `NexusApi<InMemoryStore>`

use crate::commands::{self, comment, navigate, select, session, upload};
use crate::error::Result;
use crate::insight::{InsightResponse, InsightState, InsightTracker};
use crate::model::{ActiveView, AppState, MediaItem, User};
use crate::projection;
use crate::seed;
use crate::store::DataStore;
use chrono::Utc;
use std::path::Path;
use tracing::{info, warn};

pub struct NexusApi<S: DataStore> {
    store: S,
    state: AppState,
    insight: InsightTracker,
}

impl<S: DataStore> NexusApi<S> {
    /// Loads the persisted user and catalog. An empty catalog is replaced by the
    /// demo catalog, which is written back; that is the only write made here.
    pub fn initialize(mut store: S) -> Result<Self> {
        let current_user = store.load_user()?;
        let mut items = store.load_items()?;

        if items.is_empty() {
            items = seed::demo_catalog();
            if let Err(e) = store.save_items(&items) {
                warn!(error = %e, "failed to persist demo catalog");
            }
            info!(count = items.len(), "seeded demo catalog");
        }

        let state = AppState {
            current_user,
            items,
            ..AppState::default()
        };
        Ok(Self {
            store,
            state,
            insight: InsightTracker::new(),
        })
    }

    pub fn login(&mut self, name: &str) -> commands::CmdResult {
        session::login(&mut self.state, &mut self.store, name)
    }

    pub fn logout(&mut self) -> commands::CmdResult {
        let result = session::logout(&mut self.state, &mut self.store);
        self.sync_insight();
        result
    }

    pub fn upload(&mut self, item: MediaItem) -> commands::CmdResult {
        upload::run(&mut self.state, &mut self.store, item)
    }

    pub fn open_upload_modal(&mut self) -> commands::CmdResult {
        upload::open_modal(&mut self.state)
    }

    pub fn close_upload_modal(&mut self) -> commands::CmdResult {
        upload::close_modal(&mut self.state)
    }

    /// Records a view and opens the item. When applied, the result carries the
    /// insight request for the newly selected item.
    pub fn select_item(&mut self, id: &str) -> commands::CmdResult {
        let result = select::select(&mut self.state, &mut self.store, id);
        if !result.applied {
            return result;
        }
        match self.state.selected_item() {
            Some(item) => {
                let request = self.insight.begin(item);
                result.with_insight_request(request)
            }
            None => result,
        }
    }

    pub fn deselect(&mut self) -> commands::CmdResult {
        let result = select::deselect(&mut self.state);
        self.sync_insight();
        result
    }

    pub fn set_comment_draft(&mut self, text: impl Into<String>) -> commands::CmdResult {
        comment::set_draft(&mut self.state, text.into())
    }

    pub fn post_comment(&mut self, text: &str) -> commands::CmdResult {
        comment::post(&mut self.state, &mut self.store, text, Utc::now())
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) -> commands::CmdResult {
        navigate::set_search_query(&mut self.state, query.into())
    }

    pub fn set_active_view(&mut self, view: ActiveView) -> commands::CmdResult {
        navigate::set_active_view(&mut self.state, view)
    }

    pub fn go_home(&mut self) -> commands::CmdResult {
        let result = navigate::go_home(&mut self.state);
        self.sync_insight();
        result
    }

    pub fn open_channel(&mut self) -> commands::CmdResult {
        let result = navigate::open_channel(&mut self.state);
        self.sync_insight();
        result
    }

    /// Shows a fetched insight if it still belongs to the open item.
    pub fn apply_insight(&mut self, response: InsightResponse) -> bool {
        self.insight
            .resolve(response, self.state.selected_item_id.as_deref())
    }

    // --- Projections ---

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn current_user(&self) -> Option<&User> {
        self.state.current_user.as_ref()
    }

    pub fn projected_items(&self) -> Vec<&MediaItem> {
        projection::projected_items(&self.state)
    }

    pub fn selected_item(&self) -> Option<&MediaItem> {
        self.state.selected_item()
    }

    pub fn related_items(&self) -> Vec<&MediaItem> {
        projection::related_items(&self.state)
    }

    pub fn is_upload_modal_open(&self) -> bool {
        self.state.upload_modal_open
    }

    pub fn insight_state(&self) -> &InsightState {
        self.insight.state()
    }

    pub fn search_query(&self) -> &str {
        &self.state.search_query
    }

    pub fn active_view(&self) -> ActiveView {
        self.state.active_view
    }

    pub fn comment_draft(&self) -> &str {
        &self.state.comment_draft
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn sync_insight(&mut self) {
        if self.state.selected_item_id.is_none() {
            self.insight.reset();
        }
    }
}

/// Shows or changes the configuration stored in `dir`.
pub fn config(dir: &Path, action: ConfigAction) -> Result<commands::CmdResult> {
    commands::config::run(dir, action)
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel};
