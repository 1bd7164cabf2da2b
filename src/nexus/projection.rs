//! # View Projection
//!
//! Pure read-side derivations over [`AppState`]. Nothing here mutates state, and
//! every function preserves the catalog's canonical newest-first order.
//!
//! The feed filter composes two independent predicates:
//! - **channel**: with `ActiveView::Channel` and a signed-in user, only that user's
//!   uploads (exact, case-sensitive username match)
//! - **search**: with a non-empty query, only items whose title contains the query,
//!   ignoring case

use crate::model::{ActiveView, AppState, MediaItem};

/// How many items the detail view's related rail shows.
pub const RELATED_LIMIT: usize = 6;

pub fn projected_items(state: &AppState) -> Vec<&MediaItem> {
    let channel_owner = match (&state.active_view, &state.current_user) {
        (ActiveView::Channel, Some(user)) => Some(user.username.as_str()),
        _ => None,
    };
    let query = state.search_query.to_lowercase();

    state
        .items
        .iter()
        .filter(|item| channel_owner.map_or(true, |owner| item.uploader.username == owner))
        .filter(|item| query.is_empty() || item.title.to_lowercase().contains(&query))
        .collect()
}

/// Items other than the selected one, in canonical order.
pub fn related_items(state: &AppState) -> Vec<&MediaItem> {
    let Some(selected) = state.selected_item_id.as_deref() else {
        return Vec::new();
    };
    state
        .items
        .iter()
        .filter(|item| item.id != selected)
        .take(RELATED_LIMIT)
        .collect()
}
