//! Filter and navigation intents. None of these are persisted.

use crate::commands::CmdResult;
use crate::model::{ActiveView, AppState};

pub fn set_search_query(state: &mut AppState, query: String) -> CmdResult {
    state.search_query = query;
    CmdResult::applied()
}

pub fn set_active_view(state: &mut AppState, view: ActiveView) -> CmdResult {
    if view == ActiveView::Channel && state.current_user.is_none() {
        return CmdResult::ignored("Sign in to view your channel");
    }
    state.active_view = view;
    CmdResult::applied()
}

/// Back to the feed, closing any open item.
pub fn go_home(state: &mut AppState) -> CmdResult {
    state.active_view = ActiveView::Feed;
    state.selected_item_id = None;
    CmdResult::applied()
}

/// The signed-in user's channel, closing any open item.
pub fn open_channel(state: &mut AppState) -> CmdResult {
    if state.current_user.is_none() {
        return CmdResult::ignored("Sign in to view your channel");
    }
    state.active_view = ActiveView::Channel;
    state.selected_item_id = None;
    CmdResult::applied()
}
