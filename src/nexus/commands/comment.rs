use crate::commands::{persist_items, CmdMessage, CmdResult};
use crate::model::{AppState, Comment};
use crate::store::DataStore;
use chrono::{DateTime, Utc};
use tracing::debug;

pub fn set_draft(state: &mut AppState, text: String) -> CmdResult {
    state.comment_draft = text;
    CmdResult::applied()
}

/// Posts a comment on the selected item as the signed-in user.
pub fn post<S: DataStore>(
    state: &mut AppState,
    store: &mut S,
    text: &str,
    now: DateTime<Utc>,
) -> CmdResult {
    if text.trim().is_empty() {
        return CmdResult::ignored("Comment cannot be empty");
    }
    let Some(author) = state.current_user.clone() else {
        return CmdResult::ignored("Sign in to comment");
    };
    let Some(selected) = state.selected_item_id.clone() else {
        return CmdResult::ignored("Open an item to comment on it");
    };
    let Some(item) = state.item_mut(&selected) else {
        return CmdResult::ignored(format!("Item {} not found", selected));
    };

    let mut comment = Comment::new(&author, text.to_string(), now);
    // Two comments in the same millisecond still need distinct ids
    let mut millis = now.timestamp_millis();
    while item.has_comment_id(&comment.id) {
        millis += 1;
        comment.id = millis.to_string();
    }
    item.prepend_comment(comment);
    let item = item.clone();
    state.comment_draft.clear();

    let mut result = CmdResult::applied();
    persist_items(store, &state.items, &mut result);
    debug!(id = %item.id, comments = item.comments.len(), "comment posted");
    result.add_message(CmdMessage::success(format!("Comment posted on {}", item.title)));
    result.with_affected_items(vec![item])
}
