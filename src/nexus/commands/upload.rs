use crate::commands::{persist_items, CmdMessage, CmdResult};
use crate::model::{AppState, MediaItem};
use crate::store::DataStore;
use tracing::{debug, info};

/// Prepends a fully formed item. The caller assigns the id and the uploader;
/// the only check made here is that the id is not already taken.
pub fn run<S: DataStore>(state: &mut AppState, store: &mut S, item: MediaItem) -> CmdResult {
    if state.contains(&item.id) {
        debug!(id = %item.id, "ignoring upload with a duplicate id");
        return CmdResult::ignored(format!("An item with id {} already exists", item.id));
    }

    state.items.insert(0, item.clone());
    state.upload_modal_open = false;

    let mut result = CmdResult::applied();
    persist_items(store, &state.items, &mut result);
    info!(id = %item.id, uploader = %item.uploader.username, "item uploaded");
    result.add_message(CmdMessage::success(format!("Uploaded: {}", item.title)));
    result.with_affected_items(vec![item])
}

pub fn open_modal(state: &mut AppState) -> CmdResult {
    state.upload_modal_open = true;
    CmdResult::applied()
}

pub fn close_modal(state: &mut AppState) -> CmdResult {
    state.upload_modal_open = false;
    CmdResult::applied()
}
