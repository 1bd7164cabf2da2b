use crate::commands::{persist_user, CmdMessage, CmdResult};
use crate::model::{ActiveView, AppState, User};
use crate::store::DataStore;
use tracing::{debug, info};

pub fn login<S: DataStore>(state: &mut AppState, store: &mut S, name: &str) -> CmdResult {
    if name.trim().is_empty() {
        debug!("ignoring login with a blank name");
        return CmdResult::ignored("Username cannot be empty");
    }

    let user = User::new(name);
    state.current_user = Some(user.clone());

    let mut result = CmdResult::applied();
    persist_user(store, Some(&user), &mut result);
    info!(username = %user.username, "signed in");
    result.add_message(CmdMessage::success(format!("Signed in as {}", user.username)));
    result
}

pub fn logout<S: DataStore>(state: &mut AppState, store: &mut S) -> CmdResult {
    let previous = state.current_user.take();
    state.active_view = ActiveView::Feed;
    state.selected_item_id = None;

    let mut result = CmdResult::applied();
    persist_user(store, None, &mut result);
    match previous {
        Some(user) => {
            info!(username = %user.username, "signed out");
            result.add_message(CmdMessage::success(format!("Signed out {}", user.username)));
        }
        None => result.add_message(CmdMessage::info("Not signed in")),
    }
    result
}
