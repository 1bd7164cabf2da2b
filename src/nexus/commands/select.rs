use crate::commands::{persist_items, CmdResult};
use crate::model::AppState;
use crate::store::DataStore;
use tracing::debug;

/// Opens an item: records one view and makes it the selection.
pub fn select<S: DataStore>(state: &mut AppState, store: &mut S, id: &str) -> CmdResult {
    // Signed-out sessions never hold a detail view
    if state.current_user.is_none() {
        return CmdResult::ignored("Sign in to open items");
    }

    let item = match state.item_mut(id) {
        Some(item) => {
            item.record_view();
            item.clone()
        }
        None => {
            debug!(id, "ignoring selection of an unknown item");
            return CmdResult::ignored(format!("Item {} not found", id));
        }
    };
    state.selected_item_id = Some(item.id.clone());

    let mut result = CmdResult::applied();
    persist_items(store, &state.items, &mut result);
    debug!(id, views = item.views, "item selected");
    result.with_affected_items(vec![item])
}

pub fn deselect(state: &mut AppState) -> CmdResult {
    state.selected_item_id = None;
    CmdResult::applied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;
    use crate::seed::demo_catalog;
    use crate::store::memory::InMemoryStore;

    fn signed_in() -> AppState {
        let mut state = AppState::with_items(demo_catalog());
        state.current_user = Some(User::new("Rae"));
        state
    }

    #[test]
    fn selecting_counts_a_view() {
        let mut store = InMemoryStore::new();
        let mut state = signed_in();

        let result = select(&mut state, &mut store, "1");

        assert!(result.applied);
        assert_eq!(state.item("1").unwrap().views, 1255);
        assert_eq!(state.item("2").unwrap().views, 890);
        assert_eq!(state.selected_item_id.as_deref(), Some("1"));
        assert_eq!(state.selected_item().unwrap().views, 1255);
        assert_eq!(result.affected_items[0].views, 1255);
        assert_eq!(store.items()[0].views, 1255);
    }

    #[test]
    fn views_equal_initial_plus_selections() {
        let mut store = InMemoryStore::new();
        let mut state = signed_in();

        let mut last = state.item("2").unwrap().views;
        for _ in 0..5 {
            select(&mut state, &mut store, "2");
            let now = state.item("2").unwrap().views;
            assert_eq!(now, last + 1);
            last = now;
        }
        assert_eq!(last, 890 + 5);
        assert_eq!(store.item_writes, 5);
    }

    #[test]
    fn unknown_id_is_a_no_op() {
        let mut store = InMemoryStore::new();
        let mut state = signed_in();
        let before = state.clone();

        let result = select(&mut state, &mut store, "missing");

        assert!(!result.applied);
        assert_eq!(state, before);
        assert_eq!(store.item_writes, 0);
    }

    #[test]
    fn signed_out_selection_is_a_no_op() {
        let mut store = InMemoryStore::new();
        let mut state = AppState::with_items(demo_catalog());
        let before = state.clone();

        select(&mut state, &mut store, "1");
        assert_eq!(state, before);
    }

    #[test]
    fn deselect_keeps_counts() {
        let mut store = InMemoryStore::new();
        let mut state = signed_in();
        select(&mut state, &mut store, "1");

        deselect(&mut state);

        assert_eq!(state.selected_item_id, None);
        assert_eq!(state.item("1").unwrap().views, 1255);
        assert_eq!(store.item_writes, 1);
    }
}
