use nexus::api::NexusApi;
use nexus::insight::{self, InsightError, InsightFetcher, InsightState};
use nexus::model::{ActiveView, User};
use nexus::store::fs::FileStore;
use nexus::store::DataStore;
use tempfile::TempDir;

struct Canned(&'static str);

#[async_trait::async_trait]
impl InsightFetcher for Canned {
    async fn request_insight(
        &self,
        _title: &str,
        _description: &str,
    ) -> Result<String, InsightError> {
        Ok(self.0.to_string())
    }
}

fn open(dir: &TempDir) -> NexusApi<FileStore> {
    NexusApi::initialize(FileStore::new(dir.path().to_path_buf())).unwrap()
}

#[test]
fn test_end_to_end_session() {
    let dir = TempDir::new().unwrap();
    let mut api = open(&dir);

    // Empty storage seeds exactly two items
    assert_eq!(api.state().items.len(), 2);
    let item1 = api.state().items[0].clone();

    api.login("Rae");
    assert_eq!(api.current_user().unwrap().username, "Rae");

    api.select_item(&item1.id);
    assert_eq!(api.state().item(&item1.id).unwrap().views, item1.views + 1);
    assert_eq!(api.state().selected_item_id.as_deref(), Some(item1.id.as_str()));

    api.post_comment("hello");
    let head = &api.state().item(&item1.id).unwrap().comments[0];
    assert_eq!(head.text, "hello");
    assert_eq!(head.username, "Rae");
}

#[test]
fn test_state_survives_restart() {
    let dir = TempDir::new().unwrap();
    {
        let mut api = open(&dir);
        api.login("Rae");
        api.select_item("2");
        api.post_comment("first");
        api.post_comment("second");
        api.set_search_query("rain");
        api.set_active_view(ActiveView::Channel);
    }

    let api = open(&dir);
    assert_eq!(api.current_user(), Some(&User::new("Rae")));
    let item = api.state().item("2").unwrap();
    assert_eq!(item.views, 891);
    let texts: Vec<_> = item.comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, ["second", "first"]);

    // Selection and filters are transient
    assert_eq!(api.state().selected_item_id, None);
    assert_eq!(api.search_query(), "");
    assert_eq!(api.active_view(), ActiveView::Feed);
}

#[test]
fn test_reopening_does_not_reseed() {
    let dir = TempDir::new().unwrap();
    {
        let mut api = open(&dir);
        api.login("Rae");
        api.select_item("1");
    }
    let api = open(&dir);
    assert_eq!(api.state().items.len(), 2);
    assert_eq!(api.state().item("1").unwrap().views, 1255);
}

#[test]
fn test_logout_is_persisted() {
    let dir = TempDir::new().unwrap();
    {
        let mut api = open(&dir);
        api.login("Rae");
        api.logout();
    }
    let store = FileStore::new(dir.path().to_path_buf());
    assert_eq!(store.load_user().unwrap(), None);
}

#[tokio::test]
async fn test_insight_for_the_open_item() {
    let dir = TempDir::new().unwrap();
    let mut api = open(&dir);
    api.login("Rae");

    let stale = api.select_item("1").insight_request.unwrap();
    let current = api.select_item("2").insight_request.unwrap();

    let fetcher = Canned("Ambient signal detected.");
    let (stale, current) = tokio::join!(
        insight::fetch(&fetcher, stale),
        insight::fetch(&fetcher, current)
    );

    assert!(!api.apply_insight(stale));
    assert!(api.apply_insight(current));
    assert_eq!(
        api.insight_state(),
        &InsightState::Ready("Ambient signal detected.".to_string())
    );
    assert_eq!(api.selected_item().unwrap().id, "2");
}
