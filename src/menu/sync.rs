use futures::future::join_all;

use crate::api::{ApiClient, ApiError, ApiResult, MenuItemPatch, SubMenuItemPatch};
use crate::menu::collection::{OrderUpdate, RecordKind};
use crate::models::MenuItem;

/// Remote side of a reorder commit. The gateway client implements this; tests
/// swap in a scripted store.
pub(crate) trait MenuStore {
    async fn fetch_menu(&self, organization_id: &str) -> ApiResult<Vec<MenuItem>>;
    async fn push_order(&self, update: &OrderUpdate) -> ApiResult<()>;
    async fn invalidate(&self, organization_id: &str) -> ApiResult<()>;
}

impl MenuStore for ApiClient {
    async fn fetch_menu(&self, organization_id: &str) -> ApiResult<Vec<MenuItem>> {
        self.get_menu_items(organization_id).await
    }

    async fn push_order(&self, update: &OrderUpdate) -> ApiResult<()> {
        match update.kind {
            RecordKind::Menu => {
                self.update_menu_item(&update.id, &MenuItemPatch::order(update.order))
                    .await
            }
            RecordKind::Submenu => {
                self.update_submenu_item(&update.id, &SubMenuItemPatch::order(update.order))
                    .await
            }
        }
    }

    async fn invalidate(&self, organization_id: &str) -> ApiResult<()> {
        self.revalidate(organization_id).await
    }
}

/// Outcome of committing one reorder batch.
#[derive(Clone, Debug)]
pub(crate) enum ReorderSync {
    /// Every write landed; the optimistic state is authoritative.
    Confirmed,
    /// At least one write failed; `items` is the server's current truth and
    /// must replace whatever the optimistic update showed.
    Resynced {
        items: Vec<MenuItem>,
        error: ApiError,
    },
}

/// Arbitration for a settled rollback. The refetched `server` list replaces
/// `local` only when no commit happened after the one this batch belongs to;
/// a newer commit always wins over an older rollback.
pub(crate) fn resolve_resync(
    local: Vec<MenuItem>,
    server: Vec<MenuItem>,
    committed_epoch: u64,
    current_epoch: u64,
) -> Vec<MenuItem> {
    if current_epoch == committed_epoch {
        server
    } else {
        local
    }
}

/// Push one reorder batch, concurrently, one write per changed record.
///
/// All writes run regardless of individual failures. On any failure the
/// server state is refetched so the caller can roll back; the refetch itself
/// failing is the only way this returns `Err`.
pub(crate) async fn sync_reorder<S: MenuStore>(
    store: &S,
    organization_id: &str,
    updates: &[OrderUpdate],
) -> ApiResult<ReorderSync> {
    if updates.is_empty() {
        return Ok(ReorderSync::Confirmed);
    }

    let results = join_all(updates.iter().map(|u| store.push_order(u))).await;

    if let Some(error) = results.into_iter().find_map(Result::err) {
        let items = store.fetch_menu(organization_id).await?;
        return Ok(ReorderSync::Resynced { items, error });
    }

    if let Err(e) = store.invalidate(organization_id).await {
        leptos::logging::warn!("cache invalidation failed after reorder: {e}");
    }

    Ok(ReorderSync::Confirmed)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::api::ApiErrorKind;
    use crate::menu::collection::{diff_order_updates, reorder_menu};
    use std::sync::Mutex;

    fn item(id: &str, order: i32) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            organization_id: "org1".to_string(),
            display_name: id.to_uppercase(),
            url_name: id.to_string(),
            description: None,
            is_displayed: true,
            is_displayed_on_footer: true,
            order,
            submenu_items: vec![],
        }
    }

    fn http_error() -> ApiError {
        ApiError {
            kind: ApiErrorKind::Http,
            message: "Request failed (500): boom".to_string(),
        }
    }

    /// Scripted store: writes to ids in `fail_ids` fail, everything else
    /// succeeds; `fetch_menu` serves `server_items`.
    struct ScriptedStore {
        server_items: Vec<MenuItem>,
        fail_ids: Vec<String>,
        fetch_fails: bool,
        pushed: Mutex<Vec<OrderUpdate>>,
        invalidated: Mutex<u32>,
    }

    impl ScriptedStore {
        fn new(server_items: Vec<MenuItem>) -> Self {
            Self {
                server_items,
                fail_ids: vec![],
                fetch_fails: false,
                pushed: Mutex::new(vec![]),
                invalidated: Mutex::new(0),
            }
        }

        fn failing(mut self, id: &str) -> Self {
            self.fail_ids.push(id.to_string());
            self
        }
    }

    impl MenuStore for ScriptedStore {
        async fn fetch_menu(&self, _organization_id: &str) -> ApiResult<Vec<MenuItem>> {
            if self.fetch_fails {
                return Err(http_error());
            }
            Ok(self.server_items.clone())
        }

        async fn push_order(&self, update: &OrderUpdate) -> ApiResult<()> {
            self.pushed.lock().unwrap().push(update.clone());
            if self.fail_ids.contains(&update.id) {
                return Err(http_error());
            }
            Ok(())
        }

        async fn invalidate(&self, _organization_id: &str) -> ApiResult<()> {
            *self.invalidated.lock().unwrap() += 1;
            Ok(())
        }
    }

    #[tokio::test]
    async fn confirmed_batch_pushes_every_update_then_invalidates() {
        let store = ScriptedStore::new(vec![]);
        let updates = vec![
            OrderUpdate { kind: RecordKind::Menu, id: "x".into(), order: 10 },
            OrderUpdate { kind: RecordKind::Menu, id: "y".into(), order: 20 },
            OrderUpdate { kind: RecordKind::Menu, id: "z".into(), order: 0 },
        ];

        let outcome = sync_reorder(&store, "org1", &updates).await.unwrap();
        assert!(matches!(outcome, ReorderSync::Confirmed));
        assert_eq!(store.pushed.lock().unwrap().len(), 3);
        assert_eq!(*store.invalidated.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn empty_batch_is_confirmed_without_network() {
        let store = ScriptedStore::new(vec![]);
        let outcome = sync_reorder(&store, "org1", &[]).await.unwrap();
        assert!(matches!(outcome, ReorderSync::Confirmed));
        assert!(store.pushed.lock().unwrap().is_empty());
        assert_eq!(*store.invalidated.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn failed_write_resyncs_to_server_state() {
        let server = vec![item("x", 0), item("y", 10), item("z", 20)];
        let store = ScriptedStore::new(server.clone()).failing("y");
        let updates = vec![
            OrderUpdate { kind: RecordKind::Menu, id: "x".into(), order: 10 },
            OrderUpdate { kind: RecordKind::Menu, id: "y".into(), order: 0 },
        ];

        let outcome = sync_reorder(&store, "org1", &updates).await.unwrap();
        match outcome {
            ReorderSync::Resynced { items, error } => {
                assert_eq!(items, server);
                assert_eq!(error.kind, ApiErrorKind::Http);
            }
            ReorderSync::Confirmed => panic!("expected resync"),
        }

        // Every write was still attempted, and no invalidation happened.
        assert_eq!(store.pushed.lock().unwrap().len(), 2);
        assert_eq!(*store.invalidated.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn refetch_failure_surfaces_as_error() {
        let mut store = ScriptedStore::new(vec![]).failing("x");
        store.fetch_fails = true;
        let updates = vec![OrderUpdate {
            kind: RecordKind::Menu,
            id: "x".into(),
            order: 0,
        }];

        let err = sync_reorder(&store, "org1", &updates).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Http);
    }

    #[tokio::test]
    async fn stale_rollback_is_discarded_after_newer_commit() {
        // Batch committed at epoch 1 fails and comes back with server state
        // while a second commit has already moved the epoch to 2: the stale
        // rollback must not clobber the newer local arrangement.
        let server = vec![item("a", 0), item("b", 10)];
        let store = ScriptedStore::new(server.clone()).failing("a");
        let updates = vec![OrderUpdate {
            kind: RecordKind::Menu,
            id: "a".into(),
            order: 10,
        }];

        let outcome = sync_reorder(&store, "org1", &updates).await.unwrap();
        let ReorderSync::Resynced { items, .. } = outcome else {
            panic!("expected resync");
        };
        assert_eq!(items, server);

        let local = vec![item("b", 0), item("a", 10)];
        assert_eq!(
            resolve_resync(local.clone(), items.clone(), 1, 2),
            local,
            "newer commit wins over the older rollback"
        );
        assert_eq!(
            resolve_resync(local, items.clone(), 2, 2),
            items,
            "with no newer commit the server list is applied"
        );
    }

    #[tokio::test]
    async fn drag_to_front_commits_three_writes() {
        // x:0 y:10 z:20; dragging z onto x changes all three keys, so the
        // batch carries exactly three writes.
        let before = vec![item("x", 0), item("y", 10), item("z", 20)];
        let after = reorder_menu(&before, "z", "x").expect("valid move");
        let updates = diff_order_updates(&before, &after);

        let store = ScriptedStore::new(vec![]);
        let outcome = sync_reorder(&store, "org1", &updates).await.unwrap();
        assert!(matches!(outcome, ReorderSync::Confirmed));

        let pushed = store.pushed.lock().unwrap();
        assert_eq!(pushed.len(), 3);
        assert_eq!(pushed.iter().find(|u| u.id == "z").unwrap().order, 0);
        assert_eq!(pushed.iter().find(|u| u.id == "x").unwrap().order, 10);
        assert_eq!(pushed.iter().find(|u| u.id == "y").unwrap().order, 20);
    }
}
