//! Summary listing view for one component kind.
//!
//! Besides projections and intents, each listing that supports status
//! history owns a watcher task. The watcher follows the "view status history"
//! projection of its tab; every time the projection names a new id it waits
//! for that component to appear in the summary listing and then dispatches a
//! single `GetStatusHistoryAndOpenDialog`. A newer id replaces a pending
//! wait, so only the latest selection can open the dialog.

use flowconsole_core::selectors::select_component_id_from_route;
use flowconsole_core::selectors::select_component_status_present;
use flowconsole_core::selectors::select_current_user;
use flowconsole_core::selectors::select_summary_listing_loaded_timestamp;
use flowconsole_core::selectors::select_summary_listing_status;
use flowconsole_core::selectors::select_view_status_history;
use flowconsole_core::selectors::status_rows;
use flowconsole_core::selectors::StatusRow;
use flowconsole_core::ConsoleState;
use flowconsole_core::CurrentUser;
use flowconsole_core::LoadStatus;
use flowconsole_core::OverlayAction;
use flowconsole_core::SelectStatusRequest;
use flowconsole_core::StatusHistoryAction;
use flowconsole_core::StatusHistoryRequest;
use flowconsole_core::SummaryListingAction;
use flowconsole_core::SummaryTab;
use flowconsole_core::SystemDiagnosticsAction;
use flowconsole_core::SystemDiagnosticsRequest;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::store::Store;

pub const STATUS_HISTORY_SOURCE: &str = "summary";

pub struct StatusListing {
    store: Store,
    tab: SummaryTab,
    watcher: Option<JoinHandle<()>>,
}

impl StatusListing {
    /// Must be called inside a Tokio runtime when `tab` has status history.
    pub fn new(store: Store, tab: SummaryTab) -> Self {
        let watcher = tab.has_status_history().then(|| {
            let rx = store.subscribe();
            tokio::spawn(watch_status_history(store.clone(), rx, tab))
        });
        Self {
            store,
            tab,
            watcher,
        }
    }

    pub fn tab(&self) -> SummaryTab {
        self.tab
    }

    pub fn loaded_timestamp(&self) -> String {
        self.store
            .select(|state| select_summary_listing_loaded_timestamp(state).to_string())
    }

    pub fn listing_status(&self) -> LoadStatus {
        self.store.select(select_summary_listing_status)
    }

    pub fn current_user(&self) -> CurrentUser {
        self.store.select(|state| select_current_user(state).clone())
    }

    pub fn rows(&self) -> Vec<StatusRow> {
        self.store.select(|state| status_rows(state, self.tab))
    }

    pub fn selected_id(&self) -> Option<String> {
        self.store
            .select(|state| select_component_id_from_route(state, self.tab).map(str::to_string))
    }

    /// True until the first summary load succeeds; the loaded timestamp is
    /// empty until then.
    pub fn is_initial_loading(&self) -> bool {
        self.store
            .select(|state| select_summary_listing_loaded_timestamp(state).is_empty())
    }

    pub fn refresh_summary_listing(&self) {
        self.store
            .dispatch(SummaryListingAction::LoadSummaryListing { recursive: true });
    }

    pub fn select(&self, id: &str) {
        let request = SelectStatusRequest { id: id.to_string() };
        let action = match self.tab {
            SummaryTab::Processors => SummaryListingAction::SelectProcessorStatus { request },
            SummaryTab::InputPorts => SummaryListingAction::SelectInputPortStatus { request },
            SummaryTab::OutputPorts => SummaryListingAction::SelectOutputPortStatus { request },
            SummaryTab::RemoteProcessGroups => {
                SummaryListingAction::SelectRemoteProcessGroupStatus { request }
            }
            SummaryTab::Connections => SummaryListingAction::SelectConnectionStatus { request },
            SummaryTab::ProcessGroups => SummaryListingAction::SelectProcessGroupStatus { request },
        };
        self.store.dispatch(action);
    }

    /// Returns false for tabs without status history.
    pub fn view_status_history(&self, id: &str) -> bool {
        let id = id.to_string();
        let action = match self.tab {
            SummaryTab::Processors => {
                SummaryListingAction::NavigateToViewProcessorStatusHistory { id }
            }
            SummaryTab::RemoteProcessGroups => {
                SummaryListingAction::NavigateToViewRemoteProcessGroupStatusHistory { id }
            }
            SummaryTab::Connections => {
                SummaryListingAction::NavigateToViewConnectionStatusHistory { id }
            }
            SummaryTab::ProcessGroups => {
                SummaryListingAction::NavigateToViewProcessGroupStatusHistory { id }
            }
            SummaryTab::InputPorts | SummaryTab::OutputPorts => {
                tracing::debug!(tab = self.tab.label(), "no status history for ports");
                return false;
            }
        };
        self.store.dispatch(action);
        true
    }

    pub fn open_system_diagnostics(&self) {
        self.store
            .dispatch(SystemDiagnosticsAction::GetSystemDiagnosticsAndOpenDialog {
                request: SystemDiagnosticsRequest { nodewise: false },
            });
    }

    /// Closes the history dialog and returns the route to the plain
    /// selection, so the same component can be opened again.
    pub fn close_status_history(&self) {
        self.store.dispatch(OverlayAction::Close);
        self.store.dispatch(StatusHistoryAction::ResetStatusHistory);
        if let Some(id) = self.selected_id() {
            self.select(&id);
        }
    }

    pub fn close_system_diagnostics(&self) {
        self.store.dispatch(OverlayAction::Close);
        self.store
            .dispatch(SystemDiagnosticsAction::ResetSystemDiagnostics);
    }
}

impl Drop for StatusListing {
    fn drop(&mut self) {
        if let Some(watcher) = self.watcher.take() {
            watcher.abort();
        }
    }
}

async fn watch_status_history(
    store: Store,
    mut rx: watch::Receiver<ConsoleState>,
    tab: SummaryTab,
) {
    let component_type = tab.component_type();
    let mut last_requested: Option<String> = None;
    let mut pending: Option<String> = None;

    loop {
        let fire = {
            let state = rx.borrow_and_update();
            let requested = select_view_status_history(&state, tab).map(str::to_string);
            if requested != last_requested {
                last_requested = requested.clone();
                pending = requested;
            }
            pending
                .as_deref()
                .is_some_and(|id| select_component_status_present(&state, component_type, id))
        };

        if fire {
            if let Some(component_id) = pending.take() {
                tracing::debug!(%component_id, tab = tab.label(), "opening status history");
                store.dispatch(StatusHistoryAction::GetStatusHistoryAndOpenDialog {
                    request: StatusHistoryRequest {
                        source: STATUS_HISTORY_SOURCE.to_string(),
                        component_type,
                        component_id,
                    },
                });
            }
        }

        if rx.changed().await.is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use flowconsole_core::ComponentType;
    use flowconsole_core::ConsoleAction;
    use flowconsole_core::ConsoleRoute;
    use flowconsole_core::ProcessGroupStatus;
    use flowconsole_core::ProcessGroupStatusSnapshot;
    use flowconsole_core::RemoteProcessGroupStatusSnapshot;
    use flowconsole_core::RouterAction;
    use flowconsole_core::StatusSnapshotEntity;
    use flowconsole_core::SummaryListingResponse;
    use pretty_assertions::assert_eq;
    use tokio::sync::broadcast;

    use super::*;

    const QUIET: Duration = Duration::from_millis(50);

    fn rpg(id: &str) -> StatusSnapshotEntity<RemoteProcessGroupStatusSnapshot> {
        StatusSnapshotEntity {
            id: id.to_string(),
            can_read: true,
            snapshot: RemoteProcessGroupStatusSnapshot {
                id: id.to_string(),
                name: format!("remote {id}"),
                ..Default::default()
            },
        }
    }

    fn listing_loaded(stats_last_refreshed: &str, rpg_ids: &[&str]) -> SummaryListingAction {
        SummaryListingAction::LoadSummaryListingSuccess {
            response: SummaryListingResponse {
                process_group_status: ProcessGroupStatus {
                    id: "root".to_string(),
                    name: "root".to_string(),
                    stats_last_refreshed: stats_last_refreshed.to_string(),
                    aggregate_snapshot: ProcessGroupStatusSnapshot {
                        id: "root".to_string(),
                        name: "root".to_string(),
                        remote_process_group_status_snapshots: rpg_ids
                            .iter()
                            .map(|id| rpg(id))
                            .collect(),
                        ..Default::default()
                    },
                },
            },
        }
    }

    fn activate(store: &Store, route: ConsoleRoute) {
        store.dispatch(RouterAction::RouteActivated { route });
    }

    fn history_route(id: &str) -> ConsoleRoute {
        ConsoleRoute::summary_history(SummaryTab::RemoteProcessGroups, id)
    }

    /// Next status history request on the action stream within `wait`.
    async fn next_history_request(
        actions: &mut broadcast::Receiver<ConsoleAction>,
        wait: Duration,
    ) -> Option<StatusHistoryRequest> {
        tokio::time::timeout(wait, async {
            loop {
                match actions.recv().await {
                    Ok(ConsoleAction::StatusHistory(
                        StatusHistoryAction::GetStatusHistoryAndOpenDialog { request },
                    )) => return Some(request),
                    Ok(_) => continue,
                    Err(_) => return None,
                }
            }
        })
        .await
        .ok()
        .flatten()
    }

    #[tokio::test]
    async fn history_route_fires_once_after_listing_loads() {
        let store = Store::new(ConsoleState::new());
        let listing = StatusListing::new(store.clone(), SummaryTab::RemoteProcessGroups);
        let mut actions = store.actions();

        activate(&store, history_route("rpg-1"));
        assert_eq!(next_history_request(&mut actions, QUIET).await, None);

        store.dispatch(listing_loaded("14:02:33 UTC", &["rpg-1"]));
        let request = next_history_request(&mut actions, Duration::from_secs(1))
            .await
            .expect("history requested");
        assert_eq!(
            request,
            StatusHistoryRequest {
                source: "summary".to_string(),
                component_type: ComponentType::RemoteProcessGroup,
                component_id: "rpg-1".to_string(),
            }
        );
        assert_eq!(listing.loaded_timestamp(), "14:02:33 UTC");
        assert!(!listing.is_initial_loading());

        store.dispatch(listing_loaded("14:03:03 UTC", &["rpg-1"]));
        assert_eq!(next_history_request(&mut actions, QUIET).await, None);
    }

    #[tokio::test]
    async fn entity_already_present_fires_immediately() {
        let store = Store::new(ConsoleState::new());
        store.dispatch(listing_loaded("09:00:00 UTC", &["rpg-1"]));
        let _listing = StatusListing::new(store.clone(), SummaryTab::RemoteProcessGroups);
        let mut actions = store.actions();

        activate(&store, history_route("rpg-1"));
        let request = next_history_request(&mut actions, Duration::from_secs(1)).await;
        assert_eq!(request.map(|r| r.component_id), Some("rpg-1".to_string()));
    }

    #[tokio::test]
    async fn newer_selection_cancels_pending_wait() {
        let store = Store::new(ConsoleState::new());
        let _listing = StatusListing::new(store.clone(), SummaryTab::RemoteProcessGroups);
        let mut actions = store.actions();

        activate(&store, history_route("rpg-a"));
        tokio::time::sleep(Duration::from_millis(10)).await;
        activate(&store, history_route("rpg-b"));
        tokio::time::sleep(Duration::from_millis(10)).await;

        store.dispatch(listing_loaded("10:00:00 UTC", &["rpg-a", "rpg-b"]));
        let request = next_history_request(&mut actions, Duration::from_secs(1)).await;
        assert_eq!(request.map(|r| r.component_id), Some("rpg-b".to_string()));
        assert_eq!(next_history_request(&mut actions, QUIET).await, None);
    }

    #[tokio::test]
    async fn same_id_fires_again_after_leaving_history_route() {
        let store = Store::new(ConsoleState::new());
        store.dispatch(listing_loaded("10:00:00 UTC", &["rpg-1"]));
        let listing = StatusListing::new(store.clone(), SummaryTab::RemoteProcessGroups);
        let mut actions = store.actions();

        activate(&store, history_route("rpg-1"));
        assert!(next_history_request(&mut actions, Duration::from_secs(1))
            .await
            .is_some());

        activate(
            &store,
            ConsoleRoute::summary_selected(SummaryTab::RemoteProcessGroups, "rpg-1"),
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(listing.selected_id().as_deref(), Some("rpg-1"));

        activate(&store, history_route("rpg-1"));
        assert!(next_history_request(&mut actions, Duration::from_secs(1))
            .await
            .is_some());
    }

    #[tokio::test]
    async fn other_tabs_and_dropped_listing_never_fire() {
        let store = Store::new(ConsoleState::new());
        store.dispatch(listing_loaded("10:00:00 UTC", &["rpg-1"]));
        let processors = StatusListing::new(store.clone(), SummaryTab::Processors);
        let listing = StatusListing::new(store.clone(), SummaryTab::RemoteProcessGroups);
        drop(listing);
        let mut actions = store.actions();

        activate(&store, history_route("rpg-1"));
        assert_eq!(next_history_request(&mut actions, QUIET).await, None);
        assert_eq!(processors.selected_id(), None);
    }

    #[tokio::test]
    async fn port_listing_has_no_history_intent() {
        let store = Store::new(ConsoleState::new());
        let listing = StatusListing::new(store.clone(), SummaryTab::InputPorts);
        assert!(!listing.view_status_history("in-1"));
        assert!(listing.is_initial_loading());
    }

    #[tokio::test]
    async fn intents_dispatch_catalog_actions() {
        let store = Store::new(ConsoleState::new());
        let listing = StatusListing::new(store.clone(), SummaryTab::RemoteProcessGroups);
        let mut actions = store.actions();

        listing.refresh_summary_listing();
        listing.select("rpg-1");
        listing.view_status_history("rpg-1");
        listing.open_system_diagnostics();

        let mut names = Vec::new();
        for _ in 0..4 {
            names.push(actions.recv().await.expect("action").type_name());
        }
        assert_eq!(
            names,
            vec![
                "[Summary Listing] Load Summary Listing",
                "[Summary Listing] Select Remote Process Group Status",
                "[Summary Listing] Navigate To Remote Process Group Status History",
                "[System Diagnostics] Get System Diagnostics and Open Dialog",
            ]
        );
        assert!(store.select(|state| state.summary_listing.recursive));
    }
}
