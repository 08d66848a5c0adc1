use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use flowconsole_core::config::Config;
use flowconsole_core::persistence::ActionJournal;
use flowconsole_core::persistence::JOURNAL_FILE_NAME;
use flowconsole_core::ConsoleError;
use flowconsole_core::ConsoleRoute;
use flowconsole_core::ConsoleState;
use flowconsole_core::CurrentUserAction;
use flowconsole_core::SummaryListingAction;
use flowconsole_core::SummaryTab;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::ConsoleApi;
use crate::effects::EffectRunner;
use crate::reporting_tasks::ReportingTasksView;
use crate::router::Router;
use crate::status_listing::StatusListing;
use crate::store::Store;

/// A wired console: store, router and a running effect runner.
pub struct Console {
    store: Store,
    router: Router,
    runner: JoinHandle<()>,
    recursive_summary: bool,
    initial_route: ConsoleRoute,
}

/// Must be called inside a Tokio runtime.
pub fn bootstrap(config: &Config, api: Arc<dyn ConsoleApi>) -> Result<Console, ConsoleError> {
    let initial_route = config.initial_route()?;
    let journal = if config.journal.enabled {
        let path = config
            .journal
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(JOURNAL_FILE_NAME));
        Some(ActionJournal::open(path)?)
    } else {
        None
    };

    let (effects_tx, effects_rx) = mpsc::unbounded_channel();
    let store = Store::with_parts(ConsoleState::new(), Some(effects_tx), journal);
    let router = Router::console(store.clone());
    let runner = EffectRunner::new(store.clone(), api, router.clone()).spawn(effects_rx);
    tracing::debug!(route = %initial_route.path(), journal = config.journal.enabled, "console wired");

    Ok(Console {
        store,
        router,
        runner,
        recursive_summary: config.console.recursive_summary,
        initial_route,
    })
}

impl Console {
    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Loads the current user and navigates to the configured initial route.
    pub async fn start(&self) -> Option<ConsoleRoute> {
        self.store.dispatch(CurrentUserAction::LoadCurrentUser);
        self.router.navigate(self.initial_route.clone()).await
    }

    pub fn refresh_summary(&self) {
        self.store.dispatch(SummaryListingAction::LoadSummaryListing {
            recursive: self.recursive_summary,
        });
    }

    pub fn status_listing(&self, tab: SummaryTab) -> StatusListing {
        StatusListing::new(self.store.clone(), tab)
    }

    pub fn reporting_tasks(&self) -> ReportingTasksView {
        ReportingTasksView::new(self.store.clone())
    }

    /// Waits until `predicate` holds for the state, or `timeout` elapses.
    pub async fn wait_until(
        &self,
        timeout: Duration,
        predicate: impl FnMut(&ConsoleState) -> bool,
    ) -> bool {
        let mut rx = self.store.subscribe();
        matches!(
            tokio::time::timeout(timeout, async move {
                rx.wait_for(predicate).await.map(|_| ())
            })
            .await,
            Ok(Ok(()))
        )
    }
}

impl Drop for Console {
    fn drop(&mut self) {
        self.runner.abort();
    }
}
