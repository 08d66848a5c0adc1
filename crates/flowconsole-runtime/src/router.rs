use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use flowconsole_core::ConsoleError;
use flowconsole_core::ConsoleRoute;
use flowconsole_core::RouterAction;

use crate::guard::controller_read_guard;
use crate::guard::AuthorizationGuard;
use crate::guard::GuardDecision;
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteSection {
    Root,
    Summary,
    Settings,
}

impl RouteSection {
    pub fn of(route: &ConsoleRoute) -> Self {
        match route {
            ConsoleRoute::Root => Self::Root,
            ConsoleRoute::Summary { .. } => Self::Summary,
            ConsoleRoute::Settings { .. } => Self::Settings,
        }
    }
}

#[derive(Debug, Clone)]
struct GuardedSection {
    section: RouteSection,
    guard: AuthorizationGuard,
}

/// Resolves navigations through the route table and activates the result.
#[derive(Debug, Clone)]
pub struct Router {
    store: Store,
    table: Arc<Vec<GuardedSection>>,
    generation: Arc<Mutex<u64>>,
}

impl Router {
    /// Router with no guards.
    pub fn new(store: Store) -> Self {
        Self {
            store,
            table: Arc::new(Vec::new()),
            generation: Arc::new(Mutex::new(0)),
        }
    }

    /// Route table of the console: settings require controller read access.
    pub fn console(store: Store) -> Self {
        Self::new(store).guard(RouteSection::Settings, controller_read_guard())
    }

    pub fn guard(mut self, section: RouteSection, guard: AuthorizationGuard) -> Self {
        Arc::make_mut(&mut self.table).push(GuardedSection { section, guard });
        self
    }

    /// Runs the guards for `route` and activates it, or the redirect target.
    /// Returns `None` when a later navigation superseded this one while its
    /// guards were pending.
    pub async fn navigate(&self, route: ConsoleRoute) -> Option<ConsoleRoute> {
        let generation = self.begin();
        let section = RouteSection::of(&route);

        let mut target = route;
        for entry in self.table.iter().filter(|entry| entry.section == section) {
            if let GuardDecision::Redirect(redirect) =
                entry.guard.can_match(&self.store, &target).await
            {
                target = redirect;
                break;
            }
        }

        self.activate(generation, target)
    }

    fn begin(&self) -> u64 {
        let mut current = self.generation.lock().unwrap_or_else(PoisonError::into_inner);
        *current += 1;
        *current
    }

    /// The generation stays locked until the route is activated, so a newer
    /// navigation cannot activate in between.
    fn activate(&self, generation: u64, target: ConsoleRoute) -> Option<ConsoleRoute> {
        let current = self.generation.lock().unwrap_or_else(PoisonError::into_inner);
        if *current != generation {
            tracing::debug!(route = %target.path(), "navigation superseded");
            return None;
        }
        self.store.dispatch(RouterAction::RouteActivated {
            route: target.clone(),
        });
        drop(current);
        Some(target)
    }

    pub async fn navigate_path(&self, path: &str) -> Result<Option<ConsoleRoute>, ConsoleError> {
        let route =
            ConsoleRoute::parse(path).ok_or_else(|| ConsoleError::UnknownRoute(path.to_string()))?;
        Ok(self.navigate(route).await)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use flowconsole_core::ConsoleState;
    use flowconsole_core::CurrentUser;
    use flowconsole_core::CurrentUserAction;
    use flowconsole_core::Permissions;
    use flowconsole_core::SettingsTab;
    use flowconsole_core::SummaryTab;
    use pretty_assertions::assert_eq;

    use super::*;

    fn load_user(store: &Store, controller: Permissions) {
        store.dispatch(CurrentUserAction::LoadCurrentUserSuccess {
            response: CurrentUser {
                identity: "operator".to_string(),
                anonymous: false,
                controller_permissions: controller,
                ..CurrentUser::default()
            },
        });
    }

    #[tokio::test]
    async fn unguarded_route_activates_directly() {
        let store = Store::new(ConsoleState::new());
        let router = Router::console(store.clone());
        let route = ConsoleRoute::summary(SummaryTab::Connections);

        assert_eq!(router.navigate(route.clone()).await, Some(route.clone()));
        assert_eq!(store.select(|state| state.router.current.clone()), route);
    }

    #[tokio::test]
    async fn denied_settings_activate_root() {
        let store = Store::new(ConsoleState::new());
        load_user(&store, Permissions::NONE);
        let router = Router::console(store.clone());

        let activated = router
            .navigate_path("/settings/reporting-tasks")
            .await
            .expect("known route");
        assert_eq!(activated, Some(ConsoleRoute::Root));
        assert_eq!(store.select(|state| state.router.current.path()), "/");
    }

    #[tokio::test]
    async fn permitted_settings_activate() {
        let store = Store::new(ConsoleState::new());
        load_user(&store, Permissions::READ_WRITE);
        let router = Router::console(store.clone());
        let route = ConsoleRoute::settings(SettingsTab::ReportingTasks, Some("rt-1".to_string()));

        assert_eq!(router.navigate(route.clone()).await, Some(route));
    }

    #[tokio::test]
    async fn later_navigation_supersedes_pending_guard() {
        let store = Store::new(ConsoleState::new());
        let router = Router::console(store.clone());

        let pending = tokio::spawn({
            let router = router.clone();
            async move {
                router
                    .navigate(ConsoleRoute::settings(SettingsTab::General, None))
                    .await
            }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;

        let summary = ConsoleRoute::summary(SummaryTab::Processors);
        assert_eq!(router.navigate(summary.clone()).await, Some(summary.clone()));

        load_user(&store, Permissions::READ_WRITE);
        assert_eq!(pending.await.expect("joined"), None);
        assert_eq!(store.select(|state| state.router.current.clone()), summary);
    }

    #[test]
    fn stale_activation_after_newer_one_is_ignored() {
        let store = Store::new(ConsoleState::new());
        let router = Router::new(store.clone());
        let older = router.begin();
        let newer = router.begin();
        let summary = ConsoleRoute::summary(SummaryTab::Connections);

        assert_eq!(router.activate(newer, summary.clone()), Some(summary.clone()));
        assert_eq!(
            router.activate(older, ConsoleRoute::settings(SettingsTab::General, None)),
            None
        );
        assert_eq!(store.select(|state| state.router.current.clone()), summary);
    }

    #[tokio::test]
    async fn unknown_path_is_an_error() {
        let router = Router::new(Store::new(ConsoleState::new()));
        let err = router.navigate_path("/canvas").await.expect_err("unknown");
        assert_eq!(err.to_string(), "unknown route: /canvas");
    }
}
