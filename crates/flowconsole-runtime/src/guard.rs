use std::sync::Arc;

use flowconsole_core::selectors::select_current_user;
use flowconsole_core::selectors::select_current_user_loaded;
use flowconsole_core::selectors::select_current_user_settled;
use flowconsole_core::ConsoleRoute;
use flowconsole_core::CurrentUser;

use crate::store::Store;

type PermissionCheck = dyn Fn(&CurrentUser) -> bool + Send + Sync;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(ConsoleRoute),
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Route-match guard over the current user.
#[derive(Clone)]
pub struct AuthorizationGuard {
    check: Arc<PermissionCheck>,
}

/// Builds a guard that admits a route when `check` accepts the loaded user
/// and redirects to `/` otherwise.
pub fn authorization_guard(
    check: impl Fn(&CurrentUser) -> bool + Send + Sync + 'static,
) -> AuthorizationGuard {
    AuthorizationGuard {
        check: Arc::new(check),
    }
}

pub fn controller_read_guard() -> AuthorizationGuard {
    authorization_guard(|user| user.controller_permissions.can_read)
}

impl AuthorizationGuard {
    /// Waits for the current-user request to settle, then evaluates the check
    /// exactly once. A user that failed to load is denied.
    pub async fn can_match(&self, store: &Store, route: &ConsoleRoute) -> GuardDecision {
        let mut rx = store.subscribe();
        let allowed = rx
            .wait_for(select_current_user_settled)
            .await
            .map(|state| {
                select_current_user_loaded(&state) && (self.check)(select_current_user(&state))
            })
            .unwrap_or(false);
        drop(rx);

        if allowed {
            GuardDecision::Allow
        } else {
            tracing::info!(route = %route.path(), "access denied; redirecting to /");
            GuardDecision::Redirect(ConsoleRoute::Root)
        }
    }
}

impl std::fmt::Debug for AuthorizationGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationGuard").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use flowconsole_core::ConsoleState;
    use flowconsole_core::CurrentUserAction;
    use flowconsole_core::Permissions;
    use flowconsole_core::SettingsTab;
    use pretty_assertions::assert_eq;

    use super::*;

    fn user(controller: Permissions) -> CurrentUser {
        CurrentUser {
            identity: "operator".to_string(),
            anonymous: false,
            controller_permissions: controller,
            ..CurrentUser::default()
        }
    }

    fn settings() -> ConsoleRoute {
        ConsoleRoute::settings(SettingsTab::ReportingTasks, None)
    }

    #[tokio::test]
    async fn denied_user_is_redirected_to_root() {
        let store = Store::new(ConsoleState::new());
        store.dispatch(CurrentUserAction::LoadCurrentUserSuccess {
            response: user(Permissions::NONE),
        });

        let decision = controller_read_guard().can_match(&store, &settings()).await;
        assert_eq!(decision, GuardDecision::Redirect(ConsoleRoute::Root));
        match decision {
            GuardDecision::Redirect(route) => assert_eq!(route.path(), "/"),
            GuardDecision::Allow => panic!("expected redirect"),
        }
    }

    #[tokio::test]
    async fn permitted_user_is_allowed() {
        let store = Store::new(ConsoleState::new());
        store.dispatch(CurrentUserAction::LoadCurrentUserSuccess {
            response: user(Permissions::READ_WRITE),
        });

        let decision = controller_read_guard().can_match(&store, &settings()).await;
        assert!(decision.is_allowed());
    }

    #[tokio::test]
    async fn guard_waits_for_current_user() {
        let store = Store::new(ConsoleState::new());
        let guard = controller_read_guard();
        let pending = tokio::spawn({
            let store = store.clone();
            async move { guard.can_match(&store, &settings()).await }
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!pending.is_finished());

        store.dispatch(CurrentUserAction::LoadCurrentUser);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!pending.is_finished());

        store.dispatch(CurrentUserAction::LoadCurrentUserSuccess {
            response: user(Permissions::READ_WRITE),
        });
        let decision = tokio::time::timeout(Duration::from_secs(1), pending)
            .await
            .expect("guard resolved")
            .expect("task joined");
        assert_eq!(decision, GuardDecision::Allow);
    }

    #[tokio::test]
    async fn guard_redirects_when_user_load_failed() {
        let store = Store::new(ConsoleState::new());
        let guard = authorization_guard(|_| true);
        let pending = tokio::spawn({
            let store = store.clone();
            async move { guard.can_match(&store, &settings()).await }
        });

        store.dispatch(CurrentUserAction::LoadCurrentUser);
        store.dispatch(CurrentUserAction::CurrentUserApiError {
            error: "401".to_string(),
        });
        let decision = tokio::time::timeout(Duration::from_millis(500), pending)
            .await
            .expect("guard resolved")
            .expect("task joined");
        assert_eq!(decision, GuardDecision::Redirect(ConsoleRoute::Root));
        assert_eq!(store.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn check_sees_the_loaded_user() {
        let store = Store::new(ConsoleState::new());
        store.dispatch(CurrentUserAction::LoadCurrentUserSuccess {
            response: user(Permissions::NONE),
        });
        let guard = authorization_guard(|user| user.identity == "operator");
        assert!(guard.can_match(&store, &settings()).await.is_allowed());
    }
}
