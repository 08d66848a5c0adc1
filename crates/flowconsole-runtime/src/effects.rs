use std::sync::Arc;

use flowconsole_core::ApiRequest;
use flowconsole_core::ConsoleAction;
use flowconsole_core::ConsoleEffect;
use flowconsole_core::CurrentUserAction;
use flowconsole_core::ExtensionTypesAction;
use flowconsole_core::OverlayAction;
use flowconsole_core::ReportingTasksAction;
use flowconsole_core::StatusHistoryAction;
use flowconsole_core::SummaryListingAction;
use flowconsole_core::SystemDiagnosticsAction;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::ApiError;
use crate::api::ApiResponse;
use crate::api::ConsoleApi;
use crate::router::Router;
use crate::store::Store;

/// Executes effects returned by the reducer and feeds the outcome back into
/// the store as actions.
pub struct EffectRunner {
    store: Store,
    api: Arc<dyn ConsoleApi>,
    router: Router,
}

impl EffectRunner {
    pub fn new(store: Store, api: Arc<dyn ConsoleApi>, router: Router) -> Self {
        Self { store, api, router }
    }

    pub fn spawn(self, mut effects: mpsc::UnboundedReceiver<ConsoleEffect>) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(effect) = effects.recv().await {
                self.handle(effect);
            }
            tracing::debug!("effect channel closed; runner stopping");
        })
    }

    /// API calls and navigations run on their own tasks so a slow request or
    /// a guard waiting for the current user never blocks later effects.
    pub fn handle(&self, effect: ConsoleEffect) {
        match effect {
            ConsoleEffect::Api(request) => {
                let store = self.store.clone();
                let api = Arc::clone(&self.api);
                tokio::spawn(async move {
                    let label = request.label();
                    let outcome = api
                        .execute(request.clone())
                        .await
                        .and_then(|response| success_action(&request, response));
                    let action = match outcome {
                        Ok(action) => action,
                        Err(err) => {
                            tracing::warn!(request = label, error = %err, "api request failed");
                            error_action(&request, &err)
                        }
                    };
                    store.dispatch(action);
                });
            }
            ConsoleEffect::Navigate(route) => {
                let router = self.router.clone();
                tokio::spawn(async move {
                    router.navigate(route).await;
                });
            }
            ConsoleEffect::OpenDialog(overlay) => {
                self.store.dispatch(OverlayAction::Open { overlay });
            }
            ConsoleEffect::CloseDialog => {
                self.store.dispatch(OverlayAction::Close);
            }
        }
    }
}

/// Pairs a response with the request that produced it.
pub fn success_action(
    request: &ApiRequest,
    response: ApiResponse,
) -> Result<ConsoleAction, ApiError> {
    let action: ConsoleAction = match (request, response) {
        (ApiRequest::LoadCurrentUser, ApiResponse::CurrentUser(response)) => {
            CurrentUserAction::LoadCurrentUserSuccess { response }.into()
        }
        (ApiRequest::LoadReportingTasks, ApiResponse::ReportingTasks(response)) => {
            ReportingTasksAction::LoadReportingTasksSuccess { response }.into()
        }
        (ApiRequest::CreateReportingTask { .. }, ApiResponse::ReportingTask(response)) => {
            ReportingTasksAction::CreateReportingTaskSuccess { response }.into()
        }
        (ApiRequest::StartReportingTask { .. }, ApiResponse::ReportingTask(response)) => {
            ReportingTasksAction::StartReportingTaskSuccess { response }.into()
        }
        (ApiRequest::StopReportingTask { .. }, ApiResponse::ReportingTask(response)) => {
            ReportingTasksAction::StopReportingTaskSuccess { response }.into()
        }
        (ApiRequest::DeleteReportingTask { .. }, ApiResponse::ReportingTask(response)) => {
            ReportingTasksAction::DeleteReportingTaskSuccess { response }.into()
        }
        (ApiRequest::LoadExtensionTypesForCanvas, ApiResponse::ExtensionTypesForCanvas(response)) => {
            ExtensionTypesAction::LoadExtensionTypesForCanvasSuccess { response }.into()
        }
        (
            ApiRequest::LoadExtensionTypesForSettings,
            ApiResponse::ExtensionTypesForSettings(response),
        ) => ExtensionTypesAction::LoadExtensionTypesForSettingsSuccess { response }.into(),
        (ApiRequest::LoadSummaryListing { .. }, ApiResponse::SummaryListing(response)) => {
            SummaryListingAction::LoadSummaryListingSuccess { response }.into()
        }
        (ApiRequest::GetStatusHistory { .. }, ApiResponse::StatusHistory(response)) => {
            StatusHistoryAction::LoadStatusHistorySuccess { response }.into()
        }
        (ApiRequest::GetSystemDiagnostics { .. }, ApiResponse::SystemDiagnostics(response)) => {
            SystemDiagnosticsAction::LoadSystemDiagnosticsSuccess { response }.into()
        }
        (request, response) => {
            return Err(ApiError::UnexpectedResponse {
                request: request.label(),
                response: response.label(),
            })
        }
    };
    Ok(action)
}

/// The error action of the slice that issued `request`.
pub fn error_action(request: &ApiRequest, error: &ApiError) -> ConsoleAction {
    let error = error.to_string();
    match request {
        ApiRequest::LoadCurrentUser => CurrentUserAction::CurrentUserApiError { error }.into(),
        ApiRequest::LoadReportingTasks
        | ApiRequest::CreateReportingTask { .. }
        | ApiRequest::StartReportingTask { .. }
        | ApiRequest::StopReportingTask { .. }
        | ApiRequest::DeleteReportingTask { .. } => {
            ReportingTasksAction::ReportingTasksApiError { error }.into()
        }
        ApiRequest::LoadExtensionTypesForCanvas | ApiRequest::LoadExtensionTypesForSettings => {
            ExtensionTypesAction::ExtensionTypesApiError { error }.into()
        }
        ApiRequest::LoadSummaryListing { .. } => {
            SummaryListingAction::SummaryListingApiError { error }.into()
        }
        ApiRequest::GetStatusHistory { .. } => {
            StatusHistoryAction::StatusHistoryApiError { error }.into()
        }
        ApiRequest::GetSystemDiagnostics { .. } => {
            SystemDiagnosticsAction::SystemDiagnosticsApiError { error }.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use flowconsole_core::CurrentUser;
    use flowconsole_core::LoadReportingTasksResponse;
    use flowconsole_core::SummaryListingAction;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn mismatched_response_is_an_error() {
        let err = success_action(
            &ApiRequest::LoadReportingTasks,
            ApiResponse::CurrentUser(CurrentUser::default()),
        )
        .expect_err("mismatch");
        assert_eq!(
            err.to_string(),
            "unexpected current-user response to load-reporting-tasks"
        );
    }

    #[test]
    fn success_maps_to_slice_success_action() {
        let action = success_action(
            &ApiRequest::LoadReportingTasks,
            ApiResponse::ReportingTasks(LoadReportingTasksResponse {
                reporting_tasks: Vec::new(),
                loaded_timestamp: "08:00:00 UTC".to_string(),
            }),
        )
        .expect("matching response");
        assert_eq!(action.type_name(), "[Reporting Tasks] Load Reporting Tasks Success");
    }

    #[test]
    fn errors_route_to_issuing_slice_with_display_text() {
        let action = error_action(
            &ApiRequest::LoadSummaryListing { recursive: false },
            &ApiError::Unavailable("cluster is disconnected".to_string()),
        );
        assert_eq!(
            action,
            ConsoleAction::from(SummaryListingAction::SummaryListingApiError {
                error: "service unavailable: cluster is disconnected".to_string(),
            })
        );
    }
}
