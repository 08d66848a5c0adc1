use serde::Deserialize;
use serde::Serialize;

use super::actions::ConsoleAction;
use super::actions::CreateReportingTaskRequest;
use super::actions::CurrentUserAction;
use super::actions::ExtensionTypesAction;
use super::actions::OverlayAction;
use super::actions::ReportingTasksAction;
use super::actions::RouterAction;
use super::actions::StatusHistoryAction;
use super::actions::SummaryListingAction;
use super::actions::SystemDiagnosticsAction;
use super::state::ConsoleOverlay;
use super::state::ConsoleRoute;
use super::state::ConsoleState;
use super::state::CurrentUserState;
use super::state::ExtensionTypesState;
use super::state::LoadStatus;
use super::state::ProcessGroupStatusSnapshot;
use super::state::ReportingTaskEntity;
use super::state::ReportingTasksState;
use super::state::RouterState;
use super::state::SettingsTab;
use super::state::StatusHistoryRequest;
use super::state::StatusHistoryState;
use super::state::StatusSnapshotEntity;
use super::state::SummaryListingState;
use super::state::SummaryTab;
use super::state::SystemDiagnosticsRequest;
use super::state::SystemDiagnosticsState;

/// Backend call requested by a reducer; executed by the effect runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApiRequest {
    LoadCurrentUser,
    LoadReportingTasks,
    CreateReportingTask { request: CreateReportingTaskRequest },
    StartReportingTask { reporting_task: ReportingTaskEntity },
    StopReportingTask { reporting_task: ReportingTaskEntity },
    DeleteReportingTask { reporting_task: ReportingTaskEntity },
    LoadExtensionTypesForCanvas,
    LoadExtensionTypesForSettings,
    LoadSummaryListing { recursive: bool },
    GetStatusHistory { request: StatusHistoryRequest },
    GetSystemDiagnostics { request: SystemDiagnosticsRequest },
}

impl ApiRequest {
    pub fn label(&self) -> &'static str {
        match self {
            Self::LoadCurrentUser => "load-current-user",
            Self::LoadReportingTasks => "load-reporting-tasks",
            Self::CreateReportingTask { .. } => "create-reporting-task",
            Self::StartReportingTask { .. } => "start-reporting-task",
            Self::StopReportingTask { .. } => "stop-reporting-task",
            Self::DeleteReportingTask { .. } => "delete-reporting-task",
            Self::LoadExtensionTypesForCanvas => "load-extension-types-canvas",
            Self::LoadExtensionTypesForSettings => "load-extension-types-settings",
            Self::LoadSummaryListing { .. } => "load-summary-listing",
            Self::GetStatusHistory { .. } => "get-status-history",
            Self::GetSystemDiagnostics { .. } => "get-system-diagnostics",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEffect {
    Api(ApiRequest),
    Navigate(ConsoleRoute),
    OpenDialog(ConsoleOverlay),
    CloseDialog,
}

pub fn reduce(state: &mut ConsoleState, action: ConsoleAction) -> Vec<ConsoleEffect> {
    match action {
        ConsoleAction::Router(action) => reduce_router(&mut state.router, action),
        ConsoleAction::CurrentUser(action) => reduce_current_user(&mut state.current_user, action),
        ConsoleAction::ReportingTasks(action) => {
            reduce_reporting_tasks(&mut state.reporting_tasks, action)
        }
        ConsoleAction::ExtensionTypes(action) => {
            reduce_extension_types(&mut state.extension_types, action)
        }
        ConsoleAction::SummaryListing(action) => {
            reduce_summary_listing(&mut state.summary_listing, action)
        }
        ConsoleAction::StatusHistory(action) => {
            reduce_status_history(&mut state.status_history, action)
        }
        ConsoleAction::SystemDiagnostics(action) => {
            reduce_system_diagnostics(&mut state.system_diagnostics, action)
        }
        ConsoleAction::Overlay(action) => {
            reduce_overlay(&mut state.overlay, action);
            Vec::new()
        }
    }
}

pub fn reduce_router(state: &mut RouterState, action: RouterAction) -> Vec<ConsoleEffect> {
    match action {
        RouterAction::Navigate { route } => {
            state.pending = Some(route.clone());
            vec![ConsoleEffect::Navigate(route)]
        }
        RouterAction::RouteActivated { route } => {
            state.current = route;
            state.pending = None;
            Vec::new()
        }
    }
}

pub fn reduce_current_user(
    state: &mut CurrentUserState,
    action: CurrentUserAction,
) -> Vec<ConsoleEffect> {
    match action {
        CurrentUserAction::LoadCurrentUser => {
            state.status = LoadStatus::Loading;
            vec![ConsoleEffect::Api(ApiRequest::LoadCurrentUser)]
        }
        CurrentUserAction::LoadCurrentUserSuccess { response } => {
            state.user = response;
            state.error = None;
            state.status = LoadStatus::Success;
            Vec::new()
        }
        CurrentUserAction::CurrentUserApiError { error } => {
            state.error = Some(error);
            state.status = LoadStatus::Error;
            Vec::new()
        }
    }
}

pub fn reduce_reporting_tasks(
    state: &mut ReportingTasksState,
    action: ReportingTasksAction,
) -> Vec<ConsoleEffect> {
    match action {
        ReportingTasksAction::ResetReportingTasksState => {
            *state = ReportingTasksState::default();
            Vec::new()
        }
        ReportingTasksAction::LoadReportingTasks => {
            state.status = LoadStatus::Loading;
            vec![ConsoleEffect::Api(ApiRequest::LoadReportingTasks)]
        }
        ReportingTasksAction::LoadReportingTasksSuccess { response } => {
            state.reporting_tasks = response.reporting_tasks;
            state.loaded_timestamp = response.loaded_timestamp;
            state.error = None;
            state.status = LoadStatus::Success;
            Vec::new()
        }
        ReportingTasksAction::ReportingTasksApiError { error } => {
            state.saving = false;
            state.error = Some(error);
            state.status = LoadStatus::Error;
            Vec::new()
        }
        ReportingTasksAction::ClearReportingTasksApiError => {
            state.error = None;
            state.status = LoadStatus::Pending;
            Vec::new()
        }
        ReportingTasksAction::OpenNewReportingTaskDialog => vec![
            ConsoleEffect::Api(ApiRequest::LoadExtensionTypesForSettings),
            ConsoleEffect::OpenDialog(ConsoleOverlay::NewReportingTask),
        ],
        ReportingTasksAction::CreateReportingTask { request } => {
            state.saving = true;
            vec![ConsoleEffect::Api(ApiRequest::CreateReportingTask {
                request,
            })]
        }
        ReportingTasksAction::CreateReportingTaskSuccess { response } => {
            let id = response.reporting_task.id.clone();
            state.reporting_tasks.push(response.reporting_task);
            state.saving = false;
            vec![
                ConsoleEffect::CloseDialog,
                ConsoleEffect::Navigate(ConsoleRoute::settings(
                    SettingsTab::ReportingTasks,
                    Some(id),
                )),
            ]
        }
        ReportingTasksAction::StartReportingTask { request } => {
            state.saving = true;
            vec![ConsoleEffect::Api(ApiRequest::StartReportingTask {
                reporting_task: request.reporting_task,
            })]
        }
        ReportingTasksAction::StopReportingTask { request } => {
            state.saving = true;
            vec![ConsoleEffect::Api(ApiRequest::StopReportingTask {
                reporting_task: request.reporting_task,
            })]
        }
        ReportingTasksAction::StartReportingTaskSuccess { response }
        | ReportingTasksAction::StopReportingTaskSuccess { response } => {
            let updated = response.reporting_task;
            if let Some(existing) = state
                .reporting_tasks
                .iter_mut()
                .find(|task| task.id == updated.id)
            {
                *existing = updated;
            }
            state.saving = false;
            Vec::new()
        }
        ReportingTasksAction::PromptReportingTaskDeletion { request } => {
            vec![ConsoleEffect::OpenDialog(
                ConsoleOverlay::ConfirmReportingTaskDeletion {
                    id: request.reporting_task.id,
                    name: request.reporting_task.component.name,
                },
            )]
        }
        ReportingTasksAction::DeleteReportingTask { request } => {
            state.saving = true;
            vec![
                ConsoleEffect::CloseDialog,
                ConsoleEffect::Api(ApiRequest::DeleteReportingTask {
                    reporting_task: request.reporting_task,
                }),
            ]
        }
        ReportingTasksAction::DeleteReportingTaskSuccess { response } => {
            state
                .reporting_tasks
                .retain(|task| task.id != response.reporting_task.id);
            state.saving = false;
            Vec::new()
        }
        ReportingTasksAction::SelectReportingTask { request } => {
            vec![ConsoleEffect::Navigate(ConsoleRoute::settings(
                SettingsTab::ReportingTasks,
                Some(request.id),
            ))]
        }
    }
}

pub fn reduce_extension_types(
    state: &mut ExtensionTypesState,
    action: ExtensionTypesAction,
) -> Vec<ConsoleEffect> {
    match action {
        ExtensionTypesAction::LoadExtensionTypesForCanvas => {
            state.status = LoadStatus::Loading;
            vec![ConsoleEffect::Api(ApiRequest::LoadExtensionTypesForCanvas)]
        }
        ExtensionTypesAction::LoadExtensionTypesForCanvasSuccess { response } => {
            state.processor_types = response.processor_types;
            state.controller_service_types = response.controller_service_types;
            state.prioritizer_types = response.prioritizers;
            state.error = None;
            state.status = LoadStatus::Success;
            Vec::new()
        }
        // Settings loads run in the background of an open page; status is untouched.
        ExtensionTypesAction::LoadExtensionTypesForSettings => {
            vec![ConsoleEffect::Api(ApiRequest::LoadExtensionTypesForSettings)]
        }
        ExtensionTypesAction::LoadExtensionTypesForSettingsSuccess { response } => {
            state.controller_service_types = response.controller_service_types;
            state.reporting_task_types = response.reporting_task_types;
            state.registry_client_types = response.registry_client_types;
            state.parameter_provider_types = response.parameter_provider_types;
            state.flow_analysis_rule_types = response.flow_analysis_rule_types;
            state.error = None;
            state.status = LoadStatus::Success;
            Vec::new()
        }
        ExtensionTypesAction::ExtensionTypesApiError { error } => {
            state.error = Some(error);
            state.status = LoadStatus::Error;
            Vec::new()
        }
        ExtensionTypesAction::ClearExtensionTypesApiError => {
            state.error = None;
            state.status = LoadStatus::Pending;
            Vec::new()
        }
    }
}

pub fn reduce_summary_listing(
    state: &mut SummaryListingState,
    action: SummaryListingAction,
) -> Vec<ConsoleEffect> {
    match action {
        SummaryListingAction::LoadSummaryListing { recursive } => {
            state.recursive = recursive;
            state.status = LoadStatus::Loading;
            vec![ConsoleEffect::Api(ApiRequest::LoadSummaryListing {
                recursive,
            })]
        }
        SummaryListingAction::LoadSummaryListingSuccess { response } => {
            let root = response.process_group_status;
            state.processor_status_snapshots.clear();
            state.process_group_status_snapshots.clear();
            state.input_port_status_snapshots.clear();
            state.output_port_status_snapshots.clear();
            state.connection_status_snapshots.clear();
            state.remote_process_group_status_snapshots.clear();

            state
                .process_group_status_snapshots
                .push(StatusSnapshotEntity {
                    id: root.id.clone(),
                    can_read: true,
                    snapshot: root.aggregate_snapshot.clone(),
                });
            flatten_process_group(state, &root.aggregate_snapshot);

            state.loaded_timestamp = root.stats_last_refreshed.clone();
            state.process_group_status = Some(root);
            state.error = None;
            state.status = LoadStatus::Success;
            Vec::new()
        }
        SummaryListingAction::SummaryListingApiError { error } => {
            state.error = Some(error);
            state.status = LoadStatus::Error;
            Vec::new()
        }
        SummaryListingAction::ClearSummaryListingApiError => {
            state.error = None;
            state.status = LoadStatus::Pending;
            Vec::new()
        }
        SummaryListingAction::SelectProcessorStatus { request } => {
            navigate_summary(SummaryTab::Processors, request.id, false)
        }
        SummaryListingAction::SelectProcessGroupStatus { request } => {
            navigate_summary(SummaryTab::ProcessGroups, request.id, false)
        }
        SummaryListingAction::SelectInputPortStatus { request } => {
            navigate_summary(SummaryTab::InputPorts, request.id, false)
        }
        SummaryListingAction::SelectOutputPortStatus { request } => {
            navigate_summary(SummaryTab::OutputPorts, request.id, false)
        }
        SummaryListingAction::SelectConnectionStatus { request } => {
            navigate_summary(SummaryTab::Connections, request.id, false)
        }
        SummaryListingAction::SelectRemoteProcessGroupStatus { request } => {
            navigate_summary(SummaryTab::RemoteProcessGroups, request.id, false)
        }
        SummaryListingAction::NavigateToViewProcessorStatusHistory { id } => {
            navigate_summary(SummaryTab::Processors, id, true)
        }
        SummaryListingAction::NavigateToViewProcessGroupStatusHistory { id } => {
            navigate_summary(SummaryTab::ProcessGroups, id, true)
        }
        SummaryListingAction::NavigateToViewConnectionStatusHistory { id } => {
            navigate_summary(SummaryTab::Connections, id, true)
        }
        SummaryListingAction::NavigateToViewRemoteProcessGroupStatusHistory { id } => {
            navigate_summary(SummaryTab::RemoteProcessGroups, id, true)
        }
        SummaryListingAction::ResetSummaryState => {
            *state = SummaryListingState::default();
            Vec::new()
        }
    }
}

pub fn reduce_status_history(
    state: &mut StatusHistoryState,
    action: StatusHistoryAction,
) -> Vec<ConsoleEffect> {
    match action {
        StatusHistoryAction::GetStatusHistoryAndOpenDialog { request } => {
            state.request = Some(request.clone());
            state.dialog_requested = true;
            state.status = LoadStatus::Loading;
            vec![ConsoleEffect::Api(ApiRequest::GetStatusHistory { request })]
        }
        StatusHistoryAction::ReloadStatusHistory { request } => {
            state.request = Some(request.clone());
            state.dialog_requested = false;
            state.status = LoadStatus::Loading;
            vec![ConsoleEffect::Api(ApiRequest::GetStatusHistory { request })]
        }
        StatusHistoryAction::LoadStatusHistorySuccess { response } => {
            // A response for a request that was superseded is dropped.
            if state.request.as_ref() != Some(&response.request) {
                return Vec::new();
            }
            state.loaded_timestamp = response.status_history.generated.clone();
            state.status_history = Some(response.status_history);
            state.error = None;
            state.status = LoadStatus::Success;
            if std::mem::take(&mut state.dialog_requested) {
                return vec![ConsoleEffect::OpenDialog(ConsoleOverlay::StatusHistory {
                    component_type: response.request.component_type,
                    component_id: response.request.component_id,
                })];
            }
            Vec::new()
        }
        StatusHistoryAction::StatusHistoryApiError { error } => {
            state.dialog_requested = false;
            state.error = Some(error);
            state.status = LoadStatus::Error;
            Vec::new()
        }
        StatusHistoryAction::ResetStatusHistory => {
            *state = StatusHistoryState::default();
            Vec::new()
        }
    }
}

pub fn reduce_system_diagnostics(
    state: &mut SystemDiagnosticsState,
    action: SystemDiagnosticsAction,
) -> Vec<ConsoleEffect> {
    match action {
        SystemDiagnosticsAction::GetSystemDiagnosticsAndOpenDialog { request } => {
            state.request = Some(request);
            state.dialog_requested = true;
            state.status = LoadStatus::Loading;
            vec![ConsoleEffect::Api(ApiRequest::GetSystemDiagnostics {
                request,
            })]
        }
        SystemDiagnosticsAction::ReloadSystemDiagnostics { request } => {
            state.request = Some(request);
            state.dialog_requested = false;
            state.status = LoadStatus::Loading;
            vec![ConsoleEffect::Api(ApiRequest::GetSystemDiagnostics {
                request,
            })]
        }
        SystemDiagnosticsAction::LoadSystemDiagnosticsSuccess { response } => {
            state.system_diagnostics = Some(response.system_diagnostics);
            state.loaded_timestamp = response.loaded_timestamp;
            state.error = None;
            state.status = LoadStatus::Success;
            if std::mem::take(&mut state.dialog_requested) {
                let nodewise = state.request.is_some_and(|request| request.nodewise);
                return vec![ConsoleEffect::OpenDialog(
                    ConsoleOverlay::SystemDiagnostics { nodewise },
                )];
            }
            Vec::new()
        }
        SystemDiagnosticsAction::SystemDiagnosticsApiError { error } => {
            state.dialog_requested = false;
            state.error = Some(error);
            state.status = LoadStatus::Error;
            Vec::new()
        }
        SystemDiagnosticsAction::ResetSystemDiagnostics => {
            *state = SystemDiagnosticsState::default();
            Vec::new()
        }
    }
}

pub fn reduce_overlay(state: &mut ConsoleOverlay, action: OverlayAction) {
    match action {
        OverlayAction::Open { overlay } => *state = overlay,
        OverlayAction::Close => *state = ConsoleOverlay::None,
    }
}

fn navigate_summary(tab: SummaryTab, id: String, view_history: bool) -> Vec<ConsoleEffect> {
    let route = if view_history {
        ConsoleRoute::summary_history(tab, id)
    } else {
        ConsoleRoute::summary_selected(tab, id)
    };
    vec![ConsoleEffect::Navigate(route)]
}

fn flatten_process_group(state: &mut SummaryListingState, group: &ProcessGroupStatusSnapshot) {
    let parent = group.name.as_str();

    for entity in &group.processor_status_snapshots {
        let mut entity = entity.clone();
        entity.snapshot.parent_process_group_name = parent.to_string();
        state.processor_status_snapshots.push(entity);
    }
    for entity in &group.input_port_status_snapshots {
        let mut entity = entity.clone();
        entity.snapshot.parent_process_group_name = parent.to_string();
        state.input_port_status_snapshots.push(entity);
    }
    for entity in &group.output_port_status_snapshots {
        let mut entity = entity.clone();
        entity.snapshot.parent_process_group_name = parent.to_string();
        state.output_port_status_snapshots.push(entity);
    }
    for entity in &group.connection_status_snapshots {
        let mut entity = entity.clone();
        entity.snapshot.parent_process_group_name = parent.to_string();
        state.connection_status_snapshots.push(entity);
    }
    for entity in &group.remote_process_group_status_snapshots {
        let mut entity = entity.clone();
        entity.snapshot.parent_process_group_name = parent.to_string();
        state.remote_process_group_status_snapshots.push(entity);
    }

    for child in &group.process_group_status_snapshots {
        state.process_group_status_snapshots.push(child.clone());
        flatten_process_group(state, &child.snapshot);
    }
}

#[cfg(test)]
mod tests;
