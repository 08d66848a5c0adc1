use serde::Deserialize;
use serde::Serialize;

use super::state::Bundle;
use super::state::ConsoleOverlay;
use super::state::ConsoleRoute;
use super::state::CurrentUser;
use super::state::DocumentedType;
use super::state::ProcessGroupStatus;
use super::state::ReportingTaskEntity;
use super::state::StatusHistory;
use super::state::StatusHistoryRequest;
use super::state::SystemDiagnostics;
use super::state::SystemDiagnosticsRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "slice", content = "action", rename_all = "snake_case")]
pub enum ConsoleAction {
    Router(RouterAction),
    CurrentUser(CurrentUserAction),
    ReportingTasks(ReportingTasksAction),
    ExtensionTypes(ExtensionTypesAction),
    SummaryListing(SummaryListingAction),
    StatusHistory(StatusHistoryAction),
    SystemDiagnostics(SystemDiagnosticsAction),
    Overlay(OverlayAction),
}

impl ConsoleAction {
    /// Display name in `[Feature] Verb Noun` form.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Router(action) => action.type_name(),
            Self::CurrentUser(action) => action.type_name(),
            Self::ReportingTasks(action) => action.type_name(),
            Self::ExtensionTypes(action) => action.type_name(),
            Self::SummaryListing(action) => action.type_name(),
            Self::StatusHistory(action) => action.type_name(),
            Self::SystemDiagnostics(action) => action.type_name(),
            Self::Overlay(action) => action.type_name(),
        }
    }
}

macro_rules! impl_into_console_action {
    ($($variant:ident($action:ty)),* $(,)?) => {
        $(
            impl From<$action> for ConsoleAction {
                fn from(action: $action) -> Self {
                    ConsoleAction::$variant(action)
                }
            }
        )*
    };
}

impl_into_console_action!(
    Router(RouterAction),
    CurrentUser(CurrentUserAction),
    ReportingTasks(ReportingTasksAction),
    ExtensionTypes(ExtensionTypesAction),
    SummaryListing(SummaryListingAction),
    StatusHistory(StatusHistoryAction),
    SystemDiagnostics(SystemDiagnosticsAction),
    Overlay(OverlayAction),
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RouterAction {
    Navigate { route: ConsoleRoute },
    RouteActivated { route: ConsoleRoute },
}

impl RouterAction {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Navigate { .. } => "[Router] Navigate",
            Self::RouteActivated { .. } => "[Router] Route Activated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CurrentUserAction {
    LoadCurrentUser,
    LoadCurrentUserSuccess { response: CurrentUser },
    CurrentUserApiError { error: String },
}

impl CurrentUserAction {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::LoadCurrentUser => "[Current User] Load Current User",
            Self::LoadCurrentUserSuccess { .. } => "[Current User] Load Current User Success",
            Self::CurrentUserApiError { .. } => "[Current User] Current User Api Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReportingTasksResponse {
    pub reporting_tasks: Vec<ReportingTaskEntity>,
    pub loaded_timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReportingTaskRequest {
    pub reporting_task_type: String,
    pub reporting_task_bundle: Option<Bundle>,
}

/// Target of a start, stop, deletion prompt or delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingTaskRequest {
    pub reporting_task: ReportingTaskEntity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingTaskResponse {
    pub reporting_task: ReportingTaskEntity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectReportingTaskRequest {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReportingTasksAction {
    ResetReportingTasksState,
    LoadReportingTasks,
    LoadReportingTasksSuccess {
        response: LoadReportingTasksResponse,
    },
    ReportingTasksApiError {
        error: String,
    },
    ClearReportingTasksApiError,
    OpenNewReportingTaskDialog,
    CreateReportingTask {
        request: CreateReportingTaskRequest,
    },
    CreateReportingTaskSuccess {
        response: ReportingTaskResponse,
    },
    StartReportingTask {
        request: ReportingTaskRequest,
    },
    StartReportingTaskSuccess {
        response: ReportingTaskResponse,
    },
    StopReportingTask {
        request: ReportingTaskRequest,
    },
    StopReportingTaskSuccess {
        response: ReportingTaskResponse,
    },
    PromptReportingTaskDeletion {
        request: ReportingTaskRequest,
    },
    DeleteReportingTask {
        request: ReportingTaskRequest,
    },
    DeleteReportingTaskSuccess {
        response: ReportingTaskResponse,
    },
    SelectReportingTask {
        request: SelectReportingTaskRequest,
    },
}

impl ReportingTasksAction {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::ResetReportingTasksState => "[Reporting Tasks] Reset Reporting Tasks State",
            Self::LoadReportingTasks => "[Reporting Tasks] Load Reporting Tasks",
            Self::LoadReportingTasksSuccess { .. } => {
                "[Reporting Tasks] Load Reporting Tasks Success"
            }
            Self::ReportingTasksApiError { .. } => "[Reporting Tasks] Load Reporting Tasks Error",
            Self::ClearReportingTasksApiError => "[Reporting Tasks] Clear Reporting Tasks Error",
            Self::OpenNewReportingTaskDialog => "[Reporting Tasks] Open New Reporting Task Dialog",
            Self::CreateReportingTask { .. } => "[Reporting Tasks] Create Reporting Task",
            Self::CreateReportingTaskSuccess { .. } => {
                "[Reporting Tasks] Create Reporting Task Success"
            }
            Self::StartReportingTask { .. } => "[Reporting Tasks] Start Reporting Task",
            Self::StartReportingTaskSuccess { .. } => {
                "[Reporting Tasks] Start Reporting Task Success"
            }
            Self::StopReportingTask { .. } => "[Reporting Tasks] Stop Reporting Task",
            Self::StopReportingTaskSuccess { .. } => "[Reporting Tasks] Stop Reporting Task Success",
            Self::PromptReportingTaskDeletion { .. } => {
                "[Reporting Tasks] Prompt Reporting Task Deletion"
            }
            Self::DeleteReportingTask { .. } => "[Reporting Tasks] Delete Reporting Task",
            Self::DeleteReportingTaskSuccess { .. } => {
                "[Reporting Tasks] Delete Reporting Task Success"
            }
            Self::SelectReportingTask { .. } => "[Reporting Tasks] Select Reporting Task",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadExtensionTypesForCanvasResponse {
    pub processor_types: Vec<DocumentedType>,
    pub controller_service_types: Vec<DocumentedType>,
    pub prioritizers: Vec<DocumentedType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadExtensionTypesForSettingsResponse {
    pub controller_service_types: Vec<DocumentedType>,
    pub reporting_task_types: Vec<DocumentedType>,
    pub registry_client_types: Vec<DocumentedType>,
    pub parameter_provider_types: Vec<DocumentedType>,
    pub flow_analysis_rule_types: Vec<DocumentedType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExtensionTypesAction {
    LoadExtensionTypesForCanvas,
    LoadExtensionTypesForCanvasSuccess {
        response: LoadExtensionTypesForCanvasResponse,
    },
    LoadExtensionTypesForSettings,
    LoadExtensionTypesForSettingsSuccess {
        response: LoadExtensionTypesForSettingsResponse,
    },
    ExtensionTypesApiError {
        error: String,
    },
    ClearExtensionTypesApiError,
}

impl ExtensionTypesAction {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::LoadExtensionTypesForCanvas => "[Extension Types] Load Extension Types For Canvas",
            Self::LoadExtensionTypesForCanvasSuccess { .. } => {
                "[Extension Types] Load Extension Types For Canvas Success"
            }
            Self::LoadExtensionTypesForSettings => {
                "[Extension Types] Load Extension Types For Settings"
            }
            Self::LoadExtensionTypesForSettingsSuccess { .. } => {
                "[Extension Types] Load Extension Types For Settings Success"
            }
            Self::ExtensionTypesApiError { .. } => "[Extension Types] Extension Types Api Error",
            Self::ClearExtensionTypesApiError => "[Extension Types] Clear Extension Types Api Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryListingResponse {
    pub process_group_status: ProcessGroupStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectStatusRequest {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SummaryListingAction {
    LoadSummaryListing { recursive: bool },
    LoadSummaryListingSuccess { response: SummaryListingResponse },
    SummaryListingApiError { error: String },
    ClearSummaryListingApiError,
    SelectProcessorStatus { request: SelectStatusRequest },
    SelectProcessGroupStatus { request: SelectStatusRequest },
    SelectInputPortStatus { request: SelectStatusRequest },
    SelectOutputPortStatus { request: SelectStatusRequest },
    SelectConnectionStatus { request: SelectStatusRequest },
    SelectRemoteProcessGroupStatus { request: SelectStatusRequest },
    NavigateToViewProcessorStatusHistory { id: String },
    NavigateToViewProcessGroupStatusHistory { id: String },
    NavigateToViewConnectionStatusHistory { id: String },
    NavigateToViewRemoteProcessGroupStatusHistory { id: String },
    ResetSummaryState,
}

impl SummaryListingAction {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::LoadSummaryListing { .. } => "[Summary Listing] Load Summary Listing",
            Self::LoadSummaryListingSuccess { .. } => {
                "[Summary Listing] Load Summary Listing Success"
            }
            Self::SummaryListingApiError { .. } => "[Summary Listing] Load Summary Listing error",
            Self::ClearSummaryListingApiError => "[Summary Listing] Clear Summary Listing error",
            Self::SelectProcessorStatus { .. } => "[Summary Listing] Select Processor Status",
            Self::SelectProcessGroupStatus { .. } => {
                "[Summary Listing] Select Process Group Status"
            }
            Self::SelectInputPortStatus { .. } => "[Summary Listing] Select Input Port Status",
            Self::SelectOutputPortStatus { .. } => "[Summary Listing] Select Output Port Status",
            Self::SelectConnectionStatus { .. } => "[Summary Listing] Select Connection Status",
            Self::SelectRemoteProcessGroupStatus { .. } => {
                "[Summary Listing] Select Remote Process Group Status"
            }
            Self::NavigateToViewProcessorStatusHistory { .. } => {
                "[Summary Listing] Navigate To Processor Status History"
            }
            Self::NavigateToViewProcessGroupStatusHistory { .. } => {
                "[Summary Listing] Navigate To Process Group Status History"
            }
            Self::NavigateToViewConnectionStatusHistory { .. } => {
                "[Summary Listing] Navigate To Connection Status History"
            }
            Self::NavigateToViewRemoteProcessGroupStatusHistory { .. } => {
                "[Summary Listing] Navigate To Remote Process Group Status History"
            }
            Self::ResetSummaryState => "[Summary Listing] Reset Summary State",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStatusHistoryResponse {
    pub request: StatusHistoryRequest,
    pub status_history: StatusHistory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StatusHistoryAction {
    GetStatusHistoryAndOpenDialog { request: StatusHistoryRequest },
    ReloadStatusHistory { request: StatusHistoryRequest },
    LoadStatusHistorySuccess { response: LoadStatusHistoryResponse },
    StatusHistoryApiError { error: String },
    ResetStatusHistory,
}

impl StatusHistoryAction {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::GetStatusHistoryAndOpenDialog { .. } => {
                "[Status History] Get Status History and Open Dialog"
            }
            Self::ReloadStatusHistory { .. } => "[Status History] Reload Status History",
            Self::LoadStatusHistorySuccess { .. } => "[Status History] Load Status History Success",
            Self::StatusHistoryApiError { .. } => "[Status History] Status History Api Error",
            Self::ResetStatusHistory => "[Status History] Reset Status History",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadSystemDiagnosticsResponse {
    pub system_diagnostics: SystemDiagnostics,
    pub loaded_timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SystemDiagnosticsAction {
    GetSystemDiagnosticsAndOpenDialog { request: SystemDiagnosticsRequest },
    ReloadSystemDiagnostics { request: SystemDiagnosticsRequest },
    LoadSystemDiagnosticsSuccess { response: LoadSystemDiagnosticsResponse },
    SystemDiagnosticsApiError { error: String },
    ResetSystemDiagnostics,
}

impl SystemDiagnosticsAction {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::GetSystemDiagnosticsAndOpenDialog { .. } => {
                "[System Diagnostics] Get System Diagnostics and Open Dialog"
            }
            Self::ReloadSystemDiagnostics { .. } => "[System Diagnostics] Reload System Diagnostics",
            Self::LoadSystemDiagnosticsSuccess { .. } => {
                "[System Diagnostics] Load System Diagnostics Success"
            }
            Self::SystemDiagnosticsApiError { .. } => {
                "[System Diagnostics] System Diagnostics Api Error"
            }
            Self::ResetSystemDiagnostics => "[System Diagnostics] Reset System Diagnostics",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OverlayAction {
    Open { overlay: ConsoleOverlay },
    Close,
}

impl OverlayAction {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Open { .. } => "[Overlay] Open Dialog",
            Self::Close => "[Overlay] Close Dialog",
        }
    }
}
