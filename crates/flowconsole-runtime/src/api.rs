use async_trait::async_trait;
use flowconsole_core::ApiRequest;
use flowconsole_core::CurrentUser;
use flowconsole_core::LoadExtensionTypesForCanvasResponse;
use flowconsole_core::LoadExtensionTypesForSettingsResponse;
use flowconsole_core::LoadReportingTasksResponse;
use flowconsole_core::LoadStatusHistoryResponse;
use flowconsole_core::LoadSystemDiagnosticsResponse;
use flowconsole_core::ReportingTaskResponse;
use flowconsole_core::SummaryListingResponse;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    CurrentUser(CurrentUser),
    ReportingTasks(LoadReportingTasksResponse),
    ReportingTask(ReportingTaskResponse),
    ExtensionTypesForCanvas(LoadExtensionTypesForCanvasResponse),
    ExtensionTypesForSettings(LoadExtensionTypesForSettingsResponse),
    SummaryListing(SummaryListingResponse),
    StatusHistory(LoadStatusHistoryResponse),
    SystemDiagnostics(LoadSystemDiagnosticsResponse),
}

impl ApiResponse {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CurrentUser(_) => "current-user",
            Self::ReportingTasks(_) => "reporting-tasks",
            Self::ReportingTask(_) => "reporting-task",
            Self::ExtensionTypesForCanvas(_) => "extension-types-canvas",
            Self::ExtensionTypesForSettings(_) => "extension-types-settings",
            Self::SummaryListing(_) => "summary-listing",
            Self::StatusHistory(_) => "status-history",
            Self::SystemDiagnostics(_) => "system-diagnostics",
        }
    }
}

/// Failure reported by the backend. The `Display` text is what lands in a
/// slice's `error` field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    Rejected(String),
    #[error("{kind} with id {id} not found")]
    NotFound { kind: &'static str, id: String },
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error("unexpected {response} response to {request}")]
    UnexpectedResponse {
        request: &'static str,
        response: &'static str,
    },
}

/// Backend seam. One call per [`ApiRequest`].
#[async_trait]
pub trait ConsoleApi: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}
