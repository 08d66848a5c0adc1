use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    #[default]
    Pending,
    Loading,
    Success,
    Error,
}

impl LoadStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    Processor,
    ProcessGroup,
    RemoteProcessGroup,
    InputPort,
    OutputPort,
    Connection,
    ReportingTask,
    ControllerService,
    FlowAnalysisRule,
    ParameterProvider,
    FlowRegistryClient,
}

impl ComponentType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Processor => "Processor",
            Self::ProcessGroup => "ProcessGroup",
            Self::RemoteProcessGroup => "RemoteProcessGroup",
            Self::InputPort => "InputPort",
            Self::OutputPort => "OutputPort",
            Self::Connection => "Connection",
            Self::ReportingTask => "ReportingTask",
            Self::ControllerService => "ControllerService",
            Self::FlowAnalysisRule => "FlowAnalysisRule",
            Self::ParameterProvider => "ParameterProvider",
            Self::FlowRegistryClient => "FlowRegistryClient",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Permissions {
    pub can_read: bool,
    pub can_write: bool,
}

impl Permissions {
    pub const NONE: Permissions = Permissions {
        can_read: false,
        can_write: false,
    };
    pub const READ_WRITE: Permissions = Permissions {
        can_read: true,
        can_write: true,
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Revision {
    pub version: u64,
    pub client_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryTab {
    Processors,
    InputPorts,
    OutputPorts,
    RemoteProcessGroups,
    Connections,
    ProcessGroups,
}

impl SummaryTab {
    pub const ALL: [SummaryTab; 6] = [
        SummaryTab::Processors,
        SummaryTab::InputPorts,
        SummaryTab::OutputPorts,
        SummaryTab::RemoteProcessGroups,
        SummaryTab::Connections,
        SummaryTab::ProcessGroups,
    ];

    pub fn segment(self) -> &'static str {
        match self {
            Self::Processors => "processors",
            Self::InputPorts => "input-ports",
            Self::OutputPorts => "output-ports",
            Self::RemoteProcessGroups => "remote-process-groups",
            Self::Connections => "connections",
            Self::ProcessGroups => "process-groups",
        }
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.segment() == segment)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Processors => "Processors",
            Self::InputPorts => "Input Ports",
            Self::OutputPorts => "Output Ports",
            Self::RemoteProcessGroups => "Remote Process Groups",
            Self::Connections => "Connections",
            Self::ProcessGroups => "Process Groups",
        }
    }

    pub fn component_type(self) -> ComponentType {
        match self {
            Self::Processors => ComponentType::Processor,
            Self::InputPorts => ComponentType::InputPort,
            Self::OutputPorts => ComponentType::OutputPort,
            Self::RemoteProcessGroups => ComponentType::RemoteProcessGroup,
            Self::Connections => ComponentType::Connection,
            Self::ProcessGroups => ComponentType::ProcessGroup,
        }
    }

    /// Ports have no status history view.
    pub fn has_status_history(self) -> bool {
        !matches!(self, Self::InputPorts | Self::OutputPorts)
    }

    pub fn next(self) -> Self {
        match self {
            Self::Processors => Self::InputPorts,
            Self::InputPorts => Self::OutputPorts,
            Self::OutputPorts => Self::RemoteProcessGroups,
            Self::RemoteProcessGroups => Self::Connections,
            Self::Connections => Self::ProcessGroups,
            Self::ProcessGroups => Self::Processors,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Processors => Self::ProcessGroups,
            Self::InputPorts => Self::Processors,
            Self::OutputPorts => Self::InputPorts,
            Self::RemoteProcessGroups => Self::OutputPorts,
            Self::Connections => Self::RemoteProcessGroups,
            Self::ProcessGroups => Self::Connections,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsTab {
    General,
    ManagementControllerServices,
    ReportingTasks,
    FlowAnalysisRules,
    RegistryClients,
    ParameterProviders,
}

impl SettingsTab {
    pub const ALL: [SettingsTab; 6] = [
        SettingsTab::General,
        SettingsTab::ManagementControllerServices,
        SettingsTab::ReportingTasks,
        SettingsTab::FlowAnalysisRules,
        SettingsTab::RegistryClients,
        SettingsTab::ParameterProviders,
    ];

    pub fn segment(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::ManagementControllerServices => "management-controller-services",
            Self::ReportingTasks => "reporting-tasks",
            Self::FlowAnalysisRules => "flow-analysis-rules",
            Self::RegistryClients => "registry-clients",
            Self::ParameterProviders => "parameter-providers",
        }
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.segment() == segment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum ConsoleRoute {
    Root,
    Summary {
        tab: SummaryTab,
        selected_id: Option<String>,
        view_history: bool,
    },
    Settings {
        tab: SettingsTab,
        selected_id: Option<String>,
    },
}

impl ConsoleRoute {
    pub fn summary(tab: SummaryTab) -> Self {
        Self::Summary {
            tab,
            selected_id: None,
            view_history: false,
        }
    }

    pub fn summary_selected(tab: SummaryTab, id: impl Into<String>) -> Self {
        Self::Summary {
            tab,
            selected_id: Some(id.into()),
            view_history: false,
        }
    }

    pub fn summary_history(tab: SummaryTab, id: impl Into<String>) -> Self {
        Self::Summary {
            tab,
            selected_id: Some(id.into()),
            view_history: true,
        }
    }

    pub fn settings(tab: SettingsTab, selected_id: Option<String>) -> Self {
        Self::Settings { tab, selected_id }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Root => "/".to_string(),
            Self::Summary {
                tab,
                selected_id,
                view_history,
            } => {
                let mut path = format!("/summary/{}", tab.segment());
                if let Some(id) = selected_id {
                    path.push('/');
                    path.push_str(id);
                    if *view_history {
                        path.push_str("/history");
                    }
                }
                path
            }
            Self::Settings { tab, selected_id } => match selected_id {
                Some(id) => format!("/settings/{}/{}", tab.segment(), id),
                None => format!("/settings/{}", tab.segment()),
            },
        }
    }

    pub fn parse(path: &str) -> Option<Self> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Some(Self::Root),
            ["summary"] => Some(Self::summary(SummaryTab::Processors)),
            ["summary", tab] => Some(Self::summary(SummaryTab::from_segment(tab)?)),
            ["summary", tab, id] => Some(Self::summary_selected(
                SummaryTab::from_segment(tab)?,
                *id,
            )),
            ["summary", tab, id, "history"] => Some(Self::summary_history(
                SummaryTab::from_segment(tab)?,
                *id,
            )),
            ["settings"] => Some(Self::settings(SettingsTab::General, None)),
            ["settings", tab] => Some(Self::settings(SettingsTab::from_segment(tab)?, None)),
            ["settings", tab, id] => Some(Self::settings(
                SettingsTab::from_segment(tab)?,
                Some(id.to_string()),
            )),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterState {
    pub current: ConsoleRoute,
    pub pending: Option<ConsoleRoute>,
}

impl Default for RouterState {
    fn default() -> Self {
        Self {
            current: ConsoleRoute::Root,
            pending: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduledState {
    Running,
    Stopped,
    Disabled,
}

impl ScheduledState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Stopped => "Stopped",
            Self::Disabled => "Disabled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingTask {
    pub id: String,
    pub name: String,
    pub task_type: String,
    pub bundle: Option<Bundle>,
    pub state: ScheduledState,
    pub scheduling_period: String,
    pub comments: String,
    pub validation_errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingTaskEntity {
    pub id: String,
    pub revision: Revision,
    pub permissions: Permissions,
    pub active_thread_count: u32,
    pub component: ReportingTask,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportingTasksState {
    pub reporting_tasks: Vec<ReportingTaskEntity>,
    pub saving: bool,
    pub loaded_timestamp: String,
    pub error: Option<String>,
    pub status: LoadStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentedType {
    pub type_name: String,
    pub bundle: Option<Bundle>,
    pub description: Option<String>,
    pub restricted: bool,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtensionTypesState {
    pub processor_types: Vec<DocumentedType>,
    pub controller_service_types: Vec<DocumentedType>,
    pub prioritizer_types: Vec<DocumentedType>,
    pub reporting_task_types: Vec<DocumentedType>,
    pub registry_client_types: Vec<DocumentedType>,
    pub flow_analysis_rule_types: Vec<DocumentedType>,
    pub parameter_provider_types: Vec<DocumentedType>,
    pub error: Option<String>,
    pub status: LoadStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshotEntity<T> {
    pub id: String,
    pub can_read: bool,
    pub snapshot: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProcessorStatusSnapshot {
    pub id: String,
    pub group_id: String,
    pub name: String,
    pub processor_type: String,
    pub run_status: String,
    pub active_thread_count: u32,
    pub flow_files_in: u64,
    pub bytes_in: u64,
    pub flow_files_out: u64,
    pub bytes_out: u64,
    pub bytes_read: u64,
    pub bytes_written: u64,
    pub task_count: u64,
    pub parent_process_group_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PortStatusSnapshot {
    pub id: String,
    pub group_id: String,
    pub name: String,
    pub run_status: String,
    pub active_thread_count: u32,
    pub flow_files_in: u64,
    pub bytes_in: u64,
    pub flow_files_out: u64,
    pub bytes_out: u64,
    pub parent_process_group_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConnectionStatusSnapshot {
    pub id: String,
    pub group_id: String,
    pub name: String,
    pub source_name: String,
    pub destination_name: String,
    pub flow_files_in: u64,
    pub bytes_in: u64,
    pub flow_files_queued: u64,
    pub bytes_queued: u64,
    pub flow_files_out: u64,
    pub bytes_out: u64,
    pub percent_use_count: Option<u8>,
    pub parent_process_group_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemoteProcessGroupStatusSnapshot {
    pub id: String,
    pub group_id: String,
    pub name: String,
    pub target_uri: String,
    pub transmission_status: String,
    pub active_thread_count: u32,
    pub flow_files_sent: u64,
    pub bytes_sent: u64,
    pub flow_files_received: u64,
    pub bytes_received: u64,
    pub parent_process_group_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProcessGroupStatusSnapshot {
    pub id: String,
    pub name: String,
    pub active_thread_count: u32,
    pub flow_files_in: u64,
    pub bytes_in: u64,
    pub flow_files_queued: u64,
    pub bytes_queued: u64,
    pub flow_files_out: u64,
    pub bytes_out: u64,
    pub processor_status_snapshots: Vec<ProcessorStatusSnapshotEntity>,
    pub input_port_status_snapshots: Vec<PortStatusSnapshotEntity>,
    pub output_port_status_snapshots: Vec<PortStatusSnapshotEntity>,
    pub connection_status_snapshots: Vec<ConnectionStatusSnapshotEntity>,
    pub remote_process_group_status_snapshots: Vec<RemoteProcessGroupStatusSnapshotEntity>,
    pub process_group_status_snapshots: Vec<ProcessGroupStatusSnapshotEntity>,
}

pub type ProcessorStatusSnapshotEntity = StatusSnapshotEntity<ProcessorStatusSnapshot>;
pub type PortStatusSnapshotEntity = StatusSnapshotEntity<PortStatusSnapshot>;
pub type ConnectionStatusSnapshotEntity = StatusSnapshotEntity<ConnectionStatusSnapshot>;
pub type RemoteProcessGroupStatusSnapshotEntity =
    StatusSnapshotEntity<RemoteProcessGroupStatusSnapshot>;
pub type ProcessGroupStatusSnapshotEntity = StatusSnapshotEntity<ProcessGroupStatusSnapshot>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessGroupStatus {
    pub id: String,
    pub name: String,
    pub stats_last_refreshed: String,
    pub aggregate_snapshot: ProcessGroupStatusSnapshot,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SummaryListingState {
    pub process_group_status: Option<ProcessGroupStatus>,
    pub processor_status_snapshots: Vec<ProcessorStatusSnapshotEntity>,
    pub process_group_status_snapshots: Vec<ProcessGroupStatusSnapshotEntity>,
    pub input_port_status_snapshots: Vec<PortStatusSnapshotEntity>,
    pub output_port_status_snapshots: Vec<PortStatusSnapshotEntity>,
    pub connection_status_snapshots: Vec<ConnectionStatusSnapshotEntity>,
    pub remote_process_group_status_snapshots: Vec<RemoteProcessGroupStatusSnapshotEntity>,
    pub recursive: bool,
    pub loaded_timestamp: String,
    pub error: Option<String>,
    pub status: LoadStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistoryRequest {
    pub source: String,
    pub component_type: ComponentType,
    pub component_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub field: String,
    pub label: String,
    pub description: String,
    pub formatter: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub timestamp_ms: i64,
    pub status_metrics: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistory {
    pub generated: String,
    pub component_details: BTreeMap<String, String>,
    pub field_descriptors: Vec<FieldDescriptor>,
    pub aggregate_snapshots: Vec<StatusSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusHistoryState {
    pub request: Option<StatusHistoryRequest>,
    pub dialog_requested: bool,
    pub status_history: Option<StatusHistory>,
    pub loaded_timestamp: String,
    pub error: Option<String>,
    pub status: LoadStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemDiagnosticsRequest {
    pub nodewise: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemDiagnosticsSnapshot {
    pub total_heap_bytes: u64,
    pub used_heap_bytes: u64,
    pub max_heap_bytes: u64,
    pub available_processors: u32,
    pub processor_load_average: Option<f64>,
    pub total_threads: u32,
    pub daemon_threads: u32,
    pub uptime: String,
    pub stats_last_refreshed: String,
}

impl SystemDiagnosticsSnapshot {
    pub fn heap_utilization(&self) -> f64 {
        if self.max_heap_bytes == 0 {
            return 0.0;
        }
        self.used_heap_bytes as f64 / self.max_heap_bytes as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSystemDiagnostics {
    pub node_id: String,
    pub address: String,
    pub snapshot: SystemDiagnosticsSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemDiagnostics {
    pub aggregate_snapshot: SystemDiagnosticsSnapshot,
    pub node_snapshots: Vec<NodeSystemDiagnostics>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SystemDiagnosticsState {
    pub request: Option<SystemDiagnosticsRequest>,
    pub dialog_requested: bool,
    pub system_diagnostics: Option<SystemDiagnostics>,
    pub loaded_timestamp: String,
    pub error: Option<String>,
    pub status: LoadStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub identity: String,
    pub anonymous: bool,
    pub can_version_flows: bool,
    pub logout_supported: bool,
    pub provenance_permissions: Permissions,
    pub counters_permissions: Permissions,
    pub tenants_permissions: Permissions,
    pub controller_permissions: Permissions,
    pub policies_permissions: Permissions,
    pub system_permissions: Permissions,
    pub restricted_components_permissions: Permissions,
}

impl Default for CurrentUser {
    fn default() -> Self {
        Self {
            identity: String::new(),
            anonymous: true,
            can_version_flows: false,
            logout_supported: false,
            provenance_permissions: Permissions::NONE,
            counters_permissions: Permissions::NONE,
            tenants_permissions: Permissions::NONE,
            controller_permissions: Permissions::NONE,
            policies_permissions: Permissions::NONE,
            system_permissions: Permissions::NONE,
            restricted_components_permissions: Permissions::NONE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CurrentUserState {
    pub user: CurrentUser,
    pub error: Option<String>,
    pub status: LoadStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "dialog", rename_all = "snake_case")]
pub enum ConsoleOverlay {
    #[default]
    None,
    StatusHistory {
        component_type: ComponentType,
        component_id: String,
    },
    SystemDiagnostics {
        nodewise: bool,
    },
    NewReportingTask,
    ConfirmReportingTaskDeletion {
        id: String,
        name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConsoleState {
    pub router: RouterState,
    pub current_user: CurrentUserState,
    pub reporting_tasks: ReportingTasksState,
    pub extension_types: ExtensionTypesState,
    pub summary_listing: SummaryListingState,
    pub status_history: StatusHistoryState,
    pub system_diagnostics: SystemDiagnosticsState,
    pub overlay: ConsoleOverlay,
}

impl ConsoleState {
    pub fn new() -> Self {
        Self::default()
    }
}
