//! In-memory backend used by the CLI demo and the tests.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::time::Duration;

use async_trait::async_trait;
use flowconsole_core::ApiRequest;
use flowconsole_core::Bundle;
use flowconsole_core::ComponentType;
use flowconsole_core::ConnectionStatusSnapshot;
use flowconsole_core::CreateReportingTaskRequest;
use flowconsole_core::CurrentUser;
use flowconsole_core::DocumentedType;
use flowconsole_core::FieldDescriptor;
use flowconsole_core::LoadExtensionTypesForCanvasResponse;
use flowconsole_core::LoadExtensionTypesForSettingsResponse;
use flowconsole_core::LoadReportingTasksResponse;
use flowconsole_core::LoadStatusHistoryResponse;
use flowconsole_core::LoadSystemDiagnosticsResponse;
use flowconsole_core::NodeSystemDiagnostics;
use flowconsole_core::Permissions;
use flowconsole_core::PortStatusSnapshot;
use flowconsole_core::ProcessGroupStatus;
use flowconsole_core::ProcessGroupStatusSnapshot;
use flowconsole_core::ProcessorStatusSnapshot;
use flowconsole_core::RemoteProcessGroupStatusSnapshot;
use flowconsole_core::ReportingTask;
use flowconsole_core::ReportingTaskEntity;
use flowconsole_core::ReportingTaskResponse;
use flowconsole_core::Revision;
use flowconsole_core::ScheduledState;
use flowconsole_core::StatusHistory;
use flowconsole_core::StatusHistoryRequest;
use flowconsole_core::StatusSnapshot;
use flowconsole_core::StatusSnapshotEntity;
use flowconsole_core::SummaryListingResponse;
use flowconsole_core::SystemDiagnostics;
use flowconsole_core::SystemDiagnosticsRequest;
use flowconsole_core::SystemDiagnosticsSnapshot;

use crate::api::ApiError;
use crate::api::ApiResponse;
use crate::api::ConsoleApi;

const HISTORY_POINTS: i64 = 12;
const HISTORY_STEP_MS: i64 = 5 * 60 * 1000;

#[derive(Debug, Default)]
pub struct SimulatedConsoleApi {
    backend: Mutex<SimulatedBackend>,
    latency: Option<Duration>,
}

#[derive(Debug, Default)]
struct SimulatedBackend {
    user: CurrentUser,
    reporting_tasks: Vec<ReportingTaskEntity>,
    next_task_id: u64,
    root: ProcessGroupStatusSnapshot,
    processor_types: Vec<DocumentedType>,
    controller_service_types: Vec<DocumentedType>,
    prioritizer_types: Vec<DocumentedType>,
    reporting_task_types: Vec<DocumentedType>,
    registry_client_types: Vec<DocumentedType>,
    parameter_provider_types: Vec<DocumentedType>,
    flow_analysis_rule_types: Vec<DocumentedType>,
    failures: HashMap<&'static str, ApiError>,
}

impl SimulatedConsoleApi {
    /// Empty backend with an anonymous user.
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend seeded with a small flow, one reporting task and an
    /// administrator named `identity`.
    pub fn demo(identity: &str) -> Self {
        let backend = SimulatedBackend {
            user: administrator(identity),
            reporting_tasks: vec![task_entity(
                "rt-0",
                "org.apache.nifi.reporting.SiteToSiteStatusReportingTask",
                ScheduledState::Running,
            )],
            next_task_id: 1,
            root: demo_flow(),
            processor_types: vec![
                documented("org.apache.nifi.processors.standard.GenerateFlowFile", &["test"]),
                documented("org.apache.nifi.processors.standard.LogAttribute", &["logging"]),
                documented("org.apache.nifi.processors.standard.PutFile", &["local", "files"]),
            ],
            controller_service_types: vec![documented(
                "org.apache.nifi.ssl.StandardSSLContextService",
                &["ssl", "tls"],
            )],
            prioritizer_types: vec![
                documented("org.apache.nifi.prioritizer.FirstInFirstOutPrioritizer", &[]),
                documented("org.apache.nifi.prioritizer.OldestFlowFileFirstPrioritizer", &[]),
            ],
            reporting_task_types: vec![
                documented(
                    "org.apache.nifi.reporting.SiteToSiteStatusReportingTask",
                    &["status", "site-to-site"],
                ),
                documented(
                    "org.apache.nifi.controller.ControllerStatusReportingTask",
                    &["log", "stats"],
                ),
                documented("org.apache.nifi.controller.MonitorDiskUsage", &["disk"]),
            ],
            registry_client_types: vec![documented(
                "org.apache.nifi.registry.flow.NifiRegistryFlowRegistryClient",
                &["registry"],
            )],
            parameter_provider_types: Vec::new(),
            flow_analysis_rule_types: vec![documented(
                "org.apache.nifi.flowanalysis.rules.DisallowComponentType",
                &["component", "type"],
            )],
            failures: HashMap::new(),
        };
        Self {
            backend: Mutex::new(backend),
            latency: None,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn with_user(self, user: CurrentUser) -> Self {
        self.backend().user = user;
        self
    }

    pub fn with_flow(self, root: ProcessGroupStatusSnapshot) -> Self {
        self.set_flow(root);
        self
    }

    /// Replaces the process group tree served by later summary loads.
    pub fn set_flow(&self, root: ProcessGroupStatusSnapshot) {
        self.backend().root = root;
    }

    /// Every request with `label` fails with `error` until cleared.
    pub fn fail(&self, label: &'static str, error: ApiError) {
        self.backend().failures.insert(label, error);
    }

    pub fn clear_failure(&self, label: &'static str) {
        self.backend().failures.remove(label);
    }

    fn backend(&self) -> std::sync::MutexGuard<'_, SimulatedBackend> {
        self.backend.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ConsoleApi for SimulatedConsoleApi {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let mut backend = self.backend();
        if let Some(error) = backend.failures.get(request.label()) {
            return Err(error.clone());
        }
        backend.execute(request)
    }
}

impl SimulatedBackend {
    fn execute(&mut self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        match request {
            ApiRequest::LoadCurrentUser => Ok(ApiResponse::CurrentUser(self.user.clone())),
            ApiRequest::LoadReportingTasks => {
                Ok(ApiResponse::ReportingTasks(LoadReportingTasksResponse {
                    reporting_tasks: self.reporting_tasks.clone(),
                    loaded_timestamp: now_label(),
                }))
            }
            ApiRequest::CreateReportingTask { request } => self.create_reporting_task(request),
            ApiRequest::StartReportingTask { reporting_task } => {
                self.schedule_reporting_task(&reporting_task, ScheduledState::Running)
            }
            ApiRequest::StopReportingTask { reporting_task } => {
                self.schedule_reporting_task(&reporting_task, ScheduledState::Stopped)
            }
            ApiRequest::DeleteReportingTask { reporting_task } => {
                let index = self.task_index(&reporting_task)?;
                if self.reporting_tasks[index].component.state == ScheduledState::Running {
                    return Err(ApiError::Rejected(format!(
                        "{} is running and cannot be removed",
                        reporting_task.component.name
                    )));
                }
                let removed = self.reporting_tasks.remove(index);
                Ok(ApiResponse::ReportingTask(ReportingTaskResponse {
                    reporting_task: removed,
                }))
            }
            ApiRequest::LoadExtensionTypesForCanvas => Ok(ApiResponse::ExtensionTypesForCanvas(
                LoadExtensionTypesForCanvasResponse {
                    processor_types: self.processor_types.clone(),
                    controller_service_types: self.controller_service_types.clone(),
                    prioritizers: self.prioritizer_types.clone(),
                },
            )),
            ApiRequest::LoadExtensionTypesForSettings => Ok(ApiResponse::ExtensionTypesForSettings(
                LoadExtensionTypesForSettingsResponse {
                    controller_service_types: self.controller_service_types.clone(),
                    reporting_task_types: self.reporting_task_types.clone(),
                    registry_client_types: self.registry_client_types.clone(),
                    parameter_provider_types: self.parameter_provider_types.clone(),
                    flow_analysis_rule_types: self.flow_analysis_rule_types.clone(),
                },
            )),
            ApiRequest::LoadSummaryListing { recursive } => {
                let mut aggregate_snapshot = self.root.clone();
                if !recursive {
                    for child in &mut aggregate_snapshot.process_group_status_snapshots {
                        strip_contents(&mut child.snapshot);
                    }
                }
                Ok(ApiResponse::SummaryListing(SummaryListingResponse {
                    process_group_status: ProcessGroupStatus {
                        id: self.root.id.clone(),
                        name: self.root.name.clone(),
                        stats_last_refreshed: now_label(),
                        aggregate_snapshot,
                    },
                }))
            }
            ApiRequest::GetStatusHistory { request } => self.status_history(request),
            ApiRequest::GetSystemDiagnostics { request } => {
                Ok(ApiResponse::SystemDiagnostics(system_diagnostics(request)))
            }
        }
    }

    fn create_reporting_task(
        &mut self,
        request: CreateReportingTaskRequest,
    ) -> Result<ApiResponse, ApiError> {
        let known = self
            .reporting_task_types
            .iter()
            .any(|documented| documented.type_name == request.reporting_task_type);
        if !known {
            return Err(ApiError::Rejected(format!(
                "unable to create reporting task of type {}",
                request.reporting_task_type
            )));
        }
        let id = format!("rt-{}", self.next_task_id);
        self.next_task_id += 1;
        let mut entity = task_entity(&id, &request.reporting_task_type, ScheduledState::Stopped);
        entity.component.bundle = request.reporting_task_bundle;
        self.reporting_tasks.push(entity.clone());
        Ok(ApiResponse::ReportingTask(ReportingTaskResponse {
            reporting_task: entity,
        }))
    }

    fn schedule_reporting_task(
        &mut self,
        reporting_task: &ReportingTaskEntity,
        state: ScheduledState,
    ) -> Result<ApiResponse, ApiError> {
        let index = self.task_index(reporting_task)?;
        let entity = &mut self.reporting_tasks[index];
        if state == ScheduledState::Running && !entity.component.validation_errors.is_empty() {
            return Err(ApiError::Rejected(format!(
                "{} is invalid: {}",
                entity.component.name,
                entity.component.validation_errors.join("; ")
            )));
        }
        entity.component.state = state;
        entity.active_thread_count = 0;
        entity.revision.version += 1;
        Ok(ApiResponse::ReportingTask(ReportingTaskResponse {
            reporting_task: entity.clone(),
        }))
    }

    /// Locates `reporting_task` and rejects stale revisions.
    fn task_index(&self, reporting_task: &ReportingTaskEntity) -> Result<usize, ApiError> {
        let index = self
            .reporting_tasks
            .iter()
            .position(|task| task.id == reporting_task.id)
            .ok_or_else(|| ApiError::NotFound {
                kind: "reporting task",
                id: reporting_task.id.clone(),
            })?;
        let current = self.reporting_tasks[index].revision.version;
        if current != reporting_task.revision.version {
            return Err(ApiError::Rejected(format!(
                "{} is not the most up-to-date revision (expected {current})",
                reporting_task.revision.version
            )));
        }
        Ok(index)
    }

    fn status_history(&self, request: StatusHistoryRequest) -> Result<ApiResponse, ApiError> {
        let name = find_component_name(&self.root, request.component_type, &request.component_id)
            .ok_or_else(|| ApiError::NotFound {
                kind: request.component_type.label(),
                id: request.component_id.clone(),
            })?;

        let now = chrono::Utc::now().timestamp_millis();
        let aggregate_snapshots = (0..HISTORY_POINTS)
            .rev()
            .map(|step| {
                let wave = (step * 37 % 11) + 1;
                StatusSnapshot {
                    timestamp_ms: now - step * HISTORY_STEP_MS,
                    status_metrics: BTreeMap::from([
                        ("flowFilesIn".to_string(), wave * 10),
                        ("flowFilesOut".to_string(), wave * 9),
                        ("bytesIn".to_string(), wave * 10 * 1024),
                        ("bytesOut".to_string(), wave * 9 * 1024),
                    ]),
                }
            })
            .collect();

        Ok(ApiResponse::StatusHistory(LoadStatusHistoryResponse {
            status_history: StatusHistory {
                generated: now_label(),
                component_details: BTreeMap::from([
                    ("Id".to_string(), request.component_id.clone()),
                    ("Name".to_string(), name),
                    ("Type".to_string(), request.component_type.label().to_string()),
                ]),
                field_descriptors: vec![
                    field("flowFilesIn", "FlowFiles In (5 mins)", "COUNT"),
                    field("flowFilesOut", "FlowFiles Out (5 mins)", "COUNT"),
                    field("bytesIn", "Bytes In (5 mins)", "DATA_SIZE"),
                    field("bytesOut", "Bytes Out (5 mins)", "DATA_SIZE"),
                ],
                aggregate_snapshots,
            },
            request,
        }))
    }
}

fn now_label() -> String {
    chrono::Utc::now().format("%H:%M:%S UTC").to_string()
}

fn strip_contents(group: &mut ProcessGroupStatusSnapshot) {
    group.processor_status_snapshots.clear();
    group.input_port_status_snapshots.clear();
    group.output_port_status_snapshots.clear();
    group.connection_status_snapshots.clear();
    group.remote_process_group_status_snapshots.clear();
    group.process_group_status_snapshots.clear();
}

fn find_component_name(
    group: &ProcessGroupStatusSnapshot,
    component_type: ComponentType,
    id: &str,
) -> Option<String> {
    if component_type == ComponentType::ProcessGroup && group.id == id {
        return Some(group.name.clone());
    }
    let found = match component_type {
        ComponentType::Processor => group
            .processor_status_snapshots
            .iter()
            .find(|entity| entity.id == id)
            .map(|entity| entity.snapshot.name.clone()),
        ComponentType::Connection => group
            .connection_status_snapshots
            .iter()
            .find(|entity| entity.id == id)
            .map(|entity| entity.snapshot.name.clone()),
        ComponentType::RemoteProcessGroup => group
            .remote_process_group_status_snapshots
            .iter()
            .find(|entity| entity.id == id)
            .map(|entity| entity.snapshot.name.clone()),
        _ => None,
    };
    found.or_else(|| {
        group
            .process_group_status_snapshots
            .iter()
            .find_map(|child| find_component_name(&child.snapshot, component_type, id))
    })
}

fn system_diagnostics(request: SystemDiagnosticsRequest) -> LoadSystemDiagnosticsResponse {
    let refreshed = now_label();
    let node = |used: u64, load: f64| SystemDiagnosticsSnapshot {
        total_heap_bytes: 1024 * 1024 * 1024,
        used_heap_bytes: used,
        max_heap_bytes: 2 * 1024 * 1024 * 1024,
        available_processors: 8,
        processor_load_average: Some(load),
        total_threads: 96,
        daemon_threads: 41,
        uptime: "26:14:03.512".to_string(),
        stats_last_refreshed: refreshed.clone(),
    };
    let node_snapshots = if request.nodewise {
        vec![
            NodeSystemDiagnostics {
                node_id: "node-1".to_string(),
                address: "nifi-1:8443".to_string(),
                snapshot: node(300 * 1024 * 1024, 1.25),
            },
            NodeSystemDiagnostics {
                node_id: "node-2".to_string(),
                address: "nifi-2:8443".to_string(),
                snapshot: node(212 * 1024 * 1024, 0.75),
            },
        ]
    } else {
        Vec::new()
    };
    LoadSystemDiagnosticsResponse {
        system_diagnostics: SystemDiagnostics {
            aggregate_snapshot: node(512 * 1024 * 1024, 1.0),
            node_snapshots,
        },
        loaded_timestamp: refreshed.clone(),
    }
}

fn field(field: &str, label: &str, formatter: &str) -> FieldDescriptor {
    FieldDescriptor {
        field: field.to_string(),
        label: label.to_string(),
        description: label.to_string(),
        formatter: formatter.to_string(),
    }
}

fn documented(type_name: &str, tags: &[&str]) -> DocumentedType {
    DocumentedType {
        type_name: type_name.to_string(),
        bundle: Some(standard_bundle()),
        description: None,
        restricted: false,
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
    }
}

fn standard_bundle() -> Bundle {
    Bundle {
        group: "org.apache.nifi".to_string(),
        artifact: "nifi-standard-nar".to_string(),
        version: "2.0.0".to_string(),
    }
}

fn short_type_name(type_name: &str) -> &str {
    type_name.rsplit('.').next().unwrap_or(type_name)
}

fn task_entity(id: &str, type_name: &str, state: ScheduledState) -> ReportingTaskEntity {
    ReportingTaskEntity {
        id: id.to_string(),
        revision: Revision {
            version: 0,
            client_id: None,
        },
        permissions: Permissions::READ_WRITE,
        active_thread_count: 0,
        component: ReportingTask {
            id: id.to_string(),
            name: short_type_name(type_name).to_string(),
            task_type: type_name.to_string(),
            bundle: Some(standard_bundle()),
            state,
            scheduling_period: "5 mins".to_string(),
            comments: String::new(),
            validation_errors: Vec::new(),
        },
    }
}

fn administrator(identity: &str) -> CurrentUser {
    CurrentUser {
        identity: identity.to_string(),
        anonymous: false,
        can_version_flows: true,
        logout_supported: true,
        provenance_permissions: Permissions::READ_WRITE,
        counters_permissions: Permissions::READ_WRITE,
        tenants_permissions: Permissions::READ_WRITE,
        controller_permissions: Permissions::READ_WRITE,
        policies_permissions: Permissions::READ_WRITE,
        system_permissions: Permissions::READ_WRITE,
        restricted_components_permissions: Permissions::READ_WRITE,
    }
}

fn entity<T>(id: &str, snapshot: T) -> StatusSnapshotEntity<T> {
    StatusSnapshotEntity {
        id: id.to_string(),
        can_read: true,
        snapshot,
    }
}

fn processor(
    id: &str,
    group_id: &str,
    name: &str,
    processor_type: &str,
    tasks: u64,
) -> StatusSnapshotEntity<ProcessorStatusSnapshot> {
    entity(
        id,
        ProcessorStatusSnapshot {
            id: id.to_string(),
            group_id: group_id.to_string(),
            name: name.to_string(),
            processor_type: processor_type.to_string(),
            run_status: "Running".to_string(),
            active_thread_count: 1,
            flow_files_in: tasks * 4,
            bytes_in: tasks * 4 * 2048,
            flow_files_out: tasks * 4,
            bytes_out: tasks * 4 * 2048,
            bytes_read: tasks * 1024,
            bytes_written: tasks * 2048,
            task_count: tasks,
            parent_process_group_name: String::new(),
        },
    )
}

fn port(
    id: &str,
    group_id: &str,
    name: &str,
    flow_files: u64,
) -> StatusSnapshotEntity<PortStatusSnapshot> {
    entity(
        id,
        PortStatusSnapshot {
            id: id.to_string(),
            group_id: group_id.to_string(),
            name: name.to_string(),
            run_status: "Running".to_string(),
            active_thread_count: 0,
            flow_files_in: flow_files,
            bytes_in: flow_files * 512,
            flow_files_out: flow_files,
            bytes_out: flow_files * 512,
            parent_process_group_name: String::new(),
        },
    )
}

fn connection(
    id: &str,
    group_id: &str,
    source: &str,
    destination: &str,
    queued: u64,
) -> StatusSnapshotEntity<ConnectionStatusSnapshot> {
    entity(
        id,
        ConnectionStatusSnapshot {
            id: id.to_string(),
            group_id: group_id.to_string(),
            name: String::new(),
            source_name: source.to_string(),
            destination_name: destination.to_string(),
            flow_files_in: 120,
            bytes_in: 120 * 2048,
            flow_files_queued: queued,
            bytes_queued: queued * 2048,
            flow_files_out: 120,
            bytes_out: 120 * 2048,
            percent_use_count: Some((queued * 100 / 10_000).min(100) as u8),
            parent_process_group_name: String::new(),
        },
    )
}

/// Root group with two children; the remote process group lives in the
/// nested `Ingest` group so flat loads omit it.
pub fn demo_flow() -> ProcessGroupStatusSnapshot {
    let ingest = ProcessGroupStatusSnapshot {
        id: "pg-ingest".to_string(),
        name: "Ingest".to_string(),
        active_thread_count: 2,
        flow_files_in: 480,
        bytes_in: 480 * 2048,
        flow_files_out: 480,
        bytes_out: 480 * 2048,
        processor_status_snapshots: vec![processor(
            "proc-listen",
            "pg-ingest",
            "ListenHTTP",
            "ListenHTTP",
            120,
        )],
        input_port_status_snapshots: vec![port("in-ingest", "pg-ingest", "from upstream", 480)],
        remote_process_group_status_snapshots: vec![entity(
            "rpg-1",
            RemoteProcessGroupStatusSnapshot {
                id: "rpg-1".to_string(),
                group_id: "pg-ingest".to_string(),
                name: "Edge Cluster".to_string(),
                target_uri: "https://edge.example.com:8443/nifi".to_string(),
                transmission_status: "Transmitting".to_string(),
                active_thread_count: 1,
                flow_files_sent: 300,
                bytes_sent: 300 * 4096,
                flow_files_received: 42,
                bytes_received: 42 * 4096,
                parent_process_group_name: String::new(),
            },
        )],
        ..Default::default()
    };
    let publish = ProcessGroupStatusSnapshot {
        id: "pg-publish".to_string(),
        name: "Publish".to_string(),
        processor_status_snapshots: vec![processor(
            "proc-put",
            "pg-publish",
            "PutFile",
            "PutFile",
            64,
        )],
        output_port_status_snapshots: vec![port("out-publish", "pg-publish", "to archive", 256)],
        ..Default::default()
    };
    ProcessGroupStatusSnapshot {
        id: "root".to_string(),
        name: "NiFi Flow".to_string(),
        active_thread_count: 3,
        flow_files_in: 480,
        bytes_in: 480 * 2048,
        flow_files_queued: 37,
        bytes_queued: 37 * 2048,
        flow_files_out: 256,
        bytes_out: 256 * 2048,
        processor_status_snapshots: vec![
            processor("proc-generate", "root", "GenerateFlowFile", "GenerateFlowFile", 240),
            processor("proc-log", "root", "LogAttribute", "LogAttribute", 240),
        ],
        connection_status_snapshots: vec![connection(
            "conn-1",
            "root",
            "GenerateFlowFile",
            "LogAttribute",
            37,
        )],
        process_group_status_snapshots: vec![
            entity("pg-ingest", ingest),
            entity("pg-publish", publish),
        ],
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn summary(api: &SimulatedConsoleApi, recursive: bool) -> ProcessGroupStatusSnapshot {
        let response = tokio_block_on(api.execute(ApiRequest::LoadSummaryListing { recursive }));
        match response {
            Ok(ApiResponse::SummaryListing(response)) => {
                response.process_group_status.aggregate_snapshot
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    fn tokio_block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .expect("runtime")
            .block_on(future)
    }

    fn task_response(outcome: Result<ApiResponse, ApiError>) -> ReportingTaskEntity {
        match outcome {
            Ok(ApiResponse::ReportingTask(response)) => response.reporting_task,
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn flat_summary_drops_nested_contents() {
        let api = SimulatedConsoleApi::demo("admin");
        let flat = summary(&api, false);
        let nested = summary(&api, true);

        assert_eq!(flat.process_group_status_snapshots.len(), 2);
        assert!(flat.process_group_status_snapshots[0]
            .snapshot
            .remote_process_group_status_snapshots
            .is_empty());
        assert_eq!(
            nested.process_group_status_snapshots[0]
                .snapshot
                .remote_process_group_status_snapshots[0]
                .id,
            "rpg-1"
        );
    }

    #[tokio::test]
    async fn reporting_task_lifecycle_bumps_revision() {
        let api = SimulatedConsoleApi::demo("admin");
        let created = task_response(
            api.execute(ApiRequest::CreateReportingTask {
                request: CreateReportingTaskRequest {
                    reporting_task_type: "org.apache.nifi.controller.MonitorDiskUsage"
                        .to_string(),
                    reporting_task_bundle: None,
                },
            })
            .await,
        );
        assert_eq!(created.id, "rt-1");
        assert_eq!(created.component.name, "MonitorDiskUsage");
        assert_eq!(created.component.state, ScheduledState::Stopped);

        let started = task_response(
            api.execute(ApiRequest::StartReportingTask {
                reporting_task: created.clone(),
            })
            .await,
        );
        assert_eq!(started.component.state, ScheduledState::Running);
        assert_eq!(started.revision.version, created.revision.version + 1);

        let stale = api
            .execute(ApiRequest::StopReportingTask {
                reporting_task: created,
            })
            .await;
        assert!(matches!(stale, Err(ApiError::Rejected(_))));

        let running_delete = api
            .execute(ApiRequest::DeleteReportingTask {
                reporting_task: started.clone(),
            })
            .await;
        assert!(matches!(running_delete, Err(ApiError::Rejected(_))));

        let stopped = task_response(
            api.execute(ApiRequest::StopReportingTask {
                reporting_task: started,
            })
            .await,
        );
        let deleted = task_response(
            api.execute(ApiRequest::DeleteReportingTask {
                reporting_task: stopped.clone(),
            })
            .await,
        );
        assert_eq!(deleted.id, stopped.id);
    }

    #[tokio::test]
    async fn unknown_type_and_missing_component_are_rejected() {
        let api = SimulatedConsoleApi::demo("admin");
        let created = api
            .execute(ApiRequest::CreateReportingTask {
                request: CreateReportingTaskRequest {
                    reporting_task_type: "org.example.Nope".to_string(),
                    reporting_task_bundle: None,
                },
            })
            .await;
        assert!(matches!(created, Err(ApiError::Rejected(_))));

        let history = api
            .execute(ApiRequest::GetStatusHistory {
                request: StatusHistoryRequest {
                    source: "summary".to_string(),
                    component_type: ComponentType::RemoteProcessGroup,
                    component_id: "rpg-404".to_string(),
                },
            })
            .await;
        assert_eq!(
            history.expect_err("missing").to_string(),
            "RemoteProcessGroup with id rpg-404 not found"
        );
    }

    #[tokio::test]
    async fn status_history_echoes_request_for_nested_component() {
        let api = SimulatedConsoleApi::demo("admin");
        let request = StatusHistoryRequest {
            source: "summary".to_string(),
            component_type: ComponentType::RemoteProcessGroup,
            component_id: "rpg-1".to_string(),
        };
        match api
            .execute(ApiRequest::GetStatusHistory {
                request: request.clone(),
            })
            .await
        {
            Ok(ApiResponse::StatusHistory(response)) => {
                assert_eq!(response.request, request);
                assert_eq!(
                    response.status_history.component_details.get("Name").map(String::as_str),
                    Some("Edge Cluster")
                );
                assert_eq!(
                    response.status_history.aggregate_snapshots.len(),
                    HISTORY_POINTS as usize
                );
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn injected_failure_applies_until_cleared() {
        let api = SimulatedConsoleApi::demo("admin");
        api.fail(
            "load-current-user",
            ApiError::Unavailable("identity provider offline".to_string()),
        );
        assert!(api.execute(ApiRequest::LoadCurrentUser).await.is_err());
        api.clear_failure("load-current-user");
        match api.execute(ApiRequest::LoadCurrentUser).await {
            Ok(ApiResponse::CurrentUser(user)) => assert_eq!(user.identity, "admin"),
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn nodewise_diagnostics_include_nodes() {
        let api = SimulatedConsoleApi::new();
        match api
            .execute(ApiRequest::GetSystemDiagnostics {
                request: SystemDiagnosticsRequest { nodewise: true },
            })
            .await
        {
            Ok(ApiResponse::SystemDiagnostics(response)) => {
                assert_eq!(response.system_diagnostics.node_snapshots.len(), 2);
                assert!(response.system_diagnostics.aggregate_snapshot.heap_utilization() > 0.0);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }
}
