use pretty_assertions::assert_eq;

pub(super) use super::reduce;
pub(super) use super::ApiRequest;
pub(super) use super::ConsoleEffect;
pub(super) use crate::actions::ConsoleAction;
pub(super) use crate::actions::ExtensionTypesAction;
pub(super) use crate::actions::LoadReportingTasksResponse;
pub(super) use crate::actions::ReportingTaskRequest;
pub(super) use crate::actions::ReportingTaskResponse;
pub(super) use crate::actions::ReportingTasksAction;
pub(super) use crate::actions::SelectStatusRequest;
pub(super) use crate::actions::SummaryListingAction;
pub(super) use crate::actions::SummaryListingResponse;
pub(super) use crate::state::ConsoleOverlay;
pub(super) use crate::state::ConsoleRoute;
pub(super) use crate::state::ConsoleState;
pub(super) use crate::state::LoadStatus;
pub(super) use crate::state::Permissions;
pub(super) use crate::state::ProcessGroupStatus;
pub(super) use crate::state::ProcessGroupStatusSnapshot;
pub(super) use crate::state::ProcessorStatusSnapshot;
pub(super) use crate::state::RemoteProcessGroupStatusSnapshot;
pub(super) use crate::state::ReportingTask;
pub(super) use crate::state::ReportingTaskEntity;
pub(super) use crate::state::Revision;
pub(super) use crate::state::ScheduledState;
pub(super) use crate::state::SettingsTab;
pub(super) use crate::state::StatusSnapshotEntity;
pub(super) use crate::state::SummaryTab;

mod extension_types;
mod summary_listing;

fn state() -> ConsoleState {
    ConsoleState::new()
}

fn run(state: &mut ConsoleState, action: impl Into<ConsoleAction>) -> Vec<ConsoleEffect> {
    reduce(state, action.into())
}

fn run_quiet(state: &mut ConsoleState, action: impl Into<ConsoleAction>) {
    let effects = reduce(state, action.into());
    assert_eq!(effects, Vec::new());
}

fn reporting_task(id: &str, scheduled: ScheduledState) -> ReportingTaskEntity {
    ReportingTaskEntity {
        id: id.to_string(),
        revision: Revision::default(),
        permissions: Permissions::READ_WRITE,
        active_thread_count: 0,
        component: ReportingTask {
            id: id.to_string(),
            name: format!("task {id}"),
            task_type: "org.example.reporting.SiteToSiteStatusReportingTask".to_string(),
            bundle: None,
            state: scheduled,
            scheduling_period: "5 mins".to_string(),
            comments: String::new(),
            validation_errors: Vec::new(),
        },
    }
}

fn rpg(id: &str, group: &str) -> StatusSnapshotEntity<RemoteProcessGroupStatusSnapshot> {
    StatusSnapshotEntity {
        id: id.to_string(),
        can_read: true,
        snapshot: RemoteProcessGroupStatusSnapshot {
            id: id.to_string(),
            group_id: group.to_string(),
            name: format!("rpg {id}"),
            target_uri: "https://remote:8443/flow".to_string(),
            transmission_status: "Transmitting".to_string(),
            parent_process_group_name: group.to_string(),
            ..Default::default()
        },
    }
}

fn processor(id: &str, group: &str) -> StatusSnapshotEntity<ProcessorStatusSnapshot> {
    StatusSnapshotEntity {
        id: id.to_string(),
        can_read: true,
        snapshot: ProcessorStatusSnapshot {
            id: id.to_string(),
            group_id: group.to_string(),
            name: format!("processor {id}"),
            processor_type: "GenerateFlowFile".to_string(),
            run_status: "Running".to_string(),
            parent_process_group_name: group.to_string(),
            ..Default::default()
        },
    }
}

/// Root group `root` holding one processor and a child group `child`
/// that holds the given remote process groups.
fn summary_response(stats_last_refreshed: &str, rpg_ids: &[&str]) -> SummaryListingResponse {
    let child = ProcessGroupStatusSnapshot {
        id: "child".to_string(),
        name: "child".to_string(),
        remote_process_group_status_snapshots: rpg_ids
            .iter()
            .map(|id| rpg(id, "child"))
            .collect(),
        ..Default::default()
    };
    let root = ProcessGroupStatusSnapshot {
        id: "root".to_string(),
        name: "root".to_string(),
        processor_status_snapshots: vec![processor("p1", "root")],
        process_group_status_snapshots: vec![StatusSnapshotEntity {
            id: "child".to_string(),
            can_read: true,
            snapshot: child,
        }],
        ..Default::default()
    };
    SummaryListingResponse {
        process_group_status: ProcessGroupStatus {
            id: "root".to_string(),
            name: "root".to_string(),
            stats_last_refreshed: stats_last_refreshed.to_string(),
            aggregate_snapshot: root,
        },
    }
}
