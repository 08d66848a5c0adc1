//! Read-only projections over [`ConsoleState`]. Views render these and never
//! reach into slices directly.

use super::state::ComponentType;
use super::state::ConsoleRoute;
use super::state::ConsoleState;
use super::state::CurrentUser;
use super::state::LoadStatus;
use super::state::ReportingTaskEntity;
use super::state::SettingsTab;
use super::state::SummaryTab;

pub fn select_current_user(state: &ConsoleState) -> &CurrentUser {
    &state.current_user.user
}

pub fn select_current_user_loaded(state: &ConsoleState) -> bool {
    state.current_user.status == LoadStatus::Success
}

/// The current-user request has finished, successfully or not.
pub fn select_current_user_settled(state: &ConsoleState) -> bool {
    matches!(
        state.current_user.status,
        LoadStatus::Success | LoadStatus::Error
    )
}

pub fn select_summary_listing_status(state: &ConsoleState) -> LoadStatus {
    state.summary_listing.status
}

pub fn select_summary_listing_loaded_timestamp(state: &ConsoleState) -> &str {
    &state.summary_listing.loaded_timestamp
}

/// Whether the summary listing currently holds a status entry for `id`.
pub fn select_component_status_present(
    state: &ConsoleState,
    component_type: ComponentType,
    id: &str,
) -> bool {
    let listing = &state.summary_listing;
    match component_type {
        ComponentType::Processor => listing
            .processor_status_snapshots
            .iter()
            .any(|entity| entity.id == id),
        ComponentType::ProcessGroup => listing
            .process_group_status_snapshots
            .iter()
            .any(|entity| entity.id == id),
        ComponentType::InputPort => listing
            .input_port_status_snapshots
            .iter()
            .any(|entity| entity.id == id),
        ComponentType::OutputPort => listing
            .output_port_status_snapshots
            .iter()
            .any(|entity| entity.id == id),
        ComponentType::Connection => listing
            .connection_status_snapshots
            .iter()
            .any(|entity| entity.id == id),
        ComponentType::RemoteProcessGroup => listing
            .remote_process_group_status_snapshots
            .iter()
            .any(|entity| entity.id == id),
        _ => false,
    }
}

pub fn select_component_id_from_route(state: &ConsoleState, tab: SummaryTab) -> Option<&str> {
    match &state.router.current {
        ConsoleRoute::Summary {
            tab: current,
            selected_id: Some(id),
            ..
        } if *current == tab => Some(id.as_str()),
        _ => None,
    }
}

/// Id whose status history the current route asks for, if any.
pub fn select_view_status_history(state: &ConsoleState, tab: SummaryTab) -> Option<&str> {
    match &state.router.current {
        ConsoleRoute::Summary {
            tab: current,
            selected_id: Some(id),
            view_history: true,
        } if *current == tab && !id.is_empty() => Some(id.as_str()),
        _ => None,
    }
}

pub fn select_reporting_tasks(state: &ConsoleState) -> &[ReportingTaskEntity] {
    &state.reporting_tasks.reporting_tasks
}

pub fn select_reporting_task_id_from_route(state: &ConsoleState) -> Option<&str> {
    match &state.router.current {
        ConsoleRoute::Settings {
            tab: SettingsTab::ReportingTasks,
            selected_id: Some(id),
        } => Some(id.as_str()),
        _ => None,
    }
}

pub fn select_reporting_task<'a>(
    state: &'a ConsoleState,
    id: &str,
) -> Option<&'a ReportingTaskEntity> {
    state
        .reporting_tasks
        .reporting_tasks
        .iter()
        .find(|task| task.id == id)
}

/// One rendered line of a summary table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRow {
    pub id: String,
    pub name: String,
    pub group: String,
    pub state: String,
    pub threads: u32,
    pub columns: Vec<(&'static str, String)>,
}

pub fn status_rows(state: &ConsoleState, tab: SummaryTab) -> Vec<StatusRow> {
    let listing = &state.summary_listing;
    match tab {
        SummaryTab::Processors => listing
            .processor_status_snapshots
            .iter()
            .map(|entity| {
                let s = &entity.snapshot;
                StatusRow {
                    id: entity.id.clone(),
                    name: s.name.clone(),
                    group: s.parent_process_group_name.clone(),
                    state: s.run_status.clone(),
                    threads: s.active_thread_count,
                    columns: vec![
                        ("Type", s.processor_type.clone()),
                        ("In", format_count_and_bytes(s.flow_files_in, s.bytes_in)),
                        ("Read/Write", format!(
                            "{} / {}",
                            format_bytes(s.bytes_read),
                            format_bytes(s.bytes_written)
                        )),
                        ("Out", format_count_and_bytes(s.flow_files_out, s.bytes_out)),
                        ("Tasks", s.task_count.to_string()),
                    ],
                }
            })
            .collect(),
        SummaryTab::InputPorts | SummaryTab::OutputPorts => {
            let ports = if tab == SummaryTab::InputPorts {
                &listing.input_port_status_snapshots
            } else {
                &listing.output_port_status_snapshots
            };
            ports
                .iter()
                .map(|entity| {
                    let s = &entity.snapshot;
                    StatusRow {
                        id: entity.id.clone(),
                        name: s.name.clone(),
                        group: s.parent_process_group_name.clone(),
                        state: s.run_status.clone(),
                        threads: s.active_thread_count,
                        columns: vec![
                            ("In", format_count_and_bytes(s.flow_files_in, s.bytes_in)),
                            ("Out", format_count_and_bytes(s.flow_files_out, s.bytes_out)),
                        ],
                    }
                })
                .collect()
        }
        SummaryTab::RemoteProcessGroups => listing
            .remote_process_group_status_snapshots
            .iter()
            .map(|entity| {
                let s = &entity.snapshot;
                StatusRow {
                    id: entity.id.clone(),
                    name: s.name.clone(),
                    group: s.parent_process_group_name.clone(),
                    state: s.transmission_status.clone(),
                    threads: s.active_thread_count,
                    columns: vec![
                        ("Target URI", s.target_uri.clone()),
                        ("Sent", format_count_and_bytes(s.flow_files_sent, s.bytes_sent)),
                        (
                            "Received",
                            format_count_and_bytes(s.flow_files_received, s.bytes_received),
                        ),
                    ],
                }
            })
            .collect(),
        SummaryTab::Connections => listing
            .connection_status_snapshots
            .iter()
            .map(|entity| {
                let s = &entity.snapshot;
                StatusRow {
                    id: entity.id.clone(),
                    name: if s.name.is_empty() {
                        format!("{} -> {}", s.source_name, s.destination_name)
                    } else {
                        s.name.clone()
                    },
                    group: s.parent_process_group_name.clone(),
                    state: s
                        .percent_use_count
                        .map_or_else(|| "-".to_string(), |pct| format!("{pct}%")),
                    threads: 0,
                    columns: vec![
                        ("In", format_count_and_bytes(s.flow_files_in, s.bytes_in)),
                        (
                            "Queue",
                            format_count_and_bytes(s.flow_files_queued, s.bytes_queued),
                        ),
                        ("Out", format_count_and_bytes(s.flow_files_out, s.bytes_out)),
                    ],
                }
            })
            .collect(),
        SummaryTab::ProcessGroups => listing
            .process_group_status_snapshots
            .iter()
            .map(|entity| {
                let s = &entity.snapshot;
                StatusRow {
                    id: entity.id.clone(),
                    name: s.name.clone(),
                    group: String::new(),
                    state: String::new(),
                    threads: s.active_thread_count,
                    columns: vec![
                        ("In", format_count_and_bytes(s.flow_files_in, s.bytes_in)),
                        (
                            "Queue",
                            format_count_and_bytes(s.flow_files_queued, s.bytes_queued),
                        ),
                        ("Out", format_count_and_bytes(s.flow_files_out, s.bytes_out)),
                    ],
                }
            })
            .collect(),
    }
}

pub fn format_count_and_bytes(count: u64, bytes: u64) -> String {
    format!("{} ({})", count, format_bytes(bytes))
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["KB", "MB", "GB", "TB", "PB"];
    if bytes < 1024 {
        return format!("{bytes} bytes");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn format_bytes_scales_units() {
        assert_eq!(format_bytes(0), "0 bytes");
        assert_eq!(format_bytes(1023), "1023 bytes");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1536 * 1024), "1.50 MB");
        assert_eq!(format_count_and_bytes(3, 2048), "3 (2.00 KB)");
    }

    #[test]
    fn view_status_history_requires_history_route_for_same_tab() {
        let mut state = ConsoleState::new();
        state.router.current = ConsoleRoute::summary_selected(SummaryTab::RemoteProcessGroups, "a");
        assert_eq!(
            select_view_status_history(&state, SummaryTab::RemoteProcessGroups),
            None
        );
        assert_eq!(
            select_component_id_from_route(&state, SummaryTab::RemoteProcessGroups),
            Some("a")
        );

        state.router.current = ConsoleRoute::summary_history(SummaryTab::RemoteProcessGroups, "a");
        assert_eq!(
            select_view_status_history(&state, SummaryTab::RemoteProcessGroups),
            Some("a")
        );
        assert_eq!(select_view_status_history(&state, SummaryTab::Processors), None);
    }

    #[test]
    fn current_user_settles_on_success_or_error() {
        let mut state = ConsoleState::new();
        assert!(!select_current_user_settled(&state));
        state.current_user.status = LoadStatus::Loading;
        assert!(!select_current_user_settled(&state));
        assert!(!select_current_user_loaded(&state));

        state.current_user.status = LoadStatus::Error;
        assert!(select_current_user_settled(&state));
        assert!(!select_current_user_loaded(&state));

        state.current_user.status = LoadStatus::Success;
        assert!(select_current_user_settled(&state));
        assert!(select_current_user_loaded(&state));
    }

    #[test]
    fn reporting_task_id_comes_from_settings_route() {
        let mut state = ConsoleState::new();
        assert_eq!(select_reporting_task_id_from_route(&state), None);
        state.router.current =
            ConsoleRoute::settings(SettingsTab::ReportingTasks, Some("rt-1".to_string()));
        assert_eq!(select_reporting_task_id_from_route(&state), Some("rt-1"));
    }
}
