use super::*;
use crate::state::ComponentType;
use crate::state::SummaryListingState;
use pretty_assertions::assert_eq;

fn load(state: &mut ConsoleState, stats_last_refreshed: &str, rpg_ids: &[&str]) {
    run_quiet(
        state,
        SummaryListingAction::LoadSummaryListingSuccess {
            response: summary_response(stats_last_refreshed, rpg_ids),
        },
    );
}

#[test]
fn load_sets_loading_and_remembers_recursive_flag() {
    let mut state = state();
    let effects = run(
        &mut state,
        SummaryListingAction::LoadSummaryListing { recursive: true },
    );
    assert!(state.summary_listing.recursive);
    assert_eq!(state.summary_listing.status, LoadStatus::Loading);
    assert_eq!(
        effects,
        vec![ConsoleEffect::Api(ApiRequest::LoadSummaryListing {
            recursive: true
        })]
    );
}

#[test]
fn success_flattens_nested_groups() {
    let mut state = state();
    load(&mut state, "10:00:00 UTC", &["rpg-1", "rpg-2"]);
    let listing = &state.summary_listing;

    let groups: Vec<&str> = listing
        .process_group_status_snapshots
        .iter()
        .map(|entity| entity.id.as_str())
        .collect();
    assert_eq!(groups, vec!["root", "child"]);

    let rpgs: Vec<(&str, &str)> = listing
        .remote_process_group_status_snapshots
        .iter()
        .map(|entity| {
            (
                entity.id.as_str(),
                entity.snapshot.parent_process_group_name.as_str(),
            )
        })
        .collect();
    assert_eq!(rpgs, vec![("rpg-1", "child"), ("rpg-2", "child")]);

    assert_eq!(listing.processor_status_snapshots.len(), 1);
    assert_eq!(
        listing.processor_status_snapshots[0]
            .snapshot
            .parent_process_group_name,
        "root"
    );
    assert_eq!(listing.status, LoadStatus::Success);
    assert_eq!(listing.error, None);
    assert_eq!(
        listing.process_group_status.as_ref().map(|pg| pg.id.as_str()),
        Some("root")
    );
}

#[test]
fn success_sets_loaded_timestamp_and_exposes_rpg() {
    let mut state = state();
    state.router.current = ConsoleRoute::summary_history(SummaryTab::RemoteProcessGroups, "rpg-1");
    load(&mut state, "14:02:33 UTC", &["rpg-1"]);

    assert_eq!(state.summary_listing.loaded_timestamp, "14:02:33 UTC");
    assert!(crate::selectors::select_component_status_present(
        &state,
        ComponentType::RemoteProcessGroup,
        "rpg-1"
    ));
    assert_eq!(
        crate::selectors::select_view_status_history(&state, SummaryTab::RemoteProcessGroups),
        Some("rpg-1")
    );
}

#[test]
fn reload_replaces_lists_exactly() {
    let mut state = state();
    load(&mut state, "10:00:00 UTC", &["rpg-1", "rpg-2"]);
    load(&mut state, "10:00:30 UTC", &["rpg-3"]);

    let rpgs: Vec<&str> = state
        .summary_listing
        .remote_process_group_status_snapshots
        .iter()
        .map(|entity| entity.id.as_str())
        .collect();
    assert_eq!(rpgs, vec!["rpg-3"]);
    assert_eq!(state.summary_listing.process_group_status_snapshots.len(), 2);
    assert_eq!(state.summary_listing.loaded_timestamp, "10:00:30 UTC");
}

#[test]
fn error_keeps_previous_listing() {
    let mut state = state();
    load(&mut state, "10:00:00 UTC", &["rpg-1"]);
    let before = state.summary_listing.clone();

    run_quiet(
        &mut state,
        SummaryListingAction::SummaryListingApiError {
            error: "timeout".to_string(),
        },
    );
    let listing = &state.summary_listing;
    assert_eq!(listing.status, LoadStatus::Error);
    assert_eq!(listing.error.as_deref(), Some("timeout"));
    assert_eq!(
        listing.remote_process_group_status_snapshots,
        before.remote_process_group_status_snapshots
    );
    assert_eq!(listing.loaded_timestamp, before.loaded_timestamp);

    run_quiet(&mut state, SummaryListingAction::ClearSummaryListingApiError);
    assert_eq!(state.summary_listing.status, LoadStatus::Pending);
    assert_eq!(state.summary_listing.error, None);
}

#[test]
fn reset_restores_initial_slice() {
    let mut state = state();
    load(&mut state, "10:00:00 UTC", &["rpg-1"]);
    run_quiet(&mut state, SummaryListingAction::ResetSummaryState);
    assert_eq!(state.summary_listing, SummaryListingState::default());
    assert_eq!(state.summary_listing.loaded_timestamp, "");
}

#[test]
fn select_and_history_intents_target_matching_routes() {
    let cases = vec![
        (
            SummaryListingAction::SelectProcessorStatus {
                request: SelectStatusRequest {
                    id: "p1".to_string(),
                },
            },
            ConsoleRoute::summary_selected(SummaryTab::Processors, "p1"),
        ),
        (
            SummaryListingAction::SelectInputPortStatus {
                request: SelectStatusRequest {
                    id: "in".to_string(),
                },
            },
            ConsoleRoute::summary_selected(SummaryTab::InputPorts, "in"),
        ),
        (
            SummaryListingAction::SelectOutputPortStatus {
                request: SelectStatusRequest {
                    id: "out".to_string(),
                },
            },
            ConsoleRoute::summary_selected(SummaryTab::OutputPorts, "out"),
        ),
        (
            SummaryListingAction::NavigateToViewConnectionStatusHistory {
                id: "c1".to_string(),
            },
            ConsoleRoute::summary_history(SummaryTab::Connections, "c1"),
        ),
        (
            SummaryListingAction::NavigateToViewProcessGroupStatusHistory {
                id: "child".to_string(),
            },
            ConsoleRoute::summary_history(SummaryTab::ProcessGroups, "child"),
        ),
        (
            SummaryListingAction::NavigateToViewRemoteProcessGroupStatusHistory {
                id: "rpg-1".to_string(),
            },
            ConsoleRoute::summary_history(SummaryTab::RemoteProcessGroups, "rpg-1"),
        ),
    ];

    for (action, route) in cases {
        let mut state = state();
        let effects = run(&mut state, action);
        assert_eq!(effects, vec![ConsoleEffect::Navigate(route)]);
    }
}
