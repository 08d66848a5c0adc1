use super::*;
use crate::actions::LoadExtensionTypesForCanvasResponse;
use crate::actions::LoadExtensionTypesForSettingsResponse;
use crate::state::DocumentedType;
use pretty_assertions::assert_eq;

fn documented(type_name: &str) -> DocumentedType {
    DocumentedType {
        type_name: type_name.to_string(),
        bundle: None,
        description: None,
        restricted: false,
        tags: Vec::new(),
    }
}

fn settings_response() -> LoadExtensionTypesForSettingsResponse {
    LoadExtensionTypesForSettingsResponse {
        controller_service_types: vec![documented("StandardSSLContextService")],
        reporting_task_types: vec![
            documented("SiteToSiteStatusReportingTask"),
            documented("ScriptedReportingTask"),
        ],
        registry_client_types: vec![documented("NifiRegistryFlowRegistryClient")],
        parameter_provider_types: Vec::new(),
        flow_analysis_rule_types: vec![documented("DisallowComponentType")],
    }
}

#[test]
fn canvas_load_sets_loading_then_success_replaces_canvas_lists() {
    let mut state = state();
    let effects = run(&mut state, ExtensionTypesAction::LoadExtensionTypesForCanvas);
    assert_eq!(state.extension_types.status, LoadStatus::Loading);
    assert_eq!(
        effects,
        vec![ConsoleEffect::Api(ApiRequest::LoadExtensionTypesForCanvas)]
    );

    run_quiet(
        &mut state,
        ExtensionTypesAction::LoadExtensionTypesForCanvasSuccess {
            response: LoadExtensionTypesForCanvasResponse {
                processor_types: vec![documented("GenerateFlowFile")],
                controller_service_types: vec![documented("DBCPConnectionPool")],
                prioritizers: vec![documented("FirstInFirstOutPrioritizer")],
            },
        },
    );
    let ext = &state.extension_types;
    assert_eq!(ext.status, LoadStatus::Success);
    assert_eq!(ext.processor_types, vec![documented("GenerateFlowFile")]);
    assert_eq!(ext.prioritizer_types, vec![documented("FirstInFirstOutPrioritizer")]);
    assert!(ext.reporting_task_types.is_empty());
}

#[test]
fn settings_success_replaces_only_settings_lists() {
    let mut state = state();
    state.extension_types.processor_types = vec![documented("GenerateFlowFile")];
    state.extension_types.prioritizer_types = vec![documented("FirstInFirstOutPrioritizer")];

    run_quiet(
        &mut state,
        ExtensionTypesAction::LoadExtensionTypesForSettingsSuccess {
            response: settings_response(),
        },
    );
    let ext = &state.extension_types;
    assert_eq!(ext.reporting_task_types.len(), 2);
    assert_eq!(ext.controller_service_types, vec![documented("StandardSSLContextService")]);
    assert_eq!(ext.processor_types, vec![documented("GenerateFlowFile")]);
    assert_eq!(ext.prioritizer_types, vec![documented("FirstInFirstOutPrioritizer")]);
    assert_eq!(ext.status, LoadStatus::Success);
}

#[test]
fn error_keeps_loaded_types_and_clear_resets_to_pending() {
    let mut state = state();
    run_quiet(
        &mut state,
        ExtensionTypesAction::LoadExtensionTypesForSettingsSuccess {
            response: settings_response(),
        },
    );
    run_quiet(
        &mut state,
        ExtensionTypesAction::ExtensionTypesApiError {
            error: "forbidden".to_string(),
        },
    );
    assert_eq!(state.extension_types.reporting_task_types.len(), 2);
    assert_eq!(state.extension_types.error.as_deref(), Some("forbidden"));
    assert_eq!(state.extension_types.status, LoadStatus::Error);

    run_quiet(&mut state, ExtensionTypesAction::ClearExtensionTypesApiError);
    assert_eq!(state.extension_types.error, None);
    assert_eq!(state.extension_types.status, LoadStatus::Pending);
    assert_eq!(state.extension_types.reporting_task_types.len(), 2);
}
