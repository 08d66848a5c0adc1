use flowconsole_core::selectors::select_reporting_task;
use flowconsole_core::selectors::select_reporting_task_id_from_route;
use flowconsole_core::selectors::select_reporting_tasks;
use flowconsole_core::Bundle;
use flowconsole_core::CreateReportingTaskRequest;
use flowconsole_core::DocumentedType;
use flowconsole_core::LoadStatus;
use flowconsole_core::OverlayAction;
use flowconsole_core::ReportingTaskEntity;
use flowconsole_core::ReportingTaskRequest;
use flowconsole_core::ReportingTasksAction;
use flowconsole_core::SelectReportingTaskRequest;

use crate::store::Store;

/// Settings page listing reporting tasks. Dropping the view resets the
/// reporting-task slice.
pub struct ReportingTasksView {
    store: Store,
}

impl ReportingTasksView {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn tasks(&self) -> Vec<ReportingTaskEntity> {
        self.store.select(|state| select_reporting_tasks(state).to_vec())
    }

    pub fn status(&self) -> LoadStatus {
        self.store.select(|state| state.reporting_tasks.status)
    }

    pub fn error(&self) -> Option<String> {
        self.store.select(|state| state.reporting_tasks.error.clone())
    }

    pub fn saving(&self) -> bool {
        self.store.select(|state| state.reporting_tasks.saving)
    }

    pub fn loaded_timestamp(&self) -> String {
        self.store
            .select(|state| state.reporting_tasks.loaded_timestamp.clone())
    }

    pub fn is_initial_loading(&self) -> bool {
        self.store
            .select(|state| state.reporting_tasks.loaded_timestamp.is_empty())
    }

    pub fn selected_id(&self) -> Option<String> {
        self.store
            .select(|state| select_reporting_task_id_from_route(state).map(str::to_string))
    }

    pub fn selected(&self) -> Option<ReportingTaskEntity> {
        self.store.select(|state| {
            select_reporting_task_id_from_route(state)
                .and_then(|id| select_reporting_task(state, id))
                .cloned()
        })
    }

    /// Types offered by the new-task dialog.
    pub fn available_types(&self) -> Vec<DocumentedType> {
        self.store
            .select(|state| state.extension_types.reporting_task_types.clone())
    }

    pub fn load(&self) {
        self.store.dispatch(ReportingTasksAction::LoadReportingTasks);
    }

    pub fn open_new_dialog(&self) {
        self.store
            .dispatch(ReportingTasksAction::OpenNewReportingTaskDialog);
    }

    pub fn create(&self, reporting_task_type: &str, reporting_task_bundle: Option<Bundle>) {
        self.store.dispatch(ReportingTasksAction::CreateReportingTask {
            request: CreateReportingTaskRequest {
                reporting_task_type: reporting_task_type.to_string(),
                reporting_task_bundle,
            },
        });
    }

    pub fn start(&self, reporting_task: &ReportingTaskEntity) {
        self.store.dispatch(ReportingTasksAction::StartReportingTask {
            request: request(reporting_task),
        });
    }

    pub fn stop(&self, reporting_task: &ReportingTaskEntity) {
        self.store.dispatch(ReportingTasksAction::StopReportingTask {
            request: request(reporting_task),
        });
    }

    pub fn prompt_deletion(&self, reporting_task: &ReportingTaskEntity) {
        self.store
            .dispatch(ReportingTasksAction::PromptReportingTaskDeletion {
                request: request(reporting_task),
            });
    }

    pub fn delete(&self, reporting_task: &ReportingTaskEntity) {
        self.store.dispatch(ReportingTasksAction::DeleteReportingTask {
            request: request(reporting_task),
        });
    }

    pub fn select(&self, id: &str) {
        self.store.dispatch(ReportingTasksAction::SelectReportingTask {
            request: SelectReportingTaskRequest { id: id.to_string() },
        });
    }

    pub fn close_dialog(&self) {
        self.store.dispatch(OverlayAction::Close);
    }
}

impl Drop for ReportingTasksView {
    fn drop(&mut self) {
        self.store
            .dispatch(ReportingTasksAction::ResetReportingTasksState);
    }
}

fn request(reporting_task: &ReportingTaskEntity) -> ReportingTaskRequest {
    ReportingTaskRequest {
        reporting_task: reporting_task.clone(),
    }
}
