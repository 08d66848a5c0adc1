use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, Clear, Gauge, List, ListItem, ListState, Paragraph, Row, Sparkline,
    Table, TableState, Tabs, Wrap,
};
use ratatui::Terminal;

use flowconsole_core::selectors::format_bytes;
use flowconsole_core::selectors::status_rows;
use flowconsole_core::selectors::StatusRow;
use flowconsole_core::ConsoleOverlay;
use flowconsole_core::ConsoleRoute;
use flowconsole_core::ConsoleState;
use flowconsole_core::LoadStatus;
use flowconsole_core::ReportingTaskEntity;
use flowconsole_core::RouterAction;
use flowconsole_core::ScheduledState;
use flowconsole_core::SettingsTab;
use flowconsole_core::SummaryTab;
use flowconsole_runtime::Console;
use flowconsole_runtime::ReportingTasksView;
use flowconsole_runtime::StatusListing;

struct TuiGuard;

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
    }
}

/// Runs the terminal console until the user quits. Must be called from a
/// thread that has entered the Tokio runtime.
pub fn run(console: Console) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, crossterm::cursor::Hide)?;
    let _guard = TuiGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(console);
    run_app(&mut terminal, &mut app)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Summary(SummaryTab),
    ReportingTasks,
}

impl Page {
    const COUNT: usize = SummaryTab::ALL.len() + 1;

    fn index(self) -> usize {
        match self {
            Page::Summary(tab) => SummaryTab::ALL
                .iter()
                .position(|candidate| *candidate == tab)
                .unwrap_or(0),
            Page::ReportingTasks => SummaryTab::ALL.len(),
        }
    }

    fn from_index(index: usize) -> Self {
        SummaryTab::ALL
            .get(index % Self::COUNT)
            .map_or(Page::ReportingTasks, |tab| Page::Summary(*tab))
    }

    fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    fn prev(self) -> Self {
        Self::from_index(self.index() + Self::COUNT - 1)
    }

    fn title(self) -> &'static str {
        match self {
            Page::Summary(tab) => tab.label(),
            Page::ReportingTasks => "Reporting Tasks",
        }
    }

    fn route(self) -> ConsoleRoute {
        match self {
            Page::Summary(tab) => ConsoleRoute::summary(tab),
            Page::ReportingTasks => ConsoleRoute::settings(SettingsTab::ReportingTasks, None),
        }
    }
}

struct App {
    console: Console,
    page: Page,
    listing: Option<StatusListing>,
    tasks: Option<ReportingTasksView>,
    table: TableState,
    types: ListState,
    metric: usize,
}

impl App {
    fn new(console: Console) -> Self {
        let mut app = Self {
            console,
            page: Page::Summary(SummaryTab::Processors),
            listing: None,
            tasks: None,
            table: TableState::default(),
            types: ListState::default(),
            metric: 0,
        };
        app.show(app.page);
        app
    }

    /// Replaces the active view. The previous view is dropped first so its
    /// watcher or slice reset runs before the new one starts.
    fn show(&mut self, page: Page) {
        self.listing = None;
        self.tasks = None;
        self.page = page;
        self.table.select(Some(0));
        self.console
            .store()
            .dispatch(RouterAction::Navigate { route: page.route() });
        match page {
            Page::Summary(tab) => {
                self.listing = Some(self.console.status_listing(tab));
            }
            Page::ReportingTasks => {
                let tasks = self.console.reporting_tasks();
                tasks.load();
                self.tasks = Some(tasks);
            }
        }
    }

    fn row_count(&self, state: &ConsoleState) -> usize {
        match self.page {
            Page::Summary(tab) => status_rows(state, tab).len(),
            Page::ReportingTasks => state.reporting_tasks.reporting_tasks.len(),
        }
    }

    fn selected_index(&self) -> usize {
        self.table.selected().unwrap_or(0)
    }

    fn selected_row(&self, state: &ConsoleState) -> Option<StatusRow> {
        let Page::Summary(tab) = self.page else {
            return None;
        };
        status_rows(state, tab).into_iter().nth(self.selected_index())
    }

    fn selected_task(&self, state: &ConsoleState) -> Option<ReportingTaskEntity> {
        state
            .reporting_tasks
            .reporting_tasks
            .get(self.selected_index())
            .cloned()
    }

    fn move_selection(&mut self, state: &ConsoleState, delta: isize) {
        let count = self.row_count(state);
        if count == 0 {
            self.table.select(Some(0));
            return;
        }
        let current = self.selected_index().min(count - 1) as isize;
        let next = (current + delta).clamp(0, count as isize - 1) as usize;
        self.table.select(Some(next));

        if let (Some(listing), Some(row)) = (&self.listing, self.selected_row(state)) {
            listing.select(&row.id);
        }
        if let (Some(tasks), Some(task)) = (&self.tasks, self.selected_task(state)) {
            tasks.select(&task.id);
        }
    }
}

enum KeyHandlerResult {
    Continue,
    Exit,
}

fn handle_status_history_keys(key: event::KeyEvent, app: &mut App) -> KeyHandlerResult {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            if let Some(listing) = &app.listing {
                listing.close_status_history();
            }
            app.metric = 0;
        }
        KeyCode::Right | KeyCode::Char('l') => app.metric = app.metric.saturating_add(1),
        KeyCode::Left | KeyCode::Char('h') => app.metric = app.metric.saturating_sub(1),
        _ => {}
    }
    KeyHandlerResult::Continue
}

fn handle_system_diagnostics_keys(key: event::KeyEvent, app: &mut App) -> KeyHandlerResult {
    if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
        if let Some(listing) = &app.listing {
            listing.close_system_diagnostics();
        }
    }
    KeyHandlerResult::Continue
}

fn handle_new_task_keys(key: event::KeyEvent, app: &mut App, state: &ConsoleState) -> KeyHandlerResult {
    let types = &state.extension_types.reporting_task_types;
    let Some(tasks) = &app.tasks else {
        return KeyHandlerResult::Continue;
    };
    match key.code {
        KeyCode::Esc => tasks.close_dialog(),
        KeyCode::Up => {
            let current = app.types.selected().unwrap_or(0);
            app.types.select(Some(current.saturating_sub(1)));
        }
        KeyCode::Down => {
            let current = app.types.selected().unwrap_or(0);
            let last = types.len().saturating_sub(1);
            app.types.select(Some((current + 1).min(last)));
        }
        KeyCode::Enter => {
            if let Some(chosen) = types.get(app.types.selected().unwrap_or(0)) {
                tasks.create(&chosen.type_name, chosen.bundle.clone());
            }
        }
        _ => {}
    }
    KeyHandlerResult::Continue
}

fn handle_confirm_deletion_keys(
    key: event::KeyEvent,
    app: &mut App,
    state: &ConsoleState,
    id: &str,
) -> KeyHandlerResult {
    let Some(tasks) = &app.tasks else {
        return KeyHandlerResult::Continue;
    };
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            tasks.close_dialog();
            if let Some(task) = state
                .reporting_tasks
                .reporting_tasks
                .iter()
                .find(|task| task.id == id)
            {
                tasks.delete(task);
            }
        }
        KeyCode::Char('n') | KeyCode::Esc => tasks.close_dialog(),
        _ => {}
    }
    KeyHandlerResult::Continue
}

fn handle_global_keys(key: event::KeyEvent, app: &mut App, state: &ConsoleState) -> KeyHandlerResult {
    match key.code {
        KeyCode::Char('q') => return KeyHandlerResult::Exit,
        KeyCode::Tab | KeyCode::Right => app.show(app.page.next()),
        KeyCode::BackTab | KeyCode::Left => app.show(app.page.prev()),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(state, -1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(state, 1),
        KeyCode::Char('r') => {
            if let Some(listing) = &app.listing {
                listing.refresh_summary_listing();
            }
            if let Some(tasks) = &app.tasks {
                tasks.load();
            }
        }
        KeyCode::Char('d') => {
            if let Some(listing) = &app.listing {
                listing.open_system_diagnostics();
            }
        }
        KeyCode::Enter | KeyCode::Char('h') => {
            if let (Some(listing), Some(row)) = (&app.listing, app.selected_row(state)) {
                app.metric = 0;
                listing.view_status_history(&row.id);
            }
        }
        KeyCode::Char('n') => {
            if let Some(tasks) = &app.tasks {
                app.types.select(Some(0));
                tasks.open_new_dialog();
            }
        }
        KeyCode::Char('s') => {
            if let (Some(tasks), Some(task)) = (&app.tasks, app.selected_task(state)) {
                match task.component.state {
                    ScheduledState::Running => tasks.stop(&task),
                    ScheduledState::Stopped => tasks.start(&task),
                    ScheduledState::Disabled => {}
                }
            }
        }
        KeyCode::Char('x') => {
            if let (Some(tasks), Some(task)) = (&app.tasks, app.selected_task(state)) {
                tasks.prompt_deletion(&task);
            }
        }
        _ => {}
    }
    KeyHandlerResult::Continue
}

fn handle_key_event(key: event::KeyEvent, app: &mut App) -> KeyHandlerResult {
    let state = app.console.store().snapshot();
    match &state.overlay {
        ConsoleOverlay::StatusHistory { .. } => handle_status_history_keys(key, app),
        ConsoleOverlay::SystemDiagnostics { .. } => handle_system_diagnostics_keys(key, app),
        ConsoleOverlay::NewReportingTask => handle_new_task_keys(key, app, &state),
        ConsoleOverlay::ConfirmReportingTaskDeletion { id, .. } => {
            handle_confirm_deletion_keys(key, app, &state, id)
        }
        ConsoleOverlay::None => handle_global_keys(key, app, &state),
    }
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        let state = app.console.store().snapshot();
        let count = app.row_count(&state);
        if app.selected_index() >= count && count > 0 {
            app.table.select(Some(count - 1));
        }
        terminal.draw(|f| ui(f, app, &state))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let KeyHandlerResult::Exit = handle_key_event(key, app) {
                    return Ok(());
                }
            }
        }
    }
}

fn ui(f: &mut ratatui::Frame, app: &mut App, state: &ConsoleState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, chunks[0], state);
    render_tabs(f, chunks[1], app.page);
    match app.page {
        Page::Summary(tab) => render_summary(f, chunks[2], app, state, tab),
        Page::ReportingTasks => render_reporting_tasks(f, chunks[2], app, state),
    }
    render_action_bar(f, chunks[3], app.page, state);

    match &state.overlay {
        ConsoleOverlay::None => {}
        ConsoleOverlay::StatusHistory { component_id, .. } => {
            render_status_history(f, state, component_id, app.metric)
        }
        ConsoleOverlay::SystemDiagnostics { .. } => render_system_diagnostics(f, state),
        ConsoleOverlay::NewReportingTask => render_new_task(f, app, state),
        ConsoleOverlay::ConfirmReportingTaskDeletion { name, .. } => {
            render_confirm_deletion(f, name)
        }
    }
}

fn status_style(status: LoadStatus) -> Style {
    match status {
        LoadStatus::Pending => Style::default().fg(Color::DarkGray),
        LoadStatus::Loading => Style::default().fg(Color::Yellow),
        LoadStatus::Success => Style::default().fg(Color::Green),
        LoadStatus::Error => Style::default().fg(Color::Red),
    }
}

fn render_header(f: &mut ratatui::Frame, area: Rect, state: &ConsoleState) {
    let user = &state.current_user;
    let identity = if user.user.identity.is_empty() {
        "…".to_string()
    } else {
        user.user.identity.clone()
    };
    let refreshed = if state.summary_listing.loaded_timestamp.is_empty() {
        "never".to_string()
    } else {
        state.summary_listing.loaded_timestamp.clone()
    };
    let text = Line::from(vec![
        Span::styled(
            "flowconsole ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("user ", Style::default().fg(Color::DarkGray)),
        Span::styled(identity, status_style(user.status)),
        Span::styled("  route ", Style::default().fg(Color::DarkGray)),
        Span::raw(state.router.current.path()),
        Span::styled("  refreshed ", Style::default().fg(Color::DarkGray)),
        Span::raw(refreshed),
    ]);
    let p = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    f.render_widget(p, area);
}

fn render_tabs(f: &mut ratatui::Frame, area: Rect, page: Page) {
    let titles: Vec<Line> = (0..Page::COUNT)
        .map(|index| Line::from(Page::from_index(index).title()))
        .collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .select(page.index())
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

fn render_summary(
    f: &mut ratatui::Frame,
    area: Rect,
    app: &mut App,
    state: &ConsoleState,
    tab: SummaryTab,
) {
    let listing = &state.summary_listing;
    let title = format!(
        "{} ({}) {}",
        tab.label(),
        status_rows(state, tab).len(),
        listing.status.label()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, status_style(listing.status)));

    if listing.loaded_timestamp.is_empty() && listing.status != LoadStatus::Error {
        let p = Paragraph::new("Loading summary…")
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let rows = status_rows(state, tab);
    let extra: Vec<&'static str> = rows
        .first()
        .map(|row| row.columns.iter().map(|(label, _)| *label).collect())
        .unwrap_or_default();

    let mut header = vec!["Name", "Group", "State", "Threads"];
    header.extend(extra.iter().copied());
    let header = Row::new(header.into_iter().map(Cell::from))
        .style(Style::default().add_modifier(Modifier::BOLD));

    let body = rows.into_iter().map(|row| {
        let mut cells = vec![
            Cell::from(row.name),
            Cell::from(row.group),
            Cell::from(row.state),
            Cell::from(row.threads.to_string()),
        ];
        cells.extend(row.columns.into_iter().map(|(_, value)| Cell::from(value)));
        Row::new(cells)
    });

    let mut widths = vec![
        Constraint::Percentage(20),
        Constraint::Percentage(14),
        Constraint::Length(12),
        Constraint::Length(8),
    ];
    widths.extend(extra.iter().map(|_| Constraint::Min(12)));

    let table = Table::new(body, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▸ ");
    f.render_stateful_widget(table, area, &mut app.table);

    if let Some(error) = &listing.error {
        render_error_line(f, area, error);
    }
}

fn render_reporting_tasks(f: &mut ratatui::Frame, area: Rect, app: &mut App, state: &ConsoleState) {
    let slice = &state.reporting_tasks;
    if matches!(state.router.current, ConsoleRoute::Root) && state.router.pending.is_none() {
        let p = Paragraph::new("Not authorized to view controller settings.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Red))
            .block(Block::default().borders(Borders::ALL).title("Reporting Tasks"));
        f.render_widget(p, area);
        return;
    }

    let title = format!(
        "Reporting Tasks ({}) {}{}",
        slice.reporting_tasks.len(),
        slice.status.label(),
        if slice.saving { " saving…" } else { "" }
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, status_style(slice.status)));

    let header = Row::new(["Name", "Type", "State", "Run Schedule", "Revision"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let body = slice.reporting_tasks.iter().map(|task| {
        let state_style = match task.component.state {
            ScheduledState::Running => Style::default().fg(Color::Green),
            ScheduledState::Stopped => Style::default().fg(Color::Red),
            ScheduledState::Disabled => Style::default().fg(Color::DarkGray),
        };
        Row::new(vec![
            Cell::from(task.component.name.clone()),
            Cell::from(short_type(&task.component.task_type).to_string()),
            Cell::from(task.component.state.label()).style(state_style),
            Cell::from(task.component.scheduling_period.clone()),
            Cell::from(task.revision.version.to_string()),
        ])
    });
    let table = Table::new(
        body,
        [
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Length(10),
            Constraint::Length(14),
            Constraint::Length(9),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(Style::default().bg(Color::DarkGray))
    .highlight_symbol("▸ ");
    f.render_stateful_widget(table, area, &mut app.table);

    if let Some(error) = &slice.error {
        render_error_line(f, area, error);
    }
}

fn short_type(type_name: &str) -> &str {
    type_name.rsplit('.').next().unwrap_or(type_name)
}

fn render_error_line(f: &mut ratatui::Frame, area: Rect, error: &str) {
    if area.height < 3 {
        return;
    }
    let line = Rect {
        x: area.x + 1,
        y: area.y + area.height - 2,
        width: area.width.saturating_sub(2),
        height: 1,
    };
    let p = Paragraph::new(error.to_string()).style(Style::default().fg(Color::Red));
    f.render_widget(Clear, line);
    f.render_widget(p, line);
}

fn render_status_history(f: &mut ratatui::Frame, state: &ConsoleState, id: &str, metric: usize) {
    let area = centered_rect(70, 60, f.area());
    f.render_widget(Clear, area);
    let slice = &state.status_history;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Status History {id}"));

    let Some(history) = &slice.status_history else {
        let message = slice
            .error
            .clone()
            .unwrap_or_else(|| "Loading status history…".to_string());
        let p = Paragraph::new(message)
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(p, area);
        return;
    };

    let inner = block.inner(area);
    f.render_widget(block, area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(3)])
        .split(inner);

    let mut details: Vec<Line> = history
        .component_details
        .iter()
        .map(|(key, value)| {
            Line::from(vec![
                Span::styled(format!("{key}: "), Style::default().fg(Color::DarkGray)),
                Span::raw(value.clone()),
            ])
        })
        .collect();
    details.push(Line::from(Span::styled(
        format!("generated {}", history.generated),
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(Paragraph::new(details).wrap(Wrap { trim: true }), chunks[0]);

    if history.field_descriptors.is_empty() {
        return;
    }
    let descriptor = &history.field_descriptors[metric % history.field_descriptors.len()];
    let data: Vec<u64> = history
        .aggregate_snapshots
        .iter()
        .map(|snapshot| {
            snapshot
                .status_metrics
                .get(&descriptor.field)
                .copied()
                .unwrap_or(0)
                .max(0) as u64
        })
        .collect();
    let sparkline = Sparkline::default()
        .block(
            Block::default()
                .borders(Borders::TOP)
                .title(format!("{} (←/→)", descriptor.label)),
        )
        .data(&data)
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(sparkline, chunks[1]);
}

fn render_system_diagnostics(f: &mut ratatui::Frame, state: &ConsoleState) {
    let area = centered_rect(60, 50, f.area());
    f.render_widget(Clear, area);
    let slice = &state.system_diagnostics;
    let block = Block::default()
        .borders(Borders::ALL)
        .title("System Diagnostics");

    let Some(diagnostics) = &slice.system_diagnostics else {
        let message = slice
            .error
            .clone()
            .unwrap_or_else(|| "Loading system diagnostics…".to_string());
        let p = Paragraph::new(message)
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(p, area);
        return;
    };

    let inner = block.inner(area);
    f.render_widget(block, area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let snapshot = &diagnostics.aggregate_snapshot;
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(snapshot.heap_utilization().clamp(0.0, 1.0))
        .label(format!(
            "heap {} / {}",
            format_bytes(snapshot.used_heap_bytes),
            format_bytes(snapshot.max_heap_bytes)
        ));
    f.render_widget(gauge, chunks[0]);

    let mut lines = vec![
        Line::from(format!(
            "processors {}  load {}",
            snapshot.available_processors,
            snapshot
                .processor_load_average
                .map_or_else(|| "n/a".to_string(), |load| format!("{load:.2}"))
        )),
        Line::from(format!(
            "threads {} ({} daemon)",
            snapshot.total_threads, snapshot.daemon_threads
        )),
        Line::from(format!("uptime {}", snapshot.uptime)),
    ];
    for node in &diagnostics.node_snapshots {
        lines.push(Line::from(format!(
            "{}  heap {:.0}%",
            node.address,
            node.snapshot.heap_utilization() * 100.0
        )));
    }
    f.render_widget(Paragraph::new(lines), chunks[1]);
}

fn render_new_task(f: &mut ratatui::Frame, app: &mut App, state: &ConsoleState) {
    let area = centered_rect(60, 50, f.area());
    f.render_widget(Clear, area);
    let types = &state.extension_types.reporting_task_types;
    let items: Vec<ListItem> = types
        .iter()
        .map(|documented| {
            let mut spans = vec![Span::raw(short_type(&documented.type_name).to_string())];
            if let Some(bundle) = &documented.bundle {
                spans.push(Span::styled(
                    format!("  {}", bundle.version),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();
    let title = if types.is_empty() {
        "Add Reporting Task (loading types…)"
    } else {
        "Add Reporting Task"
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▸ ");
    f.render_stateful_widget(list, area, &mut app.types);
}

fn render_confirm_deletion(f: &mut ratatui::Frame, name: &str) {
    let area = centered_rect(40, 20, f.area());
    f.render_widget(Clear, area);
    let p = Paragraph::new(format!("Delete reporting task '{name}'? (y/n)"))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Delete Reporting Task"),
        );
    f.render_widget(p, area);
}

fn render_action_bar(f: &mut ratatui::Frame, area: Rect, page: Page, state: &ConsoleState) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Cyan));
    let hint = |h: &'static str| Span::styled(h, Style::default().fg(Color::DarkGray));
    let mut spans = vec![key("Tab"), hint(" page "), key("↑↓"), hint(" select ")];
    match page {
        Page::Summary(tab) => {
            if tab.has_status_history() {
                spans.extend([key("h"), hint(" history ")]);
            }
            spans.extend([key("d"), hint(" diagnostics ")]);
        }
        Page::ReportingTasks => {
            spans.extend([
                key("n"),
                hint(" new "),
                key("s"),
                hint(" start/stop "),
                key("x"),
                hint(" delete "),
            ]);
        }
    }
    spans.extend([
        key("r"),
        hint(" refresh "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        hint(" quit"),
    ]);
    if state.overlay != ConsoleOverlay::None {
        spans.push(hint("  Esc close"));
    }
    let p = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(p, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_cycle_through_summary_tabs_then_reporting_tasks() {
        let mut page = Page::Summary(SummaryTab::Processors);
        for tab in SummaryTab::ALL.iter().skip(1) {
            page = page.next();
            assert_eq!(page, Page::Summary(*tab));
        }
        assert_eq!(page.next(), Page::ReportingTasks);
        assert_eq!(Page::ReportingTasks.next(), Page::Summary(SummaryTab::Processors));
        assert_eq!(Page::Summary(SummaryTab::Processors).prev(), Page::ReportingTasks);
    }

    #[test]
    fn reporting_tasks_page_routes_to_settings() {
        assert_eq!(Page::ReportingTasks.route().path(), "/settings/reporting-tasks");
        assert_eq!(
            Page::Summary(SummaryTab::Connections).route(),
            ConsoleRoute::summary(SummaryTab::Connections)
        );
    }

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 50, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 20);
        assert_eq!(popup.y, 10);
    }

    #[test]
    fn short_type_strips_package() {
        assert_eq!(short_type("org.apache.nifi.reporting.MonitorDiskUsage"), "MonitorDiskUsage");
        assert_eq!(short_type("Plain"), "Plain");
    }
}
