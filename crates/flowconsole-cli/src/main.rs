use std::env;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use flowconsole_core::config::Config;
use flowconsole_core::config::CONFIG_FILE_NAME;
use flowconsole_core::persistence::replay;
use flowconsole_core::persistence::ActionJournal;
use flowconsole_core::persistence::JOURNAL_FILE_NAME;
use flowconsole_core::selectors::status_rows;
use flowconsole_core::selectors::StatusRow;
use flowconsole_core::ConsoleOverlay;
use flowconsole_core::ConsoleState;
use flowconsole_core::LoadStatus;
use flowconsole_core::ScheduledState;
use flowconsole_core::SummaryTab;
use flowconsole_runtime::bootstrap;
use flowconsole_runtime::Console;
use flowconsole_runtime::SimulatedConsoleApi;
use tracing_subscriber::EnvFilter;

mod ui;

const WAIT: Duration = Duration::from_secs(5);
const DEMO_LATENCY: Duration = Duration::from_millis(25);

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let Some(command) = args.next() else {
        print_help();
        return Ok(());
    };
    let options = || CliOptions::parse(args.collect::<Vec<_>>());

    match command.as_str() {
        "--help" | "-h" | "help" => {
            print_help();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("flowconsole {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "demo" => with_runtime(run_demo(options()?)),
        "summary" => with_runtime(run_summary(options()?)),
        "reporting-tasks" => with_runtime(run_reporting_tasks(options()?)),
        "replay" => run_replay(options()?),
        "tui" => with_runtime(run_tui(options()?)),
        _ => {
            print_help();
            Err(format!("unknown command: {command}").into())
        }
    }
}

#[derive(Debug, Default)]
struct CliOptions {
    config: Option<PathBuf>,
    journal: Option<PathBuf>,
    tab: Option<SummaryTab>,
    flat: bool,
    json: bool,
}

impl CliOptions {
    fn parse(args: Vec<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut options = Self::default();
        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--config" => {
                    let Some(value) = args.get(i + 1) else {
                        return Err("--config requires a path".into());
                    };
                    options.config = Some(PathBuf::from(value));
                    i += 2;
                }
                "--journal" => {
                    let Some(value) = args.get(i + 1) else {
                        return Err("--journal requires a path".into());
                    };
                    options.journal = Some(PathBuf::from(value));
                    i += 2;
                }
                "--tab" => {
                    let Some(value) = args.get(i + 1) else {
                        return Err("--tab requires a name".into());
                    };
                    let tab = SummaryTab::from_segment(value)
                        .ok_or_else(|| format!("unknown summary tab: {value}"))?;
                    options.tab = Some(tab);
                    i += 2;
                }
                "--flat" => {
                    options.flat = true;
                    i += 1;
                }
                "--json" => {
                    options.json = true;
                    i += 1;
                }
                other => {
                    return Err(format!("unsupported argument: {other}").into());
                }
            }
        }
        Ok(options)
    }

    fn load_config(&self) -> Result<Config, Box<dyn std::error::Error>> {
        let path = self.config.clone().or_else(default_config_path);
        let mut config = match path {
            Some(path) => Config::load(&path)?,
            None => Config::default(),
        };
        if let Some(journal) = &self.journal {
            config.journal.enabled = true;
            config.journal.path = Some(journal.clone());
        }
        if config.journal.enabled && config.journal.path.is_none() {
            config.journal.path = default_journal_path();
        }
        if self.flat {
            config.console.recursive_summary = false;
        }
        Ok(config)
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("flowconsole").join(CONFIG_FILE_NAME))
}

fn default_journal_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("flowconsole").join(JOURNAL_FILE_NAME))
}

fn with_runtime<F>(future: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: std::future::Future<Output = Result<(), Box<dyn std::error::Error>>>,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.filter.as_str()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn connect(options: &CliOptions) -> Result<(Config, Console), Box<dyn std::error::Error>> {
    let config = options.load_config()?;
    init_tracing(&config);
    let api = Arc::new(SimulatedConsoleApi::demo(&config.console.identity).with_latency(DEMO_LATENCY));
    let console = bootstrap(&config, api)?;
    let landed = console.start().await;
    tracing::info!(route = ?landed.map(|route| route.path()), "console started");
    Ok((config, console))
}

async fn load_summary(console: &Console) -> Result<(), Box<dyn std::error::Error>> {
    console.refresh_summary();
    let settled = console
        .wait_until(WAIT, |state| {
            matches!(
                state.summary_listing.status,
                LoadStatus::Success | LoadStatus::Error
            )
        })
        .await;
    if !settled {
        return Err("summary listing did not load in time".into());
    }
    if let Some(error) = console.store().select(|state| state.summary_listing.error.clone()) {
        return Err(format!("summary listing failed: {error}").into());
    }
    Ok(())
}

async fn run_demo(options: CliOptions) -> Result<(), Box<dyn std::error::Error>> {
    let (config, console) = connect(&options).await?;
    let user = console.store().select(|state| state.current_user.user.clone());
    println!("signed in as {}", user.identity);

    load_summary(&console).await?;
    let timestamp = console
        .store()
        .select(|state| state.summary_listing.loaded_timestamp.clone());
    println!("summary refreshed at {timestamp}");

    let listing = console.status_listing(SummaryTab::RemoteProcessGroups);
    print_rows(SummaryTab::RemoteProcessGroups, &listing.rows());
    let Some(first) = listing.rows().into_iter().next() else {
        return Err("demo flow has no remote process groups".into());
    };

    println!();
    println!("status history for {} ({})", first.name, first.id);
    listing.view_status_history(&first.id);
    let opened = console
        .wait_until(WAIT, |state| {
            matches!(state.overlay, ConsoleOverlay::StatusHistory { .. })
        })
        .await;
    if !opened {
        return Err("status history dialog did not open".into());
    }
    let history = console
        .store()
        .select(|state| state.status_history.status_history.clone());
    if let Some(history) = history {
        for snapshot in history.aggregate_snapshots.iter().rev().take(3) {
            let flow_files_in = snapshot.status_metrics.get("flowFilesIn").copied().unwrap_or(0);
            println!("  {}  flowFilesIn={flow_files_in}", snapshot.timestamp_ms);
        }
    }
    listing.close_status_history();

    println!();
    let tasks = console.reporting_tasks();
    tasks.load();
    tasks.open_new_dialog();
    console
        .wait_until(WAIT, |state| {
            !state.extension_types.reporting_task_types.is_empty()
                && state.reporting_tasks.status == LoadStatus::Success
        })
        .await;
    let Some(task_type) = tasks.available_types().into_iter().last() else {
        return Err("no reporting task types available".into());
    };
    tasks.create(&task_type.type_name, task_type.bundle.clone());
    let created = console
        .wait_until(WAIT, |state| state.reporting_tasks.reporting_tasks.len() > 1)
        .await;
    if !created {
        return Err("reporting task was not created".into());
    }
    if let Some(task) = tasks.tasks().into_iter().last() {
        tasks.start(&task);
        console
            .wait_until(WAIT, |state| !state.reporting_tasks.saving)
            .await;
    }
    print_reporting_tasks(&console);

    if let Some(path) = config.journal.path.filter(|_| config.journal.enabled) {
        println!();
        println!("journal: {}", path.display());
    }
    Ok(())
}

async fn run_summary(options: CliOptions) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, console) = connect(&options).await?;
    load_summary(&console).await?;
    let state = console.store().snapshot();
    if options.json {
        println!("{}", serde_json::to_string_pretty(&state.summary_listing)?);
        return Ok(());
    }
    println!("refreshed at {}", state.summary_listing.loaded_timestamp);
    let tabs = match options.tab {
        Some(tab) => vec![tab],
        None => SummaryTab::ALL.to_vec(),
    };
    for tab in tabs {
        print_rows(tab, &status_rows(&state, tab));
    }
    Ok(())
}

async fn run_reporting_tasks(options: CliOptions) -> Result<(), Box<dyn std::error::Error>> {
    let (_config, console) = connect(&options).await?;
    let tasks = console.reporting_tasks();
    tasks.load();
    console
        .wait_until(WAIT, |state| {
            matches!(
                state.reporting_tasks.status,
                LoadStatus::Success | LoadStatus::Error
            )
        })
        .await;
    if let Some(error) = tasks.error() {
        return Err(format!("reporting tasks failed: {error}").into());
    }
    if options.json {
        println!("{}", serde_json::to_string_pretty(&tasks.tasks())?);
        return Ok(());
    }
    print_reporting_tasks(&console);
    Ok(())
}

fn run_replay(options: CliOptions) -> Result<(), Box<dyn std::error::Error>> {
    let path = options
        .journal
        .clone()
        .or_else(default_journal_path)
        .ok_or("--journal requires a path")?;
    if !path.exists() {
        return Err(format!("journal not found: {}", path.display()).into());
    }
    let journal = ActionJournal::open(&path)?;
    let records = journal.load()?;
    let state = replay(ConsoleState::new(), &records);
    if options.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }
    print_replay_summary(&path, records.len(), &state);
    Ok(())
}

async fn run_tui(options: CliOptions) -> Result<(), Box<dyn std::error::Error>> {
    // stderr belongs to the terminal UI; no subscriber is installed here.
    let config = options.load_config()?;
    let api = Arc::new(SimulatedConsoleApi::demo(&config.console.identity).with_latency(DEMO_LATENCY));
    let console = bootstrap(&config, api)?;
    console.start().await;
    console.refresh_summary();
    tokio::task::spawn_blocking(move || ui::run(console)).await??;
    Ok(())
}

fn print_rows(tab: SummaryTab, rows: &[StatusRow]) {
    println!();
    println!("{} ({})", tab.label(), rows.len());
    for row in rows {
        let columns = row
            .columns
            .iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect::<Vec<_>>()
            .join("  ");
        println!(
            "  {:<18} {:<20} {:<14} {:<12} {columns}",
            row.id, row.name, row.group, row.state
        );
    }
}

fn print_reporting_tasks(console: &Console) {
    let tasks = console
        .store()
        .select(|state| state.reporting_tasks.reporting_tasks.clone());
    println!("Reporting Tasks ({})", tasks.len());
    for task in tasks {
        let marker = match task.component.state {
            ScheduledState::Running => "▶",
            ScheduledState::Stopped => "■",
            ScheduledState::Disabled => "✕",
        };
        println!(
            "  {marker} {:<8} {:<32} {:<9} every {}",
            task.id,
            task.component.name,
            task.component.state.label(),
            task.component.scheduling_period
        );
    }
}

fn print_replay_summary(path: &Path, records: usize, state: &ConsoleState) {
    println!("replayed {records} actions from {}", path.display());
    println!("route: {}", state.router.current.path());
    println!(
        "current user: {} ({})",
        if state.current_user.user.identity.is_empty() {
            "anonymous"
        } else {
            state.current_user.user.identity.as_str()
        },
        state.current_user.status.label()
    );
    println!(
        "summary: {} at {:?}; {} processors, {} remote process groups",
        state.summary_listing.status.label(),
        state.summary_listing.loaded_timestamp,
        state.summary_listing.processor_status_snapshots.len(),
        state.summary_listing.remote_process_group_status_snapshots.len()
    );
    println!(
        "reporting tasks: {} ({})",
        state.reporting_tasks.reporting_tasks.len(),
        state.reporting_tasks.status.label()
    );
    if let Some(request) = &state.status_history.request {
        println!(
            "status history: {} {} ({})",
            request.component_type.label(),
            request.component_id,
            state.status_history.status.label()
        );
    }
}

fn print_help() {
    println!("flowconsole {}", env!("CARGO_PKG_VERSION"));
    println!("Usage:");
    println!("  flowconsole demo [--config PATH] [--journal PATH]");
    println!("  flowconsole summary [--tab TAB] [--flat] [--json] [--config PATH]");
    println!("  flowconsole reporting-tasks [--json] [--config PATH]");
    println!("  flowconsole replay [--journal PATH] [--json]");
    println!("  flowconsole tui [--config PATH] [--journal PATH]");
    println!("  flowconsole --help");
    println!("  flowconsole --version");
    println!();
    println!("Summary tabs: processors, input-ports, output-ports, remote-process-groups,");
    println!("              connections, process-groups");
}
