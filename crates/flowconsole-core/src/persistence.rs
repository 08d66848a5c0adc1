use std::fs::File;
use std::fs::OpenOptions;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use super::actions::ConsoleAction;
use super::error::ConsoleError;
use super::reducer::reduce;
use super::state::ConsoleState;

pub const JOURNAL_FILE_NAME: &str = "actions.jsonl";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalRecord {
    pub seq: u64,
    pub ts_ms: i64,
    #[serde(rename = "type")]
    pub type_name: String,
    pub action: ConsoleAction,
}

/// Append-only log of dispatched actions, one JSON record per line.
#[derive(Debug)]
pub struct ActionJournal {
    path: PathBuf,
    next_seq: u64,
}

impl ActionJournal {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ConsoleError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let existing = load_records(path.as_path())?;
        let next_seq = existing
            .iter()
            .map(|record| record.seq)
            .max()
            .map_or(1, |seq| seq.saturating_add(1));
        Ok(Self { path, next_seq })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, action: &ConsoleAction) -> Result<u64, ConsoleError> {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.saturating_add(1);
        let record = JournalRecord {
            seq,
            ts_ms: chrono::Utc::now().timestamp_millis(),
            type_name: action.type_name().to_string(),
            action: action.clone(),
        };
        let line = serde_json::to_string(&record)?;
        append_line(self.path.as_path(), line.as_str())?;
        Ok(seq)
    }

    pub fn load(&self) -> Result<Vec<JournalRecord>, ConsoleError> {
        load_records(self.path.as_path())
    }

    pub fn load_since(&self, seq_exclusive: u64) -> Result<Vec<JournalRecord>, ConsoleError> {
        let records = self.load()?;
        Ok(records
            .into_iter()
            .filter(|record| record.seq > seq_exclusive)
            .collect())
    }
}

/// Folds `records` over `initial` in sequence order. Effects are discarded:
/// every follow-up action they caused is itself in the journal.
pub fn replay(initial: ConsoleState, records: &[JournalRecord]) -> ConsoleState {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|record| record.seq);

    let mut state = initial;
    for record in sorted {
        let _ = reduce(&mut state, record.action);
    }
    state
}

fn load_records(path: &Path) -> Result<Vec<JournalRecord>, ConsoleError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if let Ok(record) = serde_json::from_str::<JournalRecord>(&line) {
            records.push(record);
        }
    }
    Ok(records)
}

fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut opts = OpenOptions::new();
    opts.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    let mut file = opts.open(path)?;
    file.write_all(line.as_bytes())?;
    file.write_all(b"\n")?;
    file.flush()?;
    Ok(())
}
