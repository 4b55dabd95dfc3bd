// Per-Step JSONL Timeline Recorder
// Outputs one JSON line per scripted step for independent inspection

use cafe_engine::{CafeView, Effect};
use serde::Serialize;
use std::io::Write;

use crate::script::{Action, StepOutcome};

#[derive(Debug, Serialize)]
pub struct TimelineEntry {
    pub index: usize,
    pub at_ms: u64,
    pub action: Action,
    pub outcome: StepOutcome,
    pub effects: Vec<Effect>,
    pub view: CafeView,
}

/// Accumulates entries and writes them as JSONL.
#[derive(Default)]
pub struct TimelineRecorder {
    entries: Vec<TimelineEntry>,
}

impl TimelineRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: TimelineEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn rejected(&self) -> usize {
        self.entries.iter().filter(|e| !e.outcome.ok).count()
    }

    pub fn write_jsonl(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(path)?;
        for entry in &self.entries {
            let line = serde_json::to_string(entry)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
