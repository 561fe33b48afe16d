//! Bounded in-memory activity log with an optional append-only file sink.

use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

pub const MAX_ENTRIES: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct ActivityEntry {
    pub time: DateTime<Local>,
    pub level: ActivityLevel,
    pub message: String,
}

#[derive(Default)]
struct LogState {
    entries: VecDeque<ActivityEntry>,
    errors: usize,
}

pub struct ActivityLog {
    state: Mutex<LogState>,
    file: Option<PathBuf>,
}

impl ActivityLog {
    pub fn new(file: Option<PathBuf>) -> Self {
        Self {
            state: Mutex::new(LogState::default()),
            file,
        }
    }

    pub fn info(&self, message: &str) {
        super::info(message);
        self.record(ActivityLevel::Info, message);
    }

    pub fn error(&self, message: &str) {
        super::error(message);
        self.record(ActivityLevel::Error, message);
    }

    pub fn record(&self, level: ActivityLevel, message: &str) {
        let entry = ActivityEntry {
            time: Local::now(),
            level,
            message: message.to_string(),
        };
        self.append_to_file(&entry);

        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if level == ActivityLevel::Error {
            state.errors += 1;
        }
        state.entries.push_back(entry);
        while state.entries.len() > MAX_ENTRIES {
            if let Some(dropped) = state.entries.pop_front()
                && dropped.level == ActivityLevel::Error
            {
                state.errors = state.errors.saturating_sub(1);
            }
        }
    }

    /// Most recent entries, newest last.
    pub fn recent(&self, count: usize) -> Vec<ActivityEntry> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let skip = state.entries.len().saturating_sub(count);
        state.entries.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Errors among the retained entries.
    pub fn error_count(&self) -> usize {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).errors
    }

    fn append_to_file(&self, entry: &ActivityEntry) {
        let Some(path) = &self.file else {
            return;
        };
        if let Some(dir) = path.parent()
            && !dir.exists()
            && std::fs::create_dir_all(dir).is_err()
        {
            return;
        }
        let line = format!("[{}] {}", entry.time.format("%H:%M:%S"), entry.message);
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| writeln!(file, "{}", line));
        if let Err(e) = written {
            super::warning(&format!("Failed to write log file: {}", e));
        }
    }
}
