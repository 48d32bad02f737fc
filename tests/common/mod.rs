#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use gitstat::model::{CommitMeta, CommitRecord, Edit};
use gitstat::{CommitSource, CommitStore, GitstatError, Result};
use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once};

use log::{Level, LevelFilter, Log, Metadata, Record};

pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

/// In-memory history with scripted edits and failures.
#[derive(Default)]
pub struct FakeSource {
    commits: Vec<CommitMeta>,
    edits: HashMap<String, Vec<Edit>>,
    broken: HashSet<String>,
    unlistable: bool,
    merges_diffed: AtomicUsize,
    diffs: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commit(mut self, id: &str, author: &str, when: DateTime<Utc>, parents: usize, edits: Vec<Edit>) -> Self {
        self.commits.push(CommitMeta {
            id: id.to_string(),
            author: author.to_string(),
            timestamp: when,
            parent_ids: (0..parents).map(|p| format!("{id}-parent{p}")).collect(),
        });
        self.edits.insert(id.to_string(), edits);
        self
    }

    /// Non-merge commit with one parent that added and removed whole lines.
    pub fn change(self, id: &str, author: &str, when: DateTime<Utc>, added: usize, removed: usize) -> Self {
        let mut edits = vec![Edit::insert(added)];
        if removed > 0 {
            edits.push(Edit::delete(removed));
        }
        self.commit(id, author, when, 1, edits)
    }

    pub fn broken(mut self, id: &str) -> Self {
        self.broken.insert(id.to_string());
        self
    }

    pub fn unlistable(mut self) -> Self {
        self.unlistable = true;
        self
    }

    pub fn merges_diffed(&self) -> usize {
        self.merges_diffed.load(Ordering::SeqCst)
    }

    pub fn diffs(&self) -> usize {
        self.diffs.load(Ordering::SeqCst)
    }
}

impl CommitSource for FakeSource {
    fn list_commits(&self) -> Result<Vec<CommitMeta>> {
        if self.unlistable {
            return Err(GitstatError::Io(io::Error::other("history unreadable")));
        }
        Ok(self.commits.clone())
    }

    fn edits(&self, commit: &CommitMeta) -> Result<Vec<Edit>> {
        self.diffs.fetch_add(1, Ordering::SeqCst);
        if commit.is_merge() {
            self.merges_diffed.fetch_add(1, Ordering::SeqCst);
        }
        if self.broken.contains(&commit.id) {
            return Err(GitstatError::Io(io::Error::other("corrupt object")));
        }
        Ok(self.edits.get(&commit.id).cloned().unwrap_or_default())
    }
}

/// The three-commit history used throughout: two commits by A on day 1,
/// one by B on day 3.
pub fn three_commit_store() -> CommitStore {
    [
        ("c1", "A", 10, 2, at(2024, 3, 4, 9)),
        ("c2", "A", 3, 1, at(2024, 3, 4, 17)),
        ("c3", "B", 5, 0, at(2024, 3, 6, 12)),
    ]
    .into_iter()
    .map(|(id, author, additions, deletions, timestamp)| {
        (
            id.to_string(),
            CommitRecord {
                author: author.to_string(),
                additions,
                deletions,
                timestamp,
            },
        )
    })
    .collect()
}

/// Keeps every `warn!` and `error!` line emitted by the crate under test.
struct CaptureLogger {
    lines: Mutex<Vec<(Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut lines) = self.lines.lock() {
                lines.push((record.level(), record.args().to_string()));
            }
        }
    }

    fn flush(&self) {}
}

static CAPTURE: CaptureLogger = CaptureLogger { lines: Mutex::new(Vec::new()) };
static INSTALL: Once = Once::new();

/// Installs the capturing logger for this test binary. Safe to call from every test.
pub fn capture_logs() {
    INSTALL.call_once(|| {
        log::set_logger(&CAPTURE).unwrap();
        log::set_max_level(LevelFilter::Warn);
    });
}

/// Warnings captured so far, across every test of the binary.
pub fn captured_warnings() -> Vec<String> {
    CAPTURE
        .lines
        .lock()
        .unwrap()
        .iter()
        .filter(|(level, _)| *level == Level::Warn)
        .map(|(_, line)| line.clone())
        .collect()
}
