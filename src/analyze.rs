use crate::authors::reduce_authors;
use crate::diff::tally_edits;
use crate::error::Result;
use crate::model::{AuthorRecord, Bucket, CommitMeta, CommitRecord, DateCommitRecord, SkippedCommit};
use crate::source::CommitSource;
use crate::timeline::build_series;
use chrono::{Local, TimeZone};
use dashmap::DashMap;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use rayon::{Scope, ThreadPoolBuilder};
use std::collections::HashMap;
use std::time::Instant;

enum CommitOutcome {
    Processed(CommitRecord),
    Skipped(SkippedCommit),
}

/// Insert-only store written by the diff tasks. Only readable once sealed.
struct PendingStore {
    outcomes: DashMap<String, CommitOutcome>,
}

impl PendingStore {
    fn with_capacity(capacity: usize) -> Self {
        Self { outcomes: DashMap::with_capacity(capacity) }
    }

    fn insert(&self, id: String, outcome: CommitOutcome) {
        let previous = self.outcomes.insert(id, outcome);
        debug_assert!(previous.is_none(), "commit processed twice");
    }

    fn seal(self) -> (CommitStore, Vec<SkippedCommit>) {
        let mut records = HashMap::with_capacity(self.outcomes.len());
        let mut skipped = Vec::new();
        for (id, outcome) in self.outcomes {
            match outcome {
                CommitOutcome::Processed(record) => {
                    records.insert(id, record);
                }
                CommitOutcome::Skipped(skip) => skipped.push(skip),
            }
        }
        skipped.sort_by(|a, b| a.id.cmp(&b.id));
        (CommitStore { records }, skipped)
    }
}

/// Records of every successfully diffed commit, keyed by commit id.
#[derive(Debug, Clone, Default)]
pub struct CommitStore {
    records: HashMap<String, CommitRecord>,
}

impl CommitStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&CommitRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &CommitRecord> {
        self.records.values()
    }

    pub fn authors(&self) -> HashMap<String, AuthorRecord> {
        reduce_authors(self.records())
    }

    pub fn time_series_in<Tz: TimeZone>(
        &self,
        tz: &Tz,
        fill_gaps: bool,
        bucket: Bucket,
    ) -> Result<Vec<DateCommitRecord>> {
        build_series(self.records(), tz, bucket, fill_gaps)
    }
}

impl FromIterator<(String, CommitRecord)> for CommitStore {
    fn from_iter<I: IntoIterator<Item = (String, CommitRecord)>>(iter: I) -> Self {
        Self { records: iter.into_iter().collect() }
    }
}

/// Diffs every non-merge commit of a [`CommitSource`] in parallel and keeps
/// the resulting records for the author and time-series reductions.
pub struct RepositoryAnalyzer<S> {
    source: S,
    jobs: Option<usize>,
    progress: bool,
    store: CommitStore,
    skipped: Vec<SkippedCommit>,
}

impl<S: CommitSource> RepositoryAnalyzer<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            jobs: None,
            progress: false,
            store: CommitStore::new(),
            skipped: Vec::new(),
        }
    }

    /// Run the diff tasks on a dedicated pool of `jobs` threads instead of
    /// rayon's global pool.
    pub fn jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs.filter(|&n| n > 0);
        self
    }

    pub fn progress(mut self, show: bool) -> Self {
        self.progress = show;
        self
    }

    /// Processes the whole history and returns the per-author totals.
    ///
    /// Only a failure to list the commits is returned as an error. A commit
    /// whose edits cannot be read is logged, left out of every result and
    /// reported through [`RepositoryAnalyzer::skipped`].
    pub fn analyze(&mut self) -> Result<HashMap<String, AuthorRecord>> {
        let started = Instant::now();

        let commits: Vec<CommitMeta> = self
            .source
            .list_commits()?
            .into_iter()
            .filter(|c| !c.is_merge())
            .collect();
        debug!("Listed {} non-merge commits in {:.2?}", commits.len(), started.elapsed());

        let pending = PendingStore::with_capacity(commits.len());
        let bar = self.progress_bar(commits.len());

        let source = &self.source;
        match self.jobs {
            Some(threads) => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("gitstat-diff-{i}"))
                    .build()?;
                pool.scope(|scope| spawn_all(scope, source, &commits, &pending, &bar));
            }
            None => rayon::scope(|scope| spawn_all(scope, source, &commits, &pending, &bar)),
        }
        bar.finish_and_clear();

        let (store, skipped) = pending.seal();
        info!(
            "Processed {} commits ({} skipped) in {:.2?}",
            store.len(),
            skipped.len(),
            started.elapsed()
        );
        self.store = store;
        self.skipped = skipped;

        Ok(self.store.authors())
    }

    pub fn store(&self) -> &CommitStore {
        &self.store
    }

    pub fn skipped(&self) -> &[SkippedCommit] {
        &self.skipped
    }

    /// Time series over local calendar days.
    pub fn time_series(&self, fill_gaps: bool, bucket: Bucket) -> Result<Vec<DateCommitRecord>> {
        self.time_series_in(&Local, fill_gaps, bucket)
    }

    pub fn time_series_in<Tz: TimeZone>(
        &self,
        tz: &Tz,
        fill_gaps: bool,
        bucket: Bucket,
    ) -> Result<Vec<DateCommitRecord>> {
        self.store.time_series_in(tz, fill_gaps, bucket)
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb.set_message("Diffing commits...");
        pb
    }
}

// One task per commit; the enclosing scope returns only after all of them ran.
fn spawn_all<'scope, S: CommitSource>(
    scope: &Scope<'scope>,
    source: &'scope S,
    commits: &'scope [CommitMeta],
    pending: &'scope PendingStore,
    bar: &'scope ProgressBar,
) {
    for commit in commits {
        scope.spawn(move |_| {
            let outcome = diff_commit(source, commit, bar);
            pending.insert(commit.id.clone(), outcome);
            bar.inc(1);
        });
    }
}

fn diff_commit<S: CommitSource>(source: &S, commit: &CommitMeta, bar: &ProgressBar) -> CommitOutcome {
    match source.edits(commit) {
        Ok(edits) => {
            let (additions, deletions) = tally_edits(&edits);
            CommitOutcome::Processed(CommitRecord {
                author: commit.author.clone(),
                additions,
                deletions,
                timestamp: commit.timestamp,
            })
        }
        Err(e) => {
            bar.suspend(|| warn!("Could not process commit {}: {}", commit.id, e));
            CommitOutcome::Skipped(SkippedCommit {
                id: commit.id.clone(),
                author: commit.author.clone(),
                reason: e.to_string(),
            })
        }
    }
}
