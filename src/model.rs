use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::ops::Add;

pub const SCHEMA_VERSION: u32 = 1;

/// Metadata of one commit as listed by a [`crate::source::CommitSource`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitMeta {
    pub id: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    pub parent_ids: Vec<String>,
}

impl CommitMeta {
    pub fn parent_count(&self) -> usize {
        self.parent_ids.len()
    }

    pub fn is_merge(&self) -> bool {
        self.parent_count() > 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditKind {
    Insert,
    Delete,
    Replace,
}

/// One contiguous line-range change between two versions of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    pub kind: EditKind,
    pub deleted: usize,
    pub inserted: usize,
}

impl Edit {
    pub fn insert(lines: usize) -> Self {
        Self { kind: EditKind::Insert, deleted: 0, inserted: lines }
    }

    pub fn delete(lines: usize) -> Self {
        Self { kind: EditKind::Delete, deleted: lines, inserted: 0 }
    }

    pub fn replace(deleted: usize, inserted: usize) -> Self {
        Self { kind: EditKind::Replace, deleted, inserted }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub author: String,
    pub additions: u64,
    pub deletions: u64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub author: String,
    pub commit_count: u64,
    pub additions_sum: u64,
    pub deletions_sum: u64,
}

/// Activity of one time-series bucket, dated at the bucket's first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateCommitRecord {
    pub date: NaiveDate,
    pub commit_count: u64,
    pub additions: u64,
    pub deletions: u64,
}

impl DateCommitRecord {
    pub fn zero(date: NaiveDate) -> Self {
        Self { date, commit_count: 0, additions: 0, deletions: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.commit_count == 0 && self.additions == 0 && self.deletions == 0
    }
}

/// Sums the counters; the date of the left operand is kept.
impl Add for DateCommitRecord {
    type Output = DateCommitRecord;

    fn add(self, rhs: DateCommitRecord) -> DateCommitRecord {
        DateCommitRecord {
            date: self.date,
            commit_count: self.commit_count + rhs.commit_count,
            additions: self.additions + rhs.additions,
            deletions: self.deletions + rhs.deletions,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedCommit {
    pub id: String,
    pub author: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub total: AuthorRecord,
    pub authors: Vec<AuthorRecord>,
    pub skipped: Vec<SkippedCommit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub bucket: Bucket,
    pub fill_gaps: bool,
    pub records: Vec<DateCommitRecord>,
}

/// Parallel arrays, one element per bucket, as consumed by chart front-ends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartSeries {
    pub dates: Vec<String>,
    pub commits: Vec<u64>,
    pub additions: Vec<u64>,
    pub deletions: Vec<u64>,
}

impl From<&[DateCommitRecord]> for ChartSeries {
    fn from(records: &[DateCommitRecord]) -> Self {
        let mut series = ChartSeries::default();
        for r in records {
            series.dates.push(r.date.format("%Y-%m-%d").to_string());
            series.commits.push(r.commit_count);
            series.additions.push(r.additions);
            series.deletions.push(r.deletions);
        }
        series
    }
}

/// Width of one time-series bucket.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    #[default]
    Day,
    /// Seven days starting on Sunday
    Week,
}

#[derive(Debug, Clone)]
pub struct DateRange {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new() -> Self {
        Self { since: None, until: None }
    }

    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        if let Some(since) = self.since {
            if timestamp < &since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if timestamp > &until {
                return false;
            }
        }
        true
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::new()
    }
}
