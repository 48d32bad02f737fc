use super::edits::line_edits;
use crate::error::{GitstatError, Result};
use crate::model::{CommitMeta, DateRange, Edit};
use crate::source::CommitSource;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use gix::object::tree::diff::ChangeDetached;
use gix::objs::tree::EntryMode;
use gix::{discover, ObjectId, Repository, ThreadSafeRepository};
use log::{debug, trace};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

pub struct GitRepo {
    repo: ThreadSafeRepository,
    path: PathBuf,
    range: DateRange,
}

impl GitRepo {
    /// Open a repository at `path`, or current dir if `None`
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let repo_path = path
            .map(|p| p.as_ref().to_path_buf())
            .unwrap_or(std::env::current_dir()?);

        let repo = discover(&repo_path)?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        debug!("Opened repository at {}", path.display());

        Ok(Self {
            repo: repo.into_sync(),
            path,
            range: DateRange::new(),
        })
    }

    /// Only list commits whose commit time falls inside `range`.
    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn resolve_range(&self, since: Option<&str>, until: Option<&str>) -> Result<DateRange> {
        let repo = self.repo.to_thread_local();
        let mut range = DateRange::new();

        let since_dt = since.map(|s| parse_commit_or_date(&repo, s)).transpose()?;
        let until_dt = until.map(|u| parse_commit_or_date(&repo, u)).transpose()?;

        if let (Some(s), Some(u)) = (since_dt, until_dt) {
            if s > u {
                return Err(GitstatError::InvalidDate(format!(
                    "Invalid range: since ({}) is after until ({})",
                    s, u
                )));
            }
        }

        if let Some(s) = since_dt {
            range = range.with_since(s);
        }
        if let Some(u) = until_dt {
            range = range.with_until(u);
        }

        Ok(range)
    }
}

impl CommitSource for GitRepo {
    fn list_commits(&self) -> Result<Vec<CommitMeta>> {
        let repo = self.repo.to_thread_local();
        let mut head = repo.head()?;
        let head_commit = head.peel_to_commit_in_place()?;

        let mut commits = Vec::new();
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: VecDeque<ObjectId> = VecDeque::from([head_commit.id]);

        while let Some(commit_id) = stack.pop_back() {
            if !seen.insert(commit_id) {
                continue;
            }

            let commit = repo.find_commit(commit_id)?;
            let timestamp = commit_time(commit.time()?.seconds)?;
            let parents: Vec<ObjectId> = commit.parent_ids().map(|id| id.into()).collect();

            if self.range.contains(&timestamp) {
                commits.push(CommitMeta {
                    id: commit_id.to_string(),
                    author: commit.author()?.name.to_string(),
                    timestamp,
                    parent_ids: parents.iter().map(|id| id.to_string()).collect(),
                });
            }

            stack.extend(parents);
        }

        commits.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        debug!("Walked {} commits, {} in range", seen.len(), commits.len());
        Ok(commits)
    }

    fn edits(&self, commit: &CommitMeta) -> Result<Vec<Edit>> {
        // thread-local handle, dropped when the task finishes
        let repo = self.repo.to_thread_local();

        let tree = repo.find_commit(parse_id(&commit.id)?)?.tree()?;
        let parent_tree = match commit.parent_ids.first() {
            Some(parent) => Some(repo.find_commit(parse_id(parent)?)?.tree()?),
            None => None,
        };

        // rename tracking off regardless of `diff.renames`: a rename is a full delete plus a full add
        let mut options = gix::diff::Options::default();
        options.with_rewrites(None);
        let changes: Vec<ChangeDetached> =
            repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(options))?;

        let mut edits = Vec::new();
        for change in changes {
            change_edits(&repo, change, &mut edits)?;
        }
        trace!("{}: {} edits", commit.id, edits.len());
        Ok(edits)
    }
}

fn has_lines(mode: EntryMode) -> bool {
    !mode.is_tree() && !mode.is_commit()
}

fn change_edits(repo: &Repository, change: ChangeDetached, edits: &mut Vec<Edit>) -> Result<()> {
    match change {
        ChangeDetached::Addition { id, entry_mode, .. } => {
            if has_lines(entry_mode) {
                let new = repo.find_object(id)?;
                edits.extend(line_edits(&[], &new.data));
            }
        }
        ChangeDetached::Deletion { id, entry_mode, .. } => {
            if has_lines(entry_mode) {
                let old = repo.find_object(id)?;
                edits.extend(line_edits(&old.data, &[]));
            }
        }
        ChangeDetached::Modification {
            previous_id,
            previous_entry_mode,
            id,
            entry_mode,
            ..
        } => {
            if has_lines(previous_entry_mode) && has_lines(entry_mode) {
                let old = repo.find_object(previous_id)?;
                let new = repo.find_object(id)?;
                edits.extend(line_edits(&old.data, &new.data));
            }
        }
        // only produced with rename tracking on; counted the same way as delete + add
        ChangeDetached::Rewrite {
            source_id,
            source_entry_mode,
            id,
            entry_mode,
            copy,
            ..
        } => {
            if has_lines(source_entry_mode) && !copy {
                let old = repo.find_object(source_id)?;
                edits.extend(line_edits(&old.data, &[]));
            }
            if has_lines(entry_mode) {
                let new = repo.find_object(id)?;
                edits.extend(line_edits(&[], &new.data));
            }
        }
    }
    Ok(())
}

fn parse_id(hex: &str) -> Result<ObjectId> {
    ObjectId::from_hex(hex.as_bytes()).map_err(|e| GitstatError::Parse(format!("Invalid commit ID '{hex}': {e}")))
}

fn commit_time(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .ok_or_else(|| GitstatError::InvalidDate(format!("Invalid timestamp: {secs}")))
}

fn parse_commit_or_date(repo: &Repository, input: &str) -> Result<DateTime<Utc>> {
    // RFC3339
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    // YYYY-MM-DD
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(datetime) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&datetime));
        }
    }

    // Relative duration (e.g. "2 weeks ago")
    if let Some(duration) = parse_natural_duration(input) {
        let target = SystemTime::now()
            .checked_sub(duration)
            .ok_or_else(|| GitstatError::InvalidDate(format!("Duration overflow for '{input}'")))?;
        return Ok(DateTime::<Utc>::from(target));
    }

    // Fallback to Git ref
    let id = repo
        .rev_parse_single(input)
        .map_err(|e| GitstatError::Parse(format!("Invalid commit or date '{input}': {e}")))?;

    let commit = id
        .object()?
        .try_into_commit()
        .map_err(|_| GitstatError::Parse(format!("Not a commit: {input}")))?;

    commit_time(commit.time()?.seconds)
}

pub(crate) fn parse_natural_duration(input: &str) -> Option<Duration> {
    let input = input.trim().to_lowercase();

    let units: [(&str, u64); 3] = [(" days ago", 1), (" weeks ago", 7), (" months ago", 30)];
    for (suffix, days) in units {
        if let Some(n) = input.strip_suffix(suffix) {
            if let Ok(n) = n.trim().parse::<u64>() {
                return Some(Duration::from_secs(n * days * 86400));
            }
        }
    }

    None
}
