use crate::error::Result;
use crate::model::{CommitMeta, Edit};

/// Read access to a commit history.
///
/// Implementations must be shareable across the worker threads of the
/// analysis driver; any per-thread handle has to be acquired inside
/// [`CommitSource::edits`].
pub trait CommitSource: Sync {
    /// Every commit reachable from the starting point, newest first.
    fn list_commits(&self) -> Result<Vec<CommitMeta>>;

    /// Line edits introduced by `commit` relative to its first parent, or
    /// relative to the empty tree when it has no parent.
    fn edits(&self, commit: &CommitMeta) -> Result<Vec<Edit>>;
}

impl<S: CommitSource + ?Sized> CommitSource for &S {
    fn list_commits(&self) -> Result<Vec<CommitMeta>> {
        (**self).list_commits()
    }

    fn edits(&self, commit: &CommitMeta) -> Result<Vec<Edit>> {
        (**self).edits(commit)
    }
}
