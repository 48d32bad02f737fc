use crate::model::{Edit, EditKind};

/// `(added, removed)` line counts contributed by a single edit.
pub fn classify(edit: &Edit) -> (u64, u64) {
    match edit.kind {
        EditKind::Insert => (edit.inserted as u64, 0),
        EditKind::Delete => (0, edit.deleted as u64),
        EditKind::Replace => (edit.inserted as u64, edit.deleted as u64),
    }
}

/// Sums the edits of every file touched by a commit into `(additions, deletions)`.
pub fn tally_edits<'a, I>(edits: I) -> (u64, u64)
where
    I: IntoIterator<Item = &'a Edit>,
{
    edits.into_iter().fold((0, 0), |(added, removed), edit| {
        let (a, r) = classify(edit);
        (added + a, removed + r)
    })
}
