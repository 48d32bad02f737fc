use crate::model::Edit;
use similar::{DiffTag, TextDiff};

const BINARY_PROBE_LEN: usize = 8192;

/// Content with a NUL byte near the start is treated as binary.
fn is_binary(data: &[u8]) -> bool {
    data.iter().take(BINARY_PROBE_LEN).any(|&b| b == 0)
}

/// Line-level edits turning `old` into `new`. Binary content has none.
pub fn line_edits(old: &[u8], new: &[u8]) -> Vec<Edit> {
    if is_binary(old) || is_binary(new) {
        return Vec::new();
    }

    let old_text = String::from_utf8_lossy(old);
    let new_text = String::from_utf8_lossy(new);
    let diff = TextDiff::from_lines(&*old_text, &*new_text);

    diff.ops()
        .iter()
        .filter_map(|op| {
            let (tag, old_range, new_range) = op.as_tag_tuple();
            match tag {
                DiffTag::Equal => None,
                DiffTag::Insert => Some(Edit::insert(new_range.len())),
                DiffTag::Delete => Some(Edit::delete(old_range.len())),
                DiffTag::Replace => Some(Edit::replace(old_range.len(), new_range.len())),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::tally_edits;

    #[test]
    fn new_file_is_all_insertions() {
        let edits = line_edits(b"", b"one\ntwo\nthree\n");
        assert_eq!(tally_edits(&edits), (3, 0));
    }

    #[test]
    fn removed_file_is_all_deletions() {
        let edits = line_edits(b"one\ntwo\n", b"");
        assert_eq!(tally_edits(&edits), (0, 2));
    }

    #[test]
    fn changed_line_counts_on_both_sides() {
        let edits = line_edits(b"a\nb\nc\n", b"a\nB\nc\nd\n");
        assert_eq!(tally_edits(&edits), (2, 1));
    }

    #[test]
    fn identical_content_has_no_edits() {
        assert!(line_edits(b"same\n", b"same\n").is_empty());
    }

    #[test]
    fn binary_content_is_ignored() {
        assert!(is_binary(b"PNG\0\x01\x02"));
        assert!(line_edits(b"", b"\0\0\0binary").is_empty());
    }
}
