use crate::error::{GitstatError, Result};
use crate::model::{Bucket, CommitRecord, DateCommitRecord};
use crate::util::local_day;
use chrono::{NaiveDate, TimeZone};
use std::collections::BTreeMap;

/// Per-day activity for every calendar day (in `tz`) with at least one commit.
pub fn daily_records<'a, I, Tz>(records: I, tz: &Tz) -> BTreeMap<NaiveDate, DateCommitRecord>
where
    I: IntoIterator<Item = &'a CommitRecord>,
    Tz: TimeZone,
{
    let mut days: BTreeMap<NaiveDate, DateCommitRecord> = BTreeMap::new();
    for record in records {
        let day = local_day(&record.timestamp, tz);
        let entry = days.entry(day).or_insert_with(|| DateCommitRecord::zero(day));
        entry.commit_count += 1;
        entry.additions += record.additions;
        entry.deletions += record.deletions;
    }
    days
}

/// Builds the activity series, ascending by bucket start.
///
/// Without `fill_gaps` only buckets holding at least one commit are emitted.
/// With it, every bucket between the earliest and the latest commit day is
/// present, empty ones as zero records. Fails with
/// [`GitstatError::EmptyHistory`] when there are no records.
pub fn build_series<'a, I, Tz>(
    records: I,
    tz: &Tz,
    bucket: Bucket,
    fill_gaps: bool,
) -> Result<Vec<DateCommitRecord>>
where
    I: IntoIterator<Item = &'a CommitRecord>,
    Tz: TimeZone,
{
    let daily = daily_records(records, tz);
    let (first, last) = match (daily.keys().next(), daily.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Err(GitstatError::EmptyHistory),
    };

    if !fill_gaps {
        let mut grouped: BTreeMap<NaiveDate, DateCommitRecord> = BTreeMap::new();
        for (day, record) in daily {
            let start = bucket.start_of(day);
            let entry = grouped.entry(start).or_insert_with(|| DateCommitRecord::zero(start));
            *entry = *entry + record;
        }
        return Ok(grouped.into_values().collect());
    }

    let series = bucket
        .starts_between(first, last)
        .into_iter()
        .map(|start| {
            bucket
                .days(start)
                .filter_map(|day| daily.get(&day))
                .fold(DateCommitRecord::zero(start), |acc, r| acc + *r)
        })
        .collect();
    Ok(series)
}
