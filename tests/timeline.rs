mod common;

use chrono::{FixedOffset, NaiveDate, Utc};
use common::{at, three_commit_store};
use gitstat::model::{Bucket, CommitRecord, DateCommitRecord};
use gitstat::timeline::build_series;
use gitstat::{CommitStore, GitstatError};
use pretty_assertions::assert_eq;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn rec(date: NaiveDate, commits: u64, added: u64, removed: u64) -> DateCommitRecord {
    DateCommitRecord {
        date,
        commit_count: commits,
        additions: added,
        deletions: removed,
    }
}

fn store_at(days: &[(u32, u32, u64, u64)]) -> CommitStore {
    days.iter()
        .enumerate()
        .map(|(i, &(m, d, additions, deletions))| {
            (
                format!("c{i}"),
                CommitRecord {
                    author: "A".to_string(),
                    additions,
                    deletions,
                    timestamp: at(2024, m, d, 12),
                },
            )
        })
        .collect()
}

#[test]
fn sparse_daily_series_only_has_active_days() {
    let store = three_commit_store();
    let series = store.time_series_in(&Utc, false, Bucket::Day).unwrap();
    assert_eq!(
        series,
        vec![rec(day(2024, 3, 4), 2, 13, 3), rec(day(2024, 3, 6), 1, 5, 0)]
    );
}

#[test]
fn gap_filled_daily_series_inserts_zero_days() {
    let store = three_commit_store();
    let series = store.time_series_in(&Utc, true, Bucket::Day).unwrap();
    assert_eq!(
        series,
        vec![
            rec(day(2024, 3, 4), 2, 13, 3),
            rec(day(2024, 3, 5), 0, 0, 0),
            rec(day(2024, 3, 6), 1, 5, 0),
        ]
    );
}

#[test]
fn gap_filled_length_matches_day_span() {
    let store = store_at(&[(1, 30, 1, 0), (3, 2, 2, 0), (2, 14, 0, 4)]);
    let series = store.time_series_in(&Utc, true, Bucket::Day).unwrap();

    // Jan 30 .. Mar 2 of a leap year
    assert_eq!(series.len(), 33);
    assert_eq!(series.first().unwrap().date, day(2024, 1, 30));
    assert_eq!(series.last().unwrap().date, day(2024, 3, 2));
    assert!(series.windows(2).all(|w| w[0].date < w[1].date));
    assert_eq!(series.iter().filter(|r| !r.is_empty()).count(), 3);
}

#[test]
fn sparse_series_is_strictly_ascending_and_non_empty() {
    let store = store_at(&[(5, 9, 1, 1), (1, 2, 0, 0), (5, 9, 3, 0), (3, 17, 2, 2), (1, 2, 1, 0)]);
    let series = store.time_series_in(&Utc, false, Bucket::Day).unwrap();

    assert_eq!(series.len(), 3);
    assert!(series.windows(2).all(|w| w[0].date < w[1].date));
    assert!(series.iter().all(|r| r.commit_count >= 1));
}

#[test]
fn weekly_buckets_start_on_sunday_and_fill_gaps() {
    // Tue 5th, Wed 6th, Tue 26th of March 2024
    let store = store_at(&[(3, 5, 1, 0), (3, 6, 2, 1), (3, 26, 4, 4)]);

    let filled = store.time_series_in(&Utc, true, Bucket::Week).unwrap();
    assert_eq!(
        filled,
        vec![
            rec(day(2024, 3, 3), 2, 3, 1),
            rec(day(2024, 3, 10), 0, 0, 0),
            rec(day(2024, 3, 17), 0, 0, 0),
            rec(day(2024, 3, 24), 1, 4, 4),
        ]
    );

    let sparse = store.time_series_in(&Utc, false, Bucket::Week).unwrap();
    assert_eq!(
        sparse,
        vec![rec(day(2024, 3, 3), 2, 3, 1), rec(day(2024, 3, 24), 1, 4, 4)]
    );
}

#[test]
fn single_day_history_is_one_bucket() {
    let store = store_at(&[(7, 4, 8, 1)]);
    for bucket in [Bucket::Day, Bucket::Week] {
        let series = store.time_series_in(&Utc, true, bucket).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].commit_count, 1);
        assert_eq!(series[0].date, bucket.start_of(day(2024, 7, 4)));
    }
}

#[test]
fn days_follow_the_given_timezone() {
    // 23:00 UTC on the 4th is already the 5th two hours east
    let store: CommitStore = [(
        "late".to_string(),
        CommitRecord {
            author: "A".to_string(),
            additions: 1,
            deletions: 0,
            timestamp: at(2024, 3, 4, 23),
        },
    )]
    .into_iter()
    .collect();
    let east = FixedOffset::east_opt(2 * 3600).unwrap();

    assert_eq!(store.time_series_in(&Utc, false, Bucket::Day).unwrap()[0].date, day(2024, 3, 4));
    assert_eq!(store.time_series_in(&east, false, Bucket::Day).unwrap()[0].date, day(2024, 3, 5));
}

#[test]
fn empty_store_is_rejected() {
    let err = build_series(CommitStore::new().records(), &Utc, Bucket::Week, true).unwrap_err();
    assert!(matches!(err, GitstatError::EmptyHistory));
}

#[test]
fn add_is_associative_and_commutative_in_counters() {
    let a = rec(day(2024, 1, 1), 1, 10, 2);
    let b = rec(day(2024, 1, 2), 3, 0, 7);
    let c = rec(day(2024, 1, 3), 0, 5, 5);

    assert_eq!((a + b) + c, a + (b + c));
    let (ab, ba) = (a + b, b + a);
    assert_eq!(
        (ab.commit_count, ab.additions, ab.deletions),
        (ba.commit_count, ba.additions, ba.deletions)
    );
    assert_eq!(ab.date, a.date);
    assert_eq!(ba.date, b.date);
    assert_eq!(a + DateCommitRecord::zero(day(2020, 1, 1)), a);
}
