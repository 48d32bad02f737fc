use crate::model::Bucket;
use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc};

/// Calendar day of `timestamp` as observed in `tz`.
pub fn local_day<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    timestamp.with_timezone(tz).date_naive()
}

/// Sunday on or before `day`.
pub fn week_start(day: NaiveDate) -> NaiveDate {
    day - Days::new(u64::from(day.weekday().num_days_from_sunday()))
}

impl Bucket {
    /// First day of the bucket containing `day`.
    pub fn start_of(self, day: NaiveDate) -> NaiveDate {
        match self {
            Bucket::Day => day,
            Bucket::Week => week_start(day),
        }
    }

    pub fn span_days(self) -> usize {
        match self {
            Bucket::Day => 1,
            Bucket::Week => 7,
        }
    }

    /// Bucket start dates from the bucket holding `first` to the one holding
    /// `last`, inclusive.
    pub fn starts_between(self, first: NaiveDate, last: NaiveDate) -> Vec<NaiveDate> {
        let (from, to) = (self.start_of(first), self.start_of(last));
        from.iter_days()
            .step_by(self.span_days())
            .take_while(|d| *d <= to)
            .collect()
    }

    /// Every day covered by the bucket starting at `start`.
    pub fn days(self, start: NaiveDate) -> impl Iterator<Item = NaiveDate> {
        start.iter_days().take(self.span_days())
    }
}
