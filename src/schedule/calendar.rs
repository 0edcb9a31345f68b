//! Day-bucket expansion for calendar and accordion views.
//!
//! A work order spanning `[start, end]` appears once in every day bucket
//! it covers. Buckets are split around a caller-supplied `today` so the
//! module never reads the clock: past buckets render newest-first,
//! upcoming buckets oldest-first.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

/// Anything with an id and an optional date range can be placed on the
/// board. Implemented by the work order entity; tests use a small stub.
pub trait Schedulable {
    fn schedule_id(&self) -> Uuid;
    fn schedule_start(&self) -> Option<NaiveDate>;
    fn schedule_end(&self) -> Option<NaiveDate>;
}

/// All work orders that touch one calendar day.
#[derive(Debug, Clone, Serialize)]
pub struct DayBucket<T> {
    pub day: NaiveDate,
    pub entries: Vec<T>,
}

/// Day-indexed view over a set of work orders.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleBoard<T> {
    /// Days strictly before `today`, newest first.
    pub past: Vec<DayBucket<T>>,
    /// Today and later, oldest first.
    pub upcoming: Vec<DayBucket<T>>,
    /// The bucket a UI should open by default: today's bucket when it has
    /// entries, otherwise the earliest upcoming one.
    pub default_expanded: Option<NaiveDate>,
}

/// Expands `items` into per-day buckets partitioned around `today`.
///
/// An item with both dates registers on every day of the inclusive range;
/// with one date, on that single day; with neither, nowhere (undated work
/// orders are legal, not an error). Registration is idempotent per bucket
/// and day buckets keep the input order of their entries.
pub fn day_buckets<T>(items: &[T], today: NaiveDate) -> ScheduleBoard<T>
where
    T: Schedulable + Clone,
{
    let mut grouped: BTreeMap<NaiveDate, Vec<T>> = BTreeMap::new();

    for item in items {
        let days: Vec<NaiveDate> = match (item.schedule_start(), item.schedule_end()) {
            (Some(start), Some(end)) => span_days(start, end),
            (Some(day), None) | (None, Some(day)) => vec![day],
            (None, None) => continue,
        };

        for day in days {
            let bucket = grouped.entry(day).or_default();
            if !bucket.iter().any(|e| e.schedule_id() == item.schedule_id()) {
                bucket.push(item.clone());
            }
        }
    }

    let mut past = Vec::new();
    let mut upcoming = Vec::new();
    for (day, entries) in grouped {
        let bucket = DayBucket { day, entries };
        if day < today {
            past.push(bucket);
        } else {
            upcoming.push(bucket);
        }
    }
    past.reverse();

    let default_expanded = upcoming
        .first()
        .filter(|b| b.day == today && !b.entries.is_empty())
        .or_else(|| upcoming.iter().find(|b| !b.entries.is_empty()))
        .map(|b| b.day);

    ScheduleBoard {
        past,
        upcoming,
        default_expanded,
    }
}

/// Every calendar day in `[start, end]` inclusive. An inverted range
/// yields just the start day rather than an empty span, mirroring how a
/// single-date order registers once.
fn span_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if end < start {
        return vec![start];
    }
    let mut days = Vec::with_capacity((end - start).num_days() as usize + 1);
    let mut day = start;
    while day <= end {
        days.push(day);
        day += Duration::days(1);
    }
    days
}
