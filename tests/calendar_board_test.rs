//! Day-bucket expansion: idempotence, partitioning, and ordering.

use agriops_api::schedule::calendar::{day_buckets, Schedulable};
use chrono::NaiveDate;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct Order {
    id: Uuid,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl Order {
    fn spanning(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            start: Some(start),
            end: Some(end),
        }
    }

    fn single(day: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            start: Some(day),
            end: None,
        }
    }

    fn undated() -> Self {
        Self {
            id: Uuid::new_v4(),
            start: None,
            end: None,
        }
    }
}

impl Schedulable for Order {
    fn schedule_id(&self) -> Uuid {
        self.id
    }
    fn schedule_start(&self) -> Option<NaiveDate> {
        self.start
    }
    fn schedule_end(&self) -> Option<NaiveDate> {
        self.end
    }
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn three_day_range_yields_three_buckets_each_containing_it_once() {
    let order = Order::spanning(d(2025, 12, 1), d(2025, 12, 3));
    let today = d(2025, 11, 1);

    let board = day_buckets(&[order.clone()], today);

    let days: Vec<NaiveDate> = board.upcoming.iter().map(|b| b.day).collect();
    assert_eq!(days, vec![d(2025, 12, 1), d(2025, 12, 2), d(2025, 12, 3)]);
    for bucket in &board.upcoming {
        let hits = bucket
            .entries
            .iter()
            .filter(|e| e.schedule_id() == order.id)
            .count();
        assert_eq!(hits, 1, "exactly once per spanned day");
    }

    // Re-running the expansion on the same input is idempotent.
    let again = day_buckets(&[order], today);
    let days_again: Vec<NaiveDate> = again.upcoming.iter().map(|b| b.day).collect();
    assert_eq!(days, days_again);
    assert!(again
        .upcoming
        .iter()
        .zip(&board.upcoming)
        .all(|(a, b)| a.entries.len() == b.entries.len()));
}

#[test]
fn single_dated_order_registers_on_that_day_only() {
    let with_start = Order::single(d(2025, 12, 5));
    let with_end = Order {
        id: Uuid::new_v4(),
        start: None,
        end: Some(d(2025, 12, 7)),
    };

    let board = day_buckets(&[with_start, with_end], d(2025, 12, 1));
    let days: Vec<NaiveDate> = board.upcoming.iter().map(|b| b.day).collect();
    assert_eq!(days, vec![d(2025, 12, 5), d(2025, 12, 7)]);
}

#[test]
fn undated_orders_are_excluded_without_error() {
    let board = day_buckets(&[Order::undated(), Order::undated()], d(2025, 12, 1));
    assert!(board.past.is_empty());
    assert!(board.upcoming.is_empty());
    assert_eq!(board.default_expanded, None);
}

#[test]
fn past_buckets_sort_newest_first_and_upcoming_oldest_first() {
    let today = d(2025, 12, 10);
    let orders = vec![
        Order::single(d(2025, 12, 2)),
        Order::single(d(2025, 12, 6)),
        Order::single(d(2025, 12, 14)),
        Order::single(d(2025, 12, 11)),
    ];

    let board = day_buckets(&orders, today);

    let past: Vec<NaiveDate> = board.past.iter().map(|b| b.day).collect();
    assert_eq!(past, vec![d(2025, 12, 6), d(2025, 12, 2)]);

    let upcoming: Vec<NaiveDate> = board.upcoming.iter().map(|b| b.day).collect();
    assert_eq!(upcoming, vec![d(2025, 12, 11), d(2025, 12, 14)]);
}

#[test]
fn todays_bucket_is_expanded_when_it_has_entries() {
    let today = d(2025, 12, 10);
    let board = day_buckets(
        &[Order::single(today), Order::single(d(2025, 12, 12))],
        today,
    );
    assert_eq!(board.default_expanded, Some(today));
}

#[test]
fn earliest_upcoming_bucket_is_expanded_when_today_is_empty() {
    let today = d(2025, 12, 10);
    let board = day_buckets(
        &[Order::single(d(2025, 12, 4)), Order::single(d(2025, 12, 12))],
        today,
    );
    assert_eq!(board.default_expanded, Some(d(2025, 12, 12)));
}

#[test]
fn entries_keep_input_order_within_a_bucket() {
    let day = d(2025, 12, 20);
    let first = Order::single(day);
    let second = Order::spanning(d(2025, 12, 19), d(2025, 12, 21));
    let third = Order::single(day);

    let board = day_buckets(&[first.clone(), second.clone(), third.clone()], d(2025, 12, 1));
    let bucket = board.upcoming.iter().find(|b| b.day == day).unwrap();
    let ids: Vec<Uuid> = bucket.entries.iter().map(|e| e.schedule_id()).collect();
    assert_eq!(ids, vec![first.id, second.id, third.id]);
}

#[test]
fn overlapping_orders_do_not_duplicate_each_other() {
    let a = Order::spanning(d(2025, 12, 1), d(2025, 12, 4));
    let b = Order::spanning(d(2025, 12, 3), d(2025, 12, 5));

    let board = day_buckets(&[a, b], d(2025, 11, 1));
    let overlap = board
        .upcoming
        .iter()
        .find(|bucket| bucket.day == d(2025, 12, 3))
        .unwrap();
    assert_eq!(overlap.entries.len(), 2);
    let unique: std::collections::HashSet<Uuid> =
        overlap.entries.iter().map(|e| e.schedule_id()).collect();
    assert_eq!(unique.len(), 2);
}
