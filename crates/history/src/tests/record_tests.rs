#![expect(clippy::unwrap_used, reason = "test code")]

use dealherald_core::constants::MS_PER_DAY;

use crate::HistoryRecord;

const T0: i64 = 1_700_000_000_000;

fn days(n: f64) -> i64 {
    #[allow(clippy::cast_possible_truncation, reason = "test spans are small")]
    let ms = (n * MS_PER_DAY) as i64;
    ms
}

#[test]
fn empty_record_has_no_deals_and_current_rotation_stamp() {
    let record = HistoryRecord::empty(T0);
    assert!(record.posted_deals.is_empty());
    assert_eq!(record.last_rotation, T0);
}

#[test]
fn should_rotate_at_exactly_max_age() {
    let record = HistoryRecord::empty(T0);
    assert!(record.should_rotate(7.0, T0 + days(7.0)));
}

#[test]
fn should_not_rotate_just_under_max_age() {
    let record = HistoryRecord::empty(T0);
    assert!(!record.should_rotate(7.0, T0 + days(6.99)));
}

#[test]
fn should_rotate_supports_fractional_days() {
    let record = HistoryRecord::empty(T0);
    assert!(record.should_rotate(0.5, T0 + days(0.5)));
    assert!(!record.should_rotate(0.5, T0 + days(0.49)));
}

#[test]
fn rotate_cutoff_is_strict() {
    // P3: an entry at exactly now - 7d is removed, one at now - 6.99d survives.
    let now = T0 + days(30.0);
    let mut record = HistoryRecord::empty(T0);
    record.posted_deals.insert("at-cutoff".to_owned(), now - days(7.0));
    record.posted_deals.insert("just-inside".to_owned(), now - days(6.99));

    let rotated = record.rotate(7.0, now);
    assert!(!rotated.contains("at-cutoff"));
    assert!(rotated.contains("just-inside"));
}

#[test]
fn rotate_advances_last_rotation() {
    let record = HistoryRecord::empty(T0);
    let now = T0 + days(8.0);
    let rotated = record.rotate(7.0, now);
    assert_eq!(rotated.last_rotation, now);
    assert!(rotated.last_rotation >= record.last_rotation);
}

#[test]
fn rotate_keeps_surviving_timestamps_unchanged() {
    let now = T0 + days(10.0);
    let mut record = HistoryRecord::empty(T0);
    record.posted_deals.insert("recent".to_owned(), now - days(1.0));

    let rotated = record.rotate(7.0, now);
    assert_eq!(rotated.posted_deals.get("recent").copied(), Some(now - days(1.0)));
}

#[test]
fn stats_on_empty_record() {
    let stats = HistoryRecord::empty(T0).stats();
    assert_eq!(stats.tracked, 0);
    assert_eq!(stats.oldest, None);
}

#[test]
fn stats_reports_count_and_oldest() {
    let mut record = HistoryRecord::empty(T0);
    record.posted_deals.insert("a".to_owned(), T0 + 100);
    record.posted_deals.insert("b".to_owned(), T0 + 50);
    record.posted_deals.insert("c".to_owned(), T0 + 200);

    let stats = record.stats();
    assert_eq!(stats.tracked, 3);
    assert_eq!(stats.oldest, Some(T0 + 50));
}

#[test]
fn record_round_trips_through_wire_names() {
    let mut record = HistoryRecord::empty(T0);
    record.posted_deals.insert("abc-5".to_owned(), T0 + 1);

    let json = serde_json::to_string(&record).unwrap();
    assert!(json.contains("\"postedDeals\""));
    assert!(json.contains("\"lastRotation\""));

    let back: HistoryRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}
