use chrono::{NaiveDate, TimeZone, Utc};

use olist_core::error::AnalyticsError;
use olist_core::filter::{filter_by_date, purchase_date_extent, DateRange, PurchaseDated};
use olist_core::types::{OrderRecord, OrderStatus};

fn order_on(id: &str, year: i32, month: u32, day: u32) -> OrderRecord {
    OrderRecord {
        order_id: id.to_string(),
        customer_id: format!("cust-{id}"),
        status: OrderStatus::Created,
        purchase_ts: Utc.with_ymd_and_hms(year, month, day, 23, 59, 59).unwrap(),
        delivered_ts: None,
        estimated_delivery_ts: None,
        city: "rio de janeiro".to_string(),
        state: "RJ".to_string(),
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn bounds_are_inclusive_on_the_date_component() {
    let orders = vec![
        order_on("before", 2018, 1, 31),
        order_on("start", 2018, 2, 1),
        order_on("middle", 2018, 2, 14),
        order_on("end", 2018, 2, 28),
        order_on("after", 2018, 3, 1),
    ];
    let range = DateRange::new(date(2018, 2, 1), date(2018, 2, 28)).unwrap();

    let kept = filter_by_date(&orders, &range);
    let ids: Vec<&str> = kept.iter().map(|o| o.order_id.as_str()).collect();
    assert_eq!(ids, vec!["start", "middle", "end"]);
    for record in &kept {
        assert!(range.contains(record.purchase_date()));
    }
}

#[test]
fn filtering_is_idempotent() {
    let orders: Vec<OrderRecord> = (1..=20).map(|d| order_on(&format!("o{d}"), 2018, 2, d)).collect();
    let range = DateRange::new(date(2018, 2, 5), date(2018, 2, 15)).unwrap();

    let once = filter_by_date(&orders, &range);
    let twice = filter_by_date(&once, &range);
    assert_eq!(once.len(), twice.len());
    assert!(once
        .iter()
        .zip(&twice)
        .all(|(a, b)| a.order_id == b.order_id));
}

#[test]
fn single_day_range_is_valid() {
    let orders = vec![order_on("a", 2018, 2, 14), order_on("b", 2018, 2, 15)];
    let range = DateRange::new(date(2018, 2, 14), date(2018, 2, 14)).unwrap();

    let kept = filter_by_date(&orders, &range);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].order_id, "a");
}

#[test]
fn empty_result_is_not_an_error() {
    let orders = vec![order_on("a", 2018, 2, 14)];
    let range = DateRange::new(date(2019, 1, 1), date(2019, 12, 31)).unwrap();
    assert!(filter_by_date(&orders, &range).is_empty());
}

#[test]
fn start_after_end_is_rejected() {
    let err = DateRange::new(date(2018, 3, 1), date(2018, 2, 1)).unwrap_err();
    match err {
        AnalyticsError::InvalidRange { start, end } => {
            assert_eq!(start, date(2018, 3, 1));
            assert_eq!(end, date(2018, 2, 1));
        }
        other => panic!("expected invalid range, got {other:?}"),
    }
}

#[test]
fn extent_spans_min_and_max_purchase_dates() {
    let orders = vec![
        order_on("a", 2017, 11, 3),
        order_on("b", 2018, 6, 20),
        order_on("c", 2016, 9, 4),
    ];
    assert_eq!(
        purchase_date_extent(&orders),
        Some((date(2016, 9, 4), date(2018, 6, 20)))
    );
    assert_eq!(purchase_date_extent::<OrderRecord>(&[]), None);
}
