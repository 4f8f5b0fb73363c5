use chrono::{TimeZone, Utc};

use olist_core::delays::{classify, delay_diagnostics, Diagnosis};
use olist_core::types::{EnrichedOrder, OrderRecord, OrderStatus};

fn enriched(id: &str, city: &str, state: &str, delay_days: i64) -> EnrichedOrder {
    EnrichedOrder {
        order: OrderRecord {
            order_id: id.to_string(),
            customer_id: format!("cust-{id}"),
            status: OrderStatus::Delivered,
            purchase_ts: Utc.with_ymd_and_hms(2018, 2, 1, 9, 0, 0).unwrap(),
            delivered_ts: None,
            estimated_delivery_ts: None,
            city: city.to_string(),
            state: state.to_string(),
        },
        delay_days,
        late: delay_days > 0,
    }
}

#[test]
fn severe_rule_requires_the_conjunction() {
    assert_eq!(classify(41.0, 12.0), Diagnosis::SevereProblems);
    // High pct but low mean delay falls through to the supplier rule, not severe.
    assert_eq!(classify(41.0, 5.0), Diagnosis::SupplierFailure);
}

#[test]
fn thresholds_are_strict() {
    assert_eq!(classify(40.0, 20.0), Diagnosis::SupplierFailure);
    assert_eq!(classify(25.0, 0.0), Diagnosis::ModerateDelays);
    assert_eq!(classify(15.0, 0.0), Diagnosis::Acceptable);
    assert_eq!(classify(15.01, 0.0), Diagnosis::ModerateDelays);
    assert_eq!(classify(0.0, 0.0), Diagnosis::Acceptable);
}

#[test]
fn diagnosis_labels_match_the_dashboard() {
    assert_eq!(Diagnosis::SevereProblems.as_str(), "Severe problems");
    assert_eq!(
        Diagnosis::SupplierFailure.as_str(),
        "Likely supplier failure or poor order preparation"
    );
    assert_eq!(
        Diagnosis::ModerateDelays.as_str(),
        "Moderate delays (possible carrier issue)"
    );
    assert_eq!(Diagnosis::Acceptable.as_str(), "Acceptable performance");
}

#[test]
fn one_late_order_out_of_three() {
    let records = vec![
        enriched("o1", "A", "S", 0),
        enriched("o2", "A", "S", -2),
        enriched("o3", "A", "S", 5),
    ];

    let rows = delay_diagnostics(&records);
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row.city, "A");
    assert_eq!(row.state, "S");
    assert_eq!(row.late_count, 1);
    assert_eq!(row.total_orders, 3);
    assert_eq!(row.late_orders_pct, 33.33);
    assert_eq!(row.mean_days_late, 5.0);
    assert_eq!(row.diagnosis, Diagnosis::ModerateDelays);
}

#[test]
fn mean_days_late_is_zero_when_nothing_is_late() {
    let records = vec![
        enriched("o1", "B", "S", -1),
        enriched("o2", "B", "S", 0),
    ];

    let rows = delay_diagnostics(&records);
    assert_eq!(rows[0].late_count, 0);
    assert_eq!(rows[0].late_orders_pct, 0.0);
    assert_eq!(rows[0].mean_days_late, 0.0);
    assert!(rows[0].mean_days_late.is_finite());
    assert_eq!(rows[0].diagnosis, Diagnosis::Acceptable);
}

#[test]
fn localities_are_grouped_by_city_and_state() {
    let records = vec![
        enriched("o1", "dup", "SP", 3),
        enriched("o2", "dup", "MG", -1),
    ];

    let rows = delay_diagnostics(&records);
    assert_eq!(rows.len(), 2);

    let sp = rows.iter().find(|row| row.state == "SP").unwrap();
    assert_eq!(sp.late_orders_pct, 100.0);
    let mg = rows.iter().find(|row| row.state == "MG").unwrap();
    assert_eq!(mg.late_orders_pct, 0.0);
}

#[test]
fn empty_input_yields_empty_table() {
    assert!(delay_diagnostics(&[]).is_empty());
}

#[test]
fn mean_only_covers_strictly_positive_delays() {
    // Early deliveries must not drag the late mean down.
    let records = vec![
        enriched("o1", "C", "S", -10),
        enriched("o2", "C", "S", 4),
        enriched("o3", "C", "S", 8),
    ];

    let rows = delay_diagnostics(&records);
    assert_eq!(rows[0].mean_days_late, 6.0);
    assert_eq!(rows[0].late_orders_pct, 66.67);
}
