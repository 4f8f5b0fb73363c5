use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::types::{EnrichedOrder, ReviewRecord, StateReviewStats};

/// Per-state review count and mean score over on-time deliveries.
///
/// The join from reviews toward orders is an explicit inner join on order
/// id: a review whose order was late, undelivered, or simply unknown is
/// dropped before grouping, so no "unknown state" group can ever appear.
pub fn review_stats(
    delivered: &[EnrichedOrder],
    reviews: &[ReviewRecord],
) -> Vec<StateReviewStats> {
    let state_by_order: HashMap<&str, &str> = delivered
        .iter()
        .filter(|record| !record.late)
        .map(|record| (record.order.order_id.as_str(), record.order.state.as_str()))
        .collect();

    struct ReviewAccumulator {
        count: u64,
        score_sum: u64,
    }

    let mut by_state: BTreeMap<&str, ReviewAccumulator> = BTreeMap::new();
    let mut dropped = 0usize;
    for review in reviews {
        let Some(&state) = state_by_order.get(review.order_id.as_str()) else {
            dropped += 1;
            continue;
        };
        let entry = by_state.entry(state).or_insert_with(|| ReviewAccumulator {
            count: 0,
            score_sum: 0,
        });
        entry.count += 1;
        entry.score_sum += u64::from(review.review_score);
    }

    let rows: Vec<StateReviewStats> = by_state
        .into_iter()
        .map(|(state, acc)| StateReviewStats {
            state: state.to_string(),
            review_count: acc.count,
            mean_score: acc.score_sum as f64 / acc.count as f64,
        })
        .collect();

    debug!(
        reviews = reviews.len(),
        matched = reviews.len() - dropped,
        states = rows.len(),
        "review statistics"
    );
    rows
}
