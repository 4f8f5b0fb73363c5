use tracing::debug;

use crate::types::{EnrichedOrder, OrderRecord};

const SECONDS_PER_DAY: i64 = 86_400;

/// Derives `delay_days` and `late` for the delivered subset of `orders`.
///
/// `delay_days` is the floor of (delivered − estimated) in whole days, so a
/// delivery 12 hours early counts as -1 and one 12 hours late counts as 0.
/// Delivered orders missing either timestamp are ineligible for delay
/// analysis and are skipped; malformed timestamps never reach this function
/// (they fail at typed-record construction).
pub fn enrich_deliveries(orders: &[OrderRecord]) -> Vec<EnrichedOrder> {
    let enriched: Vec<EnrichedOrder> = orders
        .iter()
        .filter(|order| order.status.is_delivered())
        .filter_map(|order| {
            let delivered = order.delivered_ts?;
            let estimated = order.estimated_delivery_ts?;
            let delay_days = (delivered - estimated).num_seconds().div_euclid(SECONDS_PER_DAY);
            Some(EnrichedOrder {
                order: order.clone(),
                delay_days,
                late: delay_days > 0,
            })
        })
        .collect();

    debug!(
        input = orders.len(),
        delivered = enriched.len(),
        "enriched deliveries"
    );

    enriched
}
