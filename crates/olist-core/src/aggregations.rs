use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::types::{round2, CityStats, OrderRecord, StateCustomers};

pub const DEFAULT_TOP_STATES: usize = 5;

/// Top `n` states by count of distinct customers, descending. Ties break by
/// state identifier ascending so the ranking is reproducible.
pub fn top_states(orders: &[OrderRecord], n: usize) -> Vec<StateCustomers> {
    let mut customers_by_state: BTreeMap<&str, HashSet<&str>> = BTreeMap::new();
    for order in orders {
        customers_by_state
            .entry(order.state.as_str())
            .or_default()
            .insert(order.customer_id.as_str());
    }

    let mut rows: Vec<StateCustomers> = customers_by_state
        .into_iter()
        .map(|(state, customers)| StateCustomers {
            state: state.to_string(),
            unique_customers: customers.len() as u64,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.unique_customers
            .cmp(&a.unique_customers)
            .then_with(|| a.state.cmp(&b.state))
    });
    rows.truncate(n);

    debug!(input = orders.len(), states = rows.len(), "ranked top states");
    rows
}

/// One row per (city, state): unique customers, total orders, share of all
/// orders in the filtered set, and orders per customer. No ranking is applied
/// here; pair with [`top_cities`] for the dashboard's top-10 views.
pub fn city_ranking(orders: &[OrderRecord]) -> Vec<CityStats> {
    struct CityAccumulator<'a> {
        customers: HashSet<&'a str>,
        total_orders: u64,
    }

    let mut by_city: BTreeMap<(&str, &str), CityAccumulator<'_>> = BTreeMap::new();
    for order in orders {
        let entry = by_city
            .entry((order.city.as_str(), order.state.as_str()))
            .or_insert_with(|| CityAccumulator {
                customers: HashSet::new(),
                total_orders: 0,
            });
        entry.customers.insert(order.customer_id.as_str());
        entry.total_orders += 1;
    }

    let grand_total: u64 = by_city.values().map(|acc| acc.total_orders).sum();

    let rows: Vec<CityStats> = by_city
        .into_iter()
        .map(|((city, state), acc)| {
            let unique_customers = acc.customers.len() as u64;
            let orders_pct = if grand_total > 0 {
                round2(acc.total_orders as f64 / grand_total as f64 * 100.0)
            } else {
                0.0
            };
            let orders_per_customer = if unique_customers > 0 {
                round2(acc.total_orders as f64 / unique_customers as f64)
            } else {
                0.0
            };
            CityStats {
                city: city.to_string(),
                state: state.to_string(),
                unique_customers,
                total_orders: acc.total_orders,
                orders_pct,
                orders_per_customer,
            }
        })
        .collect();

    debug!(input = orders.len(), cities = rows.len(), "ranked cities");
    rows
}

/// Sort key for the composable top-N step over city aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CityRankBy {
    UniqueCustomers,
    TotalOrders,
    OrdersShare,
}

/// First `n` city rows after a stable descending sort on the chosen column.
pub fn top_cities(rows: &[CityStats], by: CityRankBy, n: usize) -> Vec<CityStats> {
    let mut ranked = rows.to_vec();
    match by {
        CityRankBy::UniqueCustomers => {
            ranked.sort_by(|a, b| b.unique_customers.cmp(&a.unique_customers));
        }
        CityRankBy::TotalOrders => {
            ranked.sort_by(|a, b| b.total_orders.cmp(&a.total_orders));
        }
        CityRankBy::OrdersShare => {
            // Shares are rounded to 2 decimals, so distinct order counts can
            // collide; break those ties on the underlying counts.
            ranked.sort_by(|a, b| {
                b.orders_pct
                    .partial_cmp(&a.orders_pct)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| b.total_orders.cmp(&a.total_orders))
            });
        }
    }
    ranked.truncate(n);
    ranked
}

/// Restricts a city aggregate to one state, mirroring the dashboard's state
/// dropdown.
pub fn cities_in_state(rows: &[CityStats], state: &str) -> Vec<CityStats> {
    rows.iter()
        .filter(|row| row.state == state)
        .cloned()
        .collect()
}
