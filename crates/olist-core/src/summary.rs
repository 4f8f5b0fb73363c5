use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{round2, EnrichedOrder, KpiSummary, OrderRecord};

/// Headline metrics for the dashboard's home page: order volume, distinct
/// customers, and the overall lateness picture for the delivered subset.
/// Both percentages are 0 (not NaN) when the relevant subset is empty.
pub fn kpi_summary(orders: &[OrderRecord], delivered: &[EnrichedOrder]) -> KpiSummary {
    let unique_customers = orders
        .iter()
        .map(|order| order.customer_id.as_str())
        .collect::<HashSet<_>>()
        .len() as u64;

    let late_pct = if delivered.is_empty() {
        0.0
    } else {
        let late_count = delivered.iter().filter(|record| record.late).count();
        round2(late_count as f64 / delivered.len() as f64 * 100.0)
    };

    let late_days: Vec<i64> = delivered
        .iter()
        .filter(|record| record.delay_days > 0)
        .map(|record| record.delay_days)
        .collect();
    let mean_delay_days = if late_days.is_empty() {
        0.0
    } else {
        round2(late_days.iter().sum::<i64>() as f64 / late_days.len() as f64)
    };

    KpiSummary {
        total_orders: orders.len() as u64,
        unique_customers,
        late_pct,
        mean_delay_days,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearTrend {
    pub slope: f64,
    pub intercept: f64,
}

/// Least-squares line through (xs, ys) for the delay scatter overlay.
/// `None` for mismatched or too-short inputs, or when x has no variance.
pub fn linear_trend(xs: &[f64], ys: &[f64]) -> Option<LinearTrend> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let ss_xx: f64 = xs.iter().map(|x| (x - mean_x).powi(2)).sum();
    if ss_xx == 0.0 {
        return None;
    }
    let ss_xy: f64 = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();

    let slope = ss_xy / ss_xx;
    Some(LinearTrend {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

/// Pearson correlation coefficient, `None` when either side is degenerate.
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let ss_xx: f64 = xs.iter().map(|x| (x - mean_x).powi(2)).sum();
    let ss_yy: f64 = ys.iter().map(|y| (y - mean_y).powi(2)).sum();
    if ss_xx == 0.0 || ss_yy == 0.0 {
        return None;
    }
    let ss_xy: f64 = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();

    Some(ss_xy / (ss_xx * ss_yy).sqrt())
}
