use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{round2, EnrichedOrder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnosis {
    SevereProblems,
    SupplierFailure,
    ModerateDelays,
    Acceptable,
}

impl Diagnosis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Diagnosis::SevereProblems => "Severe problems",
            Diagnosis::SupplierFailure => {
                "Likely supplier failure or poor order preparation"
            }
            Diagnosis::ModerateDelays => "Moderate delays (possible carrier issue)",
            Diagnosis::Acceptable => "Acceptable performance",
        }
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct DiagnosisRule {
    min_late_pct: f64,
    min_mean_days_late: Option<f64>,
    diagnosis: Diagnosis,
}

// Evaluated top to bottom, first match wins. The severe rule sits above the
// supplier rule even though its pct threshold is higher: it additionally
// requires a high mean delay, and a locality failing that conjunction must
// fall through to the plain pct rules.
const DIAGNOSIS_RULES: &[DiagnosisRule] = &[
    DiagnosisRule {
        min_late_pct: 40.0,
        min_mean_days_late: Some(10.0),
        diagnosis: Diagnosis::SevereProblems,
    },
    DiagnosisRule {
        min_late_pct: 25.0,
        min_mean_days_late: None,
        diagnosis: Diagnosis::SupplierFailure,
    },
    DiagnosisRule {
        min_late_pct: 15.0,
        min_mean_days_late: None,
        diagnosis: Diagnosis::ModerateDelays,
    },
];

pub fn classify(late_orders_pct: f64, mean_days_late: f64) -> Diagnosis {
    DIAGNOSIS_RULES
        .iter()
        .find(|rule| {
            late_orders_pct > rule.min_late_pct
                && rule
                    .min_mean_days_late
                    .map_or(true, |threshold| mean_days_late > threshold)
        })
        .map(|rule| rule.diagnosis)
        .unwrap_or(Diagnosis::Acceptable)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelayDiagnostic {
    pub city: String,
    pub state: String,
    pub late_count: u64,
    pub total_orders: u64,
    pub late_orders_pct: f64,
    pub mean_days_late: f64,
    pub diagnosis: Diagnosis,
}

/// Per-(city, state) delivery-delay diagnostics over enriched (delivered)
/// records. `mean_days_late` averages only the strictly positive delays and
/// is 0.0 when a locality has none, never NaN.
pub fn delay_diagnostics(enriched: &[EnrichedOrder]) -> Vec<DelayDiagnostic> {
    struct DelayAccumulator {
        late_count: u64,
        total_orders: u64,
        late_days_sum: i64,
    }

    let mut by_city: BTreeMap<(&str, &str), DelayAccumulator> = BTreeMap::new();
    for record in enriched {
        let entry = by_city
            .entry((record.order.city.as_str(), record.order.state.as_str()))
            .or_insert_with(|| DelayAccumulator {
                late_count: 0,
                total_orders: 0,
                late_days_sum: 0,
            });
        entry.total_orders += 1;
        if record.late {
            entry.late_count += 1;
            entry.late_days_sum += record.delay_days;
        }
    }

    let rows: Vec<DelayDiagnostic> = by_city
        .into_iter()
        .map(|((city, state), acc)| {
            let late_orders_pct =
                round2(acc.late_count as f64 / acc.total_orders as f64 * 100.0);
            let mean_days_late = if acc.late_count > 0 {
                acc.late_days_sum as f64 / acc.late_count as f64
            } else {
                0.0
            };
            DelayDiagnostic {
                city: city.to_string(),
                state: state.to_string(),
                late_count: acc.late_count,
                total_orders: acc.total_orders,
                late_orders_pct,
                mean_days_late,
                diagnosis: classify(late_orders_pct, mean_days_late),
            }
        })
        .collect();

    debug!(input = enriched.len(), cities = rows.len(), "delay diagnostics");
    rows
}
