use std::collections::HashMap;

use geojson::GeoJson;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AnalyticsError, Result};
use crate::types::StateCustomers;

/// Property carrying the state abbreviation in the Brazilian state-boundary
/// GeoJSON shipped with the dashboard.
pub const STATE_KEY_PROPERTY: &str = "abbrev_state";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateFill {
    pub state: String,
    pub unique_customers: u64,
}

/// Attaches per-state customer counts to every polygon of a state-boundary
/// FeatureCollection, in feature order. States with no data fill with 0 so
/// the choropleth renderer paints every polygon. Rendering stays external;
/// this is only the data merge.
pub fn state_fill_counts(
    boundaries: &GeoJson,
    counts: &[StateCustomers],
) -> Result<Vec<StateFill>> {
    let GeoJson::FeatureCollection(collection) = boundaries else {
        return Err(AnalyticsError::Data(
            "state boundaries must be a GeoJSON FeatureCollection".to_string(),
        ));
    };

    let count_by_state: HashMap<&str, u64> = counts
        .iter()
        .map(|row| (row.state.as_str(), row.unique_customers))
        .collect();

    let mut fills = Vec::with_capacity(collection.features.len());
    for feature in &collection.features {
        let state = feature
            .property(STATE_KEY_PROPERTY)
            .and_then(|value| value.as_str())
            .ok_or_else(|| {
                AnalyticsError::Data(format!(
                    "boundary feature missing string property '{STATE_KEY_PROPERTY}'"
                ))
            })?;
        fills.push(StateFill {
            state: state.to_string(),
            unique_customers: count_by_state.get(state).copied().unwrap_or(0),
        });
    }

    debug!(features = fills.len(), states_with_data = counts.len(), "merged state fills");
    Ok(fills)
}
