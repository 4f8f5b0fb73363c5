// crates/olist-core/src/types.rs

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, Result};

/// Timestamp layout used by the Olist CSV exports.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Created,
    Approved,
    Invoiced,
    Processing,
    Shipped,
    Delivered,
    Unavailable,
    Canceled,
    Other(String),
}

impl OrderStatus {
    /// Unknown statuses are preserved rather than rejected; the pipeline
    /// only ever branches on `Delivered`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "created" => OrderStatus::Created,
            "approved" => OrderStatus::Approved,
            "invoiced" => OrderStatus::Invoiced,
            "processing" => OrderStatus::Processing,
            "shipped" => OrderStatus::Shipped,
            "delivered" => OrderStatus::Delivered,
            "unavailable" => OrderStatus::Unavailable,
            "canceled" => OrderStatus::Canceled,
            other => OrderStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Approved => "approved",
            OrderStatus::Invoiced => "invoiced",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Unavailable => "unavailable",
            OrderStatus::Canceled => "canceled",
            OrderStatus::Other(s) => s.as_str(),
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An order row exactly as the external tabular source hands it over:
/// timestamp columns still strings, status still free text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawOrder {
    pub order_id: String,
    pub customer_id: String,
    pub order_status: String,
    pub order_purchase_timestamp: String,
    pub order_delivered_customer_date: Option<String>,
    pub order_estimated_delivery_date: Option<String>,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub customer_id: String,
    pub status: OrderStatus,
    pub purchase_ts: DateTime<Utc>,
    pub delivered_ts: Option<DateTime<Utc>>,
    pub estimated_delivery_ts: Option<DateTime<Utc>>,
    pub city: String,
    pub state: String,
}

impl OrderRecord {
    /// Converts a raw row into a typed record. A missing optional timestamp
    /// stays `None`; a present-but-malformed one is a data error naming the
    /// offending column, never a silently propagated null.
    pub fn from_raw(raw: RawOrder) -> Result<Self> {
        let purchase_ts =
            parse_timestamp("order_purchase_timestamp", &raw.order_purchase_timestamp)?;
        let delivered_ts = raw
            .order_delivered_customer_date
            .as_deref()
            .map(|value| parse_timestamp("order_delivered_customer_date", value))
            .transpose()?;
        let estimated_delivery_ts = raw
            .order_estimated_delivery_date
            .as_deref()
            .map(|value| parse_timestamp("order_estimated_delivery_date", value))
            .transpose()?;

        Ok(Self {
            order_id: raw.order_id,
            customer_id: raw.customer_id,
            status: OrderStatus::parse(&raw.order_status),
            purchase_ts,
            delivered_ts,
            estimated_delivery_ts,
            city: raw.city,
            state: raw.state,
        })
    }
}

fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| {
            AnalyticsError::Data(format!("unparseable timestamp in {field}: '{value}'"))
        })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub order_id: String,
    pub review_score: u8,
}

/// A delivered order plus the derived delay columns. Recomputed on every
/// load/filter cycle, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedOrder {
    pub order: OrderRecord,
    pub delay_days: i64,
    pub late: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateCustomers {
    pub state: String,
    pub unique_customers: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityStats {
    pub city: String,
    pub state: String,
    pub unique_customers: u64,
    pub total_orders: u64,
    pub orders_pct: f64,
    pub orders_per_customer: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateReviewStats {
    pub state: String,
    pub review_count: u64,
    pub mean_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_orders: u64,
    pub unique_customers: u64,
    pub late_pct: f64,
    pub mean_delay_days: f64,
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
