// crates/olist-core/src/error.rs

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("data error: {0}")]
    Data(String),

    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
