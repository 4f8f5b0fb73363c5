use chrono::NaiveDate;

use crate::error::{AnalyticsError, Result};
use crate::types::{EnrichedOrder, OrderRecord};

/// Inclusive calendar-date interval over purchase timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(AnalyticsError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Seam for anything carrying a purchase timestamp, so the same filter works
/// over raw and enriched order collections.
pub trait PurchaseDated {
    fn purchase_date(&self) -> NaiveDate;
}

impl PurchaseDated for OrderRecord {
    fn purchase_date(&self) -> NaiveDate {
        self.purchase_ts.date_naive()
    }
}

impl PurchaseDated for EnrichedOrder {
    fn purchase_date(&self) -> NaiveDate {
        self.order.purchase_date()
    }
}

/// Keeps rows whose purchase date falls inside `range`. Stateless; the input
/// is never mutated and an empty result is valid.
pub fn filter_by_date<T>(records: &[T], range: &DateRange) -> Vec<T>
where
    T: PurchaseDated + Clone,
{
    records
        .iter()
        .filter(|record| range.contains(record.purchase_date()))
        .cloned()
        .collect()
}

/// Earliest and latest purchase date in the dataset, used by the dashboard
/// for its slider bounds. `None` for an empty dataset.
pub fn purchase_date_extent<T: PurchaseDated>(records: &[T]) -> Option<(NaiveDate, NaiveDate)> {
    let mut dates = records.iter().map(|record| record.purchase_date());
    let first = dates.next()?;
    let (min, max) = dates.fold((first, first), |(min, max), date| {
        (min.min(date), max.max(date))
    });
    Some((min, max))
}
